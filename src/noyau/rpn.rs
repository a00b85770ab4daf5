// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - fonction connue (sin, cos, …) => opérateur unaire, DOIT être suivi de '('
//    - constante (pi, e)             => atome
//    - sinon                         => erreur (pas de variables)
// - Moins unaire : si '-' arrive quand on n’attend PAS une valeur => Tok::Neg
//   (préfixe, plus faible que ^, plus fort que * et /). Plus unaire : ignoré.
// - Factorielle '!' : postfixe, sort immédiatement (précédence maximale).
// - Multiplication implicite : valeur suivie d’un nombre, d’un identifiant ou de '('
//   => on injecte '*' ("2pi", "2(3)", "3sin(30)").

use super::erreur::ErreurEval;
use super::expr::{Constante, Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

fn est_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if Fonction::depuis_nom(name).is_some())
}

/// Dépile ce qui doit sortir avant `tok`, puis empile `tok`.
fn pousser_operateur(tok: Tok, ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    // dépile tant que:
    // - on n'est pas bloqué par '('
    // - et on ne traverse pas une fonction (fonction reste collée à son argument)
    // - et la précédence/associativité exige de sortir l'opérateur du haut
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) || est_fonction(top) {
            break;
        }

        let p_top = precedence(top);
        let p_tok = precedence(&tok);

        let doit_pop = if is_right_associative(&tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        match ops.pop() {
            Some(op) if doit_pop => out.push(op),
            Some(op) => {
                ops.push(op);
                break;
            }
            None => break,
        }
    }

    ops.push(tok);
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Ident("sin"), LPar, Ident("pi"), RPar]
///   rpn:    [Num(2), Ident("pi"), Ident("sin"), Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    if tokens.is_empty() {
        return Err(ErreurEval::Vide);
    }

    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et la multiplication implicite.
    let mut prev_was_value = false;

    for (idx, tok) in tokens.iter().cloned().enumerate() {
        let debut_de_valeur = matches!(tok, Tok::Num(_) | Tok::Ident(_) | Tok::LPar);
        if debut_de_valeur && prev_was_value {
            pousser_operateur(Tok::Star, &mut ops, &mut out);
        }

        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if Fonction::depuis_nom(&name).is_some() {
                    if !matches!(tokens.get(idx + 1), Some(Tok::LPar)) {
                        return Err(ErreurEval::AppelSansParenthese(name));
                    }
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else if Constante::depuis_nom(&name).is_some() {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                } else {
                    return Err(ErreurEval::SymboleInconnu(name));
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // "()" ou "2+)"
                if !prev_was_value {
                    return Err(ErreurEval::ExpressionInvalide);
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurEval::ParentheseInattendue);
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(est_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Bang => {
                if !prev_was_value {
                    return Err(ErreurEval::ExpressionInvalide);
                }
                out.push(tok);
            }

            Tok::Minus if !prev_was_value => {
                // préfixe : ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurEval::ExpressionInvalide);
                }
                pousser_operateur(tok, &mut ops, &mut out);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurEval::ExpressionInvalide),
        }
    }

    // opérateur pendant en fin d’entrée ("2+", "sin(", "-")
    if !prev_was_value {
        return Err(if ops.iter().any(|t| matches!(t, Tok::LPar)) {
            ErreurEval::ParentheseNonFermee
        } else {
            ErreurEval::ExpressionInvalide
        });
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::ParentheseNonFermee);
        }
        out.push(op);
    }

    Ok(out)
}

/// Profondeur maximale de l’arbre (évaluation et libération sont récursives).
pub const MAX_PROFONDEUR: usize = 256;

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de la pile porte la profondeur de son sous-arbre ; un nœud qui
/// dépasserait `MAX_PROFONDEUR` est refusé avant d’être construit.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let noeud = |p: usize| {
        if p > MAX_PROFONDEUR {
            Err(ErreurEval::TropProfonde(MAX_PROFONDEUR))
        } else {
            Ok(p)
        }
    };

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push((Expr::Nombre(r), 1)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                let (a, pa) = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                let p = noeud(pa.max(pb) + 1)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push((e, p));
            }

            Tok::Neg => {
                let (x, px) = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                st.push((Expr::Neg(Box::new(x)), noeud(px + 1)?));
            }

            Tok::Bang => {
                let (x, px) = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                st.push((Expr::Fact(Box::new(x)), noeud(px + 1)?));
            }

            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(&name) {
                    let (x, px) = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                    st.push((Expr::Appel(f, Box::new(x)), noeud(px + 1)?));
                } else if let Some(c) = Constante::depuis_nom(&name) {
                    st.push((Expr::Constante(c), 1));
                } else {
                    return Err(ErreurEval::SymboleInconnu(name));
                }
            }

            Tok::LPar | Tok::RPar => return Err(ErreurEval::ExpressionInvalide),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurEval::ExpressionInvalide),
    }
}
