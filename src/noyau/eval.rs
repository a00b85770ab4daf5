//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> valeur (exacte si possible) -> f64 fini
//!
//! L’unité d’angle est un paramètre de l’évaluation : trig directe lit son argument
//! dans cette unité, trig inverse rend son résultat dans cette unité.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::erreur::ErreurEval;
use super::expr::{Expr, Fonction};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};
use super::valeur::Valeur;
use super::UniteAngle;

/// API publique : évalue une expression texte jusqu’à un nombre fini.
pub fn eval_expression(expr_str: &str, unite: UniteAngle) -> Result<f64, ErreurEval> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::Vide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    tracing::trace!(rpn = %format_tokens(&rpn), "RPN");

    // 3) AST (Expr)
    let expr = from_rpn(&rpn)?;
    tracing::trace!(%expr, "arbre");

    // 4) Valeur
    evaluer(&expr, unite)?.finie()
}

/// Évaluation récursive de l’arbre.
pub fn evaluer(expr: &Expr, unite: UniteAngle) -> Result<Valeur, ErreurEval> {
    match expr {
        Expr::Nombre(r) => Ok(Valeur::Exact(r.clone())),
        Expr::Constante(c) => Ok(Valeur::Approx(c.valeur())),

        Expr::Neg(x) => Ok(evaluer(x, unite)?.neg()),
        Expr::Fact(x) => evaluer(x, unite)?.factorielle(),

        Expr::Add(a, b) => Ok(evaluer(a, unite)?.add(evaluer(b, unite)?)),
        Expr::Sub(a, b) => Ok(evaluer(a, unite)?.sub(evaluer(b, unite)?)),
        Expr::Mul(a, b) => Ok(evaluer(a, unite)?.mul(evaluer(b, unite)?)),
        Expr::Div(a, b) => evaluer(a, unite)?.div(evaluer(b, unite)?),
        Expr::Pow(a, b) => evaluer(a, unite)?.pow(evaluer(b, unite)?),

        Expr::Appel(f, x) => appliquer_fonction(*f, evaluer(x, unite)?, unite),
    }
}

fn appliquer_fonction(f: Fonction, x: Valeur, unite: UniteAngle) -> Result<Valeur, ErreurEval> {
    use Fonction::*;

    if matches!(f, Sin | Cos | Tan) && unite == UniteAngle::Degres {
        if let Valeur::Exact(deg) = &x {
            if let Some(v) = trig_speciale_degres(f, deg)? {
                return Ok(v);
            }
        }
    }

    let v = x.to_f64();
    let r = match f {
        Sin => unite.vers_radians(v).sin(),
        Cos => unite.vers_radians(v).cos(),
        Tan => unite.vers_radians(v).tan(),

        Asin | Acos if !(-1.0..=1.0).contains(&v) => return Err(ErreurEval::Domaine(f.nom())),
        Asin => unite.depuis_radians(v.asin()),
        Acos => unite.depuis_radians(v.acos()),
        Atan => unite.depuis_radians(v.atan()),

        Log | Ln if v < 0.0 => return Err(ErreurEval::Domaine(f.nom())),
        Log => v.log10(),
        Ln => v.ln(),

        Sqrt => return x.sqrt(),
        Abs => return Ok(x.abs()),
        Exp => v.exp(),
    };

    // log(0) = -inf, exp(1000) = inf : rejeté plus tard par finie()
    Ok(Valeur::Approx(r))
}

/// Angles spéciaux en degrés (argument exact) : valeurs rationnelles exactes.
///
/// Retour:
/// - Ok(Some(v)) si reconnu (0, ±1/2, ±1)
/// - Err(Domaine) pour tan(90° + k·180°)
/// - Ok(None) si non reconnu (on passe par f64)
fn trig_speciale_degres(f: Fonction, deg: &BigRational) -> Result<Option<Valeur>, ErreurEval> {
    let reduit = mod_rationnel(deg, 360);
    if !reduit.is_integer() {
        return Ok(None);
    }
    let Some(a) = reduit.to_integer().to_i64() else {
        return Ok(None);
    };

    let demi = |signe: i64| Valeur::Exact(BigRational::new(BigInt::from(signe), BigInt::from(2)));

    let v = match (f, a) {
        (Fonction::Sin, 0 | 180) => Valeur::entier(0),
        (Fonction::Sin, 30 | 150) => demi(1),
        (Fonction::Sin, 90) => Valeur::entier(1),
        (Fonction::Sin, 210 | 330) => demi(-1),
        (Fonction::Sin, 270) => Valeur::entier(-1),

        (Fonction::Cos, 0) => Valeur::entier(1),
        (Fonction::Cos, 60 | 300) => demi(1),
        (Fonction::Cos, 90 | 270) => Valeur::entier(0),
        (Fonction::Cos, 120 | 240) => demi(-1),
        (Fonction::Cos, 180) => Valeur::entier(-1),

        (Fonction::Tan, 0 | 180) => Valeur::entier(0),
        (Fonction::Tan, 45 | 225) => Valeur::entier(1),
        (Fonction::Tan, 135 | 315) => Valeur::entier(-1),
        (Fonction::Tan, 90 | 270) => return Err(ErreurEval::Domaine("tan")),

        _ => return Ok(None),
    };

    Ok(Some(v))
}

/// r mod p, ramené dans [0, p).
fn mod_rationnel(r: &BigRational, periode: i64) -> BigRational {
    if r.is_zero() {
        return BigRational::zero();
    }
    let p = BigRational::from_integer(BigInt::from(periode));
    let q = (r / &p).floor();
    r - q * p
}
