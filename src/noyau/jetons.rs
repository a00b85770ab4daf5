// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreur::ErreurEval;

/// Garde-fou : au-delà, on refuse (anti-gel, profondeur d’arbre bornée).
pub const MAX_JETONS: usize = 2048;

/// Borne sur l’exposant d’une notation scientifique (1e400 reste calculable, 1e99999 non).
const MAX_EXPOSANT_LITTERAL: u32 = 4000;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    // Fonctions + constantes (pi, e). Le passage RPN -> Expr décide.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (factorielle, postfixe)

    LPar,
    RPar,

    // Produit seulement par to_rpn : moins unaire.
    Neg,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers et décimaux (12, 12.5, .5, 2.)
/// - notation scientifique (1.5e3, 2e-4) ; "2e" seul = 2·e (multiplication implicite)
/// - opérateurs + - * / ^ !
/// - parenthèses ( )
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt"))
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Ident("pi".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
        } else if c.is_ascii_digit() || c == '.' {
            let (r, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(r));
            i = fin;
        } else {
            return Err(ErreurEval::CaractereInattendu(c));
        }

        if out.len() > MAX_JETONS {
            return Err(ErreurEval::TropLongue(out.len()));
        }
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `debut`. Retourne (valeur exacte, index de fin).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(BigRational, usize), ErreurEval> {
    let mut i = debut;

    let mut chiffres = String::new();
    while i < chars.len() && chars[i].is_ascii_digit() {
        chiffres.push(chars[i]);
        i += 1;
    }

    let mut decimales = String::new();
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            decimales.push(chars[i]);
            i += 1;
        }
        // "1.2.3"
        if i < chars.len() && chars[i] == '.' {
            let brut: String = chars[debut..=i].iter().collect();
            return Err(ErreurEval::NombreInvalide(brut));
        }
    }

    if chiffres.is_empty() && decimales.is_empty() {
        return Err(ErreurEval::NombreInvalide(".".to_string()));
    }

    let invalide = || ErreurEval::NombreInvalide(chars[debut..i].iter().collect());

    // mantisse entière = chiffres ++ décimales, puis / 10^len(décimales)
    let mantisse_txt = format!("{chiffres}{decimales}");
    let mantisse = BigInt::parse_bytes(mantisse_txt.as_bytes(), 10).ok_or_else(invalide)?;
    let echelle = BigInt::from(10).pow(decimales.len() as u32);
    let mut r = BigRational::new(mantisse, echelle);

    // exposant : seulement si 'e' est suivi d’un chiffre (ou d’un signe puis d’un chiffre)
    if let Some((negatif, exp_debut)) = debut_exposant(chars, i) {
        let mut j = exp_debut;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        let exp_txt: String = chars[exp_debut..j].iter().collect();
        i = j;

        let exp: u32 = exp_txt
            .parse()
            .ok()
            .filter(|e| *e <= MAX_EXPOSANT_LITTERAL)
            .ok_or_else(|| ErreurEval::NombreInvalide(chars[debut..i].iter().collect()))?;

        let p = BigRational::from_integer(BigInt::from(10).pow(exp));
        if negatif {
            r /= p;
        } else {
            r *= p;
        }
    }

    Ok((r, i))
}

fn debut_exposant(chars: &[char], i: usize) -> Option<(bool, usize)> {
    let c = *chars.get(i)?;
    if c != 'e' && c != 'E' {
        return None;
    }
    match chars.get(i + 1) {
        Some(d) if d.is_ascii_digit() => Some((false, i + 1)),
        Some('+') | Some('-') => {
            let suivant = chars.get(i + 2)?;
            if suivant.is_ascii_digit() {
                Some((chars[i + 1] == '-', i + 2))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Format utilitaire (logs) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
