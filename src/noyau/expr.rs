// src/noyau/expr.rs
//
// AST de l’évaluateur.
// - Nombre    : littéral exact (rationnel)
// - Constante : π, e (toujours approchées à l’évaluation)
// - Appel     : fonction unaire nommée (sin, ln, sqrt, …)
//
// Pas de variables : un identifiant inconnu est refusé dès from_rpn.

use num_rational::BigRational;
use num_traits::{One, Signed};

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    pub fn valeur(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Logarithme décimal.
    Log,
    /// Logarithme népérien.
    Ln,
    Sqrt,
    Abs,
    Exp,
}

impl Fonction {
    pub const TOUTES: [Fonction; 11] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
        Self::Abs,
        Self::Exp,
    ];

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Self::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Exp => "exp",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(BigRational),
    Constante(Constante),

    Neg(Box<Expr>),
    Fact(Box<Expr>),
    Appel(Fonction, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

/// Affichage entièrement parenthésé (logs) : la structure de l’arbre est visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else if r.is_negative() {
                    write!(f, "({n}/{d})")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Expr::Constante(Constante::Pi) => write!(f, "π"),
            Expr::Constante(Constante::E) => write!(f, "e"),
            Expr::Neg(x) => write!(f, "-({x})"),
            Expr::Fact(x) => write!(f, "({x})!"),
            Expr::Appel(func, x) => write!(f, "{}({x})", func.nom()),
            Expr::Add(a, b) => write!(f, "({a}+{b})"),
            Expr::Sub(a, b) => write!(f, "({a}-{b})"),
            Expr::Mul(a, b) => write!(f, "({a}*{b})"),
            Expr::Div(a, b) => write!(f, "({a}/{b})"),
            Expr::Pow(a, b) => write!(f, "({a}^{b})"),
        }
    }
}
