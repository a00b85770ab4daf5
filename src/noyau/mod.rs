//! Noyau de calcul CECAL
//!
//! Organisation interne :
//! - erreur.rs   : ErreurEval (une variante par cause)
//! - jetons.rs   : tokenisation (nombres exacts, identifiants, opérateurs)
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST (fonctions, constantes)
//! - valeur.rs   : arithmétique exacte / approchée
//! - eval.rs     : pipeline complet + unité d’angle
//! - format.rs   : nombre -> texte affiché
//!
//! L’UI ne voit que le trait `Evaluateur` : le noyau est injecté, jamais global.

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

use serde::Deserialize;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::eval_expression;
pub use format::format_nombre;

/// Unité d’angle des fonctions trigonométriques.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum UniteAngle {
    #[default]
    #[serde(rename = "rad")]
    Radians,
    #[serde(rename = "deg")]
    Degres,
}

impl UniteAngle {
    pub fn basculer(self) -> Self {
        match self {
            Self::Radians => Self::Degres,
            Self::Degres => Self::Radians,
        }
    }

    /// Étiquette du bouton (mode courant).
    pub fn label(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degres => "DEG",
        }
    }

    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            Self::Radians => x,
            Self::Degres => x.to_radians(),
        }
    }

    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            Self::Radians => x,
            Self::Degres => x.to_degrees(),
        }
    }
}

/// Options de configuration transmises à l’évaluateur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptionsEvaluateur {
    pub unite_angle: UniteAngle,
}

/// Capacité d’évaluation injectée dans le contrôleur.
pub trait Evaluateur {
    fn evaluate(&self, expression: &str) -> Result<f64, ErreurEval>;
    fn configure(&mut self, options: OptionsEvaluateur);
}

/// Évaluateur par défaut : le pipeline du noyau.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluateurNoyau {
    options: OptionsEvaluateur,
}

impl EvaluateurNoyau {
    pub fn new(options: OptionsEvaluateur) -> Self {
        Self { options }
    }

    pub fn options(&self) -> OptionsEvaluateur {
        self.options
    }
}

impl Evaluateur for EvaluateurNoyau {
    fn evaluate(&self, expression: &str) -> Result<f64, ErreurEval> {
        eval_expression(expression, self.options.unite_angle)
    }

    fn configure(&mut self, options: OptionsEvaluateur) {
        self.options = options;
    }
}
