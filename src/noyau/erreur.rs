// src/noyau/erreur.rs
//
// Une seule famille d’erreurs pour tout le pipeline (jetons → RPN → Expr → valeur).
// L’UI ne distingue pas les causes : elle affiche "Error". Les variantes servent
// aux logs et aux tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("expression trop longue ({0} jetons)")]
    TropLongue(usize),

    #[error("expression trop imbriquée (profondeur max {0})")]
    TropProfonde(usize),

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,

    #[error("'(' attendue après {0}")]
    AppelSansParenthese(String),

    #[error("symbole inconnu: {0}")]
    SymboleInconnu(String),

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("hors domaine: {0}")]
    Domaine(&'static str),

    #[error("résultat non fini")]
    NonFini,
}

impl ErreurEval {
    /// Vrai si l’expression était bien formée mais que le calcul a échoué.
    pub fn est_erreur_de_calcul(&self) -> bool {
        matches!(
            self,
            Self::DivisionParZero | Self::Domaine(_) | Self::NonFini
        )
    }
}
