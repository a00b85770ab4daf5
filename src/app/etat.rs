//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : contenir l’expression, le résultat et le mode d’angle, et traduire chaque
//! touche en mutation de cet état. L’évaluation est déléguée à l’`Evaluateur` injecté.
//!
//! Contrats :
//! - Une touche = une mise à jour synchrone et complète de l’état.
//! - Le résultat n’est jamais vide ("0", un nombre, ou "Error").
//! - "Error" ne survit pas à la touche suivante.
//! - ± agit sur TOUTE l’expression (signe de tête), pas sur le dernier opérande.

use crate::noyau::expr::Fonction;
use crate::noyau::{format_nombre, Evaluateur, OptionsEvaluateur, UniteAngle};

/// Résultat initial / après C.
pub const RESULTAT_INITIAL: &str = "0";

/// Sentinelle affichée quand l’évaluation échoue.
pub const RESULTAT_ERREUR: &str = "Error";

#[derive(Debug)]
pub struct Calculatrice<E> {
    expression: String,
    resultat: String,
    mode_angle: UniteAngle,
    evaluateur: E,
}

impl<E: Evaluateur> Calculatrice<E> {
    /// Configure l’évaluateur sur le mode d’angle initial.
    pub fn new(mut evaluateur: E, mode_angle: UniteAngle) -> Self {
        evaluateur.configure(OptionsEvaluateur {
            unite_angle: mode_angle,
        });
        Self {
            expression: String::new(),
            resultat: RESULTAT_INITIAL.to_string(),
            mode_angle,
            evaluateur,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn resultat(&self) -> &str {
        &self.resultat
    }

    pub fn mode_angle(&self) -> UniteAngle {
        self.mode_angle
    }

    pub fn evaluateur(&self) -> &E {
        &self.evaluateur
    }

    pub fn en_erreur(&self) -> bool {
        self.resultat == RESULTAT_ERREUR
    }

    /// Contrat texte : un label de bouton ou un jeton clavier déjà traduit.
    pub fn on_input(&mut self, jeton: &str) {
        self.appliquer(Touche::depuis_label(jeton));
    }

    pub fn appliquer(&mut self, touche: Touche) {
        if self.en_erreur() {
            self.effacer_tout();
        }

        match touche {
            Touche::Evaluer => self.evaluer(),
            Touche::EffacerTout => self.effacer_tout(),
            Touche::EffacerEntree => {
                // no-op si déjà vide
                self.expression.pop();
            }
            Touche::Signe => self.basculer_signe(),
            Touche::BasculerAngle => self.basculer_angle(),
            Touche::Fonction(f) => {
                self.expression.push_str(f.nom());
                self.expression.push('(');
            }
            Touche::Puissance => self.expression.push('^'),
            Touche::Factorielle => self.expression.push('!'),
            Touche::Texte(t) => self.expression.push_str(&t),
        }
    }

    fn effacer_tout(&mut self) {
        self.expression.clear();
        self.resultat = RESULTAT_INITIAL.to_string();
    }

    fn basculer_signe(&mut self) {
        self.expression = match self.expression.strip_prefix('-') {
            Some(reste) => reste.to_string(),
            None => format!("-{}", self.expression),
        };
    }

    /// Ne réévalue rien : seule la prochaine évaluation voit la nouvelle unité.
    fn basculer_angle(&mut self) {
        self.mode_angle = self.mode_angle.basculer();
        self.evaluateur.configure(OptionsEvaluateur {
            unite_angle: self.mode_angle,
        });
        tracing::info!(mode = self.mode_angle.label(), "mode d’angle");
    }

    fn evaluer(&mut self) {
        if self.expression.trim().is_empty() {
            self.resultat = RESULTAT_INITIAL.to_string();
            return;
        }

        let assainie = assainir(&self.expression);
        match self.evaluateur.evaluate(&assainie) {
            Ok(v) => {
                self.resultat = format_nombre(v);
                tracing::debug!(expression = %self.expression, resultat = %self.resultat, "évalué");
            }
            Err(e) => {
                let nature = if e.est_erreur_de_calcul() { "calcul" } else { "syntaxe" };
                tracing::debug!(expression = %self.expression, erreur = %e, nature, "échec d’évaluation");
                self.resultat = RESULTAT_ERREUR.to_string();
            }
        }
    }
}

/// Symboles d’affichage -> forme comprise par l’évaluateur ('e' reste 'e').
pub fn assainir(expression: &str) -> String {
    expression.replace('%', "/100").replace('π', "pi")
}

/// Touche interprétée (bouton ou clavier).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Touche {
    Evaluer,
    EffacerTout,
    EffacerEntree,
    Signe,
    BasculerAngle,
    /// Ajoute `nom(` ; la parenthèse fermante reste à la charge de l’utilisateur.
    Fonction(Fonction),
    Puissance,
    Factorielle,
    /// Chiffres, point, opérateurs, parenthèses, constantes : ajoutés tels quels.
    Texte(String),
}

/// Fonctions qui ont une touche ; `abs` et `exp` restent tapables mais sans raccourci.
pub const FONCTIONS_TOUCHES: [Fonction; 9] = [
    Fonction::Sin,
    Fonction::Cos,
    Fonction::Tan,
    Fonction::Asin,
    Fonction::Acos,
    Fonction::Atan,
    Fonction::Log,
    Fonction::Ln,
    Fonction::Sqrt,
];

impl Touche {
    pub fn depuis_label(label: &str) -> Self {
        match label {
            "=" => Self::Evaluer,
            "C" => Self::EffacerTout,
            "CE" => Self::EffacerEntree,
            "±" => Self::Signe,
            "DEG" | "RAD" => Self::BasculerAngle,
            "x^y" => Self::Puissance,
            "x!" => Self::Factorielle,
            autre => match FONCTIONS_TOUCHES.into_iter().find(|f| f.nom() == autre) {
                Some(f) => Self::Fonction(f),
                None => Self::Texte(autre.to_string()),
            },
        }
    }
}
