// src/reglages.rs
//
// Réglages en lecture seule (config.toml), tous optionnels :
//
//   angle = "deg"            # "rad" par défaut
//   seuil_resultat = 10      # au-delà : petite taille
//   seuil_expression = 20
//
// Natif : <config_dir>/cecal/config.toml. Web : valeurs par défaut.

use serde::Deserialize;

use crate::app::affichage::Seuils;
use crate::noyau::UniteAngle;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub angle: UniteAngle,
    pub seuil_resultat: usize,
    pub seuil_expression: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        let seuils = Seuils::default();
        Self {
            angle: UniteAngle::Radians,
            seuil_resultat: seuils.resultat,
            seuil_expression: seuils.expression,
        }
    }
}

impl Reglages {
    pub fn depuis_toml(texte: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(texte)
    }

    pub fn seuils(&self) -> Seuils {
        Seuils {
            resultat: self.seuil_resultat,
            expression: self.seuil_expression,
        }
    }

    /// Fichier absent, illisible ou invalide => défauts (avec un warning sauf si absent).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn charger() -> Self {
        let Some(path) = dirs::config_dir().map(|d| d.join("cecal").join("config.toml")) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("lecture impossible de {:?}: {}", path, err);
                return Self::default();
            }
        };

        match Self::depuis_toml(&content) {
            Ok(r) => {
                tracing::info!(path = %path.display(), "réglages chargés");
                r
            }
            Err(err) => {
                tracing::warn!("réglages invalides dans {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn charger() -> Self {
        Self::default()
    }
}
