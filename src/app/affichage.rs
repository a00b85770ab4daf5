// src/app/affichage.rs
//
// Écran : fonction pure (expression, résultat) -> textes + taille.
// Jamais de troncature : seule l’échelle du texte change au-delà des seuils.

/// Seuils (en caractères) au-delà desquels le texte passe en petite taille.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seuils {
    pub resultat: usize,
    pub expression: usize,
}

impl Default for Seuils {
    fn default() -> Self {
        Self {
            resultat: 10,
            expression: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Taille {
    Grande,
    Petite,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affichage<'a> {
    pub expression: &'a str,
    pub taille_expression: Taille,
    pub resultat: &'a str,
    pub taille_resultat: Taille,
}

impl Affichage<'_> {
    /// Tailles de police (points) : ligne résultat.
    pub fn points_resultat(&self) -> f32 {
        match self.taille_resultat {
            Taille::Grande => 48.0,
            Taille::Petite => 30.0,
        }
    }

    /// Tailles de police (points) : ligne expression.
    pub fn points_expression(&self) -> f32 {
        match self.taille_expression {
            Taille::Grande => 20.0,
            Taille::Petite => 16.0,
        }
    }
}

fn taille(texte: &str, seuil: usize) -> Taille {
    if texte.chars().count() > seuil {
        Taille::Petite
    } else {
        Taille::Grande
    }
}

pub fn formater<'a>(expression: &'a str, resultat: &'a str, seuils: Seuils) -> Affichage<'a> {
    Affichage {
        // vide => une espace : la ligne garde sa hauteur
        expression: if expression.is_empty() { " " } else { expression },
        taille_expression: taille(expression, seuils.expression),
        resultat,
        taille_resultat: taille(resultat, seuils.resultat),
    }
}
