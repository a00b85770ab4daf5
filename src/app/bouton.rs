// src/app/bouton.rs
//
// Bouton de calculatrice : sans état, sans validation.
// Un label, un style, un handler sans argument appelé au clic.

use eframe::egui;

/// Hauteur d’une touche (points).
pub const HAUTEUR_TOUCHE: f32 = 56.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleBouton {
    Chiffre,
    Operateur,
    Fonction,
    Egal,
    Effacer,
    Angle,
}

impl StyleBouton {
    /// Classe d’un label de la grille (palette indigo / gris / vert / rouge).
    pub fn pour_label(label: &str) -> Self {
        match label {
            "=" => Self::Egal,
            "C" => Self::Effacer,
            "/" | "*" | "-" | "+" | "CE" => Self::Operateur,
            "." => Self::Chiffre,
            l if !l.is_empty() && l.chars().all(|c| c.is_ascii_digit()) => Self::Chiffre,
            _ => Self::Fonction,
        }
    }

    /// Nombre de cellules occupées dans la grille.
    pub fn cases(self, colonnes: usize) -> usize {
        match self {
            Self::Egal => 2,
            Self::Angle => colonnes,
            _ => 1,
        }
    }

    fn fond(self) -> egui::Color32 {
        match self {
            Self::Chiffre | Self::Angle => egui::Color32::from_rgb(55, 65, 81),
            Self::Operateur => egui::Color32::from_rgb(99, 102, 241),
            Self::Fonction => egui::Color32::from_rgb(75, 85, 99),
            Self::Egal => egui::Color32::from_rgb(34, 197, 94),
            Self::Effacer => egui::Color32::from_rgb(239, 68, 68),
        }
    }

    fn texte(self) -> egui::Color32 {
        match self {
            Self::Fonction | Self::Angle => egui::Color32::from_rgb(165, 180, 252),
            _ => egui::Color32::WHITE,
        }
    }
}

pub struct BoutonCalc<'a> {
    label: &'a str,
    style: StyleBouton,
}

impl<'a> BoutonCalc<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            style: StyleBouton::pour_label(label),
        }
    }

    pub fn style(mut self, style: StyleBouton) -> Self {
        self.style = style;
        self
    }

    /// Dessine le bouton sur `largeur` points ; `on_click` est appelé au clic.
    pub fn show(self, ui: &mut egui::Ui, largeur: f32, on_click: impl FnOnce()) -> egui::Response {
        let texte = egui::RichText::new(self.label)
            .size(22.0)
            .strong()
            .color(self.style.texte());

        let resp = ui.add_sized(
            [largeur, HAUTEUR_TOUCHE],
            egui::Button::new(texte)
                .fill(self.style.fond())
                .corner_radius(8.0),
        );

        if resp.clicked() {
            on_click();
        }
        resp
    }
}
