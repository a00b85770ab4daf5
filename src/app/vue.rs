// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - En-tête, écran (expression + résultat), bouton RAD/DEG, grille 5 colonnes
// - Un clic ou une touche = un jeton passé à Calculatrice::on_input
// - Clavier routé seulement tant que l’abonnement est tenu

use eframe::egui;

use super::affichage::{formater, Seuils};
use super::bouton::{BoutonCalc, StyleBouton};
use super::clavier::AbonnementClavier;
use super::etat::Calculatrice;
use crate::noyau::{EvaluateurNoyau, OptionsEvaluateur};
use crate::reglages::Reglages;

pub const COLONNES: usize = 5;

/// Ordre des touches (remplissage ligne par ligne dans la grille).
pub const DISPOSITION: [&[&str]; 8] = [
    &["sin", "cos", "tan", "π", "e"],
    &["asin", "acos", "atan", "log", "ln"],
    &["x^y", "sqrt", "x!", "(", ")"],
    &["C", "CE", "%", "/"],
    &["7", "8", "9", "*"],
    &["4", "5", "6", "-"],
    &["1", "2", "3", "+"],
    &["±", "0", ".", "="],
];

const INDIGO_400: egui::Color32 = egui::Color32::from_rgb(129, 140, 248);
const GRIS_400: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
const GRIS_700: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);
const GRIS_800: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
pub const GRIS_900: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);

/// Placement auto (ligne par ligne) : une touche qui ne tient pas dans la fin de
/// ligne passe à la ligne suivante.
pub fn rangees(colonnes: usize) -> Vec<Vec<(&'static str, usize)>> {
    let mut out: Vec<Vec<(&'static str, usize)>> = Vec::new();
    let mut courante: Vec<(&'static str, usize)> = Vec::new();
    let mut occupees = 0;

    for label in DISPOSITION.iter().flat_map(|r| r.iter().copied()) {
        let cases = StyleBouton::pour_label(label).cases(colonnes).min(colonnes);
        if occupees + cases > colonnes {
            out.push(std::mem::take(&mut courante));
            occupees = 0;
        }
        courante.push((label, cases));
        occupees += cases;
    }
    if !courante.is_empty() {
        out.push(courante);
    }
    out
}

pub struct AppCalc {
    pub calc: Calculatrice<EvaluateurNoyau>,
    pub seuils: Seuils,
    clavier: Option<AbonnementClavier>,
}

impl AppCalc {
    pub fn new(reglages: &Reglages) -> Self {
        Self {
            calc: Calculatrice::new(
                EvaluateurNoyau::new(OptionsEvaluateur {
                    unite_angle: reglages.angle,
                }),
                reglages.angle,
            ),
            seuils: reglages.seuils(),
            clavier: Some(AbonnementClavier::acquerir()),
        }
    }

    /// Route les touches de la frame vers la calculatrice.
    pub fn traiter_clavier(&mut self, ctx: &egui::Context) {
        let Some(abonnement) = &self.clavier else {
            return;
        };
        for jeton in abonnement.collecter(ctx) {
            self.calc.on_input(jeton);
        }
    }

    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(440.0);

                    egui::Frame::group(ui.style())
                        .fill(GRIS_800)
                        .stroke(egui::Stroke::new(4.0, INDIGO_400.gamma_multiply(0.5)))
                        .inner_margin(20.0)
                        .show(ui, |ui| {
                            self.ui_entete(ui);
                            ui.add_space(12.0);
                            self.ui_ecran(ui);
                            ui.add_space(12.0);
                            self.ui_grille(ui);
                        });
                });
            });
    }

    fn ui_entete(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("CECAL")
                    .size(30.0)
                    .strong()
                    .color(INDIGO_400),
            );
            ui.label(egui::RichText::new("Calculadora Científica").size(14.0).color(GRIS_400));
        });
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        let a = formater(self.calc.expression(), self.calc.resultat(), self.seuils);

        egui::Frame::group(ui.style())
            .fill(GRIS_900)
            .stroke(egui::Stroke::new(2.0, GRIS_700))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.set_min_height(110.0);
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(a.expression)
                                .monospace()
                                .size(a.points_expression())
                                .color(GRIS_400),
                        )
                        .wrap(),
                    );
                    ui.add_space(8.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(a.resultat)
                                .monospace()
                                .strong()
                                .size(a.points_resultat())
                                .color(egui::Color32::WHITE),
                        )
                        .wrap(),
                    );
                });
            });
    }

    fn ui_grille(&mut self, ui: &mut egui::Ui) {
        let esp = ui.spacing().item_spacing.x;
        let cellule = (ui.available_width() - esp * (COLONNES - 1) as f32) / COLONNES as f32;
        let largeur = |cases: usize| cellule * cases as f32 + esp * (cases - 1) as f32;

        let mut clic: Option<&'static str> = None;

        let label_angle = self.calc.mode_angle().label();
        BoutonCalc::new(label_angle)
            .style(StyleBouton::Angle)
            .show(ui, largeur(COLONNES), || clic = Some(label_angle));

        for rangee in rangees(COLONNES) {
            ui.horizontal(|ui| {
                for (label, cases) in rangee {
                    BoutonCalc::new(label).show(ui, largeur(cases), || clic = Some(label));
                }
            });
        }

        if let Some(jeton) = clic {
            self.calc.on_input(jeton);
        }
    }
}
