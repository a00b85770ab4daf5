// src/app.rs
//
// CECAL — module App (racine)
// ---------------------------
// Rôle:
// - Déclarer les sous-modules (état, écran, bouton, clavier, vue)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// L’abonnement clavier vit dans AppCalc : eframe détruit l’app à la fermeture,
// ce qui le libère (Drop).

pub mod affichage;
pub mod bouton;
pub mod clavier;
pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use vue::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Clavier avant la vue : la frame affiche déjà l’état à jour.
        self.traiter_clavier(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(vue::GRIS_900))
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }
}
