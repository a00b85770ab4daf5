// src/app/clavier.rs
//
// Clavier global : traduction touche -> jeton de la calculatrice.
//
// L’abonnement est une ressource : acquis au démarrage de l’app, libéré à la sortie
// (Drop). Tant qu’il n’est pas tenu, aucun événement clavier n’est routé.

use eframe::egui;

/// Touches transmises telles quelles.
const TOUCHES_DIRECTES: [&str; 19] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "(", ")", "^", "%",
];

/// Nom de touche -> jeton (None = ignorée).
pub fn jeton_clavier(touche: &str) -> Option<&'static str> {
    if let Some(t) = TOUCHES_DIRECTES.iter().find(|t| **t == touche) {
        return Some(*t);
    }
    match touche {
        "Enter" | "=" => Some("="),
        "Backspace" => Some("CE"),
        "c" | "C" => Some("C"),
        _ => None,
    }
}

/// Jetons portés par un événement egui (le texte tapé peut contenir plusieurs caractères).
pub fn jetons_evenement(ev: &egui::Event) -> Vec<&'static str> {
    match ev {
        egui::Event::Text(texte) => texte
            .chars()
            .filter_map(|c| jeton_clavier(c.encode_utf8(&mut [0; 4])))
            .collect(),
        egui::Event::Key {
            key, pressed: true, ..
        } => match key {
            egui::Key::Enter => vec!["="],
            egui::Key::Backspace => vec!["CE"],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[derive(Debug)]
pub struct AbonnementClavier {
    _prive: (),
}

impl AbonnementClavier {
    pub fn acquerir() -> Self {
        tracing::info!("abonnement clavier acquis");
        Self { _prive: () }
    }

    /// Jetons tapés depuis la frame précédente, dans l’ordre.
    pub fn collecter(&self, ctx: &egui::Context) -> Vec<&'static str> {
        ctx.input(|i| i.events.iter().flat_map(jetons_evenement).collect())
    }
}

impl Drop for AbonnementClavier {
    fn drop(&mut self) {
        tracing::info!("abonnement clavier libéré");
    }
}
