// src/noyau/format.rs
//
// Nombre -> texte affiché dans la ligne résultat.
// Même rendu que la conversion nombre -> chaîne d’un navigateur :
// - décimal le plus court qui relit la même valeur (0.1+0.2 en f64 => 0.30000000000000004)
// - notation exponentielle hors de [1e-6, 1e21) : 1e+21, 1.5e-7
// - -0 => 0

const SEUIL_EXPO_HAUT: f64 = 1e21;
const SEUIL_EXPO_BAS: f64 = 1e-6;

pub fn format_nombre(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let a = x.abs();
    if (SEUIL_EXPO_BAS..SEUIL_EXPO_HAUT).contains(&a) {
        return format!("{x}");
    }

    // "{:e}" donne déjà la mantisse la plus courte ; il manque le '+' des exposants positifs
    let s = format!("{x:e}");
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}
