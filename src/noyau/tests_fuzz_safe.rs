//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - invariant clé : l’écran affiche toujours "Error", "0" ou un nombre lisible

use std::time::{Duration, Instant};

use super::{eval_expression, UniteAngle};
use crate::app::etat::{Calculatrice, FONCTIONS_TOUCHES, RESULTAT_ERREUR};
use crate::app::vue::DISPOSITION;
use crate::noyau::EvaluateurNoyau;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Tous les labels de la grille + la bascule d’angle.
fn touches() -> Vec<&'static str> {
    let mut t: Vec<&'static str> = DISPOSITION.iter().flat_map(|r| r.iter().copied()).collect();
    t.push("RAD");
    t
}

fn check_ecran(calc: &Calculatrice<EvaluateurNoyau>, trace: &[&str]) {
    let r = calc.resultat();
    assert!(!r.is_empty(), "résultat vide après {trace:?}");
    assert_eq!(calc.en_erreur(), r == RESULTAT_ERREUR, "{trace:?}");
    if r != RESULTAT_ERREUR {
        let v: f64 = r
            .parse()
            .unwrap_or_else(|_| panic!("résultat illisible {r:?} après {trace:?}"));
        assert!(v.is_finite(), "résultat non fini {r:?} après {trace:?}");
    }
}

/// Séquence de frappes ; "=" plus fréquent pour voir beaucoup d’évaluations.
fn gen_frappes(rng: &mut Rng, pool: &[&'static str], n: usize) -> Vec<&'static str> {
    (0..n)
        .map(|_| {
            if rng.pick(6) == 0 {
                "="
            } else {
                pool[rng.pick(pool.len() as u32) as usize]
            }
        })
        .collect()
}

const ALPHABET: &[&str] = &[
    "0", "1", "2", "7", "9", ".", "+", "-", "*", "/", "^", "!", "(", ")", "e", "pi", "π", "√",
    "sin(", "cos(", "tan(", "asin(", "log(", "ln(", "sqrt(", "abs(", "exp(", " ", "x", "%",
];

fn gen_texte(rng: &mut Rng, n: usize) -> String {
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/// Modèle de référence de l’édition (sans "=") : rejoue une frappe sur `expr`.
fn rejouer(expr: &mut String, touche: &str) {
    match touche {
        "C" => expr.clear(),
        "CE" => {
            expr.pop();
        }
        "±" => {
            *expr = match expr.strip_prefix('-') {
                Some(reste) => reste.to_string(),
                None => format!("-{expr}"),
            }
        }
        "RAD" | "DEG" => {}
        "x^y" => expr.push('^'),
        "x!" => expr.push('!'),
        t if FONCTIONS_TOUCHES.iter().any(|f| f.nom() == t) => {
            expr.push_str(t);
            expr.push('(');
        }
        t => expr.push_str(t),
    }
}

/// Expression bien formée (parenthèses équilibrées), profondeur bornée.
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return match rng.pick(4) {
            0 => "pi".to_string(),
            1 => "e".to_string(),
            _ => format!("{}", rng.pick(20)),
        };
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(10) {
        0 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        1 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        4 => format!("({a})^{}", rng.pick(4)),
        5 => format!("sin({a})"),
        6 => format!("cos({a})"),
        7 => format!("sqrt({a})"),
        8 => format!("-{a}"),
        _ => format!("abs({a})"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_frappes_aleatoires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let pool = touches();
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vu_nombre = 0usize;
    let mut vu_erreur = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let mut calc = Calculatrice::new(EvaluateurNoyau::default(), UniteAngle::Radians);
        let n = 1 + rng.pick(24) as usize;
        let frappes = gen_frappes(&mut rng, &pool, n);

        for (i, f) in frappes.iter().enumerate() {
            calc.on_input(f);
            check_ecran(&calc, &frappes[..=i]);
        }

        if calc.en_erreur() {
            vu_erreur += 1;
        } else if calc.resultat() != "0" {
            vu_nombre += 1;
        }
    }

    // un mix des deux, sinon le fuzz ne balaye rien
    assert!(vu_nombre > 0, "aucun nombre vu");
    assert!(vu_erreur > 0, "aucune erreur vue : fuzz trop sage");
}

#[test]
fn fuzz_safe_edition_suit_l_historique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let pool: Vec<&'static str> = touches().into_iter().filter(|t| *t != "=").collect();
    let mut rng = Rng::new(0xED17_u64);

    for _ in 0..100 {
        budget(t0, max);

        let mut calc = Calculatrice::new(EvaluateurNoyau::default(), UniteAngle::Radians);
        let mut attendu = String::new();
        let n = 1 + rng.pick(40) as usize;

        for i in 0..n {
            let t = pool[rng.pick(pool.len() as u32) as usize];
            calc.on_input(t);
            rejouer(&mut attendu, t);

            assert_eq!(calc.expression(), attendu, "frappe {i} ({t:?})");
            // sans "=", le résultat ne bouge jamais
            assert_eq!(calc.resultat(), "0");
        }
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let pool = touches();

    let run = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        let mut calc = Calculatrice::new(EvaluateurNoyau::default(), UniteAngle::Degres);
        gen_frappes(&mut rng, &pool, 300)
            .into_iter()
            .map(|f| {
                calc.on_input(f);
                format!("{}|{}", calc.expression(), calc.resultat())
            })
            .collect()
    };

    assert_eq!(run(0xBADC0DE_u64), run(0xBADC0DE_u64));
}

#[test]
fn fuzz_safe_texte_libre() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = 1 + rng.pick(30) as usize;
        let s = gen_texte(&mut rng, n);
        let unite = if rng.coin() {
            UniteAngle::Radians
        } else {
            UniteAngle::Degres
        };

        // pas de panique ; un succès est toujours fini
        if let Ok(v) = eval_expression(&s, unite) {
            assert!(v.is_finite(), "expr={s:?} v={v}");
        }
    }
}

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFACADE_u64);
    let mut ok = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr, UniteAngle::Radians) {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?}");
                ok += 1;
            }
            Err(e) => {
                // syntaxe toujours valide ici : seules les erreurs de calcul sont admises
                assert!(
                    e.est_erreur_de_calcul(),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
            }
        }
    }

    assert!(ok > 50, "trop peu de succès: {ok}");
}
