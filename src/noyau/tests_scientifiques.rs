//! Tests scientifiques (campagne) : invariants numériques + limites contrôlées.
//!
//! But : balayer des familles d’expressions sans faire chauffer la machine.
//! - budget temps global par campagne
//! - tailles bornées (longueur < MAX_JETONS, profondeur modérée)
//! - égalités exactes là où le noyau reste rationnel, tolérance sinon

use std::time::{Duration, Instant};

use super::jetons::MAX_JETONS;
use super::{eval_expression, format_nombre, ErreurEval, UniteAngle};
use crate::app::etat::Calculatrice;
use crate::noyau::EvaluateurNoyau;

const EPS: f64 = 1e-12;

fn rad(expr: &str) -> f64 {
    eval_expression(expr, UniteAngle::Radians).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn deg(expr: &str) -> f64 {
    eval_expression(expr, UniteAngle::Degres).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(a: f64, b: f64, ctx: &str) {
    assert!((a - b).abs() <= EPS * (1.0 + b.abs()), "{ctx}: {a} != {b}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Frappe touche par touche, puis "=".
fn taper(calc: &mut Calculatrice<EvaluateurNoyau>, touches: &[&str]) -> String {
    for t in touches {
        calc.on_input(t);
    }
    calc.on_input("=");
    calc.resultat().to_string()
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_symetries_radians() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    for k in -20..=20 {
        budget(t0, max);
        let x = k as f64 / 7.0;
        let ctx = format!("x={k}/7");

        // sin(-x) = -sin(x), cos(-x) = cos(x)
        assert_proche(rad(&format!("sin(-({k}/7))")), -rad(&format!("sin({k}/7)")), &ctx);
        assert_proche(rad(&format!("cos(-({k}/7))")), rad(&format!("cos({k}/7)")), &ctx);

        // sin² + cos² = 1
        assert_proche(rad(&format!("sin({k}/7)^2+cos({k}/7)^2")), 1.0, &ctx);

        assert_proche(rad(&format!("sin({k}/7)")), x.sin(), &ctx);
    }
}

#[test]
fn sci_angles_speciaux_degres_exacts() {
    // égalité stricte : pas de résidu flottant en mode DEG
    assert_eq!(deg("sin(30)"), 0.5);
    assert_eq!(deg("sin(90)"), 1.0);
    assert_eq!(deg("sin(180)"), 0.0);
    assert_eq!(deg("cos(60)"), 0.5);
    assert_eq!(deg("cos(90)"), 0.0);
    assert_eq!(deg("cos(180)"), -1.0);
    assert_eq!(deg("tan(45)"), 1.0);
    assert_eq!(deg("tan(135)"), -1.0);
}

#[test]
fn sci_periodicite_degres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    for k in -5..=5 {
        budget(t0, max);
        let tour = 360 * k;
        assert_eq!(deg(&format!("sin(30+{tour})")), 0.5, "k={k}");
        assert_eq!(deg(&format!("cos(120+{tour})")), -0.5, "k={k}");
        assert_eq!(deg(&format!("tan(225+{tour})")), 1.0, "k={k}");
    }
}

#[test]
fn sci_tan_indefinie_degres() {
    for a in ["90", "270", "-90", "450", "90+360*7"] {
        assert_eq!(
            eval_expression(&format!("tan({a})"), UniteAngle::Degres),
            Err(ErreurEval::Domaine("tan")),
            "tan({a})"
        );
    }
    // propagation : l’erreur contamine l’expression entière
    assert!(eval_expression("1+tan(90)", UniteAngle::Degres).is_err());
    assert!(eval_expression("tan(90)*0", UniteAngle::Degres).is_err());
}

#[test]
fn sci_inverses_trig_degres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // asin(sin(x)) = x sur [-90, 90]
    for x in (-90..=90).step_by(15) {
        budget(t0, max);
        assert!((deg(&format!("asin(sin({x}))")) - x as f64).abs() < 1e-9, "x={x}");
        assert!((deg(&format!("atan(tan({x}/2))")) - x as f64 / 2.0).abs() < 1e-9, "x={x}");
    }
    assert!((deg("acos(0)") - 90.0).abs() < 1e-12);
    assert!((rad("acos(0)") - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
}

/* ------------------------ Arithmétique exacte ------------------------ */

#[test]
fn sci_zero_algebrique() {
    assert_eq!(rad("(1/2 + 1/3) - 5/6"), 0.0);
    assert_eq!(rad("(2/3 * 3/4) - 1/2"), 0.0);
    assert_eq!(rad("0.1+0.2-0.3"), 0.0);
    assert_eq!(rad("sqrt(49)-7"), 0.0);
}

#[test]
fn sci_dixiemes_cumules() {
    let mut expr = "0.1".to_string();
    for _ in 1..10 {
        expr.push_str("+0.1");
    }
    assert_eq!(rad(&expr), 1.0);
    assert_eq!(format_nombre(rad("0.1*3")), "0.3");
}

#[test]
fn sci_factorielles_telescopiques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    for n in 1..=25 {
        budget(t0, max);
        assert_eq!(rad(&format!("{n}!/({n}-1)!")), n as f64, "n={n}");
    }
    assert_eq!(rad("0!"), 1.0);
    assert!(eval_expression("171!", UniteAngle::Radians).is_err());
    assert!(eval_expression("(1/2)!", UniteAngle::Radians).is_err());
}

#[test]
fn sci_puissances_et_racines() {
    assert_eq!(rad("2^10"), 1024.0);
    assert_eq!(rad("2^-2"), 0.25);
    assert!(eval_expression("(-8)^(1/3)", UniteAngle::Radians).is_err());
    assert_eq!(rad("sqrt(2^20)"), 1024.0);
    assert_eq!(format_nombre(rad("10^21")), "1e+21");
    assert_eq!(format_nombre(rad("10^-7")), "1e-7");
}

/* ------------------------ Stress contrôlé ------------------------ */

/// Somme balancée "((t+t)+(t+t))..." : n termes, profondeur log2(n).
fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        items = items
            .chunks(2)
            .map(|c| match c {
                [a, b] => format!("({a}+{b})"),
                [a] => a.clone(),
                _ => unreachable!(),
            })
            .collect();
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // 300 termes "1/2" : sous MAX_JETONS, profondeur 10
    let v = rad(&somme_balancee("1/2", 300));
    budget(t0, max);
    assert_eq!(v, 150.0);

    // la même somme à plat dépasse la profondeur admise : erreur, pas de crash
    let plate = vec!["1/2"; 300].join("+");
    assert!(matches!(
        eval_expression(&plate, UniteAngle::Radians),
        Err(ErreurEval::TropProfonde(_))
    ));
}

#[test]
fn sci_imbrication_extreme_refusee() {
    // entrées tapables au clavier, sous la limite de jetons
    let moins = format!("{}1", "-".repeat(MAX_JETONS - 1));
    assert!(matches!(
        eval_expression(&moins, UniteAngle::Radians),
        Err(ErreurEval::TropProfonde(_))
    ));

    let produit = format!("{}1", "1e4000*".repeat(1000));
    assert!(matches!(
        eval_expression(&produit, UniteAngle::Radians),
        Err(ErreurEval::TropProfonde(_))
    ));

    let mut calc = Calculatrice::new(EvaluateurNoyau::default(), UniteAngle::Radians);
    let touches: Vec<&str> = std::iter::repeat("-")
        .take(MAX_JETONS - 1)
        .chain(["1"])
        .collect();
    assert_eq!(taper(&mut calc, &touches), "Error");
}

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let n = 400;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(rad(&expr), 1.0);

    let expr = format!("{}2{}", "sqrt(".repeat(50), ")".repeat(50));
    assert_proche(rad(&expr), 2f64.powf(0.5f64.powi(50)), "sqrt^50(2)");
    budget(t0, max);
}

#[test]
fn sci_stress_grand_entier() {
    let big = "9".repeat(100);
    let v = rad(&format!("{big}/7 + 1/7"));
    assert_proche(v, 1e100 / 7.0, "10^100/7");
}

#[test]
fn sci_limite_de_longueur() {
    let expr = vec!["1"; MAX_JETONS].join("+");
    assert!(matches!(
        eval_expression(&expr, UniteAngle::Radians),
        Err(ErreurEval::TropLongue(_))
    ));
}

/* ------------------------ Calculatrice complète ------------------------ */

#[test]
fn sci_calculatrice_de_bout_en_bout() {
    let cas: &[(&[&str], &str)] = &[
        (&["0", ".", "1", "+", "0", ".", "2"], "0.3"),
        (&["2", "x^y", "1", "0"], "1024"),
        (&["5", "x!"], "120"),
        (&["5", "0", "%"], "0.5"),
        (&["sqrt", "1", "6", ")"], "4"),
        (&["2", "π"], "6.283185307179586"),
        (&["log", "1", "0", "0", ")"], "2"),
        (&["1", "/", "0"], "Error"),
        (&["(", "1", "+"], "Error"),
    ];

    for (touches, attendu) in cas {
        let mut calc = Calculatrice::new(EvaluateurNoyau::default(), UniteAngle::Radians);
        assert_eq!(taper(&mut calc, touches), *attendu, "{touches:?}");
    }
}

#[test]
fn sci_calculatrice_bascule_angle() {
    let mut calc = Calculatrice::new(EvaluateurNoyau::default(), UniteAngle::Radians);
    calc.on_input("RAD");
    assert_eq!(taper(&mut calc, &["sin", "3", "0", ")"]), "0.5");

    // retour en radians : seule la prochaine évaluation change
    calc.on_input("C");
    calc.on_input("DEG");
    assert_eq!(taper(&mut calc, &["cos", "0", ")"]), "1");
    calc.on_input("C");
    assert_eq!(taper(&mut calc, &["sin", "3", "0", ")"]), format_nombre(30f64.sin()));
}
