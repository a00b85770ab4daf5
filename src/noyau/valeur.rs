// src/noyau/valeur.rs
//
// Valeur numérique hybride :
// - Exact(r)  : rationnel exact (littéraux, + - * /, puissances entières, n!)
// - Approx(x) : f64 dès qu’une opération transcendante intervient
//
// Règle : Exact op Exact => Exact si l’opération reste rationnelle ; sinon Approx.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurEval;

/// Au-delà, la puissance exacte passe en f64 (anti-explosion mémoire).
const MAX_BITS_PUISSANCE_EXACTE: u64 = 4096;

/// 170! est le plus grand factoriel représentable en f64.
const MAX_FACTORIELLE: u32 = 170;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Exact(BigRational),
    Approx(f64),
}

impl Valeur {
    pub fn entier(n: i64) -> Self {
        Valeur::Exact(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Valeur::Exact(r) => r.to_f64().unwrap_or(f64::NAN),
            Valeur::Approx(x) => *x,
        }
    }

    /// Résultat final : refuse NaN / ±inf.
    pub fn finie(&self) -> Result<f64, ErreurEval> {
        let x = self.to_f64();
        if x.is_finite() {
            Ok(x)
        } else {
            Err(ErreurEval::NonFini)
        }
    }

    pub fn neg(self) -> Valeur {
        match self {
            Valeur::Exact(r) => Valeur::Exact(-r),
            Valeur::Approx(x) => Valeur::Approx(-x),
        }
    }

    pub fn add(self, autre: Valeur) -> Valeur {
        match (self, autre) {
            (Valeur::Exact(a), Valeur::Exact(b)) => Valeur::Exact(a + b),
            (a, b) => Valeur::Approx(a.to_f64() + b.to_f64()),
        }
    }

    pub fn sub(self, autre: Valeur) -> Valeur {
        self.add(autre.neg())
    }

    pub fn mul(self, autre: Valeur) -> Valeur {
        match (self, autre) {
            (Valeur::Exact(a), Valeur::Exact(b)) => Valeur::Exact(a * b),
            (a, b) => Valeur::Approx(a.to_f64() * b.to_f64()),
        }
    }

    pub fn div(self, autre: Valeur) -> Result<Valeur, ErreurEval> {
        if autre.est_zero() {
            return Err(ErreurEval::DivisionParZero);
        }
        Ok(match (self, autre) {
            (Valeur::Exact(a), Valeur::Exact(b)) => Valeur::Exact(a / b),
            (a, b) => Valeur::Approx(a.to_f64() / b.to_f64()),
        })
    }

    pub fn pow(self, exposant: Valeur) -> Result<Valeur, ErreurEval> {
        if let (Valeur::Exact(base), Valeur::Exact(e)) = (&self, &exposant) {
            if let Some(n) = entier_i64(e) {
                if base.is_zero() && n < 0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                if puissance_raisonnable(base, n) {
                    return Ok(Valeur::Exact(puissance_exacte(base.clone(), n)));
                }
            }
        }

        let (b, e) = (self.to_f64(), exposant.to_f64());
        if b == 0.0 && e < 0.0 {
            return Err(ErreurEval::DivisionParZero);
        }
        let r = b.powf(e);
        if r.is_nan() {
            // base négative, exposant non entier (résultat complexe)
            return Err(ErreurEval::Domaine("puissance"));
        }
        Ok(Valeur::Approx(r))
    }

    pub fn factorielle(self) -> Result<Valeur, ErreurEval> {
        let n = match &self {
            Valeur::Exact(r) => entier_i64(r),
            Valeur::Approx(x) if x.fract() == 0.0 && x.abs() <= f64::from(MAX_FACTORIELLE) => {
                Some(*x as i64)
            }
            Valeur::Approx(_) => None,
        };

        match n {
            Some(n) if n < 0 => Err(ErreurEval::Domaine("factorielle")),
            Some(n) if n <= i64::from(MAX_FACTORIELLE) => {
                let mut acc = BigInt::one();
                for k in 2..=n {
                    acc *= k;
                }
                Ok(Valeur::Exact(BigRational::from_integer(acc)))
            }
            Some(_) => Err(ErreurEval::NonFini),
            None => Err(ErreurEval::Domaine("factorielle")),
        }
    }

    pub fn sqrt(self) -> Result<Valeur, ErreurEval> {
        if self.est_negatif() {
            return Err(ErreurEval::Domaine("sqrt"));
        }
        if let Valeur::Exact(r) = &self {
            if let Some(racine) = racine_exacte(r) {
                return Ok(Valeur::Exact(racine));
            }
        }
        Ok(Valeur::Approx(self.to_f64().sqrt()))
    }

    pub fn abs(self) -> Valeur {
        match self {
            Valeur::Exact(r) => Valeur::Exact(r.abs()),
            Valeur::Approx(x) => Valeur::Approx(x.abs()),
        }
    }

    pub fn est_zero(&self) -> bool {
        match self {
            Valeur::Exact(r) => r.is_zero(),
            Valeur::Approx(x) => *x == 0.0,
        }
    }

    pub fn est_negatif(&self) -> bool {
        match self {
            Valeur::Exact(r) => r.is_negative(),
            Valeur::Approx(x) => *x < 0.0,
        }
    }
}

fn entier_i64(r: &BigRational) -> Option<i64> {
    if r.is_integer() {
        r.numer().to_i64()
    } else {
        None
    }
}

/// Estimation grossière de la taille du résultat (bits) avant de calculer.
fn puissance_raisonnable(base: &BigRational, n: i64) -> bool {
    let bits = base.numer().bits().max(base.denom().bits()).max(1);
    bits.saturating_mul(n.unsigned_abs()) <= MAX_BITS_PUISSANCE_EXACTE
}

fn puissance_exacte(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = puissance_exacte(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/// √(p/q) exacte si p et q sont des carrés parfaits.
fn racine_exacte(r: &BigRational) -> Option<BigRational> {
    let p = r.numer();
    let q = r.denom();
    let rp = p.sqrt();
    let rq = q.sqrt();
    if &(&rp * &rp) == p && &(&rq * &rq) == q {
        Some(BigRational::new(rp, rq))
    } else {
        None
    }
}
