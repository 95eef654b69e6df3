//! Générateur de valeurs de départage.
//!
//! Toute valeur aléatoire du moteur passe par un `TieBreakRng` explicite :
//! une graine fixe rend l'ordre des candidats reproductible (tests, `--seed`).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Clone)]
pub struct TieBreakRng {
    seed: Option<u64>,
    inner: Pcg64Mcg,
}

impl TieBreakRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            seed: None,
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Graine utilisée, `None` si tirée de l'entropie système.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Valeur dans [0.0, 1.0).
    pub fn next_tie_break(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}
