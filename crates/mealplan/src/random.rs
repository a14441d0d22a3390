use rand::Rng;

use crate::{Error, Result};

/// Source of uniform draws in `[0, 1)`.
///
/// Every [`rand::RngCore`] is a source, so callers pass `rand::rng()` in
/// production and a seeded `StdRng` in tests.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: rand::RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Picks one candidate with probability proportional to its weight.
///
/// The draw falls in `[0, total)` and the first candidate whose cumulative
/// weight reaches it wins, in input order. Negative weights count as zero.
/// When every weight is zero the last candidate is returned.
pub fn pick_weighted<'a, T, F, R>(candidates: &'a [T], weight_of: F, rng: &mut R) -> Result<&'a T>
where
    F: Fn(&T) -> f64,
    R: RandomSource + ?Sized,
{
    let Some(last) = candidates.last() else {
        return Err(Error::EmptyInput("candidate list"));
    };

    let weight = |candidate: &T| weight_of(candidate).max(0.0);
    let total: f64 = candidates.iter().map(weight).sum();

    if total <= 0.0 {
        return Ok(last);
    }

    let draw = rng.next_unit() * total;
    let mut cumulative = 0.0;

    for candidate in candidates {
        let w = weight(candidate);
        cumulative += w;

        if w > 0.0 && draw <= cumulative {
            return Ok(candidate);
        }
    }

    Ok(last)
}
