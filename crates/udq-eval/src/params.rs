//! `UDQPARAM` settings: generator seeding, value range, the reporting marker
//! for undefined values, and the comparison epsilon.

use udq_common::{UdqError, UdqResult, UdqScalar, UdqSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::{self, UdqRng};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct UdqParams {
    /// Give every report step its own generator instead of one running stream.
    pub reseed: bool,
    pub random_seed: u64,
    /// Largest magnitude a UDQ value may take, see [`UdqParams::apply_range`].
    pub range: f64,
    /// Number written in place of an undefined value when reporting.
    pub undefined_value: f64,
    /// Tolerance for `EQ`, `NE`, `LE` and `GE`.
    pub cmp_epsilon: f64,
}

impl Default for UdqParams {
    fn default() -> Self {
        Self {
            reseed: false,
            random_seed: 1,
            range: 1e20,
            undefined_value: 0.0,
            cmp_epsilon: 1e-4,
        }
    }
}

impl UdqParams {
    pub fn validate(&self) -> UdqResult<()> {
        if self.cmp_epsilon.is_nan() || self.cmp_epsilon < 0.0 {
            return Err(UdqError::invalid_parameter(
                "cmp_epsilon",
                format!("must be a number >= 0, got {}", self.cmp_epsilon),
            ));
        }
        if self.range.is_nan() || self.range <= 0.0 {
            return Err(UdqError::invalid_parameter(
                "range",
                format!("must be a number > 0, got {}", self.range),
            ));
        }
        Ok(())
    }

    /// Generator for a whole run, seeded from `random_seed`.
    pub fn sim_rng(&self) -> UdqRng {
        rng::seeded(self.random_seed)
    }

    /// Prepare the caller's run generator for `step` and hand it back.
    ///
    /// With `reseed` on, `run` is replaced by the generator derived from
    /// `(random_seed, step)`. With it off, `run` is left as is and keeps
    /// advancing across steps.
    pub fn rng_for_step<'a>(&self, run: &'a mut UdqRng, step: usize) -> &'a mut UdqRng {
        if self.reseed {
            *run = rng::seeded_for_step(self.random_seed, step);
        }
        run
    }

    /// Values whose magnitude exceeds `range` become undefined.
    pub fn apply_range(&self, set: &UdqSet) -> UdqSet {
        let range = self.range;
        set.map_values(|v| {
            v.and_then(|x| {
                if x.abs() > range {
                    UdqScalar::Undefined
                } else {
                    UdqScalar::new(x)
                }
            })
        })
    }

    pub fn render(&self, value: UdqScalar) -> f64 {
        value.value_or(self.undefined_value)
    }
}
