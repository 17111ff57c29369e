//! Fixed-point effectiveness multiplier.
//!
//! Multipliers are stored on a 4096 scale (`4096 = 1.0x`), the same
//! representation battle calculators use for modifier chains. Every value
//! the charts and exception table can produce (0, 0.25, 0.5, 0.75, 1,
//! 1.25, 1.5, 2, 3, 4, 8, ...) is exact at this scale, and the type is
//! `Eq + Ord + Hash` so it can key result groups directly.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Fixed-point scale (1.0x).
pub const MULT_SCALE: u32 = 4096;

/// An effectiveness multiplier on the 4096 scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Mult(u32);

impl Mult {
    /// 0x, immunity.
    pub const ZERO: Self = Self(0);

    /// 0.25x.
    pub const QUARTER: Self = Self(1024);

    /// 0.5x.
    pub const HALF: Self = Self(2048);

    /// 1.0x, neutral.
    pub const ONE: Self = Self(MULT_SCALE);

    /// 2.0x.
    pub const DOUBLE: Self = Self(8192);

    /// 4.0x.
    pub const QUAD: Self = Self(16384);

    /// Create a multiplier from a raw 4096-scale value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw 4096-scale value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Convert a chart/exception document value (e.g. `0.5`, `2`)
    /// to the fixed-point scale, rounding to the nearest step.
    pub fn from_f64(value: f64) -> Self {
        Self((value * MULT_SCALE as f64 + 0.5) as u32)
    }

    /// Floating-point value, for display and fixture comparison.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MULT_SCALE as f64
    }

    /// Chain another multiplier onto this one (rounded 4096-scale product).
    #[must_use]
    pub fn chain(self, other: Mult) -> Mult {
        let product = self.0 as u64 * other.0 as u64;
        Mult(((product + MULT_SCALE as u64 / 2) >> 12) as u32)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Debug for Mult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mult({}x)", self.to_f64())
    }
}

impl std::fmt::Display for Mult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Mult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !(0.0..=64.0).contains(&value) {
            return Err(D::Error::custom(format!(
                "multiplier {value} out of range"
            )));
        }
        Ok(Mult::from_f64(value))
    }
}
