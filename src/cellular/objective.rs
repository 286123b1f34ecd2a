//! Optimization direction and total fitness comparison.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// Direction of optimization over scalar fitness values.
///
/// Comparisons are total: any `NaN` ranks as the worst value in either
/// direction, so pathological evaluations lose against every finite and even
/// every infinite competitor of the opposite sign.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Minimize,
    Maximize,
}

impl Objective {
    /// Returns the worst representable fitness for this direction.
    pub fn worst(&self) -> f64 {
        match self {
            Objective::Minimize => return f64::INFINITY,
            Objective::Maximize => return f64::NEG_INFINITY,
        }
    }

    /// Total comparison by desirability: `Ordering::Less` means `a` is
    /// strictly better than `b`.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {
                let ordering = a.partial_cmp(&b)
                    .expect("Non-NaN comparison failed!");
                match self {
                    Objective::Minimize => return ordering,
                    Objective::Maximize => return ordering.reverse(),
                }
            }
        }
    }

    /// Returns true iff `a` is strictly better than `b`. Equal fitness is
    /// never preferred, which is what makes the engine's replacement rule
    /// keep the incumbent on ties.
    pub fn prefer(&self, a: f64, b: f64) -> bool {
        return self.compare(a, b) == Ordering::Less;
    }
}
