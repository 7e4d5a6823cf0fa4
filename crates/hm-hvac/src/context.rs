//! Running load-fraction remainders for one build.

use crate::error::{HvacError, HvacResult};
use hm_core::LOAD_FRACTION_EPSILON;
use hm_model::LoadShare;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Load {
    Heating,
    Cooling,
}

impl Load {
    pub fn label(self) -> &'static str {
        match self {
            Load::Heating => "heating",
            Load::Cooling => "cooling",
        }
    }
}

/// Share of each load not yet claimed by a processed system.
///
/// Systems are processed in a fixed order and each one's sequential fraction
/// is its declared fraction relative to what is left when its turn comes.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationContext {
    heating: f64,
    cooling: f64,
    /// Every share handed out, in processing order.
    history: Vec<(Load, LoadShare)>,
}

impl Default for AllocationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationContext {
    pub fn new() -> Self {
        Self {
            heating: 1.0,
            cooling: 1.0,
            history: Vec::new(),
        }
    }

    pub fn remaining(&self, load: Load) -> f64 {
        match load {
            Load::Heating => self.heating,
            Load::Cooling => self.cooling,
        }
    }

    fn remaining_mut(&mut self, load: Load) -> &mut f64 {
        match load {
            Load::Heating => &mut self.heating,
            Load::Cooling => &mut self.cooling,
        }
    }

    /// Claim `fraction` of `load` for `system`.
    pub fn take(&mut self, system: &str, load: Load, fraction: f64) -> HvacResult<LoadShare> {
        let remaining = self.remaining(load);
        let over = HvacError::OverAllocated {
            system: system.to_string(),
            load: load.label(),
            fraction,
            remaining,
        };
        if fraction > remaining + LOAD_FRACTION_EPSILON {
            return Err(over);
        }
        // Float leftovers below the epsilon count as an exhausted load.
        let sequential = if fraction <= 0.0 {
            0.0
        } else if remaining <= LOAD_FRACTION_EPSILON {
            return Err(over);
        } else {
            (fraction / remaining).min(1.0)
        };
        *self.remaining_mut(load) = remaining - fraction;

        let share = LoadShare {
            declared: fraction,
            sequential,
        };
        self.history.push((load, share));
        Ok(share)
    }

    /// Replace a remainder, for the clamping done before the residual system.
    pub fn set_remaining(&mut self, load: Load, value: f64) {
        *self.remaining_mut(load) = value;
    }

    pub fn history(&self) -> &[(Load, LoadShare)] {
        &self.history
    }
}
