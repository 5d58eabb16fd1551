//! Cost model for token usage
//!
//! Converts token counts into currency with a single linear rate.

use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::error::{Error, Result};

/// Linear price per token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    cost_per_unit: f64,
    currency: String,
}

impl CostModel {
    /// Create a cost model; the rate must be positive and finite
    pub fn new(cost_per_unit: f64, currency: impl Into<String>) -> Result<Self> {
        if !cost_per_unit.is_finite() || cost_per_unit <= 0.0 {
            return Err(Error::config(format!(
                "cost_per_unit must be a positive number, got {cost_per_unit}"
            )));
        }

        Ok(Self {
            cost_per_unit,
            currency: currency.into(),
        })
    }

    /// Build from the pricing section of the configuration
    pub fn from_config(pricing: &PricingConfig) -> Result<Self> {
        Self::new(pricing.cost_per_unit, pricing.currency.clone())
    }

    /// Price of a single token
    pub fn cost_per_unit(&self) -> f64 {
        self.cost_per_unit
    }

    /// Display currency (label only, no conversion)
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Cost of `units` tokens
    pub fn cost_of(&self, units: u64) -> f64 {
        units as f64 * self.cost_per_unit
    }
}
