use serde::{Deserialize, Serialize};

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// Two-tier linear price list, in currency units per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            input_per_million: 0.15,
            output_per_million: 0.60,
        }
    }
}

/// Estimated monetary cost at full precision. Only `Display` reduces it to six decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Cost(pub f64);

impl Cost {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

pub fn estimate_cost(pricing: &PricingConfig, prompt_tokens: u64, completion_tokens: u64) -> Cost {
    let input = prompt_tokens as f64 / TOKENS_PER_UNIT * pricing.input_per_million;
    let output = completion_tokens as f64 / TOKENS_PER_UNIT * pricing.output_per_million;
    Cost(input + output)
}
