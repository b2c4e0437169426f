use crate::api::{JsonToToonResponse, ToonToJsonResponse};
use serde::{Deserialize, Serialize};

/// Token comparison between the JSON and TOON renderings of the same data.
/// `savings` is positive when TOON is smaller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetrics {
    pub json_tokens: u64,
    pub toon_tokens: u64,
    pub savings: i64,
    pub savings_percent: f64,
}

impl ConversionMetrics {
    /// Derives savings the same way the service does for the forward direction.
    pub fn from_counts(json_tokens: u64, toon_tokens: u64) -> Self {
        let savings = json_tokens as i64 - toon_tokens as i64;
        let savings_percent = if json_tokens > 0 {
            savings as f64 / json_tokens as f64 * 100.0
        } else {
            0.0
        };
        Self {
            json_tokens,
            toon_tokens,
            savings,
            savings_percent,
        }
    }

    /// e.g. `"12 (34.5%)"`.
    pub fn savings_label(&self) -> String {
        format!("{} ({:.1}%)", self.savings, self.savings_percent)
    }
}

impl From<&JsonToToonResponse> for ConversionMetrics {
    fn from(resp: &JsonToToonResponse) -> Self {
        // Reported figures are used as-is.
        Self {
            json_tokens: resp.json_data_tokens,
            toon_tokens: resp.toon_data_tokens,
            savings: resp.savings,
            savings_percent: resp.savings_percent,
        }
    }
}

impl From<&ToonToJsonResponse> for ConversionMetrics {
    fn from(resp: &ToonToJsonResponse) -> Self {
        Self::from_counts(resp.json_data_tokens, resp.toon_data_tokens)
    }
}
