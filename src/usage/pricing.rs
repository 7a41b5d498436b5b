use serde::{Deserialize, Serialize};

use super::types::SessionTotals;

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// Unit prices in USD per million tokens, one per billed token category.
///
/// The defaults are the current Sonnet list prices; the config file can
/// override any of them, so stale prices never require a rebuild.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
    pub cache_write_per_mtok: f64,
    pub cache_read_per_mtok: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            input_per_mtok: 3.0,
            output_per_mtok: 15.0,
            cache_write_per_mtok: 3.75,
            cache_read_per_mtok: 0.30,
        }
    }
}

/// Itemized cost estimate derived from one SessionTotals value.
/// No rounding here; rounding happens at display time.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CostEstimate {
    pub input_cost: f64,
    pub output_cost: f64,
    pub cache_write_cost: f64,
    pub cache_read_cost: f64,
    pub total_cost: f64,
}

/// Price a session: `(tokens / 1M) * unit_price` per category, summed.
pub fn estimate_cost(totals: &SessionTotals, prices: &PriceTable) -> CostEstimate {
    let input_cost = totals.input_tokens as f64 / TOKENS_PER_UNIT * prices.input_per_mtok;
    let output_cost = totals.output_tokens as f64 / TOKENS_PER_UNIT * prices.output_per_mtok;
    let cache_write_cost =
        totals.cache_creation_tokens as f64 / TOKENS_PER_UNIT * prices.cache_write_per_mtok;
    let cache_read_cost =
        totals.cache_read_tokens as f64 / TOKENS_PER_UNIT * prices.cache_read_per_mtok;

    CostEstimate {
        input_cost,
        output_cost,
        cache_write_cost,
        cache_read_cost,
        total_cost: input_cost + output_cost + cache_write_cost + cache_read_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(input: u64, output: u64, cache_write: u64, cache_read: u64) -> SessionTotals {
        SessionTotals {
            input_tokens: input,
            output_tokens: output,
            cache_creation_tokens: cache_write,
            cache_read_tokens: cache_read,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_totals_cost_nothing() {
        let cost = estimate_cost(&totals(0, 0, 0, 0), &PriceTable::default());
        assert!(cost.total_cost.abs() < 1e-12);
    }

    #[test]
    fn test_one_million_of_each_category() {
        let prices = PriceTable::default();
        let cost = estimate_cost(&totals(1_000_000, 1_000_000, 1_000_000, 1_000_000), &prices);
        assert!((cost.input_cost - 3.0).abs() < 1e-9);
        assert!((cost.output_cost - 15.0).abs() < 1e-9);
        assert!((cost.cache_write_cost - 3.75).abs() < 1e-9);
        assert!((cost.cache_read_cost - 0.30).abs() < 1e-9);
        assert!((cost.total_cost - 22.05).abs() < 1e-9);
    }

    #[test]
    fn test_linear_in_token_counts() {
        let prices = PriceTable::default();
        let once = estimate_cost(&totals(123, 456, 789, 1011), &prices);
        let twice = estimate_cost(&totals(246, 912, 1578, 2022), &prices);
        assert!((twice.input_cost - 2.0 * once.input_cost).abs() < 1e-12);
        assert!((twice.output_cost - 2.0 * once.output_cost).abs() < 1e-12);
        assert!((twice.cache_write_cost - 2.0 * once.cache_write_cost).abs() < 1e-12);
        assert!((twice.cache_read_cost - 2.0 * once.cache_read_cost).abs() < 1e-12);
        assert!((twice.total_cost - 2.0 * once.total_cost).abs() < 1e-12);
    }

    #[test]
    fn test_custom_price_table() {
        let prices = PriceTable {
            input_per_mtok: 1.0,
            output_per_mtok: 2.0,
            cache_write_per_mtok: 0.0,
            cache_read_per_mtok: 0.0,
        };
        let cost = estimate_cost(&totals(500_000, 500_000, 999, 999), &prices);
        assert!((cost.total_cost - 1.5).abs() < 1e-9);
    }
}
