//! Spot price lookup and display formatting.

use std::sync::Arc;

use tracing::warn;

use crate::market::QuoteSource;

/// Quote currency used for every price lookup.
pub const QUOTE_CURRENCY: &str = "usd";

/// Fetches spot prices in [`QUOTE_CURRENCY`].
#[derive(Clone)]
pub struct PriceFetcher {
    quotes: Arc<dyn QuoteSource>,
}

impl PriceFetcher {
    pub fn new(quotes: Arc<dyn QuoteSource>) -> Self {
        Self { quotes }
    }

    /// Current price of `coin_id`, or `None` when it is unavailable.
    ///
    /// Backend errors, a missing field, and zero/negative/non-finite values all
    /// count as unavailable.
    pub async fn fetch_price(&self, coin_id: &str) -> Option<f64> {
        match self.quotes.simple_price(coin_id, QUOTE_CURRENCY).await {
            Ok(price) => price.filter(|p| p.is_finite() && *p > 0.0),
            Err(e) => {
                warn!(coin_id, "price fetch failed: {e}");
                None
            }
        }
    }
}

/// Render a price en-US style: comma thousands separators, trailing zeros
/// dropped, three fraction digits (eight below 1 so small-cap coins stay
/// readable).
pub fn format_price(price: f64) -> String {
    let digits: u32 = if price.abs() >= 1.0 { 3 } else { 8 };
    let scale = 10u128.pow(digits);
    let units = (price.abs() * scale as f64).round() as u128;
    let whole = units / scale;
    let frac = units % scale;

    let mut out = String::new();
    if price < 0.0 && units != 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));

    if frac != 0 {
        let frac = format!("{frac:0width$}", width = digits as usize);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
