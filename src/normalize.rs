//! Raw field to typed record conversion.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{PluginRecord, RawItem};

lazy_static! {
    /// Price text: one optional leading currency symbol, digits with
    /// optional thousands separators, optional decimal fraction.
    static ref PRICE_RE: Regex = Regex::new(r"^\D?\s*([0-9][0-9,]*(?:\.[0-9]+)?)$").unwrap();
}

/// Parses a price text like `"£1,234.99"` into whole currency units.
///
/// The fractional part is truncated, not rounded: `"£49.99"` parses
/// to 49.
pub fn parse_price(text: &str) -> ScrapeResult<i64> {
    let caps = PRICE_RE
        .captures(text.trim())
        .ok_or_else(|| ScrapeError::Price(text.to_string()))?;
    let number: f64 = caps[1]
        .replace(',', "")
        .parse()
        .map_err(|_| ScrapeError::Price(text.to_string()))?;
    Ok(number as i64)
}

/// Discount percentage, floor-rounded; 0 when there is no sale price.
pub fn saving_percent(regular_price: i64, sale_price: Option<i64>) -> i64 {
    match sale_price {
        Some(sale) => ((1.0 - sale as f64 / regular_price as f64) * 100.0).floor() as i64,
        None => 0,
    }
}

/// Builds the normalized record for one extracted item.
///
/// Fails when the regular price is unparseable or non-positive, and when
/// the item is flagged on sale but carries no sale price text. Absence
/// never defaults into the price arithmetic.
pub fn build_record(raw: RawItem, captured_at: &str) -> ScrapeResult<PluginRecord> {
    let regular_price = parse_price(&raw.regular_price_text)?;
    if regular_price <= 0 {
        return Err(ScrapeError::Price(raw.regular_price_text));
    }

    let sale_price = if raw.on_sale {
        let text = raw
            .sale_price_text
            .as_deref()
            .ok_or_else(|| ScrapeError::MissingNode {
                item: raw.name.clone(),
                node: "p.special-price span.price",
            })?;
        Some(parse_price(text)?)
    } else {
        None
    };

    let saving_percent = saving_percent(regular_price, sale_price);

    Ok(PluginRecord {
        name: raw.name,
        url: raw.url,
        bundle: raw.bundle,
        on_sale: raw.on_sale,
        regular_price,
        sale_price,
        saving_percent,
        captured_at: captured_at.to_string(),
    })
}
