use serde::Serialize;

/// Raw per-item fields pulled straight out of the markup, before any
/// numeric parsing.
#[derive(Debug, Clone)]
pub struct RawItem {
    pub name: String,
    /// Product detail link; some catalog variants omit the target.
    pub url: Option<String>,
    pub bundle: bool,
    /// Sale state, probed exactly once per item. Price-node selection and
    /// the saving computation both reuse this flag instead of querying
    /// the tree again.
    pub on_sale: bool,
    pub regular_price_text: String,
    /// Present only when `on_sale` is set.
    pub sale_price_text: Option<String>,
}

/// One normalized pricing record, rebuilt fresh every run.
///
/// Immutable after construction. `sale_price` is present iff `on_sale`
/// is set, and `saving_percent` is always derived from the two prices,
/// never stored independently of them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub name: String,
    pub url: Option<String>,
    pub bundle: bool,
    pub on_sale: bool,
    /// Whole currency units, always > 0.
    pub regular_price: i64,
    pub sale_price: Option<i64>,
    /// Floor of the discount percentage; 0 when not on sale.
    pub saving_percent: i64,
    /// Capture time of the run that produced this record, shared by
    /// every record of that run.
    pub captured_at: String,
}

impl PluginRecord {
    /// The price a buyer pays right now: sale price when on sale,
    /// regular price otherwise.
    pub fn current_price(&self) -> i64 {
        self.sale_price.unwrap_or(self.regular_price)
    }
}
