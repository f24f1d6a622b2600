//! # Reports Module
//!
//! Sales aggregations for the dashboard and reports pages.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sales collection (append-only)                                         │
//! │       │                                                                 │
//! │       ├── total_revenue()    Σ sale.total over completed sales          │
//! │       ├── monthly_sales()    revenue + count bucketed by month          │
//! │       └── top_sellers()      units + revenue per brand, best first      │
//! │                                                                         │
//! │  Everything here is derived fresh from the sale records on each call;   │
//! │  nothing is cached or persisted.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::line_net_amount;
use crate::types::{Sale, SaleStatus};

// =============================================================================
// Revenue
// =============================================================================

/// Total revenue across completed sales, in whole currency units.
///
/// Draft and pending sales are excluded; only a completed sale has
/// actually collected money.
pub fn total_revenue(sales: &[Sale]) -> i64 {
    sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed)
        .map(|s| s.total)
        .sum()
}

// =============================================================================
// Monthly Sales
// =============================================================================

/// One month's worth of completed sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// Month key in `YYYY-MM` form, e.g. `2026-08`.
    pub month: String,

    /// Number of completed sales in the month.
    pub sale_count: usize,

    /// Revenue collected in the month, in whole currency units.
    pub revenue: i64,
}

/// Buckets completed sales by calendar month, oldest month first.
pub fn monthly_sales(sales: &[Sale]) -> Vec<MonthlySales> {
    let mut buckets: BTreeMap<String, (usize, i64)> = BTreeMap::new();

    for sale in sales.iter().filter(|s| s.status == SaleStatus::Completed) {
        let key = sale.date.format("%Y-%m").to_string();
        let entry = buckets.entry(key).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += sale.total;
    }

    buckets
        .into_iter()
        .map(|(month, (sale_count, revenue))| MonthlySales {
            month,
            sale_count,
            revenue,
        })
        .collect()
}

// =============================================================================
// Top Sellers
// =============================================================================

/// Aggregate sales performance of one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopSeller {
    /// Brand name as it appeared on the bill lines.
    pub brand_name: String,

    /// Total units sold across completed sales.
    pub units_sold: i64,

    /// Net revenue attributed to the brand, at full precision.
    pub revenue: f64,
}

/// Ranks brands by units sold across completed sales, best first.
///
/// Revenue per brand is the sum of line net amounts (after discount and
/// GST), so the figures line up with what the bills actually charged.
/// Ties on units break by brand name so the ordering is deterministic.
pub fn top_sellers(sales: &[Sale], limit: usize) -> Vec<TopSeller> {
    let mut by_brand: BTreeMap<String, (i64, f64)> = BTreeMap::new();

    for sale in sales.iter().filter(|s| s.status == SaleStatus::Completed) {
        for item in sale.items.iter().filter(|l| l.is_billable()) {
            let entry = by_brand.entry(item.name.clone()).or_insert((0, 0.0));
            entry.0 += item.qty;
            entry.1 += line_net_amount(item);
        }
    }

    let mut ranked: Vec<TopSeller> = by_brand
        .into_iter()
        .map(|(brand_name, (units_sold, revenue))| TopSeller {
            brand_name,
            units_sold,
            revenue,
        })
        .collect();

    // BTreeMap iteration already ordered by name, so a stable sort on
    // units keeps the name tiebreak.
    ranked.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// Unit Tests
// =============================================================================
