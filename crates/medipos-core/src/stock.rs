//! # Stock Module
//!
//! Stock status classification and inventory alert derivation.
//!
//! ## Classification Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FIRST MATCH WINS - ORDER IS SIGNIFICANT                                │
//! │                                                                         │
//! │  1. Expired      expiry < today                                         │
//! │  2. OutOfStock   stock ≤ 0                                              │
//! │  3. NearExpiry   expiry ≤ today + 60 days (closed bound)                │
//! │  4. LowStock     0 < stock < 10                                         │
//! │  5. InStock      none of the above                                      │
//! │                                                                         │
//! │  Expiry is a harder disqualifier than stock level: an expired item     │
//! │  on the shelf must never read "In Stock". A zero-stock item that is    │
//! │  also near expiry reads "Out of Stock" - restocking is the more        │
//! │  urgent operator action.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dates are compared at day granularity; any time-of-day component is
//! already gone by the time a `NaiveDate` reaches this module. Exactly one
//! status applies per medicine per evaluation instant.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::Medicine;
use crate::{LOW_STOCK_THRESHOLD, NEAR_EXPIRY_WINDOW_DAYS};

// =============================================================================
// Stock Status
// =============================================================================

/// The stock status of a medicine at one evaluation instant.
///
/// A total ordering of precedence, not independent flags. Variant order
/// mirrors the classification order above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockStatus {
    /// Expiry date has passed. Must be pulled from the shelf.
    #[serde(rename = "Expired")]
    Expired,
    /// No units available. Restock before anything else.
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    /// Expires within the disposal-priority window.
    #[serde(rename = "Near Expiry")]
    NearExpiry,
    /// Units available but below the reorder point.
    #[serde(rename = "Low Stock")]
    LowStock,
    /// Healthy: stocked and not close to expiry.
    #[serde(rename = "In Stock")]
    InStock,
}

impl StockStatus {
    /// Classifies a medicine as of the given evaluation date.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use medipos_core::stock::StockStatus;
    /// use medipos_core::types::Medicine;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
    /// let med = Medicine {
    ///     id: 1,
    ///     brand_name: "Dolo 650".to_string(),
    ///     generic_name: "Paracetamol".to_string(),
    ///     strength: "650mg".to_string(),
    ///     form: "Tablet".to_string(),
    ///     hsn: "3004".to_string(),
    ///     stock: 5,
    ///     mrp: 33.5,
    ///     expiry_date: today + chrono::Duration::days(30),
    ///     batch_no: "DL2401".to_string(),
    ///     gst: 12.0,
    /// };
    ///
    /// // Near expiry wins over low stock.
    /// assert_eq!(StockStatus::classify(&med, today), StockStatus::NearExpiry);
    /// ```
    pub fn classify(medicine: &Medicine, on: NaiveDate) -> StockStatus {
        if medicine.expiry_date < on {
            return StockStatus::Expired;
        }

        // Sales can drive stock below zero (no availability check at
        // checkout), so treat any non-positive count as out of stock.
        if medicine.stock <= 0 {
            return StockStatus::OutOfStock;
        }

        if medicine.expiry_date <= on + Duration::days(NEAR_EXPIRY_WINDOW_DAYS) {
            return StockStatus::NearExpiry;
        }

        if medicine.stock < LOW_STOCK_THRESHOLD {
            return StockStatus::LowStock;
        }

        StockStatus::InStock
    }

    /// Whether this status should raise a dashboard alert.
    #[inline]
    pub fn is_alert(&self) -> bool {
        *self != StockStatus::InStock
    }

    /// Human-readable label matching the inventory badge text.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Expired => "Expired",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::NearExpiry => "Near Expiry",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Stock Alerts
// =============================================================================

/// An inventory alert row for the dashboard.
///
/// Derived fresh on every evaluation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    /// Brand name of the affected medicine.
    pub medicine: String,

    /// The status that raised the alert (never `InStock`).
    pub alert_type: StockStatus,

    /// Short human-readable explanation.
    pub details: String,
}

impl StockAlert {
    /// Builds the alert for one medicine, or `None` when it is healthy.
    pub fn for_medicine(medicine: &Medicine, on: NaiveDate) -> Option<StockAlert> {
        let status = StockStatus::classify(medicine, on);

        let details = match status {
            StockStatus::Expired => {
                format!("Expired on {}", medicine.expiry_date.format("%d/%m/%Y"))
            }
            StockStatus::OutOfStock => "No units available".to_string(),
            StockStatus::NearExpiry => {
                format!("Expires on {}", medicine.expiry_date.format("%d/%m/%Y"))
            }
            StockStatus::LowStock => format!("Only {} units left", medicine.stock),
            StockStatus::InStock => return None,
        };

        Some(StockAlert {
            medicine: medicine.brand_name.clone(),
            alert_type: status,
            details,
        })
    }
}

/// Derives the alert list for a whole inventory, in inventory order.
pub fn stock_alerts(medicines: &[Medicine], on: NaiveDate) -> Vec<StockAlert> {
    medicines
        .iter()
        .filter_map(|m| StockAlert::for_medicine(m, on))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
