//! # Pricing Module
//!
//! Invoice line pricing and bill aggregation.
//!
//! ## Rounding Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUND ONCE, AT THE END                                                 │
//! │                                                                         │
//! │  Per-line amounts are fractional (discount and GST are percentages),   │
//! │  so rounding each line and then summing accumulates error:             │
//! │                                                                         │
//! │    round(94.504) + round(94.504) = 189.00   ← per-line rounding        │
//! │    round(94.504  +  94.504)      = 189.01   ← correct payable          │
//! │                                                                         │
//! │  OUR RULE: every intermediate amount keeps full precision. The only    │
//! │  rounding this module performs is the final payable amount, rounded    │
//! │  half-up to a whole currency unit. Two-decimal display rounding is a   │
//! │  presentation concern and happens in the frontend.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Line Formula
//! ```text
//! discounted_unit = mrp × (1 − discount/100)
//! gst_amount      = discounted_unit × gst/100
//! line_net        = (discounted_unit + gst_amount) × qty
//! ```
//!
//! Inputs are expected pre-sanitized by the caller (see [`crate::validation`]):
//! non-numeric entry becomes 0, non-positive quantity becomes 1. The formulas
//! themselves tolerate any numeric value without special-casing; percentage
//! range checks are a caller concern.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::InvoiceLine;

// =============================================================================
// Per-Line Pricing
// =============================================================================

/// Unit price after the line discount is applied.
#[inline]
pub fn discounted_unit_price(line: &InvoiceLine) -> f64 {
    line.mrp * (1.0 - line.discount / 100.0)
}

/// GST amount on one discounted unit.
#[inline]
pub fn unit_gst_amount(line: &InvoiceLine) -> f64 {
    discounted_unit_price(line) * (line.gst / 100.0)
}

/// Net payable amount for one invoice line.
///
/// Never negative for valid (non-negative, discount ≤ 100) inputs.
/// Full precision; display rounding happens downstream.
///
/// ## Example
/// ```rust
/// use medipos_core::pricing::line_net_amount;
/// use medipos_core::types::InvoiceLine;
///
/// let mut line = InvoiceLine::new(1);
/// line.name = "Dolo 650".to_string();
/// line.mrp = 100.0;
/// line.discount = 10.0;
/// line.gst = 5.0;
/// line.qty = 2;
///
/// // (100 × 0.90 + 90 × 0.05) × 2 = (90 + 4.5) × 2 = 189.00
/// assert_eq!(line_net_amount(&line), 189.0);
/// ```
pub fn line_net_amount(line: &InvoiceLine) -> f64 {
    let discounted = discounted_unit_price(line);
    let gst_amount = discounted * (line.gst / 100.0);
    (discounted + gst_amount) * line.qty as f64
}

// =============================================================================
// Payable Rounding
// =============================================================================

/// Rounds a currency amount half-up to the nearest whole unit.
///
/// ## Example
/// ```rust
/// use medipos_core::pricing::round_half_up;
///
/// assert_eq!(round_half_up(189.4), 189);
/// assert_eq!(round_half_up(189.5), 190);
/// ```
#[inline]
pub fn round_half_up(amount: f64) -> i64 {
    (amount + 0.5).floor() as i64
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// Aggregated bill amounts, derived from the current set of lines.
///
/// Recomputed on every change; never persisted independently of the lines
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Σ mrp × qty, before discount and GST.
    pub subtotal: f64,

    /// Σ mrp × qty × discount/100.
    pub total_discount: f64,

    /// Σ discounted_unit × gst/100 × qty.
    pub total_gst: f64,

    /// subtotal − discount + GST, at full precision.
    pub final_total: f64,

    /// Final total rounded half-up to a whole currency unit.
    pub payable: i64,
}

impl InvoiceTotals {
    /// The all-zero totals of an invoice with no billable content.
    pub const fn zero() -> Self {
        InvoiceTotals {
            subtotal: 0.0,
            total_discount: 0.0,
            total_gst: 0.0,
            final_total: 0.0,
            payable: 0,
        }
    }

    /// Computes totals over the non-empty lines of an invoice.
    ///
    /// Empty trailing lines (no name, zero MRP) are the rows the operator
    /// has not filled in yet; they contribute nothing. Aggregation is
    /// order-independent: permuting the lines does not change any total.
    ///
    /// ## Example
    /// ```rust
    /// use medipos_core::pricing::InvoiceTotals;
    /// use medipos_core::types::InvoiceLine;
    ///
    /// let mut line = InvoiceLine::new(1);
    /// line.name = "Azithral 500".to_string();
    /// line.mrp = 100.0;
    /// line.discount = 10.0;
    /// line.gst = 5.0;
    /// line.qty = 2;
    ///
    /// let totals = InvoiceTotals::compute(&[line, InvoiceLine::new(2)]);
    /// assert_eq!(totals.subtotal, 200.0);
    /// assert_eq!(totals.total_discount, 20.0);
    /// assert_eq!(totals.total_gst, 9.0);
    /// assert_eq!(totals.final_total, 189.0);
    /// assert_eq!(totals.payable, 189);
    /// ```
    pub fn compute(lines: &[InvoiceLine]) -> Self {
        let mut subtotal = 0.0;
        let mut total_discount = 0.0;
        let mut total_gst = 0.0;

        for line in lines.iter().filter(|l| !l.is_empty()) {
            let qty = line.qty as f64;
            subtotal += line.mrp * qty;
            total_discount += line.mrp * qty * (line.discount / 100.0);
            total_gst += discounted_unit_price(line) * (line.gst / 100.0) * qty;
        }

        let final_total = subtotal - total_discount + total_gst;

        InvoiceTotals {
            subtotal,
            total_discount,
            total_gst,
            final_total,
            payable: round_half_up(final_total),
        }
    }
}

impl Default for InvoiceTotals {
    fn default() -> Self {
        InvoiceTotals::zero()
    }
}

// =============================================================================
// Invoice Numbering
// =============================================================================

/// Generates the next invoice number from the sale count so far.
///
/// ## Format
/// `{prefix}-{NNNN}` with a 4-digit zero-padded sequence, e.g. `JA-2425-0001`
/// for the first sale.
pub fn next_invoice_number(prefix: &str, sale_count: usize) -> String {
    format!("{}-{:04}", prefix, sale_count + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================
