//! # medipos-core: Pure Business Logic for MediPOS
//!
//! This crate is the **heart** of MediPOS, a pharmacy point-of-sale and
//! inventory system. It contains all business logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MediPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser UI)                        │   │
//! │  │    Billing ──► Inventory ──► Dashboard ──► Reports ──► Settings │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medipos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   stock   │  │  reports  │  │   │
//! │  │   │ Invoice   │  │ LineNet   │  │ Status    │  │ Monthly   │  │   │
//! │  │   │ Medicine  │  │ Totals    │  │ Alerts    │  │ TopSeller │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 medipos-store (Persistence Layer)               │   │
//! │  │           JSON collection files, repositories, checkout         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InvoiceLine, Medicine, Customer, Sale, etc.)
//! - [`pricing`] - Invoice line pricing and bill aggregation
//! - [`stock`] - Stock status classification and inventory alerts
//! - [`reports`] - Sales report aggregation (revenue, monthly, top sellers)
//! - [`error`] - Domain error types
//! - [`validation`] - Input sanitization and business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Full Precision**: Monetary intermediates keep full precision; rounding
//!    happens exactly once, at the payable amount
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use medipos_core::pricing::{line_net_amount, InvoiceTotals};
//! use medipos_core::types::InvoiceLine;
//!
//! let line = InvoiceLine {
//!     id: 1,
//!     name: "Dolo 650".to_string(),
//!     batch: "DL2401".to_string(),
//!     expiry: "08/27".to_string(),
//!     qty: 2,
//!     mrp: 100.0,
//!     discount: 10.0,
//!     gst: 5.0,
//! };
//!
//! // Net amount: 100 × 0.90 = 90, + 5% GST = 94.50, × 2 = 189.00
//! assert_eq!(line_net_amount(&line), 189.0);
//!
//! let totals = InvoiceTotals::compute(std::slice::from_ref(&line));
//! assert_eq!(totals.payable, 189);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pricing;
pub mod reports;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use medipos_core::StockStatus` instead of
// `use medipos_core::stock::StockStatus`

pub use error::{CoreError, ValidationError};
pub use pricing::InvoiceTotals;
pub use stock::{StockAlert, StockStatus};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days ahead of expiry within which stock is flagged as near-expiry.
///
/// ## Why a constant?
/// The 60-day disposal-priority window is store policy, not configuration.
/// The window is a closed bound: a medicine expiring exactly 60 days from
/// the evaluation date is already near-expiry.
pub const NEAR_EXPIRY_WINDOW_DAYS: i64 = 60;

/// Stock level below which a medicine is flagged as low stock.
///
/// ## Why a constant?
/// Fixed reorder-point policy. Stock of 1..=9 units is low; 10 or more
/// is healthy. Zero is its own status (out of stock), not low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Maximum quantity of a single line on an invoice.
///
/// ## Business Reason
/// Prevents accidental over-billing (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Name of the default walk-in customer record.
///
/// Billing falls back to this customer when no customer is selected.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// Default invoice number prefix used when settings carry none.
pub const DEFAULT_INVOICE_PREFIX: &str = "JA-2425";
