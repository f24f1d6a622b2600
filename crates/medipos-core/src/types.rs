//! # Domain Types
//!
//! Core domain types used throughout MediPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InvoiceLine    │   │    Medicine     │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, batch    │   │  brand_name     │   │  name, mobile   │       │
//! │  │  qty, mrp       │   │  batch_no       │   │  address, age   │       │
//! │  │  discount, gst  │   │  stock, expiry  │   │  prescriptions  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │   SaleStatus    │   │  StoreSettings  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Completed      │   │  store_name     │       │
//! │  │  invoice_id     │   │  Pending        │   │  gstin, flags   │       │
//! │  │  total, items   │   │  Draft          │   │  invoice_prefix │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A `Sale` has:
//! - `id`: UUID v4 - immutable, used for record relations
//! - `invoice_id`: human-readable business identifier printed on the bill

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Invoice Line
// =============================================================================

/// One product entry within a bill.
///
/// Lines are value objects: the operator fills fields in place and the
/// totals are recomputed from the full set of lines on every change.
/// A new line starts with zero-valued fields except `qty`, which defaults
/// to 1 (the minimum billable quantity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    /// Line identifier, unique within one invoice.
    pub id: u64,

    /// Product (brand) name as entered or picked from inventory.
    pub name: String,

    /// Batch code copied from the matched medicine.
    pub batch: String,

    /// Expiry label shown on the bill (MM/YY).
    pub expiry: String,

    /// Quantity sold. Positive; invalid input is coerced to 1 upstream.
    pub qty: i64,

    /// Maximum Retail Price per unit (pre-discount ceiling).
    pub mrp: f64,

    /// Discount percentage (0-100 by convention; not clamped here).
    pub discount: f64,

    /// GST percentage applied after discount (slab rate).
    pub gst: f64,
}

impl InvoiceLine {
    /// Creates a blank line with the given identifier.
    pub fn new(id: u64) -> Self {
        InvoiceLine {
            id,
            name: String::new(),
            batch: String::new(),
            expiry: String::new(),
            qty: 1,
            mrp: 0.0,
            discount: 0.0,
            gst: 0.0,
        }
    }

    /// A line is logically empty when no product name has been entered
    /// and the MRP is still zero.
    ///
    /// Empty trailing lines exist while the operator types; they must be
    /// excluded from totals and from persistence.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.mrp == 0.0
    }

    /// A line is billable when it can be saved on a sale and affect stock:
    /// named product, positive price, positive quantity.
    pub fn is_billable(&self) -> bool {
        !self.name.trim().is_empty() && self.mrp > 0.0 && self.qty > 0
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine record in the inventory.
///
/// Lifecycle: created on inventory entry, stock decremented at sale time,
/// never auto-deleted. Zero stock is a status, not a deletion trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Record identifier.
    pub id: u64,

    /// Brand name shown on the bill (matched against invoice lines).
    pub brand_name: String,

    /// Generic (chemical) name, used for search.
    pub generic_name: String,

    /// Dosage strength, e.g. "650mg".
    pub strength: String,

    /// Dosage form, e.g. "Tablet", "Syrup".
    pub form: String,

    /// HSN code for tax reporting.
    pub hsn: String,

    /// Units on hand. Non-negative on entry; selling past zero is not
    /// blocked, so a stale bill can drive this negative.
    pub stock: i64,

    /// Maximum Retail Price per unit.
    pub mrp: f64,

    /// Expiry date of this batch.
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,

    /// Batch number (second half of the sale-matching key).
    pub batch_no: String,

    /// GST slab percentage for this medicine.
    pub gst: f64,
}

impl Medicine {
    /// Short expiry label for bill rows (MM/YY).
    pub fn expiry_label(&self) -> String {
        self.expiry_date.format("%m/%y").to_string()
    }

    /// Matches a billed line against this record by (brand name, batch).
    pub fn matches_line(&self, line: &InvoiceLine) -> bool {
        self.brand_name == line.name && self.batch_no == line.batch
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Customer gender, recorded when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    /// Number of prescriptions filled for this customer.
    pub prescriptions: u32,
}

impl Customer {
    /// The default customer used when billing without a selection.
    pub fn walk_in() -> Self {
        Customer {
            id: 1,
            name: crate::WALK_IN_CUSTOMER.to_string(),
            mobile: "9999999999".to_string(),
            address: String::new(),
            age: None,
            gender: None,
            prescriptions: 0,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// The status of a recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SaleStatus {
    /// Sale has been paid and finalized.
    Completed,
    /// Awaiting payment.
    Pending,
    /// Saved without finalizing.
    Draft,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Draft
    }
}

/// Payment mode chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
    Wallet,
}

impl Default for PaymentMode {
    fn default() -> Self {
        PaymentMode::Cash
    }
}

/// A recorded sale.
///
/// Uses the snapshot pattern: the billed lines are frozen onto the sale,
/// so the record stays correct even if inventory prices change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Record key (UUID v4).
    pub id: String,

    /// Business identifier printed on the bill, e.g. `JA-2425-0001`.
    pub invoice_id: String,

    /// Customer name at time of sale (frozen).
    pub customer: String,

    /// Date of sale.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Payable amount in whole currency units (final total, rounded half-up).
    pub total: i64,

    pub status: SaleStatus,

    pub payment_mode: PaymentMode,

    /// Billable lines at time of sale (frozen).
    pub items: Vec<InvoiceLine>,
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store-level configuration used for invoice formatting.
///
/// Passed explicitly into any function that formats output; never read
/// from ambient context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub gstin: String,
    pub show_phone_on_invoice: bool,
    pub show_email_on_invoice: bool,
    pub show_gstin_on_invoice: bool,
    pub invoice_footer_note: String,
    /// Prefix for generated invoice numbers.
    pub invoice_prefix: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            gstin: String::new(),
            show_phone_on_invoice: true,
            show_email_on_invoice: true,
            show_gstin_on_invoice: true,
            invoice_footer_note: "Medicines once sold cannot be returned unless expired/damaged."
                .to_string(),
            invoice_prefix: crate::DEFAULT_INVOICE_PREFIX.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_is_empty() {
        let line = InvoiceLine::new(1);
        assert!(line.is_empty());
        assert!(!line.is_billable());
        assert_eq!(line.qty, 1);
    }

    #[test]
    fn test_line_with_name_only_is_not_empty_but_not_billable() {
        let mut line = InvoiceLine::new(1);
        line.name = "Dolo 650".to_string();
        assert!(!line.is_empty());
        assert!(!line.is_billable()); // mrp still zero
    }

    #[test]
    fn test_billable_line() {
        let mut line = InvoiceLine::new(1);
        line.name = "Dolo 650".to_string();
        line.mrp = 33.5;
        line.qty = 2;
        assert!(line.is_billable());
    }

    #[test]
    fn test_zero_qty_is_not_billable() {
        let mut line = InvoiceLine::new(1);
        line.name = "Dolo 650".to_string();
        line.mrp = 33.5;
        line.qty = 0;
        assert!(!line.is_billable());
    }

    #[test]
    fn test_expiry_label() {
        let med = Medicine {
            id: 1,
            brand_name: "Dolo 650".to_string(),
            generic_name: "Paracetamol".to_string(),
            strength: "650mg".to_string(),
            form: "Tablet".to_string(),
            hsn: "3004".to_string(),
            stock: 40,
            mrp: 33.5,
            expiry_date: NaiveDate::from_ymd_opt(2027, 8, 1).unwrap(),
            batch_no: "DL2401".to_string(),
            gst: 12.0,
        };
        assert_eq!(med.expiry_label(), "08/27");
    }

    #[test]
    fn test_matches_line_requires_brand_and_batch() {
        let med = Medicine {
            id: 1,
            brand_name: "Dolo 650".to_string(),
            generic_name: "Paracetamol".to_string(),
            strength: "650mg".to_string(),
            form: "Tablet".to_string(),
            hsn: "3004".to_string(),
            stock: 40,
            mrp: 33.5,
            expiry_date: NaiveDate::from_ymd_opt(2027, 8, 1).unwrap(),
            batch_no: "DL2401".to_string(),
            gst: 12.0,
        };

        let mut line = InvoiceLine::new(1);
        line.name = "Dolo 650".to_string();
        line.batch = "DL2401".to_string();
        assert!(med.matches_line(&line));

        line.batch = "DL9999".to_string();
        assert!(!med.matches_line(&line));
    }

    #[test]
    fn test_walk_in_customer() {
        let c = Customer::walk_in();
        assert_eq!(c.name, crate::WALK_IN_CUSTOMER);
        assert_eq!(c.id, 1);
    }

    #[test]
    fn test_default_settings() {
        let s = StoreSettings::default();
        assert!(s.show_gstin_on_invoice);
        assert_eq!(s.invoice_prefix, crate::DEFAULT_INVOICE_PREFIX);
    }
}
