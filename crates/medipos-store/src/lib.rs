//! # medipos-store: Persistence Layer for MediPOS
//!
//! This crate persists MediPOS collections as JSON files and orchestrates
//! the checkout flow across them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MediPOS Data Flow                                │
//! │                                                                         │
//! │  Frontend action (commit sale, search inventory)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   medipos-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Repositories │    │  Collection  │  │   │
//! │  │   │   (lib.rs)    │    │ (medicine.rs) │    │    files     │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ commit_sale   │◄───│ MedicineRepo  │    │ medicines    │  │   │
//! │  │   │ orchestration │    │ CustomerRepo  │    │ customers    │  │   │
//! │  │   │               │    │ SaleRepo      │    │ sales        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Store Directory                               │   │
//! │  │   medicines.json  customers.json  sales.json  settings.json     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Whole-file JSON collection persistence
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (medicine, customer, sale, settings)
//! - [`transfer`] - Backup export/import and per-collection JSON/CSV export
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medipos_store::Store;
//!
//! let store = Store::open("./medipos_data")?;
//!
//! let hits = store.medicines().search("dolo")?;
//! let sale = store.commit_sale(&lines, "Walk-in Customer", today, PaymentMode::Cash)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod error;
pub mod repository;
pub mod transfer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use transfer::{Backup, CollectionKind};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::medicine::MedicineRepository;
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use medipos_core::pricing::{next_invoice_number, InvoiceTotals};
use medipos_core::types::{InvoiceLine, PaymentMode, Sale, SaleStatus};
use medipos_core::{CoreError, WALK_IN_CUSTOMER};

// =============================================================================
// Store
// =============================================================================

/// Handle to a store directory holding all MediPOS collections.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Opens a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Store> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "Opened store");
        Ok(Store { dir })
    }

    /// Path of the store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Inventory repository.
    pub fn medicines(&self) -> MedicineRepository {
        MedicineRepository::new(&self.dir)
    }

    /// Customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(&self.dir)
    }

    /// Sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(&self.dir)
    }

    /// Settings repository.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(&self.dir)
    }

    /// Commits a bill: records the sale and decrements inventory.
    ///
    /// ## What This Does
    /// 1. Keeps only billable lines; rejects the bill if none remain
    /// 2. Computes totals over the billable lines
    /// 3. Generates the next invoice number from the sale count
    /// 4. Decrements stock for each line matched by (brand, batch)
    /// 5. Appends the sale with the billed lines frozen onto it
    ///
    /// ## Stock Matching
    /// A billed line that matches no inventory record is sold anyway; the
    /// miss is logged and stock is left untouched. Manual entries that
    /// never came from inventory are expected to miss. There is no
    /// availability check, so stock can go negative.
    pub fn commit_sale(
        &self,
        lines: &[InvoiceLine],
        customer: &str,
        date: NaiveDate,
        payment_mode: PaymentMode,
    ) -> StoreResult<Sale> {
        let billable: Vec<InvoiceLine> = lines
            .iter()
            .filter(|l| l.is_billable())
            .cloned()
            .collect();
        if billable.is_empty() {
            return Err(CoreError::EmptyInvoice.into());
        }

        let totals = InvoiceTotals::compute(&billable);

        let settings = self.settings().load()?;
        let invoice_id = next_invoice_number(&settings.invoice_prefix, self.sales().count()?);

        let medicine_repo = self.medicines();
        let mut medicines = medicine_repo.get_all()?;
        for line in &billable {
            match medicines.iter_mut().find(|m| m.matches_line(line)) {
                Some(medicine) => {
                    medicine.stock -= line.qty;
                }
                None => {
                    warn!(name = %line.name, batch = %line.batch, "No inventory match for billed line, stock not decremented");
                }
            }
        }
        medicine_repo.save_all(&medicines)?;

        let customer = customer.trim();
        let customer = if customer.is_empty() {
            WALK_IN_CUSTOMER
        } else {
            customer
        };

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            invoice_id,
            customer: customer.to_string(),
            date,
            total: totals.payable,
            status: SaleStatus::Completed,
            payment_mode,
            items: billable,
        };

        self.sales().append(&sale)?;
        info!(invoice_id = %sale.invoice_id, total = sale.total, customer = %sale.customer, "Committed sale");

        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use medipos_core::types::Medicine;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    fn medicine(brand: &str, batch: &str, stock: i64) -> Medicine {
        Medicine {
            id: 0,
            brand_name: brand.to_string(),
            generic_name: "Paracetamol".to_string(),
            strength: "650mg".to_string(),
            form: "Tablet".to_string(),
            hsn: "3004".to_string(),
            stock,
            mrp: 33.5,
            expiry_date: today() + Duration::days(365),
            batch_no: batch.to_string(),
            gst: 12.0,
        }
    }

    fn line(name: &str, batch: &str, mrp: f64, qty: i64) -> InvoiceLine {
        InvoiceLine {
            id: 1,
            name: name.to_string(),
            batch: batch.to_string(),
            expiry: "08/27".to_string(),
            qty,
            mrp,
            discount: 0.0,
            gst: 0.0,
        }
    }

    #[test]
    fn test_commit_sale_records_and_decrements() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 40)).unwrap();

        let sale = store
            .commit_sale(
                &[line("Dolo 650", "DL2401", 100.0, 2)],
                "Walk-in Customer",
                today(),
                PaymentMode::Cash,
            )
            .unwrap();

        assert_eq!(sale.invoice_id, "JA-2425-0001");
        assert_eq!(sale.total, 200);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.items.len(), 1);

        let medicines = store.medicines().get_all().unwrap();
        assert_eq!(medicines[0].stock, 38);

        let sales = store.sales().get_all().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0], sale);
    }

    #[test]
    fn test_invoice_numbers_increment() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let first = store
            .commit_sale(&[line("A", "B1", 10.0, 1)], "X", today(), PaymentMode::Cash)
            .unwrap();
        let second = store
            .commit_sale(&[line("A", "B1", 10.0, 1)], "X", today(), PaymentMode::Upi)
            .unwrap();

        assert_eq!(first.invoice_id, "JA-2425-0001");
        assert_eq!(second.invoice_id, "JA-2425-0002");
    }

    #[test]
    fn test_invoice_number_uses_settings_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let mut settings = store.settings().load().unwrap();
        settings.invoice_prefix = "JA-2526".to_string();
        store.settings().save(&settings).unwrap();

        let sale = store
            .commit_sale(&[line("A", "B1", 10.0, 1)], "X", today(), PaymentMode::Cash)
            .unwrap();
        assert_eq!(sale.invoice_id, "JA-2526-0001");
    }

    #[test]
    fn test_commit_sale_rejects_empty_bill() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        // No lines at all.
        let err = store
            .commit_sale(&[], "X", today(), PaymentMode::Cash)
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::EmptyInvoice)));

        // Only blank rows.
        let err = store
            .commit_sale(&[InvoiceLine::new(1)], "X", today(), PaymentMode::Cash)
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::EmptyInvoice)));
        assert_eq!(store.sales().count().unwrap(), 0);
    }

    #[test]
    fn test_commit_sale_drops_blank_rows_from_items() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let sale = store
            .commit_sale(
                &[line("A", "B1", 10.0, 1), InvoiceLine::new(2)],
                "X",
                today(),
                PaymentMode::Cash,
            )
            .unwrap();
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].name, "A");
    }

    #[test]
    fn test_unmatched_line_sells_without_decrement() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 40)).unwrap();

        // Batch differs, so no inventory record matches.
        let sale = store
            .commit_sale(
                &[line("Dolo 650", "DL9999", 100.0, 2)],
                "X",
                today(),
                PaymentMode::Cash,
            )
            .unwrap();
        assert_eq!(sale.total, 200);
        assert_eq!(store.medicines().get_all().unwrap()[0].stock, 40);
    }

    #[test]
    fn test_stock_can_go_negative() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 1)).unwrap();

        store
            .commit_sale(
                &[line("Dolo 650", "DL2401", 100.0, 3)],
                "X",
                today(),
                PaymentMode::Cash,
            )
            .unwrap();
        assert_eq!(store.medicines().get_all().unwrap()[0].stock, -2);
    }

    #[test]
    fn test_blank_customer_falls_back_to_walk_in() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let sale = store
            .commit_sale(&[line("A", "B1", 10.0, 1)], "   ", today(), PaymentMode::Cash)
            .unwrap();
        assert_eq!(sale.customer, WALK_IN_CUSTOMER);
    }

    #[test]
    fn test_commit_sale_rounds_payable_half_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        // 75.25 × 2 = 150.50 → 151
        let sale = store
            .commit_sale(&[line("A", "B1", 75.25, 2)], "X", today(), PaymentMode::Cash)
            .unwrap();
        assert_eq!(sale.total, 151);
    }
}
