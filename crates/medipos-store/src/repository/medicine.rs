//! # Medicine Repository
//!
//! Inventory records: entry, search, and status derivation.
//!
//! ## Stock Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Medicine Lifecycle                                 │
//! │                                                                         │
//! │  1. ENTRY                                                               │
//! │     └── add() → validated, duplicate-checked, id assigned               │
//! │                                                                         │
//! │  2. SALE                                                                │
//! │     └── Store::commit_sale() decrements stock by (brand, batch) match   │
//! │                                                                         │
//! │  3. STATUS                                                              │
//! │     └── with_status() / alerts() classify fresh on every call           │
//! │                                                                         │
//! │  Records are never auto-deleted: zero stock is a status, not a          │
//! │  deletion trigger.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use medipos_core::stock::{stock_alerts, StockAlert, StockStatus};
use medipos_core::types::Medicine;
use medipos_core::validation::{
    validate_batch_no, validate_brand_name, validate_mrp, validate_percentage,
};
use medipos_core::{CoreError, ValidationError};

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};

/// Repository for inventory operations.
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    collection: Collection<Medicine>,
}

impl MedicineRepository {
    /// Creates a repository over the store directory.
    pub fn new(dir: &Path) -> Self {
        MedicineRepository {
            collection: Collection::new(dir, "medicines"),
        }
    }

    /// Loads the full inventory.
    pub fn get_all(&self) -> StoreResult<Vec<Medicine>> {
        self.collection.load()
    }

    /// Replaces the full inventory.
    pub fn save_all(&self, medicines: &[Medicine]) -> StoreResult<()> {
        self.collection.save(medicines)
    }

    /// Adds a medicine to the inventory.
    ///
    /// ## Validation
    /// - Brand name and batch number must be well-formed
    /// - MRP must be non-negative, GST within 0-100
    /// - The (brand name, batch number) pair must be unique; it is the key
    ///   sales use to decrement stock
    ///
    /// ## Returns
    /// The stored record with its assigned ID.
    pub fn add(&self, mut medicine: Medicine) -> StoreResult<Medicine> {
        validate_record(&medicine)?;

        let mut medicines = self.collection.load()?;
        check_unique(&medicines, &medicine)?;

        medicine.id = medicines.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        debug!(id = medicine.id, brand = %medicine.brand_name, batch = %medicine.batch_no, "Adding medicine");

        medicines.push(medicine.clone());
        self.collection.save(&medicines)?;
        Ok(medicine)
    }

    /// Updates a medicine record in place, matched by ID.
    ///
    /// Applies the same validation and brand/batch uniqueness rules as
    /// [`add`](Self::add). Stock edits and detail corrections from the
    /// inventory page go through here.
    pub fn update(&self, medicine: &Medicine) -> StoreResult<()> {
        validate_record(medicine)?;

        let mut medicines = self.collection.load()?;
        check_unique(&medicines, medicine)?;

        match medicines.iter_mut().find(|m| m.id == medicine.id) {
            Some(slot) => *slot = medicine.clone(),
            None => return Err(StoreError::not_found("Medicine", medicine.id.to_string())),
        }

        debug!(id = medicine.id, brand = %medicine.brand_name, "Updating medicine");
        self.collection.save(&medicines)
    }

    /// Removes a medicine record by ID.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let mut medicines = self.collection.load()?;
        let before = medicines.len();
        medicines.retain(|m| m.id != id);
        if medicines.len() == before {
            return Err(StoreError::not_found("Medicine", id.to_string()));
        }

        debug!(id, "Deleting medicine");
        self.collection.save(&medicines)
    }

    /// Searches the inventory by brand or generic name.
    ///
    /// Case-insensitive substring match. An empty query returns nothing:
    /// the billing search box shows no suggestions until the operator
    /// types.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Medicine>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let medicines = self.collection.load()?;
        Ok(medicines
            .into_iter()
            .filter(|m| {
                m.brand_name.to_lowercase().contains(&query)
                    || m.generic_name.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Loads the inventory with each record's status as of the given date.
    pub fn with_status(&self, on: NaiveDate) -> StoreResult<Vec<(Medicine, StockStatus)>> {
        let medicines = self.collection.load()?;
        Ok(medicines
            .into_iter()
            .map(|m| {
                let status = StockStatus::classify(&m, on);
                (m, status)
            })
            .collect())
    }

    /// Derives the dashboard alert list as of the given date.
    pub fn alerts(&self, on: NaiveDate) -> StoreResult<Vec<StockAlert>> {
        let medicines = self.collection.load()?;
        Ok(stock_alerts(&medicines, on))
    }
}

/// Field-level validation shared by add and update.
fn validate_record(medicine: &Medicine) -> StoreResult<()> {
    validate_brand_name(&medicine.brand_name).map_err(CoreError::from)?;
    validate_batch_no(&medicine.batch_no).map_err(CoreError::from)?;
    validate_mrp(medicine.mrp).map_err(CoreError::from)?;
    validate_percentage("gst", medicine.gst).map_err(CoreError::from)?;
    Ok(())
}

/// The (brand name, batch number) pair is the key sales use to decrement
/// stock, so it must stay unique. A record never conflicts with itself.
fn check_unique(medicines: &[Medicine], candidate: &Medicine) -> StoreResult<()> {
    if medicines.iter().any(|m| {
        m.id != candidate.id
            && m.brand_name == candidate.brand_name
            && m.batch_no == candidate.batch_no
    }) {
        return Err(CoreError::from(ValidationError::Duplicate {
            field: "brand/batch".to_string(),
            value: format!("{} / {}", candidate.brand_name, candidate.batch_no),
        })
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn medicine(brand: &str, batch: &str, stock: i64, expiry: NaiveDate) -> Medicine {
        Medicine {
            id: 0,
            brand_name: brand.to_string(),
            generic_name: "Paracetamol".to_string(),
            strength: "650mg".to_string(),
            form: "Tablet".to_string(),
            hsn: "3004".to_string(),
            stock,
            mrp: 33.5,
            expiry_date: expiry,
            batch_no: batch.to_string(),
            gst: 12.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        let a = repo
            .add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        let b = repo
            .add(medicine("Crocin", "CR2402", 25, today() + Duration::days(365)))
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_duplicate_brand_batch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        repo.add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        let err = repo
            .add(medicine("Dolo 650", "DL2401", 10, today() + Duration::days(365)))
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));

        // Same brand, different batch is a different record.
        repo.add(medicine("Dolo 650", "DL2402", 10, today() + Duration::days(365)))
            .unwrap();
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        assert!(repo
            .add(medicine("", "DL2401", 40, today() + Duration::days(365)))
            .is_err());
        assert!(repo
            .add(medicine("Dolo 650", "", 40, today() + Duration::days(365)))
            .is_err());

        let mut bad_gst = medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365));
        bad_gst.gst = 150.0;
        assert!(repo.add(bad_gst).is_err());
    }

    #[test]
    fn test_update_replaces_matched_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        let mut med = repo
            .add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        med.stock = 15;
        med.mrp = 35.0;
        repo.update(&med).unwrap();

        let stored = repo.get_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].stock, 15);
        assert_eq!(stored[0].mrp, 35.0);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        let med = medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365));
        let err = repo.update(&med).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "Medicine not found: 0");
    }

    #[test]
    fn test_update_cannot_steal_brand_batch_pair() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        repo.add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        let mut other = repo
            .add(medicine("Crocin", "CR2402", 25, today() + Duration::days(365)))
            .unwrap();

        // Renaming onto an existing (brand, batch) pair is rejected.
        other.brand_name = "Dolo 650".to_string();
        other.batch_no = "DL2401".to_string();
        assert!(repo.update(&other).is_err());

        // Updating a record onto its own pair is fine.
        let mut first = repo.get_all().unwrap()[0].clone();
        first.stock = 99;
        repo.update(&first).unwrap();
    }

    #[test]
    fn test_delete_removes_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        let med = repo
            .add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        repo.delete(med.id).unwrap();
        assert!(repo.get_all().unwrap().is_empty());

        let err = repo.delete(med.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_search_matches_brand_and_generic() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        repo.add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        repo.add(medicine("Azithral 500", "AZ2402", 25, today() + Duration::days(365)))
            .unwrap();

        // Brand match, case-insensitive.
        assert_eq!(repo.search("dolo").unwrap().len(), 1);
        // Generic match: both records share the generic name.
        assert_eq!(repo.search("paracetamol").unwrap().len(), 2);
        // No suggestions for an empty box.
        assert!(repo.search("").unwrap().is_empty());
        assert!(repo.search("   ").unwrap().is_empty());
        assert!(repo.search("xyz").unwrap().is_empty());
    }

    #[test]
    fn test_with_status_classifies_each_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        repo.add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        repo.add(medicine("Crocin", "CR2402", 3, today() + Duration::days(365)))
            .unwrap();

        let statuses = repo.with_status(today()).unwrap();
        assert_eq!(statuses[0].1, StockStatus::InStock);
        assert_eq!(statuses[1].1, StockStatus::LowStock);
    }

    #[test]
    fn test_alerts_skip_healthy_records() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MedicineRepository::new(dir.path());

        repo.add(medicine("Dolo 650", "DL2401", 40, today() + Duration::days(365)))
            .unwrap();
        repo.add(medicine("Crocin", "CR2402", 0, today() + Duration::days(365)))
            .unwrap();

        let alerts = repo.alerts(today()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].medicine, "Crocin");
        assert_eq!(alerts[0].alert_type, StockStatus::OutOfStock);
    }
}
