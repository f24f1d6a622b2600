//! # Import & Export
//!
//! Backup and data-transfer operations over the collection files.
//!
//! ## Transfer Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Import / Export                                    │
//! │                                                                         │
//! │  EXPORT (per collection)                                                │
//! │  ├── export_json(kind)  → pretty JSON array of the records              │
//! │  └── export_csv(kind)   → header row + one line per record              │
//! │                                                                         │
//! │  BACKUP / RESTORE (whole store)                                         │
//! │  ├── export_backup()    → one JSON document with every collection       │
//! │  └── import_backup()    → overwrites each collection the document       │
//! │                           carries; collections absent from the backup   │
//! │                           are left untouched                            │
//! │                                                                         │
//! │  Import is overwrite, not merge: a collection present in the backup     │
//! │  replaces the stored one wholesale. Settings travel with the backup     │
//! │  when present.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! CSV columns are the record's serialized field names; string values
//! containing commas are quoted, nested values are emitted as quoted JSON,
//! and nulls render as empty cells.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use medipos_core::types::{Customer, Medicine, Sale, StoreSettings};

use crate::error::StoreResult;
use crate::Store;

// =============================================================================
// Collection Selection
// =============================================================================

/// Which collection a per-collection export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Medicines,
    Customers,
    Sales,
}

impl CollectionKind {
    /// Collection name used in export file naming.
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Medicines => "medicines",
            CollectionKind::Customers => "customers",
            CollectionKind::Sales => "sales",
        }
    }
}

// =============================================================================
// Backup Document
// =============================================================================

/// The whole-store backup document.
///
/// Every field is optional on the way in, so a partial backup restores
/// only what it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicines: Option<Vec<Medicine>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers: Option<Vec<Customer>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<Sale>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<StoreSettings>,
}

// =============================================================================
// Store Operations
// =============================================================================

impl Store {
    /// Exports one collection as a pretty JSON array.
    pub fn export_json(&self, kind: CollectionKind) -> StoreResult<String> {
        let json = match kind {
            CollectionKind::Medicines => {
                serde_json::to_string_pretty(&self.medicines().get_all()?)?
            }
            CollectionKind::Customers => {
                serde_json::to_string_pretty(&self.customers().get_all()?)?
            }
            CollectionKind::Sales => serde_json::to_string_pretty(&self.sales().get_all()?)?,
        };
        Ok(json)
    }

    /// Exports one collection as CSV.
    ///
    /// An empty collection exports as an empty document; whether to offer
    /// that is the caller's call.
    pub fn export_csv(&self, kind: CollectionKind) -> StoreResult<String> {
        let rows = match kind {
            CollectionKind::Medicines => serde_json::to_value(self.medicines().get_all()?)?,
            CollectionKind::Customers => serde_json::to_value(self.customers().get_all()?)?,
            CollectionKind::Sales => serde_json::to_value(self.sales().get_all()?)?,
        };
        Ok(rows_to_csv(rows.as_array().map_or(&[], Vec::as_slice)))
    }

    /// Exports the whole store as one backup document.
    pub fn export_backup(&self) -> StoreResult<String> {
        let backup = Backup {
            medicines: Some(self.medicines().get_all()?),
            customers: Some(self.customers().get_all()?),
            sales: Some(self.sales().get_all()?),
            settings: Some(self.settings().load()?),
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Restores collections from a backup document.
    ///
    /// Each collection present in the backup overwrites the stored one;
    /// collections the backup does not carry are left untouched. A
    /// document that is not a valid backup restores nothing.
    pub fn import_backup(&self, json: &str) -> StoreResult<()> {
        let backup: Backup = serde_json::from_str(json)?;

        if let Some(medicines) = &backup.medicines {
            self.medicines().save_all(medicines)?;
        }
        if let Some(customers) = &backup.customers {
            self.customers().save_all(customers)?;
        }
        if let Some(sales) = &backup.sales {
            self.sales().save_all(sales)?;
        }
        if let Some(settings) = &backup.settings {
            self.settings().save(settings)?;
        }

        info!(
            medicines = backup.medicines.as_ref().map_or(0, Vec::len),
            customers = backup.customers.as_ref().map_or(0, Vec::len),
            sales = backup.sales.as_ref().map_or(0, Vec::len),
            "Imported backup"
        );
        Ok(())
    }
}

// =============================================================================
// CSV Rendering
// =============================================================================

/// Renders serialized records as CSV, headers from the first record.
fn rows_to_csv(rows: &[Value]) -> String {
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return String::new();
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut out = headers.join(",");
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| csv_cell(row.get(*h).unwrap_or(&Value::Null)))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// One CSV cell: plain scalars as-is, comma-bearing strings quoted,
/// nested values as quoted JSON, nulls empty.
fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if s.contains(',') => format!("\"{s}\""),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => format!("\"{value}\""),
        other => other.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::{Duration, NaiveDate};
    use medipos_core::types::InvoiceLine;
    use medipos_core::types::PaymentMode;

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

    fn customer(name: &str, mobile: &str, address: &str) -> Customer {
        Customer {
            id: 0,
            name: name.to_string(),
            mobile: mobile.to_string(),
            address: address.to_string(),
            age: None,
            gender: None,
            prescriptions: 0,
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
    fn test_export_json_lists_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 40)).unwrap();

        let json = store.export_json(CollectionKind::Medicines).unwrap();
        let parsed: Vec<Medicine> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].brand_name, "Dolo 650");
    }

    #[test]
    fn test_export_csv_headers_and_cells() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        // Comma in the address must be quoted; age is null → empty cell.
        store
            .customers()
            .add(customer("Ramesh Kumar", "9876543210", "12 Gandhi Road, Pune"))
            .unwrap();

        let csv = store.export_csv(CollectionKind::Customers).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.split(',').any(|h| h == "name"));
        assert!(header.split(',').any(|h| h == "mobile"));

        // Walk-in record is seeded first, customer row is second.
        let row = lines.nth(1).unwrap();
        assert!(row.contains("\"12 Gandhi Road, Pune\""));
        assert!(row.contains("Ramesh Kumar"));
    }

    #[test]
    fn test_export_csv_empty_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.export_csv(CollectionKind::Medicines).unwrap(), "");
    }

    #[test]
    fn test_backup_round_trip_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 40)).unwrap();
        store
            .commit_sale(
                &[line("Dolo 650", "DL2401", 100.0, 2)],
                "Walk-in Customer",
                today(),
                PaymentMode::Cash,
            )
            .unwrap();
        let backup = store.export_backup().unwrap();

        // Restore into a fresh store with different content.
        let dir2 = tempfile::tempdir().unwrap();
        let restored = Store::open(dir2.path()).unwrap();
        restored.medicines().add(medicine("Crocin", "CR2402", 5)).unwrap();
        restored.import_backup(&backup).unwrap();

        let medicines = restored.medicines().get_all().unwrap();
        assert_eq!(medicines.len(), 1);
        assert_eq!(medicines[0].brand_name, "Dolo 650");
        assert_eq!(medicines[0].stock, 38);

        let sales = restored.sales().get_all().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].invoice_id, "JA-2425-0001");
    }

    #[test]
    fn test_partial_backup_leaves_other_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 40)).unwrap();
        store.customers().add(customer("Ramesh Kumar", "9876543210", "")).unwrap();

        store
            .import_backup(r#"{"medicines": []}"#)
            .unwrap();

        assert!(store.medicines().get_all().unwrap().is_empty());
        // Customers were not in the backup, so they survive.
        assert_eq!(store.customers().get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_backup_carries_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let mut settings = store.settings().load().unwrap();
        settings.store_name = "Jeevan Aushadhi".to_string();
        store.settings().save(&settings).unwrap();

        let backup = store.export_backup().unwrap();

        let dir2 = tempfile::tempdir().unwrap();
        let restored = Store::open(dir2.path()).unwrap();
        restored.import_backup(&backup).unwrap();
        assert_eq!(restored.settings().load().unwrap().store_name, "Jeevan Aushadhi");
    }

    #[test]
    fn test_import_rejects_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.medicines().add(medicine("Dolo 650", "DL2401", 40)).unwrap();

        let err = store.import_backup("not json").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
        // Nothing was restored.
        assert_eq!(store.medicines().get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_collection_kind_names() {
        assert_eq!(CollectionKind::Medicines.name(), "medicines");
        assert_eq!(CollectionKind::Customers.name(), "customers");
        assert_eq!(CollectionKind::Sales.name(), "sales");
    }
}
