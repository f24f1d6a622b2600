//! # Repository Module
//!
//! Collection-backed repositories for MediPOS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Repositories put a typed API in front of the collection files.         │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │                                                                 │
//! │       │  store.medicines().search("dolo")                               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  MedicineRepository                                                     │
//! │  ├── get_all(&self)                                                     │
//! │  ├── add(&self, medicine)                                               │
//! │  ├── search(&self, query)                                               │
//! │  └── alerts(&self, on)                                                  │
//! │       │                                                                 │
//! │       │  whole-file JSON read/write                                     │
//! │       ▼                                                                 │
//! │  medicines.json                                                         │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Validation and seeding live in one place                             │
//! │  • File layout is isolated from callers                                 │
//! │  • Business math stays in medipos-core                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MedicineRepository`](medicine::MedicineRepository) - Inventory records, search, alerts
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer records and lookup
//! - [`SaleRepository`](sale::SaleRepository) - Recorded sales
//! - [`SettingsRepository`](settings::SettingsRepository) - Store settings document

pub mod customer;
pub mod medicine;
pub mod sale;
pub mod settings;
