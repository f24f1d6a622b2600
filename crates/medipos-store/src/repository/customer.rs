//! # Customer Repository
//!
//! Customer records and billing-time lookup.
//!
//! The walk-in customer is seeded on first read, so billing always has a
//! fallback record even on a fresh store.

use std::path::Path;

use tracing::debug;

use medipos_core::types::Customer;
use medipos_core::validation::validate_mobile;
use medipos_core::CoreError;

use crate::collection::Collection;
use crate::error::StoreResult;

/// Minimum query length before customer search returns suggestions.
///
/// One character matches half the book; two is where suggestions start
/// being useful.
const MIN_SEARCH_LEN: usize = 2;

/// Repository for customer operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    collection: Collection<Customer>,
}

impl CustomerRepository {
    /// Creates a repository over the store directory.
    pub fn new(dir: &Path) -> Self {
        CustomerRepository {
            collection: Collection::new(dir, "customers"),
        }
    }

    /// Loads all customers, seeding the walk-in record on a fresh store.
    pub fn get_all(&self) -> StoreResult<Vec<Customer>> {
        let mut customers = self.collection.load()?;

        if customers.is_empty() {
            debug!("Seeding walk-in customer");
            customers.push(Customer::walk_in());
            self.collection.save(&customers)?;
        }

        Ok(customers)
    }

    /// Replaces the full customer collection.
    pub fn save_all(&self, customers: &[Customer]) -> StoreResult<()> {
        self.collection.save(customers)
    }

    /// Adds a customer.
    ///
    /// ## Validation
    /// - Name is required
    /// - Mobile must be 10-12 digits
    pub fn add(&self, mut customer: Customer) -> StoreResult<Customer> {
        if customer.name.trim().is_empty() {
            return Err(CoreError::from(medipos_core::ValidationError::Required {
                field: "customer name".to_string(),
            })
            .into());
        }
        validate_mobile(&customer.mobile).map_err(CoreError::from)?;

        let mut customers = self.get_all()?;
        customer.id = customers.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        debug!(id = customer.id, name = %customer.name, "Adding customer");

        customers.push(customer.clone());
        self.collection.save(&customers)?;
        Ok(customer)
    }

    /// Searches customers by name or mobile.
    ///
    /// Case-insensitive substring match. Queries shorter than
    /// [`MIN_SEARCH_LEN`] characters return nothing.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Customer>> {
        let query = query.trim().to_lowercase();
        if query.len() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }

        let customers = self.get_all()?;
        Ok(customers
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&query) || c.mobile.contains(&query))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
