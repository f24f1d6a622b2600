//! # Sale Repository
//!
//! Recorded sales: append, listing, and report feeds.
//!
//! Sales are append-only snapshots. The checkout orchestration that
//! creates them lives on [`Store::commit_sale`](crate::Store::commit_sale),
//! because it spans three collections (sales, medicines, settings).

use std::path::Path;

use tracing::debug;

use medipos_core::reports::{monthly_sales, top_sellers, total_revenue, MonthlySales, TopSeller};
use medipos_core::types::Sale;

use crate::collection::Collection;
use crate::error::StoreResult;

/// Repository for sale records.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    collection: Collection<Sale>,
}

impl SaleRepository {
    /// Creates a repository over the store directory.
    pub fn new(dir: &Path) -> Self {
        SaleRepository {
            collection: Collection::new(dir, "sales"),
        }
    }

    /// Loads all recorded sales, oldest first.
    pub fn get_all(&self) -> StoreResult<Vec<Sale>> {
        self.collection.load()
    }

    /// Replaces the full sale history. Used by backup restore.
    pub fn save_all(&self, sales: &[Sale]) -> StoreResult<()> {
        self.collection.save(sales)
    }

    /// Appends a sale record.
    pub fn append(&self, sale: &Sale) -> StoreResult<()> {
        debug!(id = %sale.id, invoice_id = %sale.invoice_id, total = sale.total, "Appending sale");
        let mut sales = self.collection.load()?;
        sales.push(sale.clone());
        self.collection.save(&sales)
    }

    /// Searches sales by invoice number or customer name.
    ///
    /// Case-insensitive substring match; an empty query lists everything
    /// (the sales page shows the full history unfiltered).
    pub fn search(&self, query: &str) -> StoreResult<Vec<Sale>> {
        let query = query.trim().to_lowercase();
        let sales = self.collection.load()?;
        if query.is_empty() {
            return Ok(sales);
        }

        Ok(sales
            .into_iter()
            .filter(|s| {
                s.invoice_id.to_lowercase().contains(&query)
                    || s.customer.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Number of recorded sales; drives invoice numbering.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.collection.load()?.len())
    }

    /// Total revenue across completed sales.
    pub fn total_revenue(&self) -> StoreResult<i64> {
        Ok(total_revenue(&self.collection.load()?))
    }

    /// Completed sales bucketed by calendar month.
    pub fn monthly_sales(&self) -> StoreResult<Vec<MonthlySales>> {
        Ok(monthly_sales(&self.collection.load()?))
    }

    /// Best-selling brands across completed sales.
    pub fn top_sellers(&self, limit: usize) -> StoreResult<Vec<TopSeller>> {
        Ok(top_sellers(&self.collection.load()?, limit))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
