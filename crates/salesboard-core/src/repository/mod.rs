//! Sales repository: where raw records come from
//!
//! The analytics path only needs `fetch_sales`. Two implementations ship:
//! - [`RestSalesRepository`] queries the hosted PostgREST backend
//! - [`MemoryRepository`] serves in-process vectors with the same filter semantics

use std::future::Future;

use salesboard_types::{Customer, Product, Sale};

use crate::error::DataFetchError;
use crate::period::DateRange;

pub mod memory;
pub mod rest;

pub use memory::MemoryRepository;
pub use rest::RestSalesRepository;

/// Shape of a sales query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesQuery {
    /// Maximum rows to return
    pub limit: Option<usize>,
    /// Order by `sale_date` descending
    pub newest_first: bool,
    /// Embed customer and product snapshots
    pub with_relations: bool,
}

impl SalesQuery {
    /// Current-period rows for aggregation (with snapshots)
    pub fn analytics() -> Self {
        Self {
            limit: None,
            newest_first: false,
            with_relations: true,
        }
    }

    /// Previous-period rows for growth (ids and amounts are enough)
    pub fn comparison() -> Self {
        Self::default()
    }

    /// Recent sales listing, newest first
    pub fn recent(limit: Option<usize>) -> Self {
        Self {
            limit,
            newest_first: true,
            with_relations: true,
        }
    }
}

/// Source of sales, customers and products
///
/// Implementations return an empty `Vec` (not an error) when nothing matches.
pub trait SalesRepository: Send + Sync {
    /// Sales with `range.start <= sale_date <= range.end`
    fn fetch_sales(
        &self,
        range: DateRange,
        query: SalesQuery,
    ) -> impl Future<Output = Result<Vec<Sale>, DataFetchError>> + Send;

    /// All customers, ordered by name
    fn fetch_customers(&self) -> impl Future<Output = Result<Vec<Customer>, DataFetchError>> + Send;

    /// Active products, ordered by name
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, DataFetchError>> + Send;
}
