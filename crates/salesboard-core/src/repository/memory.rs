//! In-memory repository
//!
//! Mirrors the backend's query semantics (inclusive date filter, optional
//! embedding, newest-first ordering, limit) over plain vectors.

use salesboard_types::{Customer, Product, Sale};

use super::{SalesQuery, SalesRepository};
use crate::error::DataFetchError;
use crate::period::DateRange;

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    sales: Vec<Sale>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    /// Simulated outage: every call fails with this HTTP status
    outage: Option<u16>,
}

impl MemoryRepository {
    pub fn new(sales: Vec<Sale>, customers: Vec<Customer>, products: Vec<Product>) -> Self {
        Self {
            sales,
            customers,
            products,
            outage: None,
        }
    }

    /// Repository whose every call fails like an unreachable backend
    pub fn unavailable(status: u16) -> Self {
        Self {
            outage: Some(status),
            ..Self::default()
        }
    }

    fn check_outage(&self, operation: &str) -> Result<(), DataFetchError> {
        match self.outage {
            Some(status) => Err(DataFetchError::Status {
                operation: operation.to_string(),
                status,
                body: "simulated outage".to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Attach snapshots from the customer/product tables where missing
    fn embed(&self, mut sale: Sale) -> Sale {
        if sale.customer.is_none() {
            sale.customer = sale
                .customer_id
                .as_deref()
                .and_then(|id| self.customers.iter().find(|c| c.id == id))
                .cloned();
        }
        if sale.product.is_none() {
            sale.product = sale
                .product_id
                .as_deref()
                .and_then(|id| self.products.iter().find(|p| p.id == id))
                .cloned();
        }
        sale
    }

    fn query_sales(&self, range: DateRange, query: SalesQuery) -> Vec<Sale> {
        let mut rows: Vec<Sale> = self
            .sales
            .iter()
            .filter(|sale| range.contains(&sale.sale_date))
            .cloned()
            .map(|sale| {
                if query.with_relations {
                    self.embed(sale)
                } else {
                    Sale {
                        customer: None,
                        product: None,
                        ..sale
                    }
                }
            })
            .collect();

        if query.newest_first {
            rows.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        rows
    }
}

impl SalesRepository for MemoryRepository {
    async fn fetch_sales(
        &self,
        range: DateRange,
        query: SalesQuery,
    ) -> Result<Vec<Sale>, DataFetchError> {
        self.check_outage("sales")?;
        Ok(self.query_sales(range, query))
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, DataFetchError> {
        self.check_outage("customers")?;
        let mut customers = self.customers.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, DataFetchError> {
        self.check_outage("products")?;
        let mut products: Vec<Product> =
            self.products.iter().filter(|p| p.is_active).cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}
