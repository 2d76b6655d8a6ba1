use async_trait::async_trait;

use crate::{
    models::{CatalogTable, Deal, MenuItem},
    Result,
};

/// Read access to the shared catalog tables. Catalog data is not
/// user-scoped.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn menu(&self, table: CatalogTable) -> Result<Vec<MenuItem>>;

    async fn deals(&self) -> Result<Vec<Deal>>;
}
