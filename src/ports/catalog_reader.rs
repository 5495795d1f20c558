//! Read-side port for the Doormato catalog.

use async_trait::async_trait;

use crate::domain::catalog::{Canteen, MenuItem};
use crate::domain::foundation::{CanteenId, DomainError, MenuItemId};

/// Read access to canteens and menu items.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Lists all canteens.
    async fn list_canteens(&self) -> Result<Vec<Canteen>, DomainError>;

    /// Lists one canteen's menu.
    async fn list_menu(&self, canteen: &CanteenId) -> Result<Vec<MenuItem>, DomainError>;

    /// Looks up a single menu item for pricing at order time.
    async fn find_item(&self, id: &MenuItemId) -> Result<Option<MenuItem>, DomainError>;
}
