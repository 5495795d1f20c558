//! Postgres-backed catalog reads.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Canteen, MenuItem};
use crate::domain::foundation::{CanteenId, DomainError, MenuItemId};
use crate::ports::CatalogReader;

use super::db_error;

pub struct PgCatalogReader {
    pool: PgPool,
}

impl PgCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CanteenRow {
    id: Uuid,
    name: String,
    location: Option<String>,
}

impl From<CanteenRow> for Canteen {
    fn from(row: CanteenRow) -> Self {
        Canteen {
            id: CanteenId::from_uuid(row.id),
            name: row.name,
            location: row.location,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: Uuid,
    canteen_id: Uuid,
    name: String,
    price: f64,
    available: bool,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: MenuItemId::from_uuid(row.id),
            canteen: CanteenId::from_uuid(row.canteen_id),
            name: row.name,
            price: row.price,
            available: row.available,
        }
    }
}

#[async_trait]
impl CatalogReader for PgCatalogReader {
    async fn list_canteens(&self) -> Result<Vec<Canteen>, DomainError> {
        let rows: Vec<CanteenRow> =
            sqlx::query_as("SELECT id, name, location FROM canteens ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list canteens", e))?;

        Ok(rows.into_iter().map(Canteen::from).collect())
    }

    async fn list_menu(&self, canteen: &CanteenId) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            "SELECT id, canteen_id, name, price, available \
             FROM menu_items WHERE canteen_id = $1 ORDER BY name",
        )
        .bind(canteen.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list menu", e))?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn find_item(&self, id: &MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            "SELECT id, canteen_id, name, price, available FROM menu_items WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find menu item", e))?;

        Ok(row.map(MenuItem::from))
    }
}
