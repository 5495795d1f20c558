//! Doormato catalog: canteens and their menu items.

use serde::{Deserialize, Serialize};

use super::foundation::{CanteenId, MenuItemId};

/// A campus canteen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canteen {
    pub id: CanteenId,
    pub name: String,
    pub location: Option<String>,
}

/// A dish offered by one canteen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub canteen: CanteenId,
    pub name: String,
    pub price: f64,
    pub available: bool,
}
