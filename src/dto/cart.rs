use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Unit;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub weight: u32,
    /// Packages to add; defaults to one.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// A cart line with the catalogue data resolved for display. Name and unit
/// are absent when the product has been removed from the catalogue since
/// the line was added.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineView {
    pub product_id: Uuid,
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub weight: u32,
    pub quantity: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total_quantity: u32,
}
