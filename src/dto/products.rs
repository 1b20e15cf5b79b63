use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Microgreen, Unit};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub image: String,
    pub available_weights: Vec<u32>,
    pub unit: Unit,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub available_weights: Option<Vec<u32>>,
    pub unit: Option<Unit>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Microgreen>,
}
