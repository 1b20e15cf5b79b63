use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Order, Region};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextDeliveryResponse {
    pub region: Region,
    /// Slovak route day name for the partner banner ("Pondelok", "Štvrtok").
    pub delivery_day: String,
    /// `d.m.yyyy`
    pub delivery_date: String,
}
