use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dispatch::RouteStop;
use crate::models::{Region, Unit};

/// The region and date the admin screens open on, per the packing week.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminWindowResponse {
    pub region: Region,
    /// `d.m.yyyy`
    pub date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryDatesResponse {
    pub dates: Vec<String>,
}

/// One package size of one crop on the cutting list.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryLine {
    pub weight: u32,
    pub quantity: u32,
    pub harvested: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryRow {
    pub product_id: Uuid,
    pub name: String,
    pub unit: Unit,
    pub total: u32,
    pub lines: Vec<SummaryLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HarvestSummaryResponse {
    /// `d.m.yyyy`
    pub date: String,
    pub region: Region,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HarvestToggleRequest {
    /// `d.m.yyyy`
    pub date: String,
    pub product_id: Uuid,
    pub weight: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HarvestToggleResponse {
    /// The ledger key in its stored text form.
    pub key: String,
    pub harvested: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoutePlanResponse {
    /// `d.m.yyyy`
    pub date: String,
    pub region: Region,
    pub stops: Vec<RouteStop>,
}
