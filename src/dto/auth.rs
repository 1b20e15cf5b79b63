use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Region, Role};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Partner name exactly as stored on the account.
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Delivery region picked at sign-up; left out it stays unassigned
    /// until the admin sorts the partner into a run.
    #[serde(default)]
    pub region: Region,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}
