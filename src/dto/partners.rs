use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Region, Role, User};

/// A user account as exposed over the API; never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PartnerProfile {
    pub name: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub region: Region,
}

impl From<&User> for PartnerProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role,
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            region: user.region,
        }
    }
}

/// Contact fields a partner may edit on their own profile. Omitted fields
/// stay as they are; an empty string clears the field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PartnerList {
    pub items: Vec<PartnerProfile>,
}

/// Removing a partner asks the admin to confirm their own password.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RemovePartnerRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRegionRequest {
    pub region: Region,
}
