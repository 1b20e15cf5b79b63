use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::harvest::HarvestLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

/// Delivery zones. The serde strings are the original business names and are
/// what lives in stored snapshots, so they must not change. Anything
/// unrecognized deserializes to `Unassigned`, which shares the Monday rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Region {
    #[serde(rename = "Bratislava a okolie")]
    BratislavaArea,
    #[serde(rename = "Trenčín a okolie")]
    TrencinArea,
    #[serde(rename = "Nezaradené")]
    #[serde(other)]
    Unassigned,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::BratislavaArea => "Bratislava a okolie",
            Region::TrencinArea => "Trenčín a okolie",
            Region::Unassigned => "Nezaradené",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Unassigned
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "ks")]
    Pieces,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Grams => f.write_str("g"),
            Unit::Pieces => f.write_str("ks"),
        }
    }
}

/// A partner restaurant account (or the farm admin). The name is the
/// identity key: unique case-insensitively, stored in its original casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub role: Role,
    pub password_hash: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region: Region,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Microgreen {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Opaque image reference (URL or data URI); never interpreted here.
    pub image: String,
    /// Offered package sizes in `unit`, kept sorted and unique.
    #[schema(value_type = Vec<u32>)]
    pub available_weights: BTreeSet<u32>,
    pub unit: Unit,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub weight: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    /// Name of the ordering partner, exactly as stored on the account.
    pub partner: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    /// Fixed at checkout from the partner's region; never recomputed, so
    /// history stays put even if the partner later moves region.
    #[serde(with = "crate::calendar::date_text")]
    #[schema(value_type = String, example = "6.1.2025")]
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub delivered: bool,
}

/// The whole persisted application state. Loaded and saved as one blob;
/// every field defaults so partial snapshots from older writes still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub greens: Vec<Microgreen>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub harvest: HarvestLedger,
}

impl AppData {
    /// Exact-name lookup, used when joining orders back to their partner.
    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }

    /// Case-insensitive lookup, used for login and registration uniqueness.
    /// Names here carry diacritics, so the fold covers the full alphabet,
    /// not just ASCII.
    pub fn user_by_name_ci(&self, name: &str) -> Option<&User> {
        let needle = name.to_lowercase();
        self.users.iter().find(|u| u.name.to_lowercase() == needle)
    }

    pub fn user_by_name_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.name == name)
    }

    pub fn green(&self, id: Uuid) -> Option<&Microgreen> {
        self.greens.iter().find(|g| g.id == id)
    }

    pub fn green_mut(&mut self, id: Uuid) -> Option<&mut Microgreen> {
        self.greens.iter_mut().find(|g| g.id == id)
    }

    pub fn order(&self, id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn order_mut(&mut self, id: Uuid) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(name: &str) -> User {
        User {
            name: name.to_string(),
            role: Role::Customer,
            password_hash: String::new(),
            email: None,
            phone: None,
            address: None,
            region: Region::TrencinArea,
        }
    }

    #[test]
    fn name_lookup_folds_case_of_accented_letters() {
        let data = AppData {
            users: vec![partner("Šalát a spol.")],
            ..Default::default()
        };

        assert!(data.user_by_name_ci("šalát a spol.").is_some());
        assert!(data.user_by_name_ci("ŠALÁT A SPOL.").is_some());
        assert!(data.user_by_name_ci("Šalát").is_none());

        // The exact-name join stays exact.
        assert!(data.user_by_name("Šalát a spol.").is_some());
        assert!(data.user_by_name("šalát a spol.").is_none());
    }
}
