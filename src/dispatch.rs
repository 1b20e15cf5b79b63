//! Route planning for a delivery day.
//!
//! Picks the orders going out on one date in one region and lines them up
//! in the order the driver works through them. The ordering is plain
//! lowercase address comparison, with one routing quirk: on the Trenčín run
//! the van starts in Dubnica, so stops whose address mentions it are served
//! before everything else.

use chrono::NaiveDate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Order, Region, User};

/// RFC 3986 unreserved characters stay readable; everything else is escaped.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One stop on the planned route: the order plus the partner contact data
/// the driver needs at the door.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouteStop {
    pub order: Order,
    pub address: String,
    pub phone: Option<String>,
    /// Google Maps search link for the address; absent when the partner has
    /// no address on file.
    pub maps_url: Option<String>,
}

/// Builds the driving plan for `date` in `region`.
///
/// An order joins the plan only if its partner account still exists (exact
/// name match) and that account sits in the requested region. Partners
/// without an address sort ahead of everyone since the empty string compares
/// lowest; ties keep their submission order.
pub fn plan_route(
    orders: &[Order],
    users: &[User],
    date: NaiveDate,
    region: Region,
) -> Vec<RouteStop> {
    let mut stops: Vec<RouteStop> = orders
        .iter()
        .filter(|order| order.delivery_date == date)
        .filter_map(|order| {
            let partner = users.iter().find(|u| u.name == order.partner)?;
            if partner.region != region {
                return None;
            }
            let address = partner.address.clone().unwrap_or_default();
            let maps_url = (!address.is_empty()).then(|| maps_search_url(&address));
            Some(RouteStop {
                order: order.clone(),
                address,
                phone: partner.phone.clone(),
                maps_url,
            })
        })
        .collect();

    let dubnica_first = region == Region::TrencinArea;
    stops.sort_by_cached_key(|stop| {
        let addr = stop.address.to_lowercase();
        let after_dubnica = dubnica_first && !addr.contains("dubnica");
        (after_dubnica, addr)
    });
    stops
}

/// Google Maps search URL for a free-form address.
pub fn maps_search_url(address: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        utf8_percent_encode(address, QUERY_ENCODE)
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::Role;

    fn partner(name: &str, region: Region, address: Option<&str>) -> User {
        User {
            name: name.to_string(),
            role: Role::Customer,
            password_hash: String::new(),
            email: None,
            phone: Some("+421 900 000 000".to_string()),
            address: address.map(str::to_string),
            region,
        }
    }

    fn order(partner: &str, date: NaiveDate) -> Order {
        Order {
            id: Uuid::new_v4(),
            partner: partner.to_string(),
            items: Vec::new(),
            created_at: Utc::now(),
            delivery_date: date,
            delivered: false,
        }
    }

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
    }

    #[test]
    fn keeps_only_matching_date_and_region() {
        let users = vec![
            partner("U Jara", Region::TrencinArea, Some("Legionárska 2")),
            partner("Pivnica", Region::BratislavaArea, Some("Hlavná 1")),
        ];
        let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let orders = vec![
            order("U Jara", thursday()),
            order("Pivnica", thursday()),
            order("U Jara", monday),
            order("Zrušený podnik", thursday()),
        ];

        let plan = plan_route(&orders, &users, thursday(), Region::TrencinArea);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].order.partner, "U Jara");
    }

    #[test]
    fn sorts_by_lowercased_address() {
        let users = vec![
            partner("B", Region::BratislavaArea, Some("Zochova 4")),
            partner("A", Region::BratislavaArea, Some("alžbetina 12")),
            partner("C", Region::BratislavaArea, Some("Mýtna 9")),
        ];
        let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let orders = vec![order("B", monday), order("A", monday), order("C", monday)];

        let plan = plan_route(&orders, &users, monday, Region::BratislavaArea);
        let addrs: Vec<_> = plan.iter().map(|s| s.address.as_str()).collect();
        assert_eq!(addrs, ["alžbetina 12", "Mýtna 9", "Zochova 4"]);
    }

    #[test]
    fn dubnica_leads_the_trencin_run_only() {
        let users = vec![
            partner("Apollo", Region::TrencinArea, Some("Apollo 1, Trenčín")),
            partner("Továreň", Region::TrencinArea, Some("Továrenská 2, Dubnica nad Váhom")),
            partner("BA Dubnica", Region::BratislavaArea, Some("Dubnica cesta 7")),
            partner("BA Prvá", Region::BratislavaArea, Some("Alej 3")),
        ];
        let orders = vec![
            order("Apollo", thursday()),
            order("Továreň", thursday()),
            order("BA Dubnica", thursday()),
            order("BA Prvá", thursday()),
        ];

        let trencin = plan_route(&orders, &users, thursday(), Region::TrencinArea);
        assert_eq!(trencin[0].order.partner, "Továreň");
        assert_eq!(trencin[1].order.partner, "Apollo");

        // No special casing outside Trenčín.
        let bratislava = plan_route(&orders, &users, thursday(), Region::BratislavaArea);
        assert_eq!(bratislava[0].order.partner, "BA Prvá");
        assert_eq!(bratislava[1].order.partner, "BA Dubnica");
    }

    #[test]
    fn equal_addresses_keep_submission_order() {
        let users = vec![partner("Dvojka", Region::TrencinArea, Some("Mierové námestie 1"))];
        let first = order("Dvojka", thursday());
        let second = order("Dvojka", thursday());
        let expected = vec![first.id, second.id];

        let plan = plan_route(&[first, second], &users, thursday(), Region::TrencinArea);
        let got: Vec<_> = plan.iter().map(|s| s.order.id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn missing_address_sorts_first_without_a_maps_link() {
        let users = vec![
            partner("Bez adresy", Region::BratislavaArea, None),
            partner("S adresou", Region::BratislavaArea, Some("Dunajská 8")),
        ];
        let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let orders = vec![order("S adresou", monday), order("Bez adresy", monday)];

        let plan = plan_route(&orders, &users, monday, Region::BratislavaArea);
        assert_eq!(plan[0].order.partner, "Bez adresy");
        assert!(plan[0].maps_url.is_none());
        assert!(plan[1].maps_url.is_some());
    }

    #[test]
    fn maps_url_escapes_the_address() {
        let url = maps_search_url("Mierové námestie 1, Trenčín");
        assert!(url.starts_with("https://www.google.com/maps/search/?api=1&query=Mierov%C3%A9%20n"));
        assert!(!url.contains(' '));
    }
}
