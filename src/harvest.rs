//! Harvest tick-off ledger.
//!
//! While cutting for a route day the admin checks off each (date, crop,
//! package size) line as it is done. The ledger is a flat map from that
//! composite key to a flag; anything never touched counts as not harvested.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use uuid::Uuid;

use crate::calendar;

/// Identifies one line of cutting work: a crop in one package size for one
/// delivery date. Stored in text form as `d.m.yyyy_<uuid>_<weight>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HarvestKey {
    pub date: NaiveDate,
    pub product_id: Uuid,
    pub weight: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid harvest key: {0}")]
pub struct ParseHarvestKeyError(String);

impl fmt::Display for HarvestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            calendar::format_date(self.date),
            self.product_id,
            self.weight
        )
    }
}

impl FromStr for HarvestKey {
    type Err = ParseHarvestKeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let err = || ParseHarvestKeyError(text.to_string());
        let (date_part, rest) = text.split_once('_').ok_or_else(err)?;
        let (id_part, weight_part) = rest.rsplit_once('_').ok_or_else(err)?;
        Ok(HarvestKey {
            date: calendar::parse_date(date_part).ok_or_else(err)?,
            product_id: id_part.parse().map_err(|_| err())?,
            weight: weight_part.parse().map_err(|_| err())?,
        })
    }
}

impl Serialize for HarvestKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HarvestKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// All harvest flags ever touched. Persisted as a JSON object keyed by the
/// text form of [`HarvestKey`]. Toggling back off keeps the entry around
/// with a `false` value rather than deleting it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarvestLedger(BTreeMap<HarvestKey, bool>);

impl HarvestLedger {
    pub fn is_harvested(&self, key: &HarvestKey) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// Flips the flag for `key` and returns the new value.
    pub fn toggle(&mut self, key: HarvestKey) -> bool {
        let flag = self.0.entry(key).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(weight: u32) -> HarvestKey {
        HarvestKey {
            date: NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
            product_id: Uuid::nil(),
            weight,
        }
    }

    #[test]
    fn untouched_lines_are_not_harvested() {
        let ledger = HarvestLedger::default();
        assert!(!ledger.is_harvested(&key(50)));
    }

    #[test]
    fn double_toggle_returns_to_false_but_keeps_the_entry() {
        let mut ledger = HarvestLedger::default();
        assert!(ledger.toggle(key(50)));
        assert!(ledger.is_harvested(&key(50)));
        assert!(!ledger.toggle(key(50)));
        assert!(!ledger.is_harvested(&key(50)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn key_text_round_trips() {
        let id = Uuid::new_v4();
        let original = HarvestKey {
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            product_id: id,
            weight: 100,
        };
        let text = original.to_string();
        assert_eq!(text, format!("6.1.2025_{id}_100"));
        assert_eq!(text.parse::<HarvestKey>().unwrap(), original);
    }

    #[test]
    fn malformed_key_text_is_rejected() {
        assert!("".parse::<HarvestKey>().is_err());
        assert!("6.1.2025".parse::<HarvestKey>().is_err());
        assert!("6.1.2025_not-a-uuid_50".parse::<HarvestKey>().is_err());
        assert!(
            format!("32.1.2025_{}_50", Uuid::nil())
                .parse::<HarvestKey>()
                .is_err()
        );
        assert!(
            format!("6.1.2025_{}_many", Uuid::nil())
                .parse::<HarvestKey>()
                .is_err()
        );
    }

    #[test]
    fn ledger_serializes_as_an_object_of_key_text() {
        let mut ledger = HarvestLedger::default();
        ledger.toggle(key(50));
        let value = serde_json::to_value(&ledger).unwrap();
        let expected_key = format!("9.1.2025_{}_50", Uuid::nil());
        assert_eq!(value[&expected_key], serde_json::Value::Bool(true));

        let back: HarvestLedger = serde_json::from_value(value).unwrap();
        assert!(back.is_harvested(&key(50)));
    }
}
