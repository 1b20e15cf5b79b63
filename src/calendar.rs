//! Delivery scheduling rules.
//!
//! The farm runs two fixed routes a week: Monday for the Bratislava area
//! (and anyone not yet assigned a zone) and Thursday for the Trenčín area.
//! All date math here is plain calendar arithmetic on [`NaiveDate`]; callers
//! decide what "today" is.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::Region;

/// How far ahead the schedule looks when listing upcoming route days.
const HORIZON_DAYS: u64 = 30;

/// Weekday a region is driven on.
pub fn delivery_weekday(region: Region) -> Weekday {
    match region {
        Region::TrencinArea => Weekday::Thu,
        Region::BratislavaArea | Region::Unassigned => Weekday::Mon,
    }
}

/// Slovak name of the region's route day, as shown to partners.
pub fn delivery_day_name(region: Region) -> &'static str {
    match delivery_weekday(region) {
        Weekday::Thu => "Štvrtok",
        _ => "Pondelok",
    }
}

/// Next delivery date for a region, strictly after `today`.
///
/// Orders placed on a route day go out the following week, never the same
/// day, so when `today` already is the region's weekday the result jumps a
/// full week ahead.
pub fn next_delivery_date(today: NaiveDate, region: Region) -> NaiveDate {
    let target = delivery_weekday(region);
    if today.weekday() == target {
        return today + Days::new(7);
    }
    let mut date = today + Days::new(1);
    while date.weekday() != target {
        date = date + Days::new(1);
    }
    date
}

/// First `weekday` on or after `from`.
fn next_or_same(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut date = from;
    while date.weekday() != weekday {
        date = date + Days::new(1);
    }
    date
}

/// Region and date the admin screens should open on.
///
/// On a Monday the farm is packing the Bratislava route, so that pair is
/// current. Tuesday through Thursday the focus moves to the week's Trenčín
/// run (Thursday itself included). From Friday on, the next Bratislava
/// Monday is current.
pub fn current_admin_window(today: NaiveDate) -> (Region, NaiveDate) {
    match today.weekday() {
        Weekday::Mon => (Region::BratislavaArea, today),
        Weekday::Tue | Weekday::Wed | Weekday::Thu => {
            (Region::TrencinArea, next_or_same(today, Weekday::Thu))
        }
        _ => (Region::BratislavaArea, next_or_same(today, Weekday::Mon)),
    }
}

/// Route days within the next [`HORIZON_DAYS`] days, `today` included,
/// capped at `count`. Near the end of the horizon fewer than `count` may
/// exist; the shorter list is returned as is.
pub fn upcoming_delivery_dates(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    for offset in 0..HORIZON_DAYS {
        if dates.len() == count {
            break;
        }
        let date = today + Days::new(offset);
        if matches!(date.weekday(), Weekday::Mon | Weekday::Thu) {
            dates.push(date);
        }
    }
    dates
}

/// Region whose route runs on `date`: Mondays mean Bratislava, any other
/// weekday is treated as a Trenčín run.
pub fn region_for_date(date: NaiveDate) -> Region {
    if date.weekday() == Weekday::Mon {
        Region::BratislavaArea
    } else {
        Region::TrencinArea
    }
}

/// Dates worth offering in admin date pickers: every date an order exists
/// for plus the upcoming schedule, deduplicated and in calendar order.
pub fn selectable_dates(
    order_dates: impl IntoIterator<Item = NaiveDate>,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = order_dates
        .into_iter()
        .chain(upcoming_delivery_dates(today, 10))
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Renders a date in the `d.m.yyyy` form used everywhere in this system:
/// day and month unpadded, dot separated.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

/// Parses the `d.m.yyyy` form. Whitespace around each component is
/// tolerated because early snapshots carried dates like `6. 1. 2025`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.splitn(3, '.');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Serde adapter storing [`NaiveDate`] fields as `d.m.yyyy` text.
pub mod date_text {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid delivery date: {text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-01-06 is a Monday; the rest of that week follows from it.
    const Y: i32 = 2025;

    #[test]
    fn next_date_skips_a_week_on_the_route_day_itself() {
        let monday = date(Y, 1, 6);
        assert_eq!(
            next_delivery_date(monday, Region::BratislavaArea),
            date(Y, 1, 13)
        );
        let thursday = date(Y, 1, 9);
        assert_eq!(
            next_delivery_date(thursday, Region::TrencinArea),
            date(Y, 1, 16)
        );
    }

    #[test]
    fn next_date_walks_to_the_coming_route_day() {
        let tuesday = date(Y, 1, 7);
        assert_eq!(
            next_delivery_date(tuesday, Region::TrencinArea),
            date(Y, 1, 9)
        );
        assert_eq!(
            next_delivery_date(tuesday, Region::BratislavaArea),
            date(Y, 1, 13)
        );
        let sunday = date(Y, 1, 12);
        assert_eq!(
            next_delivery_date(sunday, Region::Unassigned),
            date(Y, 1, 13)
        );
    }

    #[test]
    fn admin_window_follows_the_packing_week() {
        let monday = date(Y, 1, 6);
        assert_eq!(
            current_admin_window(monday),
            (Region::BratislavaArea, monday)
        );
        assert_eq!(
            current_admin_window(date(Y, 1, 7)),
            (Region::TrencinArea, date(Y, 1, 9))
        );
        // Thursday itself still points at the same day's Trenčín run.
        assert_eq!(
            current_admin_window(date(Y, 1, 9)),
            (Region::TrencinArea, date(Y, 1, 9))
        );
        assert_eq!(
            current_admin_window(date(Y, 1, 10)),
            (Region::BratislavaArea, date(Y, 1, 13))
        );
        assert_eq!(
            current_admin_window(date(Y, 1, 12)),
            (Region::BratislavaArea, date(Y, 1, 13))
        );
    }

    #[test]
    fn upcoming_dates_start_today_and_alternate_route_days() {
        assert_eq!(
            upcoming_delivery_dates(date(Y, 1, 7), 3),
            vec![date(Y, 1, 9), date(Y, 1, 13), date(Y, 1, 16)]
        );
        assert_eq!(upcoming_delivery_dates(date(Y, 1, 6), 1), vec![date(Y, 1, 6)]);
    }

    #[test]
    fn upcoming_dates_may_fall_short_of_the_requested_count() {
        // A 30 day window holds at most 9 route days from a Monday.
        let dates = upcoming_delivery_dates(date(Y, 1, 6), 10);
        assert_eq!(dates.len(), 9);
    }

    #[test]
    fn selectable_dates_merge_history_with_the_schedule() {
        let history = vec![date(2024, 12, 30), date(Y, 1, 9)];
        let dates = selectable_dates(history, date(Y, 1, 7));
        assert_eq!(dates[0], date(2024, 12, 30));
        assert_eq!(dates[1], date(Y, 1, 9));
        // The duplicate Thursday appears once.
        assert_eq!(dates.iter().filter(|d| **d == date(Y, 1, 9)).count(), 1);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn date_text_is_unpadded_and_forgiving_on_parse() {
        assert_eq!(format_date(date(Y, 1, 6)), "6.1.2025");
        assert_eq!(parse_date("6.1.2025"), Some(date(Y, 1, 6)));
        assert_eq!(parse_date("6. 1. 2025"), Some(date(Y, 1, 6)));
        assert_eq!(parse_date("2025-01-06"), None);
        assert_eq!(parse_date("32.1.2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn region_for_date_maps_mondays_to_bratislava() {
        assert_eq!(region_for_date(date(Y, 1, 6)), Region::BratislavaArea);
        assert_eq!(region_for_date(date(Y, 1, 9)), Region::TrencinArea);
        assert_eq!(region_for_date(date(Y, 1, 11)), Region::TrencinArea);
    }
}
