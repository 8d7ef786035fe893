//! Week labelling for a run.
//!
//! Every record produced by one run carries the same `(week, date)` pair: the
//! ISO week of the most recent Monday, and that Monday's date. Rerunning on
//! any day of the same ISO week yields the same pair.
//!
//! The week-year comes from the ISO calendar too, so Monday 2024-12-30 is
//! labelled `2025年第1周` rather than pairing week 1 with the calendar year.

use crate::error::{Error, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use tracing::{debug, instrument};

/// The week label and Monday date stamped onto each article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekStamp {
    /// `"{iso_year}年第{iso_week}周"`
    pub week: String,
    /// `"%Y年%m月%d日"` of the week's Monday.
    pub date: String,
}

/// Stamp for the week containing `today`.
pub fn stamp_for(today: NaiveDate) -> Result<WeekStamp> {
    let back = u64::from(today.weekday().num_days_from_monday());
    let monday = today
        .checked_sub_days(Days::new(back))
        .ok_or(Error::DateOutOfRange(today))?;
    let iso = monday.iso_week();

    Ok(WeekStamp {
        week: format!("{}年第{}周", iso.year(), iso.week()),
        date: monday.format("%Y年%m月%d日").to_string(),
    })
}

/// Stamp for the current local date.
#[instrument]
pub fn current() -> Result<WeekStamp> {
    let today = Local::now().date_naive();
    let stamp = stamp_for(today)?;
    debug!(%today, week = %stamp.week, date = %stamp.date, "Computed week stamp");
    Ok(stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_stamps_itself() {
        let stamp = stamp_for(date(2024, 1, 15)).unwrap();
        assert_eq!(stamp.week, "2024年第3周");
        assert_eq!(stamp.date, "2024年01月15日");
    }

    #[test]
    fn test_same_stamp_all_week() {
        let monday = stamp_for(date(2024, 1, 15)).unwrap();
        for day in 16..=21 {
            assert_eq!(stamp_for(date(2024, 1, day)).unwrap(), monday, "day {day}");
        }
        assert_ne!(stamp_for(date(2024, 1, 22)).unwrap(), monday);
    }

    #[test]
    fn test_year_boundary_uses_iso_year() {
        // Tuesday 2024-12-31 belongs to ISO week 1 of 2025.
        let stamp = stamp_for(date(2024, 12, 31)).unwrap();
        assert_eq!(stamp.week, "2025年第1周");
        assert_eq!(stamp.date, "2024年12月30日");
    }

    #[test]
    fn test_early_january_in_previous_iso_year() {
        // Sunday 2023-01-01 closes ISO week 52 of 2022.
        let stamp = stamp_for(date(2023, 1, 1)).unwrap();
        assert_eq!(stamp.week, "2022年第52周");
        assert_eq!(stamp.date, "2022年12月26日");
    }

    #[test]
    fn test_current_is_a_recent_monday() {
        let before = Local::now().date_naive();
        let stamp = current().unwrap();
        let after = Local::now().date_naive();

        let monday = NaiveDate::parse_from_str(&stamp.date, "%Y年%m月%d日").unwrap();
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert!(monday <= after, "{monday} is after {after}");
        assert!((before - monday).num_days() <= 6, "{monday} is too old for {before}");
        assert_eq!(stamp_for(monday).unwrap(), stamp);
    }
}
