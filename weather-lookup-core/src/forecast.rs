use chrono::Timelike;

use crate::model::{ForecastEntry, ForecastPoint};

/// Hour of day used to sample one entry per day.
pub const MIDDAY_HOUR: u32 = 12;

/// Keep the entries stamped exactly at midday, in the order they were given.
///
/// Days without a midday entry are skipped rather than approximated.
pub fn daily_midday(entries: &[ForecastEntry]) -> Vec<ForecastPoint> {
    entries
        .iter()
        .filter(|e| is_midday(e))
        .map(ForecastPoint::from)
        .collect()
}

fn is_midday(entry: &ForecastEntry) -> bool {
    let t = entry.local_time.time();
    t.hour() == MIDDAY_HOUR && t.minute() == 0 && t.second() == 0 && t.nanosecond() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconCategory;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp")
    }

    /// 40 entries, 3 hours apart, starting at midnight.
    fn five_days() -> Vec<ForecastEntry> {
        (0..40)
            .map(|i| ForecastEntry {
                local_time: start() + Duration::hours(3 * i),
                temperature_c: i as f64,
                condition_code: 800,
            })
            .collect()
    }

    #[test]
    fn one_point_per_day_in_order() {
        let points = daily_midday(&five_days());

        let dates: Vec<_> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["16 Oct", "17 Oct", "18 Oct", "19 Oct", "20 Oct"]);

        // midday is entry 4 of each day
        let temps: Vec<_> = points.iter().map(|p| p.temp).collect();
        assert_eq!(temps, [4, 12, 20, 28, 36]);
        assert!(points.iter().all(|p| p.icon == IconCategory::Clear));
    }

    #[test]
    fn missing_midday_entries_are_skipped() {
        let entries: Vec<_> = five_days()
            .into_iter()
            .filter(|e| e.local_time.date() != NaiveDate::from_ymd_opt(2026, 10, 18).expect("date"))
            .collect();

        let points = daily_midday(&entries);
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.date != "18 Oct"));
    }

    #[test]
    fn window_starting_after_midday_yields_fewer_points() {
        let entries: Vec<_> = five_days().into_iter().skip(5).collect();
        assert_eq!(daily_midday(&entries).len(), 4);
    }

    #[test]
    fn near_midday_does_not_count() {
        let noonish = start() + Duration::hours(12) + Duration::minutes(30);
        let entries = vec![ForecastEntry {
            local_time: noonish,
            temperature_c: 1.0,
            condition_code: 500,
        }];
        assert!(daily_midday(&entries).is_empty());
    }

    #[test]
    fn empty_list() {
        assert!(daily_midday(&[]).is_empty());
    }
}
