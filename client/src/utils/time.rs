use chrono::{DateTime, Days, Local, NaiveDate, Timelike, Utc};

use crate::api::types::{CheckIn, MealType, TodayStatus};

/// Longest run of consecutive check-in days the scan will count.
const STREAK_WINDOW_DAYS: u64 = 30;

/// Renders a timestamp like "Monday, January 5, 2026" in the local zone.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%A, %B %-d, %Y").to_string()
}

/// Renders a timestamp like "3:05 PM" in the local zone.
pub fn format_time(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%-I:%M %p").to_string()
}

/// Whether a check-in for `meal` is still open right now: the local hour
/// must be strictly before the meal's deadline and the meal must not
/// already be checked.
pub fn can_check_in(meal: MealType, checked: &TodayStatus) -> bool {
    can_check_in_at_hour(meal, checked, Local::now().hour())
}

/// [`can_check_in`] against an explicit hour instead of the wall clock.
pub fn can_check_in_at_hour(meal: MealType, checked: &TodayStatus, hour: u32) -> bool {
    hour < meal.deadline_hour() && !checked.is_checked(meal)
}

/// Consecutive days ending today (inclusive) with at least one check-in.
///
/// Scans backward from today, day by day, over a 30-day window; the count
/// stops at the first day without a check-in, gaps are not skipped. Dates
/// are truncated to UTC calendar days.
pub fn calculate_streak(check_ins: &[CheckIn]) -> u32 {
    streak_ending_on(check_ins, Utc::now().date_naive())
}

/// [`calculate_streak`] against an explicit anchor day.
pub fn streak_ending_on(check_ins: &[CheckIn], today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let day = today - Days::new(offset);
        let has_check_in = check_ins
            .iter()
            .any(|check_in| check_in.date.date_naive() == day);
        if has_check_in {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn check_in_on(year: i32, month: u32, day: u32) -> CheckIn {
        CheckIn {
            id: None,
            date: Utc.with_ymd_and_hms(year, month, day, 12, 30, 0).unwrap(),
            meal_type: MealType::Lunch,
            meal_name: None,
            nutrition_data: None,
        }
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn streak_counts_consecutive_days_from_today() {
        // today, yesterday, day before; the 4th day back is missing
        let check_ins = vec![
            check_in_on(2026, 8, 30),
            check_in_on(2026, 8, 29),
            check_in_on(2026, 8, 28),
        ];
        assert_eq!(streak_ending_on(&check_ins, anchor()), 3);
    }

    #[test]
    fn streak_stops_at_the_first_gap() {
        // yesterday missing: the check-in two days back does not count
        let check_ins = vec![check_in_on(2026, 8, 30), check_in_on(2026, 8, 28)];
        assert_eq!(streak_ending_on(&check_ins, anchor()), 1);
    }

    #[test]
    fn streak_is_zero_without_check_ins() {
        assert_eq!(streak_ending_on(&[], anchor()), 0);
    }

    #[test]
    fn streak_is_zero_when_today_is_missing() {
        let check_ins = vec![check_in_on(2026, 8, 29), check_in_on(2026, 8, 28)];
        assert_eq!(streak_ending_on(&check_ins, anchor()), 0);
    }

    #[test]
    fn streak_is_capped_by_the_scan_window() {
        let today = anchor();
        let check_ins: Vec<CheckIn> = (0..31)
            .map(|offset| {
                let day = today - Days::new(offset);
                CheckIn {
                    id: None,
                    date: Utc
                        .with_ymd_and_hms(day.year(), day.month(), day.day(), 8, 0, 0)
                        .unwrap(),
                    meal_type: MealType::Breakfast,
                    meal_name: None,
                    nutrition_data: None,
                }
            })
            .collect();
        assert_eq!(streak_ending_on(&check_ins, today), 30);
    }

    #[test]
    fn multiple_check_ins_on_one_day_count_once() {
        let check_ins = vec![check_in_on(2026, 8, 30), check_in_on(2026, 8, 30)];
        assert_eq!(streak_ending_on(&check_ins, anchor()), 1);
    }

    #[test]
    fn check_in_window_is_open_strictly_before_the_deadline() {
        let none_checked = TodayStatus::default();
        assert!(can_check_in_at_hour(MealType::Breakfast, &none_checked, 8));
        assert!(!can_check_in_at_hour(MealType::Breakfast, &none_checked, 9));
        assert!(!can_check_in_at_hour(MealType::Breakfast, &none_checked, 10));
        assert!(can_check_in_at_hour(MealType::Lunch, &none_checked, 13));
        assert!(!can_check_in_at_hour(MealType::Lunch, &none_checked, 14));
        assert!(can_check_in_at_hour(MealType::Dinner, &none_checked, 20));
        assert!(!can_check_in_at_hour(MealType::Dinner, &none_checked, 21));
    }

    #[test]
    fn checked_meal_cannot_check_in_again() {
        let status = TodayStatus { breakfast: true, ..Default::default() };
        assert!(!can_check_in_at_hour(MealType::Breakfast, &status, 7));
        assert!(can_check_in_at_hour(MealType::Lunch, &status, 7));
    }

    #[test]
    fn formats_use_long_date_and_short_time() {
        // 2026-01-05 is a Monday; render in UTC to keep the test
        // independent of the host zone.
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 15, 5, 0).unwrap();
        assert_eq!(
            date.format("%A, %B %-d, %Y").to_string(),
            "Monday, January 5, 2026"
        );
        assert_eq!(date.format("%-I:%M %p").to_string(), "3:05 PM");
    }
}
