//! Weekly timetable views.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::ScheduleItem;

/// One day of the weekly grid.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub items: Vec<ScheduleItem>,
}

/// Monday through Sunday of the ISO week containing `date`.
pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    (0..7).map(|offset| monday + Days::new(offset)).collect()
}

/// Classes on `date`, in start-time order.
pub fn classes_on(items: &[ScheduleItem], date: NaiveDate) -> Vec<ScheduleItem> {
    let mut day: Vec<ScheduleItem> = items.iter().filter(|i| i.date == date).cloned().collect();
    day.sort_by(|a, b| a.start.cmp(&b.start));
    day
}

/// Seven-day grid for the week containing `date`.
pub fn week_schedule(items: &[ScheduleItem], date: NaiveDate) -> Vec<DaySchedule> {
    week_days(date)
        .into_iter()
        .map(|day| DaySchedule {
            date: day,
            items: classes_on(items, day),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2024-01-31 is a Wednesday; 2024-02-04 a Sunday.
        let week = week_days(day(2024, 1, 31));
        assert_eq!(week.first(), Some(&day(2024, 1, 29)));
        assert_eq!(week.last(), Some(&day(2024, 2, 4)));

        assert_eq!(week_days(day(2024, 2, 4))[0], day(2024, 1, 29));
    }

    #[test]
    fn test_week_schedule_groups_by_day() {
        let items = fixtures::schedule("L3 RT");
        let week = week_schedule(&items, day(2024, 1, 29));

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].items.len(), 3);
        assert_eq!(week[1].items.len(), 1);
        assert!(week[2..].iter().all(|d| d.items.is_empty()));
    }

    #[test]
    fn test_classes_on_sorted_by_start() {
        let mut items = fixtures::schedule("L3 RT");
        items.reverse();

        let monday = classes_on(&items, day(2024, 1, 29));
        let starts: Vec<_> = monday.iter().map(|i| i.start.as_str()).collect();
        assert_eq!(starts, vec!["08:00", "10:15", "14:00"]);
    }
}
