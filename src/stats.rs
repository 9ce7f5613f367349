use crate::analytics::{MoodCategory, categorize};
use crate::models::{CalendarDay, DailyPoint, MoodEntry, StatsResponse, WeeklyPoint};
use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;

const WEEK_COUNT: usize = 8;

pub fn build_stats(entries: &[MoodEntry]) -> StatsResponse {
    build_stats_at(&Local, Local::now().date_naive(), entries)
}

/// Entries are bucketed by their calendar day in `tz`, the same zone `today` is taken in.
pub fn build_stats_at<Tz: TimeZone>(tz: &Tz, today: NaiveDate, entries: &[MoodEntry]) -> StatsResponse {
    let mut by_day: BTreeMap<NaiveDate, Vec<u8>> = BTreeMap::new();
    for entry in entries {
        by_day
            .entry(entry.created_at.with_timezone(tz).date_naive())
            .or_default()
            .push(entry.general_feeling);
    }

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let scores = by_day.get(&date).map(Vec::as_slice).unwrap_or_default();
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            entries: scores.len(),
            average: average(scores.iter().copied()),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly = Vec::with_capacity(WEEK_COUNT);
    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);
        let scores: Vec<u8> = by_day
            .range(start..=end)
            .flat_map(|(_, scores)| scores.iter().copied())
            .collect();

        weekly.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            entries: scores.len(),
            average: average(scores.iter().copied()),
        });
    }

    StatsResponse {
        last_7_days,
        weekly,
        most_frequent: most_frequent(entries),
        overall_average: average(entries.iter().map(|e| e.general_feeling)),
    }
}

/// One calendar cell per entry, dated in `tz`.
pub fn build_calendar<Tz: TimeZone>(tz: &Tz, entries: &[MoodEntry]) -> Vec<CalendarDay> {
    entries
        .iter()
        .map(|entry| {
            let category = categorize(f64::from(entry.general_feeling));
            CalendarDay {
                date: entry.created_at.with_timezone(tz).date_naive().to_string(),
                score: entry.general_feeling,
                category,
                emoji: category.emoji(),
                color: category.color(),
            }
        })
        .collect()
}

/// Most common category; ties go to the happier one.
fn most_frequent(entries: &[MoodEntry]) -> Option<MoodCategory> {
    let mut counts: BTreeMap<MoodCategory, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(categorize(f64::from(entry.general_feeling))).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by_key(|(category, count)| (*count, *category))
        .map(|(category, _)| category)
}

fn average(scores: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
