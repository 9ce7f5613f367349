use crate::models::MoodEntry;
use chrono::{NaiveDate, TimeZone};
use std::fmt::Display;

const HEADER: [&str; 8] = [
    "date",
    "general_feeling",
    "anxiety_optimism",
    "activity_level",
    "sleep_quality",
    "social_interaction",
    "took_medication",
    "note",
];

/// Timestamps are written as wall-clock time in `tz`.
pub fn mood_csv<Tz: TimeZone>(tz: &Tz, entries: &[MoodEntry]) -> String
where
    Tz::Offset: Display,
{
    let mut out = HEADER.join(",");
    out.push('\n');
    for entry in entries {
        let row = [
            entry.created_at.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string(),
            entry.general_feeling.to_string(),
            entry.anxiety_optimism.to_string(),
            entry.activity_level.to_string(),
            entry.sleep_quality.to_string(),
            entry.social_interaction.to_string(),
            if entry.took_medication { "yes" } else { "no" }.to_string(),
            escape(entry.note.as_deref().unwrap_or_default()),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn report_filename(today: NaiveDate) -> String {
    format!("mood_report_{}.csv", today.format("%d_%m_%Y"))
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn entry(note: Option<&str>, took_medication: bool) -> MoodEntry {
        MoodEntry {
            id: "1".to_string(),
            user_id: "u1".to_string(),
            general_feeling: 7,
            anxiety_optimism: 4,
            activity_level: 6,
            sleep_quality: 3,
            social_interaction: 8,
            took_medication,
            note: note.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2026, 3, 9, 21, 5, 0).unwrap(),
        }
    }

    #[test]
    fn csv_has_header_and_formatted_rows() {
        let csv = mood_csv(&Utc, &[entry(Some("slept badly"), true)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "date,general_feeling,anxiety_optimism,activity_level,sleep_quality,social_interaction,took_medication,note"
        );
        assert_eq!(lines[1], "09/03/2026 21:05,7,4,6,3,8,yes,slept badly");
    }

    #[test]
    fn csv_quotes_notes_with_separators() {
        let csv = mood_csv(&Utc, &[entry(Some("tired, but \"ok\""), false), entry(None, false)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].ends_with(",no,\"tired, but \"\"ok\"\"\""));
        assert!(lines[2].ends_with(",no,"));
    }

    #[test]
    fn filename_uses_day_month_year() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(report_filename(day), "mood_report_17_10_2026.csv");
    }

    #[test]
    fn csv_writes_local_wall_clock_time() {
        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        let csv = mood_csv(&east, &[entry(None, false)]);
        assert!(csv.lines().nth(1).unwrap().starts_with("10/03/2026 00:05,"));
    }
}
