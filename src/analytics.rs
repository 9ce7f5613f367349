//! Mood analytics: score categorization, trailing-window statistics and a
//! one-step forecast over chronologically ordered mood samples.
//!
//! Everything here is a pure function of its input. Callers are expected to
//! pass samples oldest first; `samples_from_entries` does that ordering for
//! persisted records.

use crate::models::MoodEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of trailing samples every window computation looks at.
pub const WINDOW_SIZE: usize = 7;

/// Returned by `predict_next` until a full window of history exists.
pub const DEFAULT_PREDICTION: f64 = 5.0;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodSample {
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

impl MoodSample {
    pub fn new(score: f64, timestamp: DateTime<Utc>) -> Self {
        Self { score, timestamp }
    }
}

/// Discrete mood bucket, declared from the lowest tier to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Angry,
    Sad,
    Neutral,
    Happy,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 4] = [Self::Angry, Self::Sad, Self::Neutral, Self::Happy];

    pub fn tier(self) -> u8 {
        match self {
            Self::Angry => 0,
            Self::Sad => 1,
            Self::Neutral => 2,
            Self::Happy => 3,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Angry => "😢",
            Self::Sad => "😐",
            Self::Neutral => "🙂",
            Self::Happy => "😊",
        }
    }

    /// Highest scale fraction (0 at `MIN_SCORE`, 1 at `MAX_SCORE`) that still
    /// falls in this tier. The top tier is open-ended.
    pub fn upper_fraction(self) -> Option<f64> {
        match self {
            Self::Angry => Some(0.25),
            Self::Sad => Some(0.5),
            Self::Neutral => Some(0.75),
            Self::Happy => None,
        }
    }

    /// Calendar / slider color for the tier.
    pub fn color(self) -> &'static str {
        match self {
            Self::Angry => "red",
            Self::Sad => "yellow",
            Self::Neutral => "blue",
            Self::Happy => "green",
        }
    }
}

/// Maps a score to its category. Total over all reals: nothing is clamped, so
/// anything below the scale lands in the lowest tier and anything above it in
/// the highest. Band edges belong to the lower tier.
pub fn categorize(score: f64) -> MoodCategory {
    let fraction = (score - MIN_SCORE) / (MAX_SCORE - MIN_SCORE);
    MoodCategory::ALL
        .into_iter()
        .find(|category| category.upper_fraction().is_none_or(|upper| fraction <= upper))
        .unwrap_or(MoodCategory::Happy)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStats {
    pub average: f64,
    pub trend: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insights {
    pub average_mood: f64,
    pub best_day: f64,
    pub worst_day: f64,
    pub trend: f64,
}

/// Mean and endpoint delta over the trailing `window_size` samples, or `None`
/// when there are fewer samples than that.
///
/// The trend is `last - first` inside the window, not a regression slope.
pub fn window_stats(samples: &[MoodSample], window_size: usize) -> Option<WindowStats> {
    let window = trailing_window(samples, window_size)?;
    Some(WindowStats {
        average: mean(window),
        trend: endpoint_delta(window),
    })
}

/// Forecast for the next sample: window mean plus the window trend spread
/// evenly across its steps, clamped to the score range.
pub fn predict_next(samples: &[MoodSample]) -> f64 {
    match window_stats(samples, WINDOW_SIZE) {
        Some(stats) => {
            let prediction = stats.average + stats.trend / WINDOW_SIZE as f64;
            prediction.clamp(MIN_SCORE, MAX_SCORE)
        }
        None => DEFAULT_PREDICTION,
    }
}

pub fn summarize(samples: &[MoodSample]) -> Option<Insights> {
    let window = trailing_window(samples, WINDOW_SIZE)?;
    let best_day = window.iter().map(|s| s.score).fold(f64::NEG_INFINITY, f64::max);
    let worst_day = window.iter().map(|s| s.score).fold(f64::INFINITY, f64::min);

    Some(Insights {
        average_mood: mean(window),
        best_day,
        worst_day,
        trend: endpoint_delta(window),
    })
}

/// Turns persisted entries into samples of `general_feeling`, oldest first.
pub fn samples_from_entries(entries: &[MoodEntry]) -> Vec<MoodSample> {
    let mut samples: Vec<MoodSample> = entries
        .iter()
        .map(|entry| MoodSample::new(f64::from(entry.general_feeling), entry.created_at))
        .collect();
    samples.sort_by_key(|sample| sample.timestamp);
    samples
}

fn trailing_window(samples: &[MoodSample], window_size: usize) -> Option<&[MoodSample]> {
    if window_size == 0 || samples.len() < window_size {
        return None;
    }
    Some(&samples[samples.len() - window_size..])
}

fn mean(window: &[MoodSample]) -> f64 {
    window.iter().map(|s| s.score).sum::<f64>() / window.len() as f64
}

fn endpoint_delta(window: &[MoodSample]) -> f64 {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) => last.score - first.score,
        _ => 0.0,
    }
}
