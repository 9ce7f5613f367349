use crate::analytics::{Insights, MoodCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub general_feeling: u8,
    pub anxiety_optimism: u8,
    pub activity_level: u8,
    pub sleep_quality: u8,
    pub social_interaction: u8,
    #[serde(default)]
    pub took_medication: bool,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMoodEntry {
    pub general_feeling: u8,
    pub anxiety_optimism: u8,
    pub activity_level: u8,
    pub sleep_quality: u8,
    pub social_interaction: u8,
    #[serde(default)]
    pub took_medication: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub schedule_time: Option<String>,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default)]
    pub taken: bool,
    #[serde(default)]
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub schedule_time: Option<String>,
    #[serde(default = "default_true")]
    pub reminder: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    #[serde(default = "default_journal_mood")]
    pub mood: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, alias = "goal_tasks")]
    pub tasks: Vec<GoalTask>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Percentage of completed tasks; a goal without tasks keeps its progress.
    pub fn recompute_progress(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let done = self.tasks.iter().filter(|task| task.completed).count();
        self.progress = done as f64 / self.tasks.len() as f64 * 100.0;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGoalTask {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub members: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupMembership {
    pub group_id: String,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub daily_reminder: bool,
    pub medication_reminders: bool,
    pub reminder_time: String,
    pub dark_mode: bool,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_reminder: true,
            medication_reminders: true,
            reminder_time: "20:00".to_string(),
            dark_mode: false,
            language: "he".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub daily_reminder: Option<bool>,
    pub medication_reminders: Option<bool>,
    pub reminder_time: Option<String>,
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
}

impl Settings {
    pub fn merge(mut self, update: SettingsUpdate) -> Self {
        if let Some(value) = update.daily_reminder {
            self.daily_reminder = value;
        }
        if let Some(value) = update.medication_reminders {
            self.medication_reminders = value;
        }
        if let Some(value) = update.reminder_time {
            self.reminder_time = value;
        }
        if let Some(value) = update.dark_mode {
            self.dark_mode = value;
        }
        if let Some(value) = update.language {
            self.language = value;
        }
        self
    }
}

/// Everything the local cache keeps for one user.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserData {
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub users: BTreeMap<String, UserData>,
    #[serde(default)]
    pub groups: Vec<SupportGroup>,
    #[serde(default)]
    pub memberships: Vec<GroupMembership>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub prediction: f64,
    pub predicted_category: MoodCategory,
    pub insights: Option<Insights>,
    pub sample_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub score: u8,
    pub category: MoodCategory,
    pub emoji: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub entries: usize,
    pub average: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub entries: usize,
    pub average: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weekly: Vec<WeeklyPoint>,
    pub most_frequent: Option<MoodCategory>,
    pub overall_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_journal_mood() -> u8 {
    5
}
