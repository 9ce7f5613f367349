//! Record persistence behind one interface.
//!
//! `LocalStore` keeps every user's records in a single JSON document on disk.
//! `RemoteStore` talks to the hosted backend's REST tables. `Backend` is the
//! concrete choice the application holds, picked once at startup.

use crate::config::RemoteConfig;
use crate::errors::AppError;
use crate::models::{
    AppData, Goal, GoalTask, GroupMembership, JournalEntry, Medication, MoodEntry, NewGoal,
    NewGoalTask, NewJournalEntry, NewMedication, NewMoodEntry, Settings, SettingsUpdate,
    SupportGroup, UserData,
};
use crate::storage::{load_data, persist_data};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub trait Repository {
    /// Mood entries for a user, oldest first.
    fn list_moods(&self, user_id: &str) -> impl Future<Output = Result<Vec<MoodEntry>, AppError>> + Send;
    fn add_mood(
        &self,
        user_id: &str,
        entry: NewMoodEntry,
    ) -> impl Future<Output = Result<MoodEntry, AppError>> + Send;

    fn list_medications(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Medication>, AppError>> + Send;
    fn add_medication(
        &self,
        user_id: &str,
        medication: NewMedication,
    ) -> impl Future<Output = Result<Medication, AppError>> + Send;
    fn toggle_medication(
        &self,
        user_id: &str,
        id: &str,
    ) -> impl Future<Output = Result<Medication, AppError>> + Send;
    fn remove_medication(&self, user_id: &str, id: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Journal entries for a user, newest first.
    fn list_journal(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<JournalEntry>, AppError>> + Send;
    fn add_journal(
        &self,
        user_id: &str,
        entry: NewJournalEntry,
    ) -> impl Future<Output = Result<JournalEntry, AppError>> + Send;

    fn list_goals(&self, user_id: &str) -> impl Future<Output = Result<Vec<Goal>, AppError>> + Send;
    fn add_goal(&self, user_id: &str, goal: NewGoal) -> impl Future<Output = Result<Goal, AppError>> + Send;
    fn add_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task: NewGoalTask,
    ) -> impl Future<Output = Result<Goal, AppError>> + Send;
    fn toggle_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task_id: &str,
    ) -> impl Future<Output = Result<Goal, AppError>> + Send;

    fn list_groups(&self) -> impl Future<Output = Result<Vec<SupportGroup>, AppError>> + Send;
    /// Joining a group twice keeps a single membership.
    fn join_group(
        &self,
        user_id: &str,
        group_id: &str,
    ) -> impl Future<Output = Result<GroupMembership, AppError>> + Send;
}

#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
    data: Arc<Mutex<AppData>>,
}

impl LocalStore {
    pub fn new(path: PathBuf, mut data: AppData) -> Self {
        if data.groups.is_empty() {
            data.groups = default_groups();
        }
        Self {
            path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn open(path: &Path) -> Self {
        let data = load_data(path).await;
        Self::new(path.to_path_buf(), data)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<T: Send>(&self, user_id: &str, f: impl FnOnce(&UserData) -> T + Send) -> T {
        let data = self.data.lock().await;
        match data.users.get(user_id) {
            Some(user) => f(user),
            None => f(&UserData::default()),
        }
    }

    /// Applies `f` to a copy of the document and only keeps the copy once it
    /// has been written to disk.
    async fn mutate<T: Send>(
        &self,
        f: impl FnOnce(&mut AppData) -> Result<T, AppError> + Send,
    ) -> Result<T, AppError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let out = f(&mut next)?;
        persist_data(&self.path, &next).await?;
        *data = next;
        Ok(out)
    }

    pub async fn load_settings(&self, user_id: &str) -> Settings {
        self.read(user_id, |user| user.settings.clone().unwrap_or_default())
            .await
    }

    pub async fn save_settings(
        &self,
        user_id: &str,
        update: SettingsUpdate,
    ) -> Result<Settings, AppError> {
        self.mutate(|data| {
            let user = data.users.entry(user_id.to_string()).or_default();
            let merged = user.settings.clone().unwrap_or_default().merge(update);
            user.settings = Some(merged.clone());
            Ok(merged)
        })
        .await
    }

    pub async fn clear_settings(&self, user_id: &str) -> Result<Settings, AppError> {
        self.mutate(|data| {
            if let Some(user) = data.users.get_mut(user_id) {
                user.settings = None;
            }
            Ok(Settings::default())
        })
        .await
    }
}

fn next_id(data: &mut AppData) -> String {
    data.next_id += 1;
    data.next_id.to_string()
}

fn default_groups() -> Vec<SupportGroup> {
    let group = |id: &str, name: &str, description: &str, category: &str, members: u64| SupportGroup {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        members,
    };
    vec![
        group("1", "General support", "Sharing and mutual support on any topic", "general", 128),
        group("2", "Coping with anxiety", "Tips and support for dealing with anxiety", "anxiety", 85),
        group("3", "Improving mood", "Everyday ideas for lifting your mood", "mood", 156),
    ]
}

impl Repository for LocalStore {
    async fn list_moods(&self, user_id: &str) -> Result<Vec<MoodEntry>, AppError> {
        let mut moods = self.read(user_id, |user| user.moods.clone()).await;
        moods.sort_by_key(|entry| entry.created_at);
        Ok(moods)
    }

    async fn add_mood(&self, user_id: &str, entry: NewMoodEntry) -> Result<MoodEntry, AppError> {
        let stored = self
            .mutate(|data| {
                let record = MoodEntry {
                    id: next_id(data),
                    user_id: user_id.to_string(),
                    general_feeling: entry.general_feeling,
                    anxiety_optimism: entry.anxiety_optimism,
                    activity_level: entry.activity_level,
                    sleep_quality: entry.sleep_quality,
                    social_interaction: entry.social_interaction,
                    took_medication: entry.took_medication,
                    note: entry.note,
                    created_at: Utc::now(),
                };
                let user = data.users.entry(user_id.to_string()).or_default();
                user.moods.push(record.clone());
                Ok(record)
            })
            .await?;
        info!(user_id, id = %stored.id, "stored mood entry");
        Ok(stored)
    }

    async fn list_medications(&self, user_id: &str) -> Result<Vec<Medication>, AppError> {
        Ok(self.read(user_id, |user| user.medications.clone()).await)
    }

    async fn add_medication(
        &self,
        user_id: &str,
        medication: NewMedication,
    ) -> Result<Medication, AppError> {
        self.mutate(|data| {
            let record = Medication {
                id: next_id(data),
                user_id: user_id.to_string(),
                name: medication.name,
                dosage: medication.dosage,
                schedule_time: medication.schedule_time,
                reminder: medication.reminder,
                taken: false,
                taken_at: None,
                created_at: Utc::now(),
            };
            let user = data.users.entry(user_id.to_string()).or_default();
            user.medications.push(record.clone());
            Ok(record)
        })
        .await
    }

    async fn toggle_medication(&self, user_id: &str, id: &str) -> Result<Medication, AppError> {
        self.mutate(|data| {
            let medication = data
                .users
                .get_mut(user_id)
                .and_then(|user| user.medications.iter_mut().find(|m| m.id == id))
                .ok_or_else(|| AppError::not_found("medication", id))?;
            medication.taken = !medication.taken;
            medication.taken_at = medication.taken.then(Utc::now);
            Ok(medication.clone())
        })
        .await
    }

    async fn remove_medication(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        self.mutate(|data| {
            let medications = data
                .users
                .get_mut(user_id)
                .map(|user| &mut user.medications)
                .ok_or_else(|| AppError::not_found("medication", id))?;
            let before = medications.len();
            medications.retain(|m| m.id != id);
            if medications.len() == before {
                return Err(AppError::not_found("medication", id));
            }
            Ok(())
        })
        .await
    }

    async fn list_journal(&self, user_id: &str) -> Result<Vec<JournalEntry>, AppError> {
        let mut entries = self.read(user_id, |user| user.journal.clone()).await;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn add_journal(
        &self,
        user_id: &str,
        entry: NewJournalEntry,
    ) -> Result<JournalEntry, AppError> {
        self.mutate(|data| {
            let record = JournalEntry {
                id: next_id(data),
                user_id: user_id.to_string(),
                title: entry.title,
                content: entry.content,
                mood: entry.mood,
                created_at: Utc::now(),
            };
            let user = data.users.entry(user_id.to_string()).or_default();
            user.journal.push(record.clone());
            Ok(record)
        })
        .await
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>, AppError> {
        Ok(self.read(user_id, |user| user.goals.clone()).await)
    }

    async fn add_goal(&self, user_id: &str, goal: NewGoal) -> Result<Goal, AppError> {
        self.mutate(|data| {
            let record = Goal {
                id: next_id(data),
                user_id: user_id.to_string(),
                title: goal.title,
                description: goal.description,
                progress: 0.0,
                deadline: goal.deadline,
                tasks: Vec::new(),
                created_at: Utc::now(),
            };
            let user = data.users.entry(user_id.to_string()).or_default();
            user.goals.push(record.clone());
            Ok(record)
        })
        .await
    }

    async fn add_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task: NewGoalTask,
    ) -> Result<Goal, AppError> {
        self.mutate(|data| {
            let task_id = next_id(data);
            let goal = find_goal(data, user_id, goal_id)?;
            goal.tasks.push(GoalTask {
                id: task_id,
                title: task.title,
                completed: false,
            });
            Ok(goal.clone())
        })
        .await
    }

    async fn toggle_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task_id: &str,
    ) -> Result<Goal, AppError> {
        self.mutate(|data| {
            let goal = find_goal(data, user_id, goal_id)?;
            let task = goal
                .tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or_else(|| AppError::not_found("task", task_id))?;
            task.completed = !task.completed;
            goal.recompute_progress();
            Ok(goal.clone())
        })
        .await
    }

    async fn list_groups(&self) -> Result<Vec<SupportGroup>, AppError> {
        Ok(self.data.lock().await.groups.clone())
    }

    async fn join_group(&self, user_id: &str, group_id: &str) -> Result<GroupMembership, AppError> {
        self.mutate(|data| {
            if let Some(existing) = data
                .memberships
                .iter()
                .find(|m| m.group_id == group_id && m.user_id == user_id)
            {
                return Ok(existing.clone());
            }
            let group = data
                .groups
                .iter_mut()
                .find(|g| g.id == group_id)
                .ok_or_else(|| AppError::not_found("group", group_id))?;
            group.members += 1;
            let membership = GroupMembership {
                group_id: group_id.to_string(),
                user_id: user_id.to_string(),
                joined_at: Utc::now(),
            };
            data.memberships.push(membership.clone());
            Ok(membership)
        })
        .await
    }
}

fn find_goal<'a>(data: &'a mut AppData, user_id: &str, goal_id: &str) -> Result<&'a mut Goal, AppError> {
    data.users
        .get_mut(user_id)
        .and_then(|user| user.goals.iter_mut().find(|g| g.id == goal_id))
        .ok_or_else(|| AppError::not_found("goal", goal_id))
}

/// Client for the hosted backend's REST tables (`/rest/v1/<table>`).
#[derive(Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct MoodInsert<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    entry: &'a NewMoodEntry,
}

#[derive(Serialize)]
struct MedicationInsert<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    medication: &'a NewMedication,
}

#[derive(Serialize)]
struct JournalInsert<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    entry: &'a NewJournalEntry,
}

#[derive(Serialize)]
struct GoalInsert<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    goal: &'a NewGoal,
    progress: f64,
}

#[derive(Serialize)]
struct GoalTaskInsert<'a> {
    goal_id: &'a str,
    title: &'a str,
    completed: bool,
}

#[derive(Serialize)]
struct MembershipInsert<'a> {
    group_id: &'a str,
    user_id: &'a str,
}

#[derive(Deserialize)]
struct MembershipRow {
    group_id: String,
    user_id: String,
    #[serde(alias = "created_at")]
    joined_at: chrono::DateTime<Utc>,
}

#[derive(Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Deserialize)]
struct GroupRow {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    group_members: Vec<CountRow>,
}

const GOAL_SELECT: &str = "*,goal_tasks(*)";

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn table(&self, table: &str, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .table(table, reqwest::Method::GET)
            .query(query)
            .send()
            .await?;
        decode(table, response).await
    }

    async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .table(table, reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(&[body])
            .send()
            .await?;
        single(table, decode(table, response).await?)
    }

    /// Insert that leaves an existing row on `conflict` untouched. The backend
    /// answers with an empty array when the row was already there.
    async fn insert_ignoring_duplicates<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        conflict: &str,
        body: &B,
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .table(table, reqwest::Method::POST)
            .header("Prefer", "return=representation,resolution=ignore-duplicates")
            .query(&[("on_conflict", conflict)])
            .json(&[body])
            .send()
            .await?;
        decode(table, response).await
    }

    async fn update<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .table(table, reqwest::Method::PATCH)
            .header("Prefer", "return=representation")
            .query(query)
            .json(body)
            .send()
            .await?;
        decode(table, response).await
    }

    async fn fetch_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal, AppError> {
        let goals: Vec<Goal> = self
            .select(
                "goals",
                &[
                    ("select", GOAL_SELECT.to_string()),
                    ("id", eq(goal_id)),
                    ("user_id", eq(user_id)),
                ],
            )
            .await?;
        goals
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("goal", goal_id))
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

async fn decode<T: DeserializeOwned>(table: &str, response: reqwest::Response) -> Result<Vec<T>, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::upstream(format!("{table}: {status} {body}")));
    }
    Ok(response.json().await?)
}

fn single<T>(table: &str, rows: Vec<T>) -> Result<T, AppError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| AppError::upstream(format!("{table}: empty response")))
}

impl Repository for RemoteStore {
    async fn list_moods(&self, user_id: &str) -> Result<Vec<MoodEntry>, AppError> {
        self.select(
            "mood_entries",
            &[("user_id", eq(user_id)), ("order", "created_at.asc".to_string())],
        )
        .await
    }

    async fn add_mood(&self, user_id: &str, entry: NewMoodEntry) -> Result<MoodEntry, AppError> {
        let stored: MoodEntry = self
            .insert("mood_entries", &MoodInsert { user_id, entry: &entry })
            .await?;
        info!(user_id, id = %stored.id, "stored mood entry remotely");
        Ok(stored)
    }

    async fn list_medications(&self, user_id: &str) -> Result<Vec<Medication>, AppError> {
        self.select(
            "medications",
            &[("user_id", eq(user_id)), ("order", "created_at.asc".to_string())],
        )
        .await
    }

    async fn add_medication(
        &self,
        user_id: &str,
        medication: NewMedication,
    ) -> Result<Medication, AppError> {
        self.insert(
            "medications",
            &MedicationInsert {
                user_id,
                medication: &medication,
            },
        )
        .await
    }

    async fn toggle_medication(&self, user_id: &str, id: &str) -> Result<Medication, AppError> {
        let filter = [("id", eq(id)), ("user_id", eq(user_id))];
        let current: Vec<Medication> = self.select("medications", &filter).await?;
        let current = current
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("medication", id))?;
        let taken = !current.taken;
        let patch = serde_json::json!({
            "taken": taken,
            "taken_at": taken.then(Utc::now),
        });
        single("medications", self.update("medications", &filter, &patch).await?)
    }

    async fn remove_medication(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let response = self
            .table("medications", reqwest::Method::DELETE)
            .header("Prefer", "return=representation")
            .query(&[("id", eq(id)), ("user_id", eq(user_id))])
            .send()
            .await?;
        let removed: Vec<Medication> = decode("medications", response).await?;
        if removed.is_empty() {
            return Err(AppError::not_found("medication", id));
        }
        Ok(())
    }

    async fn list_journal(&self, user_id: &str) -> Result<Vec<JournalEntry>, AppError> {
        self.select(
            "journal_entries",
            &[("user_id", eq(user_id)), ("order", "created_at.desc".to_string())],
        )
        .await
    }

    async fn add_journal(
        &self,
        user_id: &str,
        entry: NewJournalEntry,
    ) -> Result<JournalEntry, AppError> {
        self.insert("journal_entries", &JournalInsert { user_id, entry: &entry })
            .await
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>, AppError> {
        self.select(
            "goals",
            &[
                ("select", GOAL_SELECT.to_string()),
                ("user_id", eq(user_id)),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    async fn add_goal(&self, user_id: &str, goal: NewGoal) -> Result<Goal, AppError> {
        self.insert(
            "goals",
            &GoalInsert {
                user_id,
                goal: &goal,
                progress: 0.0,
            },
        )
        .await
    }

    async fn add_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task: NewGoalTask,
    ) -> Result<Goal, AppError> {
        // Ownership check before writing into goal_tasks.
        self.fetch_goal(user_id, goal_id).await?;
        let _: GoalTask = self
            .insert(
                "goal_tasks",
                &GoalTaskInsert {
                    goal_id,
                    title: &task.title,
                    completed: false,
                },
            )
            .await?;
        self.fetch_goal(user_id, goal_id).await
    }

    async fn toggle_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task_id: &str,
    ) -> Result<Goal, AppError> {
        let mut goal = self.fetch_goal(user_id, goal_id).await?;
        let task = goal
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| AppError::not_found("task", task_id))?;
        task.completed = !task.completed;
        let completed = task.completed;

        let _: Vec<GoalTask> = self
            .update(
                "goal_tasks",
                &[("id", eq(task_id)), ("goal_id", eq(goal_id))],
                &serde_json::json!({ "completed": completed }),
            )
            .await?;

        goal.recompute_progress();
        let _: Vec<serde_json::Value> = self
            .update(
                "goals",
                &[("id", eq(goal_id)), ("user_id", eq(user_id))],
                &serde_json::json!({ "progress": goal.progress }),
            )
            .await?;
        Ok(goal)
    }

    async fn list_groups(&self) -> Result<Vec<SupportGroup>, AppError> {
        let rows: Vec<GroupRow> = self
            .select(
                "support_groups",
                &[("select", "*,group_members(count)".to_string())],
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| SupportGroup {
                id: row.id,
                name: row.name,
                description: row.description.unwrap_or_default(),
                category: row.category.unwrap_or_default(),
                members: row.group_members.first().map(|c| c.count).unwrap_or(0),
            })
            .collect())
    }

    async fn join_group(&self, user_id: &str, group_id: &str) -> Result<GroupMembership, AppError> {
        let inserted: Vec<MembershipRow> = self
            .insert_ignoring_duplicates(
                "group_members",
                "group_id,user_id",
                &MembershipInsert { group_id, user_id },
            )
            .await?;
        let row = match inserted.into_iter().next() {
            Some(row) => row,
            None => {
                let existing: Vec<MembershipRow> = self
                    .select(
                        "group_members",
                        &[("group_id", eq(group_id)), ("user_id", eq(user_id))],
                    )
                    .await?;
                single("group_members", existing)?
            }
        };
        Ok(GroupMembership {
            group_id: row.group_id,
            user_id: row.user_id,
            joined_at: row.joined_at,
        })
    }
}

/// The store the application runs against.
#[derive(Clone)]
pub enum Backend {
    Local(LocalStore),
    Remote(RemoteStore),
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Backend::Local($store) => $call.await,
            Backend::Remote($store) => $call.await,
        }
    };
}

impl Repository for Backend {
    async fn list_moods(&self, user_id: &str) -> Result<Vec<MoodEntry>, AppError> {
        dispatch!(self, store => store.list_moods(user_id))
    }

    async fn add_mood(&self, user_id: &str, entry: NewMoodEntry) -> Result<MoodEntry, AppError> {
        dispatch!(self, store => store.add_mood(user_id, entry))
    }

    async fn list_medications(&self, user_id: &str) -> Result<Vec<Medication>, AppError> {
        dispatch!(self, store => store.list_medications(user_id))
    }

    async fn add_medication(
        &self,
        user_id: &str,
        medication: NewMedication,
    ) -> Result<Medication, AppError> {
        dispatch!(self, store => store.add_medication(user_id, medication))
    }

    async fn toggle_medication(&self, user_id: &str, id: &str) -> Result<Medication, AppError> {
        dispatch!(self, store => store.toggle_medication(user_id, id))
    }

    async fn remove_medication(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        dispatch!(self, store => store.remove_medication(user_id, id))
    }

    async fn list_journal(&self, user_id: &str) -> Result<Vec<JournalEntry>, AppError> {
        dispatch!(self, store => store.list_journal(user_id))
    }

    async fn add_journal(
        &self,
        user_id: &str,
        entry: NewJournalEntry,
    ) -> Result<JournalEntry, AppError> {
        dispatch!(self, store => store.add_journal(user_id, entry))
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>, AppError> {
        dispatch!(self, store => store.list_goals(user_id))
    }

    async fn add_goal(&self, user_id: &str, goal: NewGoal) -> Result<Goal, AppError> {
        dispatch!(self, store => store.add_goal(user_id, goal))
    }

    async fn add_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task: NewGoalTask,
    ) -> Result<Goal, AppError> {
        dispatch!(self, store => store.add_goal_task(user_id, goal_id, task))
    }

    async fn toggle_goal_task(
        &self,
        user_id: &str,
        goal_id: &str,
        task_id: &str,
    ) -> Result<Goal, AppError> {
        dispatch!(self, store => store.toggle_goal_task(user_id, goal_id, task_id))
    }

    async fn list_groups(&self) -> Result<Vec<SupportGroup>, AppError> {
        dispatch!(self, store => store.list_groups())
    }

    async fn join_group(&self, user_id: &str, group_id: &str) -> Result<GroupMembership, AppError> {
        dispatch!(self, store => store.join_group(user_id, group_id))
    }
}
