use crate::analytics::{categorize, predict_next, samples_from_entries, summarize};
use crate::chat;
use crate::errors::AppError;
use crate::export::{mood_csv, report_filename};
use crate::models::{
    CalendarDay, ChatMessage, ChatRequest, Goal, GroupMembership, InsightsResponse, JournalEntry,
    Medication, MoodEntry, NewGoal, NewGoalTask, NewJournalEntry, NewMedication, NewMoodEntry,
    Settings, SettingsUpdate, StatsResponse, SupportGroup,
};
use crate::repository::Repository;
use crate::state::AppState;
use crate::stats::{build_calendar, build_stats};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Local, Utc};

pub const USER_HEADER: &str = "x-user-id";

pub async fn index() -> Html<String> {
    Html(render_index(&Local::now().date_naive().to_string()))
}

pub async fn list_moods(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<MoodEntry>>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.list_moods(user).await?))
}

pub async fn create_mood(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewMoodEntry>,
) -> Result<(StatusCode, Json<MoodEntry>), AppError> {
    let user = user_id(&headers)?;
    validate_mood(&payload)?;
    let entry = state.repo.add_mood(user, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_insights(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<InsightsResponse>, AppError> {
    let user = user_id(&headers)?;
    let entries = state.repo.list_moods(user).await?;
    let samples = samples_from_entries(&entries);
    let prediction = predict_next(&samples);

    Ok(Json(InsightsResponse {
        prediction,
        predicted_category: categorize(prediction),
        insights: summarize(&samples),
        sample_count: samples.len(),
    }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CalendarDay>>, AppError> {
    let user = user_id(&headers)?;
    let entries = state.repo.list_moods(user).await?;
    Ok(Json(build_calendar(&Local, &entries)))
}

pub async fn export_moods(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = user_id(&headers)?;
    let entries = state.repo.list_moods(user).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_filename(Local::now().date_naive())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        mood_csv(&Local, &entries),
    ))
}

pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, AppError> {
    let user = user_id(&headers)?;
    let entries = state.repo.list_moods(user).await?;
    Ok(Json(build_stats(&entries)))
}

pub async fn list_medications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Medication>>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.list_medications(user).await?))
}

pub async fn create_medication(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewMedication>,
) -> Result<(StatusCode, Json<Medication>), AppError> {
    let user = user_id(&headers)?;
    require("name", &payload.name)?;
    require("dosage", &payload.dosage)?;
    let medication = state.repo.add_medication(user, payload).await?;
    Ok((StatusCode::CREATED, Json(medication)))
}

pub async fn toggle_medication(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Medication>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.toggle_medication(user, &id).await?))
}

pub async fn delete_medication(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = user_id(&headers)?;
    state.repo.remove_medication(user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_journal(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.list_journal(user).await?))
}

pub async fn create_journal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewJournalEntry>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let user = user_id(&headers)?;
    require("title", &payload.title)?;
    require("content", &payload.content)?;
    check_score("mood", payload.mood)?;
    let entry = state.repo.add_journal(user, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_goals(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Goal>>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.list_goals(user).await?))
}

pub async fn create_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewGoal>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let user = user_id(&headers)?;
    require("title", &payload.title)?;
    let goal = state.repo.add_goal(user, payload).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn create_goal_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<String>,
    Json(payload): Json<NewGoalTask>,
) -> Result<Json<Goal>, AppError> {
    let user = user_id(&headers)?;
    require("title", &payload.title)?;
    Ok(Json(state.repo.add_goal_task(user, &goal_id, payload).await?))
}

pub async fn toggle_goal_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((goal_id, task_id)): Path<(String, String)>,
) -> Result<Json<Goal>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.toggle_goal_task(user, &goal_id, &task_id).await?))
}

pub async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<SupportGroup>>, AppError> {
    Ok(Json(state.repo.list_groups().await?))
}

pub async fn join_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<String>,
) -> Result<Json<GroupMembership>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.repo.join_group(user, &group_id).await?))
}

pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Settings>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.local.load_settings(user).await))
}

pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<Settings>, AppError> {
    let user = user_id(&headers)?;
    if let Some(time) = payload.reminder_time.as_deref() {
        if chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            return Err(AppError::bad_request("reminder_time must be HH:MM"));
        }
    }
    Ok(Json(state.local.save_settings(user, payload).await?))
}

pub async fn reset_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Settings>, AppError> {
    let user = user_id(&headers)?;
    Ok(Json(state.local.clear_settings(user).await?))
}

pub async fn chat(
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<[ChatMessage; 2]>, AppError> {
    let user = user_id(&headers)?;
    require("content", &payload.content)?;
    Ok(Json(chat::exchange(user, &payload.content, Utc::now())))
}

fn user_id(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(AppError::unauthorized)
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

fn check_score(field: &str, value: u8) -> Result<(), AppError> {
    if !(1..=10).contains(&value) {
        return Err(AppError::bad_request(format!("{field} must be between 1 and 10")));
    }
    Ok(())
}

fn validate_mood(entry: &NewMoodEntry) -> Result<(), AppError> {
    check_score("general_feeling", entry.general_feeling)?;
    check_score("anxiety_optimism", entry.anxiety_optimism)?;
    check_score("activity_level", entry.activity_level)?;
    check_score("sleep_quality", entry.sleep_quality)?;
    check_score("social_interaction", entry.social_interaction)
}
