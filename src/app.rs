use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/moods", get(handlers::list_moods).post(handlers::create_mood))
        .route("/api/moods/insights", get(handlers::get_insights))
        .route("/api/moods/calendar", get(handlers::get_calendar))
        .route("/api/moods/export.csv", get(handlers::export_moods))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/medications",
            get(handlers::list_medications).post(handlers::create_medication),
        )
        .route("/api/medications/:id", delete(handlers::delete_medication))
        .route("/api/medications/:id/toggle", post(handlers::toggle_medication))
        .route("/api/journal", get(handlers::list_journal).post(handlers::create_journal))
        .route("/api/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/api/goals/:goal_id/tasks", post(handlers::create_goal_task))
        .route(
            "/api/goals/:goal_id/tasks/:task_id/toggle",
            post(handlers::toggle_goal_task),
        )
        .route("/api/groups", get(handlers::list_groups))
        .route("/api/groups/:id/join", post(handlers::join_group))
        .route(
            "/api/settings",
            get(handlers::get_settings)
                .put(handlers::update_settings)
                .delete(handlers::reset_settings),
        )
        .route("/api/chat", post(handlers::chat))
        .with_state(state)
}
