use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Insights {
    average_mood: f64,
    best_day: f64,
    worst_day: f64,
    trend: f64,
}

#[derive(Debug, Deserialize)]
struct InsightsResponse {
    prediction: f64,
    predicted_category: String,
    insights: Option<Insights>,
    sample_count: usize,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn unique_data_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("mood_tracker_http_{}_{}.json", std::process::id(), nanos()));
    path.to_string_lossy().to_string()
}

/// Each test logs in as its own user so tests can share one server.
fn unique_user(name: &str) -> String {
    format!("{name}-{}", nanos())
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/groups")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_mood_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env_remove("MOOD_BACKEND_URL")
        .env_remove("MOOD_BACKEND_KEY")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_mood(client: &Client, base_url: &str, user: &str, feeling: u8) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/moods"))
        .header("x-user-id", user)
        .json(&json!({
            "general_feeling": feeling,
            "anxiety_optimism": 5,
            "activity_level": 6,
            "sleep_quality": 7,
            "social_interaction": 4,
            "took_medication": true,
            "note": "checked in"
        }))
        .send()
        .await
        .unwrap()
}

async fn insights(client: &Client, base_url: &str, user: &str) -> InsightsResponse {
    client
        .get(format!("{base_url}/api/moods/insights"))
        .header("x-user-id", user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_api_requires_login() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/moods", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("{}/api/moods", server.base_url))
        .header("x-user-id", "  ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn http_index_serves_dashboard() {
    let server = shared_server().await;
    let body = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Mood Tracker"));
}

#[tokio::test]
async fn http_insights_need_a_full_week() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("short");

    for feeling in [8, 9, 7] {
        assert_eq!(
            post_mood(&client, &server.base_url, &user, feeling).await.status(),
            StatusCode::CREATED
        );
    }

    let result = insights(&client, &server.base_url, &user).await;
    assert_eq!(result.sample_count, 3);
    assert_eq!(result.prediction, 5.0);
    assert_eq!(result.predicted_category, "sad");
    assert!(result.insights.is_none());
}

#[tokio::test]
async fn http_insights_over_trailing_week() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("week");

    for feeling in [10, 4, 3, 5, 4, 4, 5, 4] {
        let response = post_mood(&client, &server.base_url, &user, feeling).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let result = insights(&client, &server.base_url, &user).await;
    assert_eq!(result.sample_count, 8);
    assert!((result.prediction - 29.0 / 7.0).abs() < 1e-9);
    assert_eq!(result.predicted_category, "sad");

    let summary = result.insights.expect("insights");
    assert!((summary.average_mood - 4.14).abs() < 0.01);
    assert_eq!(summary.best_day, 5.0);
    assert_eq!(summary.worst_day, 3.0);
    assert_eq!(summary.trend, 0.0);
}

#[tokio::test]
async fn http_rejects_out_of_range_mood() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("invalid");

    let response = post_mood(&client, &server.base_url, &user, 11).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let moods: Vec<Value> = client
        .get(format!("{}/api/moods", server.base_url))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(moods.is_empty());
}

#[tokio::test]
async fn http_calendar_and_export() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("calendar");

    post_mood(&client, &server.base_url, &user, 1).await;
    post_mood(&client, &server.base_url, &user, 10).await;

    let days: Vec<Value> = client
        .get(format!("{}/api/moods/calendar", server.base_url))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["category"], "angry");
    assert_eq!(days[0]["color"], "red");
    assert_eq!(days[1]["category"], "happy");
    assert_eq!(days[1]["emoji"], "😊");

    let response = client
        .get(format!("{}/api/moods/export.csv", server.base_url))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains("mood_report_"));
    let csv = response.text().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("date,general_feeling"));
    assert!(lines[1].ends_with(",1,5,6,7,4,yes,checked in"));
}

#[tokio::test]
async fn http_medication_lifecycle() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("meds");
    let base = &server.base_url;

    let response = client
        .post(format!("{base}/api/medications"))
        .header("x-user-id", &user)
        .json(&json!({ "name": "", "dosage": "10mg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let created: Value = client
        .post(format!("{base}/api/medications"))
        .header("x-user-id", &user)
        .json(&json!({ "name": "Lithium", "dosage": "300mg", "schedule_time": "09:00" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["taken"], false);
    assert_eq!(created["reminder"], true);

    let toggled: Value = client
        .post(format!("{base}/api/medications/{id}/toggle"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled["taken"], true);
    assert!(toggled["taken_at"].is_string());

    let response = client
        .delete(format!("{base}/api/medications/{id}"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .post(format!("{base}/api/medications/{id}/toggle"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_goal_progress() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("goals");
    let base = &server.base_url;

    let goal: Value = client
        .post(format!("{base}/api/goals"))
        .header("x-user-id", &user)
        .json(&json!({ "title": "Sleep before midnight", "description": "weeknights" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let goal_id = goal["id"].as_str().unwrap().to_string();
    assert_eq!(goal["progress"], 0.0);

    let mut latest = Value::Null;
    for title in ["Phone off at 23:00", "No coffee after 16:00", "Read before bed", "Lights out"] {
        latest = client
            .post(format!("{base}/api/goals/{goal_id}/tasks"))
            .header("x-user-id", &user)
            .json(&json!({ "title": title }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    }
    let task_id = latest["tasks"][0]["id"].as_str().unwrap().to_string();

    let updated: Value = client
        .post(format!("{base}/api/goals/{goal_id}/tasks/{task_id}/toggle"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["progress"], 25.0);
    assert_eq!(updated["tasks"][0]["completed"], true);
}

#[tokio::test]
async fn http_journal_and_groups() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("journal");
    let base = &server.base_url;

    let response = client
        .post(format!("{base}/api/journal"))
        .header("x-user-id", &user)
        .json(&json!({ "title": "Monday", "content": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let entry: Value = client
        .post(format!("{base}/api/journal"))
        .header("x-user-id", &user)
        .json(&json!({ "title": "Monday", "content": "Went for a run." }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(entry["mood"], 5);

    let membership = client
        .post(format!("{base}/api/groups/1/join"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap();
    assert!(membership.status().is_success());

    let missing = client
        .post(format!("{base}/api/groups/does-not-exist/join"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_settings_and_chat() {
    let server = shared_server().await;
    let client = Client::new();
    let user = unique_user("settings");
    let base = &server.base_url;

    let defaults: Value = client
        .get(format!("{base}/api/settings"))
        .header("x-user-id", &user)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(defaults["reminder_time"], "20:00");
    assert_eq!(defaults["language"], "he");

    let response = client
        .put(format!("{base}/api/settings"))
        .header("x-user-id", &user)
        .json(&json!({ "reminder_time": "late" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let saved: Value = client
        .put(format!("{base}/api/settings"))
        .header("x-user-id", &user)
        .json(&json!({ "dark_mode": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["dark_mode"], true);
    assert_eq!(saved["daily_reminder"], true);

    let messages: Vec<Value> = client
        .post(format!("{base}/api/chat"))
        .header("x-user-id", &user)
        .json(&json!({ "content": "hello?" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "hello?");
    assert_eq!(messages[1]["sender_id"], "support");
}
