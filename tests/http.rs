use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodaySummaryResponse {
    date: String,
    checked_count: usize,
    total_habits: usize,
    achievement_pct: u8,
    mood: u8,
    habits: HabitStates,
}

#[derive(Debug, Deserialize)]
struct HabitStates {
    wake: bool,
    water: bool,
    study: bool,
    workout: bool,
    sleep: bool,
}

#[derive(Debug, Deserialize)]
struct SeriesPointResponse {
    date: String,
    achievement_pct: u8,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    points: Vec<SeriesPointResponse>,
}

#[derive(Debug, Deserialize)]
struct MetaResponse {
    habits: Vec<HabitMeta>,
    cities: Vec<String>,
    coach_styles: Vec<CoachStyleMeta>,
}

#[derive(Debug, Deserialize)]
struct HabitMeta {
    key: String,
    #[allow(dead_code)]
    emoji: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct CoachStyleMeta {
    id: String,
    #[allow(dead_code)]
    name: String,
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

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

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

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_habit_coach"))
        .env("PORT", port.to_string())
        .env("RUST_LOG", "info")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENWEATHER_API_KEY")
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

#[tokio::test]
async fn http_meta_exposes_fixed_sets() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let meta: MetaResponse = client
        .get(format!("{}/api/meta", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(meta.habits.len(), 5);
    assert_eq!(meta.habits[0].key, "wake");
    assert!(meta.habits.iter().all(|habit| !habit.label.is_empty()));
    assert_eq!(meta.cities.len(), 10);
    assert!(meta.cities.contains(&"Seoul".to_string()));
    let ids: Vec<&str> = meta.coach_styles.iter().map(|style| style.id.as_str()).collect();
    assert_eq!(ids, vec!["spartan", "mentor", "game_master"]);
}

#[tokio::test]
async fn http_today_starts_blank_and_series_has_seven_points() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today: TodaySummaryResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(today.total_habits, 5);
    assert!(!today.date.is_empty());

    let series: SeriesResponse = client
        .get(format!("{}/api/series", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(series.points.len(), 7);
    assert_eq!(series.points.last().unwrap().date, today.date);
    assert!(series.points.iter().all(|point| point.achievement_pct <= 100));
}

#[tokio::test]
async fn http_checkin_updates_today_and_chart() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/checkin", server.base_url))
        .json(&serde_json::json!({
            "habits": { "wake": true, "water": true, "sleep": true },
            "mood": 8
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let summary: TodaySummaryResponse = response.json().await.unwrap();
    assert_eq!(summary.checked_count, 3);
    assert_eq!(summary.achievement_pct, 60);
    assert_eq!(summary.mood, 8);

    let series: SeriesResponse = client
        .get(format!("{}/api/series", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(series.points.len(), 7);
    assert_eq!(series.points.last().unwrap().achievement_pct, 60);
}

#[tokio::test]
async fn http_today_returns_saved_habit_states() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/checkin", server.base_url))
        .json(&serde_json::json!({
            "habits": { "water": true, "sleep": true },
            "mood": 9
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    // a reloading page must see the saved states, not a blank entry
    let today: TodaySummaryResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(today.habits.water);
    assert!(today.habits.sleep);
    assert!(!today.habits.wake);
    assert!(!today.habits.study);
    assert!(!today.habits.workout);
    assert_eq!(today.checked_count, 2);
    assert_eq!(today.mood, 9);
}

#[tokio::test]
async fn http_checkin_rejects_out_of_range_mood() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for mood in [0u8, 11] {
        let response = client
            .post(format!("{}/api/checkin", server.base_url))
            .json(&serde_json::json!({ "habits": {}, "mood": mood }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }
}

#[tokio::test]
async fn http_report_rejects_unknown_city() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/report", server.base_url))
        .json(&serde_json::json!({ "city": "Atlantis", "coach_style": "spartan" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_report_without_keys_yields_missing_key_outcomes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/report", server.base_url))
        .json(&serde_json::json!({ "city": "Seoul", "coach_style": "mentor" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["weather"]["status"], "failed");
    assert_eq!(body["weather"]["reason"], "missing_api_key");
    assert_eq!(body["report"]["status"], "failed");
    assert_eq!(body["report"]["reason"], "missing_api_key");
    // the dog fetch needs no key; its outcome depends on the network
    assert!(body["dog"]["status"].is_string());
}

#[tokio::test]
async fn http_share_reflects_saved_checkin() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/checkin", server.base_url))
        .json(&serde_json::json!({
            "habits": { "study": true, "workout": true },
            "mood": 7
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let share = client
        .get(format!("{}/api/share", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(share.starts_with("📊 AI Habit Tracker ("));
    assert!(share.contains("- Achievement: 40% (2/5)"));
    assert!(share.contains("- Mood: 7/10"));
    assert!(share.contains("📝 Report\n(not generated yet)"));
}
