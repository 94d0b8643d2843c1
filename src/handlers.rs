use crate::clients::{fetch_dog, fetch_weather, generate_report, FetchOutcome};
use crate::errors::AppError;
use crate::metrics::{project_series, project_today, TodaySummary};
use crate::models::{
    CheckinRequest, CoachStyleMeta, DogImage, HabitChecks, HabitMeta, LedgerEntry, MetaResponse,
    ReportRequest, SeriesPointResponse, SeriesResponse, TodaySummaryResponse, Weather, CITIES,
    HABITS,
};
use crate::report::{build_payload, share_text};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub weather: FetchOutcome<Weather>,
    pub dog: FetchOutcome<DogImage>,
    pub report: FetchOutcome<String>,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let mut session = state.session.lock().await;
    session.ledger.find_or_create(today);
    let summary = project_today(&session.ledger, today)?;
    Ok(Html(render_index(&summary)))
}

pub async fn get_meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        habits: HABITS
            .iter()
            .map(|habit| HabitMeta { key: habit.key, emoji: habit.emoji, label: habit.label })
            .collect(),
        cities: CITIES.to_vec(),
        coach_styles: crate::models::CoachStyle::ALL
            .iter()
            .map(|style| CoachStyleMeta { id: style.id(), name: style.display_name() })
            .collect(),
    })
}

pub async fn get_today(
    State(state): State<AppState>,
) -> Result<Json<TodaySummaryResponse>, AppError> {
    let today = today();
    let mut session = state.session.lock().await;
    let checks = session.ledger.find_or_create(today).checks;
    let summary = project_today(&session.ledger, today)?;
    Ok(Json(to_summary_response(&summary, checks)))
}

pub async fn get_series(State(state): State<AppState>) -> Result<Json<SeriesResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.ledger.find_or_create(today());
    let points = project_series(&session.ledger)
        .into_iter()
        .map(|point| SeriesPointResponse {
            date: point.date.to_string(),
            achievement_pct: point.achievement_pct,
        })
        .collect();
    Ok(Json(SeriesResponse { points }))
}

pub async fn checkin(
    State(state): State<AppState>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<TodaySummaryResponse>, AppError> {
    if !(1..=10).contains(&payload.mood) {
        return Err(AppError::bad_request("mood must be between 1 and 10"));
    }

    let today = today();
    let mut session = state.session.lock().await;
    session.ledger.upsert(LedgerEntry {
        date: today,
        mood: payload.mood,
        checks: payload.habits,
    });
    let summary = project_today(&session.ledger, today)?;
    Ok(Json(to_summary_response(&summary, payload.habits)))
}

pub async fn report(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    if !CITIES.contains(&payload.city.as_str()) {
        return Err(AppError::bad_request("unknown city"));
    }

    let today = today();
    // Gather ledger inputs under the lock, then fetch without holding it.
    let (summary, checks) = {
        let mut session = state.session.lock().await;
        session.city = payload.city.clone();
        session.coach_style = payload.coach_style;
        let entry = session.ledger.find_or_create(today).clone();
        let summary = project_today(&session.ledger, today)?;
        (summary, entry.checks)
    };

    let weather_key = payload.weather_api_key.as_deref().or(state.weather_api_key.as_deref());
    let openai_key = payload.openai_api_key.as_deref().or(state.openai_api_key.as_deref());

    let (weather, dog) = tokio::join!(
        fetch_weather(&state.http, &payload.city, weather_key),
        fetch_dog(&state.http),
    );

    let report_payload = build_payload(
        &summary,
        &checks,
        &payload.city,
        payload.coach_style,
        weather.as_ref().ok(),
        dog.as_ref().ok(),
    );
    let report =
        generate_report(&state.http, openai_key, payload.coach_style, &report_payload).await;

    let response = ReportResponse {
        weather: weather.into(),
        dog: dog.into(),
        report: report.into(),
    };

    let mut session = state.session.lock().await;
    session.last_weather = response.weather.data().cloned();
    session.last_dog = response.dog.data().cloned();
    session.last_report = response.report.data().cloned();

    Ok(Json(response))
}

pub async fn share(State(state): State<AppState>) -> Result<String, AppError> {
    let today = today();
    let mut session = state.session.lock().await;
    let entry = session.ledger.find_or_create(today).clone();
    let summary = project_today(&session.ledger, today)?;
    Ok(share_text(
        &summary,
        &entry.checks,
        &session.city,
        session.coach_style,
        session.last_report.as_deref(),
    ))
}

fn to_summary_response(summary: &TodaySummary, checks: HabitChecks) -> TodaySummaryResponse {
    TodaySummaryResponse {
        date: summary.date.to_string(),
        checked_count: summary.checked_count,
        total_habits: summary.total_habits,
        achievement_pct: summary.achievement_pct,
        mood: summary.mood,
        habits: checks,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
