use crate::errors::AppError;
use crate::format::{self, BuiltinFormat, DisplayTemplate};
use crate::models::{
    CalendarRequest, DailyPoint, DisplayResponse, SnapshotResponse, StatsResponse, StreakSnapshot,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::streak::{calendar_days, compute_snapshot_at, snapshot_for};
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use chrono::{Duration, Local, NaiveDate};
use std::collections::BTreeMap;

// Width of the strip chart on the index page, in days.
const RECENT_WINDOW: usize = 35;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today_date();
    let data = state.data.lock().await;
    let snapshot = compute_snapshot_at(today, &calendar_days(&data));
    let text = format::render(&snapshot, &data.template);
    Html(render_index(&today.to_string(), &data, &snapshot, &text))
}

pub async fn get_streak(State(state): State<AppState>) -> Result<Json<SnapshotResponse>, AppError> {
    let today = today_date();
    let data = state.data.lock().await;
    let snapshot = compute_snapshot_at(today, &calendar_days(&data));
    Ok(Json(to_snapshot_response(today, snapshot)))
}

pub async fn get_display(State(state): State<AppState>) -> Result<Json<DisplayResponse>, AppError> {
    let data = state.data.lock().await;
    let snapshot = snapshot_for(&data);
    Ok(Json(DisplayResponse {
        text: format::render(&snapshot, &data.template),
        template: data.template.clone(),
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let today = today_date();
    let data = state.data.lock().await;
    let snapshot = compute_snapshot_at(today, &calendar_days(&data));

    let mut recent_days = Vec::with_capacity(RECENT_WINDOW);
    for offset in (0..RECENT_WINDOW).rev() {
        let date = today - Duration::days(offset as i64);
        let count = data.days.get(&date.to_string()).copied().unwrap_or_default();
        recent_days.push(DailyPoint {
            date: date.to_string(),
            count,
        });
    }

    Ok(Json(StatsResponse {
        as_of: today.to_string(),
        current_streak: snapshot.current_streak,
        longest_streak: snapshot.longest_streak,
        total_count: snapshot.total_count,
        recent_days,
    }))
}

/// Replace the stored calendar with a freshly fetched one. Dates are
/// validated here so the streak engine only ever sees well-formed days.
pub async fn put_calendar(
    State(state): State<AppState>,
    Json(payload): Json<CalendarRequest>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let mut days = BTreeMap::new();
    for entry in &payload.days {
        if NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").is_err() {
            return Err(AppError::bad_request(format!(
                "invalid date '{}', expected YYYY-MM-DD",
                entry.date
            )));
        }
        if days.insert(entry.date.clone(), entry.count).is_some() {
            return Err(AppError::bad_request(format!("duplicate date '{}'", entry.date)));
        }
    }

    let mut data = state.data.lock().await;
    data.days = days;
    if let Some(username) = payload.username {
        data.username = Some(username);
    }
    persist_data(&state.data_path, &data).await?;

    let today = today_date();
    let snapshot = compute_snapshot_at(today, &calendar_days(&data));
    Ok(Json(to_snapshot_response(today, snapshot)))
}

pub async fn set_template(
    State(state): State<AppState>,
    Json(template): Json<DisplayTemplate>,
) -> Result<Json<DisplayResponse>, AppError> {
    if let DisplayTemplate::Custom(text) = &template {
        if text.chars().count() > format::CUSTOM_MAX_CHARS {
            return Err(AppError::bad_request(format!(
                "custom template is limited to {} characters",
                format::CUSTOM_MAX_CHARS
            )));
        }
        if !format::has_placeholder(text) {
            return Err(AppError::bad_request(
                "custom template must contain %d, %l, or %t",
            ));
        }
    }

    let mut data = state.data.lock().await;
    data.template = template;
    persist_data(&state.data_path, &data).await?;

    let snapshot = snapshot_for(&data);
    Ok(Json(DisplayResponse {
        text: format::render(&snapshot, &data.template),
        template: data.template.clone(),
    }))
}

/// One-click switch to the next built-in format; a stored custom
/// template drops back to the first built-in.
pub async fn cycle_template(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    data.template = match &data.template {
        DisplayTemplate::Builtin(builtin) => DisplayTemplate::Builtin(builtin.next()),
        DisplayTemplate::Custom(_) => DisplayTemplate::Builtin(BuiltinFormat::ALL[0]),
    };
    persist_data(&state.data_path, &data).await?;
    Ok(Redirect::to("/"))
}

fn to_snapshot_response(today: NaiveDate, snapshot: StreakSnapshot) -> SnapshotResponse {
    SnapshotResponse {
        as_of: today.to_string(),
        current_streak: snapshot.current_streak,
        longest_streak: snapshot.longest_streak,
        total_count: snapshot.total_count,
    }
}

fn today_date() -> NaiveDate {
    Local::now().date_naive()
}
