use crate::format::DisplayTemplate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar day of contribution activity. Compared by calendar day;
/// the caller supplies at most one record per date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u64,
}

/// Result of one streak computation. Created fresh per call, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakSnapshot {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_count: u64,
}

/// Persisted state: whose calendar this is, how to render it, and the
/// last accepted calendar keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub template: DisplayTemplate,
    #[serde(default)]
    pub days: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarRequest {
    pub username: Option<String>,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub as_of: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_count: u64,
}

#[derive(Debug, Serialize)]
pub struct DisplayResponse {
    pub text: String,
    pub template: DisplayTemplate,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub as_of: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_count: u64,
    pub recent_days: Vec<DailyPoint>,
}
