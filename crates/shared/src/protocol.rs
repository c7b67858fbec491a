use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rows `GET /history` returns when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
/// The service never returns more history rows than this.
pub const MAX_HISTORY_LIMIT: u32 = 100;

pub fn check_route() -> &'static str {
    "check"
}

pub fn health_route() -> &'static str {
    "health"
}

pub fn patterns_route() -> &'static str {
    "patterns"
}

pub fn history_route() -> &'static str {
    "history"
}

pub fn analytics_route() -> &'static str {
    "analytics"
}

/// Clamps a requested history size to what the service will honour.
pub fn history_limit(requested: u32) -> u32 {
    requested.clamp(1, MAX_HISTORY_LIMIT)
}

/// Body of `POST /check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub text: String,
}

impl CheckRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Body of `GET /patterns`: detector regexes grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternsResponse {
    pub patterns: BTreeMap<String, Vec<String>>,
    pub total_count: usize,
}

impl PatternsResponse {
    pub fn pattern_count(&self) -> usize {
        self.patterns.values().map(Vec::len).sum()
    }
}

/// One stored check as returned by `GET /history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub message_text: String,
    pub is_scam: bool,
    pub confidence_score: f64,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub matched_patterns: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// ISO-8601 timestamp as sent by the service.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `GET /history?limit=N`, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Body of `GET /analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub total_checks: u64,
    pub scam_detected: u64,
    pub scam_percentage: f64,
    pub avg_confidence_score: f64,
    #[serde(default)]
    pub top_categories: Vec<CategoryCount>,
}
