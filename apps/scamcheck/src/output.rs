use clap::ValueEnum;
use client_core::{
    report::ErrorBanner, GlyphRenderer, HtmlBackend, NoGlyphs, Report, ReportBackend, TextBackend,
    UnicodeGlyphs,
};
use serde::Serialize;
use serde_json::json;
use shared::protocol::{AnalyticsResponse, HistoryResponse, PatternsResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Emits the report structure itself. String fields stay escaped.
pub struct JsonBackend;

impl ReportBackend for JsonBackend {
    fn render_report(&self, report: &Report) -> String {
        match serde_json::to_string_pretty(report) {
            Ok(body) => body,
            Err(err) => json!({ "error": format!("failed to encode report: {err}") }).to_string(),
        }
    }

    fn render_error(&self, banner: &ErrorBanner) -> String {
        json!({ "error": banner.message, "icon": banner.icon.name() }).to_string()
    }
}

pub fn backend(format: OutputFormat, expand_details: bool) -> Box<dyn ReportBackend> {
    match format {
        OutputFormat::Text => Box::new(TextBackend { expand_details }),
        OutputFormat::Html => Box::new(HtmlBackend),
        OutputFormat::Json => Box::new(JsonBackend),
    }
}

/// HTML keeps its icon tags for the page's icon library; JSON stays untouched.
pub fn glyphs(format: OutputFormat) -> Box<dyn GlyphRenderer> {
    match format {
        OutputFormat::Text => Box::new(UnicodeGlyphs),
        OutputFormat::Html | OutputFormat::Json => Box::new(NoGlyphs),
    }
}

/// Read-endpoint output: pretty JSON for `--format json`, text otherwise.
/// HTML has no page for these, so it falls back to text.
pub fn service_view<T: Serialize>(
    format: OutputFormat,
    body: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(body)?),
        OutputFormat::Text | OutputFormat::Html => Ok(text(body)),
    }
}

pub fn patterns_text(body: &PatternsResponse) -> String {
    let mut lines = vec![format!(
        "{} categories, {} patterns",
        body.total_count,
        body.pattern_count()
    )];
    for (category, patterns) in &body.patterns {
        lines.push(format!("{category} ({})", patterns.len()));
        lines.extend(patterns.iter().map(|pattern| format!("  {pattern}")));
    }
    lines.join("\n")
}

pub fn history_text(body: &HistoryResponse) -> String {
    if body.history.is_empty() {
        return "no checks recorded".to_string();
    }
    body.history
        .iter()
        .map(|entry| {
            format!(
                "#{} {} {:>3}% {} {}",
                entry.id,
                if entry.is_scam { "SCAM" } else { "SAFE" },
                client_core::report::confidence_percent(entry.confidence_score),
                entry.created_at.as_deref().unwrap_or("-"),
                entry.message_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analytics_text(body: &AnalyticsResponse) -> String {
    let mut lines = vec![
        format!("Total checks: {}", body.total_checks),
        format!(
            "Scams detected: {} ({}%)",
            body.scam_detected, body.scam_percentage
        ),
        format!("Average confidence: {}", body.avg_confidence_score),
    ];
    if !body.top_categories.is_empty() {
        lines.push("Top categories:".to_string());
        lines.extend(body.top_categories.iter().map(|entry| {
            format!(
                "  {}: {}",
                client_core::report::format_category(&entry.category),
                entry.count
            )
        }));
    }
    lines.join("\n")
}
