//! Pure transform from a classification verdict to a renderer-agnostic report.
//!
//! Every externally sourced string in a [`Report`] is already escaped with
//! [`crate::sanitize::escape`]; backends may embed the fields into markup as is.

use serde::Serialize;
use shared::domain::ClassificationResult;

use crate::sanitize::escape;

const LOW_CONFIDENCE_CEILING: f64 = 0.3;
const MEDIUM_CONFIDENCE_CEILING: f64 = 0.7;

pub const EMPTY_STATE_NOTICE: &str = "No suspicious patterns detected in this message.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn from_score(score: f64) -> Self {
        if score < LOW_CONFIDENCE_CEILING {
            Self::Low
        } else if score < MEDIUM_CONFIDENCE_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Icon placeholders a [`crate::display::GlyphRenderer`] later replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    AlertTriangle,
    ShieldCheck,
    Info,
    Code,
    AlertCircle,
}

impl Icon {
    pub const ALL: [Icon; 5] = [
        Icon::AlertTriangle,
        Icon::ShieldCheck,
        Icon::Info,
        Icon::Code,
        Icon::AlertCircle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AlertTriangle => "alert-triangle",
            Self::ShieldCheck => "shield-check",
            Self::Info => "info",
            Self::Code => "code",
            Self::AlertCircle => "alert-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityBanner {
    pub severity: Severity,
    pub icon: Icon,
    pub title: String,
    pub description: String,
    pub confidence_percent: u8,
}

impl SeverityBanner {
    pub fn confidence_label(&self) -> String {
        format!("{}% Confidence", self.confidence_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceMeter {
    pub percent: u8,
    pub band: ConfidenceBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub scam_detected: bool,
    pub patterns_found: usize,
    pub categories_found: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeGroup {
    pub heading: String,
    pub badges: Vec<String>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalDetails {
    pub icon: Icon,
    pub patterns: Vec<String>,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Findings {
    Notice {
        icon: Icon,
        message: String,
    },
    Detected {
        keywords: Option<BadgeGroup>,
        categories: Option<BadgeGroup>,
        technical_details: Option<TechnicalDetails>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub banner: SeverityBanner,
    pub confidence: ConfidenceMeter,
    pub summary: DetectionSummary,
    pub findings: Findings,
}

impl Report {
    pub fn is_empty_state(&self) -> bool {
        matches!(self.findings, Findings::Notice { .. })
    }

    pub fn keyword_badges(&self) -> &[String] {
        match &self.findings {
            Findings::Detected {
                keywords: Some(group),
                ..
            } => &group.badges,
            _ => &[],
        }
    }

    pub fn category_badges(&self) -> &[String] {
        match &self.findings {
            Findings::Detected {
                categories: Some(group),
                ..
            } => &group.badges,
            _ => &[],
        }
    }

    pub fn technical_details(&self) -> Option<&TechnicalDetails> {
        match &self.findings {
            Findings::Detected {
                technical_details, ..
            } => technical_details.as_ref(),
            Findings::Notice { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBanner {
    pub icon: Icon,
    pub message: String,
}

pub fn confidence_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Underscores become spaces and every ASCII word gets an uppercase first letter.
pub fn format_category(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut prev_is_word = false;
    for ch in category.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_is_word = is_word;
    }
    out
}

pub fn render(result: &ClassificationResult) -> Report {
    let percent = confidence_percent(result.confidence_score);

    let banner = if result.is_scam {
        SeverityBanner {
            severity: Severity::Danger,
            icon: Icon::AlertTriangle,
            title: "Potential Scam Detected!".to_string(),
            description: "This message contains patterns commonly found in scam messages."
                .to_string(),
            confidence_percent: percent,
        }
    } else {
        SeverityBanner {
            severity: Severity::Safe,
            icon: Icon::ShieldCheck,
            title: "Message Appears Safe".to_string(),
            description: "No suspicious patterns were detected in this message.".to_string(),
            confidence_percent: percent,
        }
    };

    Report {
        banner,
        confidence: ConfidenceMeter {
            percent,
            band: ConfidenceBand::from_score(result.confidence_score),
        },
        summary: DetectionSummary {
            scam_detected: result.is_scam,
            patterns_found: result.matched_patterns.len(),
            categories_found: result.categories.len(),
        },
        findings: render_findings(result),
    }
}

fn render_findings(result: &ClassificationResult) -> Findings {
    if result.matched_keywords.is_empty() && result.categories.is_empty() {
        return Findings::Notice {
            icon: Icon::Info,
            message: EMPTY_STATE_NOTICE.to_string(),
        };
    }

    let keywords = (!result.matched_keywords.is_empty()).then(|| BadgeGroup {
        heading: "Matched Keywords".to_string(),
        badges: result.matched_keywords.iter().map(|k| escape(k)).collect(),
        caption: format!(
            "{} suspicious keyword(s) found",
            result.matched_keywords.len()
        ),
    });

    let categories = (!result.categories.is_empty()).then(|| BadgeGroup {
        heading: "Scam Categories".to_string(),
        badges: result
            .categories
            .iter()
            .map(|c| escape(&format_category(c)))
            .collect(),
        caption: format!("{} category(ies) identified", result.categories.len()),
    });

    let technical_details = (!result.matched_patterns.is_empty()).then(|| TechnicalDetails {
        icon: Icon::Code,
        patterns: result.matched_patterns.iter().map(|p| escape(p)).collect(),
        collapsed: true,
    });

    Findings::Detected {
        keywords,
        categories,
        technical_details,
    }
}

pub fn render_error(message: &str) -> ErrorBanner {
    ErrorBanner {
        icon: Icon::AlertCircle,
        message: escape(message),
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
