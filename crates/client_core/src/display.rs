//! Presentation seams: report backends, the display surface, and icon glyphs.

use std::fmt::Write as _;

use crate::report::{
    BadgeGroup, ConfidenceBand, ErrorBanner, Findings, Icon, Report, Severity, TechnicalDetails,
};
use crate::samples::SampleMessage;
use crate::sanitize::unescape;

/// Turns a structured [`Report`] into output for one kind of surface.
pub trait ReportBackend: Send {
    fn render_report(&self, report: &Report) -> String;
    fn render_error(&self, banner: &ErrorBanner) -> String;
}

/// Where rendered output and control state land.
pub trait DisplaySurface: Send {
    fn set_controls_enabled(&mut self, enabled: bool);
    fn set_loading(&mut self, loading: bool);
    fn set_input(&mut self, text: &str);
    /// Input loaded from a sample rather than typed. Surfaces that do not
    /// show the input field may announce it here.
    fn show_sample(&mut self, _label: &str, text: &str) {
        self.set_input(text);
    }
    fn write_output(&mut self, content: String);
    fn clear_output(&mut self);
    fn output(&self) -> Option<&str>;
    /// Makes written output visible. Retained surfaces paint here.
    fn flush(&mut self) {}
}

/// Replaces icon placeholders with glyphs. Must be idempotent.
pub trait GlyphRenderer: Send {
    fn replace(&self, content: &str) -> String;
}

pub struct NoGlyphs;

impl GlyphRenderer for NoGlyphs {
    fn replace(&self, content: &str) -> String {
        content.to_string()
    }
}

pub fn icon_placeholder(icon: Icon) -> String {
    format!("{{icon:{}}}", icon.name())
}

/// Maps `{icon:NAME}` placeholders to terminal symbols.
pub struct UnicodeGlyphs;

impl UnicodeGlyphs {
    fn glyph(icon: Icon) -> &'static str {
        match icon {
            Icon::AlertTriangle => "\u{26a0}",
            Icon::ShieldCheck => "\u{2714}",
            Icon::Info => "\u{2139}",
            Icon::Code => "\u{2630}",
            Icon::AlertCircle => "\u{2716}",
        }
    }
}

impl GlyphRenderer for UnicodeGlyphs {
    fn replace(&self, content: &str) -> String {
        Icon::ALL.iter().fold(content.to_string(), |acc, icon| {
            acc.replace(&icon_placeholder(*icon), Self::glyph(*icon))
        })
    }
}

/// Markup mirroring the web front end's classes, with feather icon tags.
pub struct HtmlBackend;

impl HtmlBackend {
    fn icon(icon: Icon, class: &str) -> String {
        format!(r#"<i data-feather="{}" class="{class}"></i>"#, icon.name())
    }

    fn band_class(band: ConfidenceBand) -> &'static str {
        match band {
            ConfidenceBand::Low => "confidence-low",
            ConfidenceBand::Medium => "confidence-medium",
            ConfidenceBand::High => "confidence-high",
        }
    }

    fn badge_group(out: &mut String, group: &BadgeGroup, badge_class: &str) {
        let _ = write!(
            out,
            r#"<div class="col-md-6 mb-3"><h6>{}</h6><div class="mb-2">"#,
            group.heading
        );
        for badge in &group.badges {
            let _ = write!(out, r#"<span class="{badge_class}">{badge}</span>"#);
        }
        let _ = write!(
            out,
            r#"</div><small class="text-muted">{}</small></div>"#,
            group.caption
        );
    }

    fn technical_details(out: &mut String, details: &TechnicalDetails) {
        let button_class = if details.collapsed {
            "accordion-button collapsed"
        } else {
            "accordion-button"
        };
        let body_class = if details.collapsed {
            "accordion-collapse collapse"
        } else {
            "accordion-collapse collapse show"
        };
        let _ = write!(
            out,
            r##"<div class="mt-3"><div class="accordion" id="technicalDetails"><div class="accordion-item"><h2 class="accordion-header"><button class="{button_class}" type="button" data-bs-toggle="collapse" data-bs-target="#technicalDetailsBody">{}Technical Details</button></h2><div id="technicalDetailsBody" class="{body_class}" data-bs-parent="#technicalDetails"><div class="accordion-body"><h6>Matched Patterns</h6><ul class="list-group list-group-flush">"##,
            Self::icon(details.icon, "me-2"),
        );
        for pattern in &details.patterns {
            let _ = write!(
                out,
                r#"<li class="list-group-item"><code>{pattern}</code></li>"#
            );
        }
        out.push_str("</ul></div></div></div></div></div>");
    }
}

impl ReportBackend for HtmlBackend {
    fn render_report(&self, report: &Report) -> String {
        let banner = &report.banner;
        let (alert_class, badge_class) = match banner.severity {
            Severity::Danger => ("alert-scam", "bg-danger"),
            Severity::Safe => ("alert-safe", "bg-success"),
        };

        let mut out = String::from(r#"<div class="result-enter">"#);
        let _ = write!(
            out,
            r#"<div class="alert {alert_class} d-flex align-items-center mb-4">{}<div class="flex-grow-1"><h5 class="alert-heading mb-1">{}</h5><p class="mb-0">{}</p></div><div class="text-end"><div class="badge result-badge {badge_class}">{}</div></div></div>"#,
            Self::icon(banner.icon, "me-3"),
            banner.title,
            banner.description,
            banner.confidence_label(),
        );

        let summary = &report.summary;
        let _ = write!(
            out,
            r#"<div class="row mb-4"><div class="col-md-6"><h6>Confidence Score</h6><div class="confidence-bar mb-2"><div class="confidence-fill {}" style="width: {}%"></div></div><small class="text-muted">{}% confidence</small></div><div class="col-md-6"><h6>Detection Summary</h6><ul class="list-unstyled mb-0"><li><strong>Scam Status:</strong> {}</li><li><strong>Patterns Found:</strong> {}</li><li><strong>Categories:</strong> {}</li></ul></div></div>"#,
            Self::band_class(report.confidence.band),
            report.confidence.percent,
            report.confidence.percent,
            if summary.scam_detected {
                "Detected"
            } else {
                "Not Detected"
            },
            summary.patterns_found,
            summary.categories_found,
        );

        match &report.findings {
            Findings::Notice { icon, message } => {
                let _ = write!(
                    out,
                    r#"<div class="alert alert-info">{}{message}</div>"#,
                    Self::icon(*icon, "me-2"),
                );
            }
            Findings::Detected {
                keywords,
                categories,
                technical_details,
            } => {
                out.push_str(r#"<div class="row">"#);
                if let Some(group) = keywords {
                    Self::badge_group(&mut out, group, "keyword-badge");
                }
                if let Some(group) = categories {
                    Self::badge_group(&mut out, group, "category-badge");
                }
                out.push_str("</div>");
                if let Some(details) = technical_details {
                    Self::technical_details(&mut out, details);
                }
            }
        }

        out.push_str("</div>");
        out
    }

    fn render_error(&self, banner: &ErrorBanner) -> String {
        format!(
            r#"<div class="alert alert-danger d-flex align-items-center">{}<div><strong>Error:</strong> {}</div></div>"#,
            Self::icon(banner.icon, "me-3"),
            banner.message
        )
    }
}

const METER_CELLS: usize = 20;

/// Plain text for terminals. Escaped fields are decoded back for display.
pub struct TextBackend {
    pub expand_details: bool,
}

impl TextBackend {
    fn meter(percent: u8) -> String {
        let filled = (usize::from(percent) * METER_CELLS + 50) / 100;
        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(METER_CELLS - filled)
        )
    }

    fn badge_group(out: &mut String, group: &BadgeGroup) {
        let badges = group
            .badges
            .iter()
            .map(|badge| format!("[{}]", unescape(badge)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{}: {badges}", group.heading);
        let _ = writeln!(out, "  {}", group.caption);
    }
}

impl ReportBackend for TextBackend {
    fn render_report(&self, report: &Report) -> String {
        let banner = &report.banner;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}  ({})",
            icon_placeholder(banner.icon),
            banner.title,
            banner.confidence_label()
        );
        let _ = writeln!(out, "{}", banner.description);
        out.push('\n');

        let _ = writeln!(
            out,
            "Confidence Score: {} {}% ({})",
            Self::meter(report.confidence.percent),
            report.confidence.percent,
            report.confidence.band.label()
        );
        let summary = &report.summary;
        let _ = writeln!(
            out,
            "Detection Summary: Scam Status: {} | Patterns Found: {} | Categories: {}",
            if summary.scam_detected {
                "Detected"
            } else {
                "Not Detected"
            },
            summary.patterns_found,
            summary.categories_found
        );
        out.push('\n');

        match &report.findings {
            Findings::Notice { icon, message } => {
                let _ = writeln!(out, "{} {message}", icon_placeholder(*icon));
            }
            Findings::Detected {
                keywords,
                categories,
                technical_details,
            } => {
                if let Some(group) = keywords {
                    Self::badge_group(&mut out, group);
                }
                if let Some(group) = categories {
                    Self::badge_group(&mut out, group);
                }
                if let Some(details) = technical_details {
                    let count = details.patterns.len();
                    if details.collapsed && !self.expand_details {
                        let _ = writeln!(
                            out,
                            "{} Technical Details: {count} matched pattern(s) (collapsed)",
                            icon_placeholder(details.icon)
                        );
                    } else {
                        let _ = writeln!(
                            out,
                            "{} Technical Details: {count} matched pattern(s)",
                            icon_placeholder(details.icon)
                        );
                        for pattern in &details.patterns {
                            let _ = writeln!(out, "  - {}", unescape(pattern));
                        }
                    }
                }
            }
        }
        out
    }

    fn render_error(&self, banner: &ErrorBanner) -> String {
        format!(
            "{} Error: {}\n",
            icon_placeholder(banner.icon),
            unescape(&banner.message)
        )
    }
}

/// Bundles a backend, a glyph renderer and a surface.
pub struct Presenter {
    backend: Box<dyn ReportBackend>,
    glyphs: Box<dyn GlyphRenderer>,
    surface: Box<dyn DisplaySurface>,
}

impl Presenter {
    pub fn new(
        backend: Box<dyn ReportBackend>,
        glyphs: Box<dyn GlyphRenderer>,
        surface: Box<dyn DisplaySurface>,
    ) -> Self {
        Self {
            backend,
            glyphs,
            surface,
        }
    }

    pub fn surface(&self) -> &dyn DisplaySurface {
        self.surface.as_ref()
    }

    pub fn begin_loading(&mut self) {
        self.surface.set_controls_enabled(false);
        self.surface.clear_output();
        self.surface.set_loading(true);
    }

    pub fn end_loading(&mut self) {
        self.surface.set_loading(false);
        self.surface.set_controls_enabled(true);
    }

    pub fn enable_controls(&mut self) {
        self.surface.set_controls_enabled(true);
    }

    pub fn show_input(&mut self, text: &str) {
        self.surface.set_input(text);
    }

    pub fn show_sample(&mut self, sample: &SampleMessage) {
        self.surface.show_sample(sample.label, sample.text);
    }

    pub fn show_report(&mut self, report: &Report) {
        let content = self.backend.render_report(report);
        self.present(content);
    }

    pub fn show_error(&mut self, banner: &ErrorBanner) {
        let content = self.backend.render_error(banner);
        self.present(content);
    }

    pub fn reset(&mut self) {
        self.surface.clear_output();
        self.surface.set_input("");
        self.surface.set_controls_enabled(true);
    }

    fn present(&mut self, content: String) {
        self.surface.write_output(content);
        self.refresh_glyphs();
        self.surface.flush();
    }

    fn refresh_glyphs(&mut self) {
        let replaced = match self.surface.output() {
            Some(current) => {
                let replaced = self.glyphs.replace(current);
                (replaced != current).then_some(replaced)
            }
            None => None,
        };
        if let Some(replaced) = replaced {
            self.surface.write_output(replaced);
        }
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
