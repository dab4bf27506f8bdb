//! Terminal rendering of validation results.

use crate::client::HtmlReport;
use owo_colors::OwoColorize;
use std::fmt::Write;
use webcheck_common::{CssValidationResult, HtmlMessage, HtmlMessageKind};

/// Aggregated counts over a batch of pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTotals {
    pub pages: usize,
    pub errors: u64,
    pub warnings: u64,
    pub infos: u64,
    /// Pages the daemon could not validate at all
    pub failed: usize,
}

impl BatchTotals {
    pub fn has_errors(&self) -> bool {
        self.errors > 0 || self.failed > 0
    }

    pub fn merge(self, other: BatchTotals) -> BatchTotals {
        BatchTotals {
            pages: self.pages + other.pages,
            errors: self.errors + other.errors,
            warnings: self.warnings + other.warnings,
            infos: self.infos + other.infos,
            failed: self.failed + other.failed,
        }
    }
}

pub fn html_totals(reports: &[HtmlReport]) -> BatchTotals {
    reports
        .iter()
        .fold(BatchTotals::default(), |mut acc, report| {
            acc.pages += 1;
            match report {
                HtmlReport::Validated(result) => {
                    let counts = result.counts();
                    acc.errors += counts.errors as u64;
                    acc.infos += counts.infos as u64;
                }
                HtmlReport::Failed { .. } => acc.failed += 1,
            }
            acc
        })
}

pub fn css_totals(results: &[CssValidationResult]) -> BatchTotals {
    results
        .iter()
        .fold(BatchTotals::default(), |mut acc, result| {
            acc.pages += 1;
            acc.errors += result.summary.error_count;
            acc.warnings += result.summary.warning_count;
            acc
        })
}

fn html_message_line(msg: &HtmlMessage) -> String {
    let label = match (msg.kind, msg.sub_kind.as_deref()) {
        (HtmlMessageKind::Error, _) => "error".red().bold().to_string(),
        (HtmlMessageKind::NonDocumentError, _) => "fatal".red().bold().to_string(),
        (HtmlMessageKind::Info, Some("warning")) => "warning".yellow().bold().to_string(),
        (HtmlMessageKind::Info, _) => "info".blue().bold().to_string(),
    };

    match msg.extra.get("lastLine").and_then(|v| v.as_u64()) {
        Some(line) => format!("  {} {} (line {})", label, msg.text, line),
        None => format!("  {} {}", label, msg.text),
    }
}

/// Render one page's HTML report
pub fn render_html_report(report: &HtmlReport) -> String {
    let mut out = String::new();

    match report {
        HtmlReport::Validated(result) => {
            let counts = result.counts();
            let mut header = result.url.bold().to_string();
            if counts.errors > 0 {
                let _ = write!(header, "  {}", format!("✗ {}", counts.errors).red());
            }
            if counts.infos > 0 {
                let _ = write!(header, "  {}", format!("ℹ {}", counts.infos).blue());
            }
            let _ = writeln!(out, "{}", header);

            if result.messages.is_empty() {
                let _ = writeln!(out, "  {}", "✓ No errors found".green());
            }
            for msg in &result.messages {
                let _ = writeln!(out, "{}", html_message_line(msg));
            }
        }
        HtmlReport::Failed { url, error } => {
            let _ = writeln!(out, "{}", url.bold());
            let _ = writeln!(
                out,
                "  {} {}",
                "✗ Could not validate this page:".red(),
                error
            );
        }
    }

    out
}

/// Render one page's CSS result
pub fn render_css_result(result: &CssValidationResult) -> String {
    let mut out = String::new();

    let mut header = result.url.bold().to_string();
    if result.summary.error_count > 0 {
        let _ = write!(
            header,
            "  {}",
            format!("✗ {}", result.summary.error_count).red()
        );
    }
    if result.summary.warning_count > 0 {
        let _ = write!(
            header,
            "  {}",
            format!("⚠ {}", result.summary.warning_count).yellow()
        );
    }
    let _ = writeln!(out, "{}", header);

    for issue in &result.errors {
        let _ = writeln!(out, "  {} {} {}", "✗".red(), issue.message, issue.source.dimmed());
    }
    for issue in &result.warnings {
        let _ = writeln!(out, "  {} {} {}", "⚠".yellow(), issue.message, issue.source.dimmed());
    }
    if result.errors.is_empty() && result.warnings.is_empty() {
        let _ = writeln!(out, "  {}", "✓ No errors found".green());
    }

    out
}

/// One-line batch summary
pub fn render_totals(title: &str, totals: &BatchTotals) -> String {
    let mut line = format!(
        "{}: {} pages, {} errors, {} warnings, {} infos",
        title, totals.pages, totals.errors, totals.warnings, totals.infos
    );
    if totals.failed > 0 {
        let _ = write!(line, ", {} not validated", totals.failed);
    }

    if totals.has_errors() {
        line.red().bold().to_string()
    } else {
        line.green().bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webcheck_common::{CssIssue, CssSummary, HtmlValidationResult};

    fn html_result(messages: Vec<HtmlMessage>) -> HtmlReport {
        HtmlReport::Validated(HtmlValidationResult {
            url: "https://a.test/".to_string(),
            messages,
        })
    }

    #[test]
    fn test_html_totals() {
        let reports = vec![
            html_result(vec![
                HtmlMessage::new(HtmlMessageKind::Error, "a"),
                HtmlMessage::new(HtmlMessageKind::NonDocumentError, "b"),
                HtmlMessage::new(HtmlMessageKind::Info, "c"),
            ]),
            html_result(vec![]),
            HtmlReport::Failed {
                url: "https://a.test/x".to_string(),
                error: "Failed to validate URL".to_string(),
            },
        ];

        let totals = html_totals(&reports);
        assert_eq!(totals.pages, 3);
        assert_eq!(totals.errors, 2);
        assert_eq!(totals.infos, 1);
        assert_eq!(totals.failed, 1);
        assert!(totals.has_errors());
    }

    #[test]
    fn test_empty_batch_totals() {
        assert_eq!(html_totals(&[]), BatchTotals::default());
        assert_eq!(css_totals(&[]), BatchTotals::default());
        assert!(!BatchTotals::default().has_errors());
    }

    #[test]
    fn test_css_totals_use_summary() {
        let result = CssValidationResult {
            url: "https://a.test/".to_string(),
            summary: CssSummary {
                error_count: 12,
                warning_count: 3,
            },
            errors: vec![CssIssue::new("Parse Error", "a.css")],
            warnings: vec![],
        };
        let totals = css_totals(&[result]);
        assert_eq!(totals.errors, 12);
        assert_eq!(totals.warnings, 3);
    }

    #[test]
    fn test_render_clean_html() {
        let out = render_html_report(&html_result(vec![]));
        assert!(out.contains("https://a.test/"));
        assert!(out.contains("No errors found"));
    }

    #[test]
    fn test_render_failed_html_uses_fallback() {
        let out = render_html_report(&HtmlReport::Failed {
            url: "https://a.test/x".to_string(),
            error: "Failed to validate URL".to_string(),
        });
        assert!(out.contains("Could not validate this page"));
        assert!(out.contains("Failed to validate URL"));
        assert!(!out.contains("No errors found"));
    }

    #[test]
    fn test_render_css_issues() {
        let result = CssValidationResult::synthetic_failure(
            "https://a.test/",
            "CSS validator returned status 503",
        );
        let out = render_css_result(&result);
        assert!(out.contains("CSS validator returned status 503"));
        assert!(!out.contains("No errors found"));
    }

    #[test]
    fn test_merge_totals() {
        let a = BatchTotals { pages: 1, errors: 2, warnings: 0, infos: 1, failed: 0 };
        let b = BatchTotals { pages: 2, errors: 0, warnings: 4, infos: 0, failed: 1 };
        assert_eq!(
            a.merge(b),
            BatchTotals { pages: 3, errors: 2, warnings: 4, infos: 1, failed: 1 }
        );
    }
}
