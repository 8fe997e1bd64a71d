//! HTML rendering of the plain-text summary
//!
//! The summary is line-oriented Hebrew text: `label: value` rows between
//! dashed separators. The HTML part keeps that shape — separators become
//! rules, labels become bold, and the whole body is wrapped in an RTL
//! container.

use once_cell::sync::Lazy;
use regex::Regex;

/// Divider line used by the summary formatter
const SEPARATOR: &str = "--------------------------------";

static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?):").unwrap());

/// Render the plain-text summary as an HTML email body
pub fn render_html(body: &str) -> String {
    let lines: Vec<String> = body
        .lines()
        .map(|line| {
            if line == SEPARATOR {
                "<hr>".to_string()
            } else {
                LABEL_RE.replace(line, "<strong>$1:</strong>").into_owned()
            }
        })
        .collect();

    format!(
        "<div dir=\"rtl\" style=\"font-family: Arial, sans-serif;\">\n{}\n</div>",
        lines.join("<br>")
    )
}
