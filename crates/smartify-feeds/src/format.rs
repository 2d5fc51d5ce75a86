//! Renders feed entries into the HTML lists sent to Telegram.
//!
//! Both formatters return an empty string for empty input — digest assembly
//! relies on that to decide whether a section exists at all.

use crate::types::{JobPosting, ToolEntry};

/// Escape the characters Telegram's HTML parse mode treats specially.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Numbered job list: `1. <a href="...">Title</a> — Company (Location)`.
pub fn format_jobs(jobs: &[JobPosting]) -> String {
    jobs.iter()
        .enumerate()
        .map(|(i, job)| {
            let title = escape_html(&job.title);
            let mut line = if job.url.is_empty() {
                format!("{}. <b>{}</b>", i + 1, title)
            } else {
                format!("{}. <a href=\"{}\">{}</a>", i + 1, job.url, title)
            };
            if !job.company.is_empty() {
                line.push_str(&format!(" — {}", escape_html(&job.company)));
            }
            if !job.location.is_empty() {
                line.push_str(&format!(" ({})", escape_html(&job.location)));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Numbered tool list: `1. <a href="...">Name</a> — blurb`.
pub fn format_tools(tools: &[ToolEntry]) -> String {
    tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let name = escape_html(&tool.name);
            let mut line = if tool.url.is_empty() {
                format!("{}. <b>{}</b>", i + 1, name)
            } else {
                format!("{}. <a href=\"{}\">{}</a>", i + 1, tool.url, name)
            };
            if !tool.blurb.is_empty() {
                line.push_str(&format!(" — {}", escape_html(&tool.blurb)));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
