//! Plain-text and JSON renderers. Everything returns a `String`; printing is
//! left to the caller.
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use radar_core::export;
use radar_core::{CommentTermsResult, TermTotals, Video};
use regex::{Captures, Regex};
use unicode_width::UnicodeWidthStr;

pub const TITLE_WIDTH: usize = 60;
pub const SAMPLE_WIDTH: usize = 200;
/// Results whose samples are printed under the table.
pub const SAMPLED_RESULTS: usize = 5;

pub const NO_RESULTS: &str = "No results.";
pub const NO_MATCHES: &str = "No keyword matches found in fetched comments.";

static UNICODE_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\u([0-9a-fA-F]{4})|\\U([0-9a-fA-F]{8})").expect("static regex")
});

pub fn videos_table(videos: &[Video]) -> String {
    if videos.is_empty() {
        return format!("{NO_RESULTS}\n");
    }
    let rows: Vec<Vec<String>> = videos
        .iter()
        .enumerate()
        .map(|(i, v)| {
            vec![
                (i + 1).to_string(),
                truncate(&v.title, TITLE_WIDTH),
                thousands(v.view_count),
                thousands(v.comment_count),
                v.url(),
            ]
        })
        .collect();
    table(&["#", "title", "views", "comments", "url"], &rows)
}

/// Same records as the export file, without comment analysis.
pub fn videos_json(videos: &[Video]) -> serde_json::Result<String> {
    export::to_json_pretty(&export::records(videos, &HashMap::new()))
}

/// Result table, then up to `samples_to_show` samples (0 shows all) for the
/// leading results.
pub fn comment_terms_table(results: &[CommentTermsResult], samples_to_show: usize) -> String {
    if results.is_empty() {
        return format!("{NO_MATCHES}\n");
    }
    let rows: Vec<Vec<String>> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.total_term_hits.to_string(),
                r.matched_comments.to_string(),
                truncate(&r.video.title, TITLE_WIDTH),
                r.video.url(),
            ]
        })
        .collect();
    let mut out = table(&["#", "hits", "matched_comments", "title", "url"], &rows);

    for r in results.iter().take(SAMPLED_RESULTS) {
        let _ = write!(out, "\n---\n{}\n", r.video.title);
        let shown = match samples_to_show {
            0 => r.samples.len(),
            n => n,
        };
        if r.samples.is_empty() {
            out.push_str("(No samples captured.)\n");
        }
        for sample in r.samples.iter().take(shown) {
            let _ = writeln!(out, "- {}", sample_line(sample));
        }
    }
    out
}

/// Unique-comment counts per term, highest first. Empty when nothing matched.
pub fn term_totals(totals: &TermTotals) -> String {
    let ranked = totals.ranked();
    if ranked.is_empty() {
        return String::new();
    }
    let width = ranked.iter().map(|(t, _)| t.width()).max().unwrap_or(0);
    let mut out = String::from("Term totals (unique comments):\n");
    for (term, n) in ranked {
        let pad = width - term.width();
        let _ = writeln!(out, "  {term}{}  {}", " ".repeat(pad), thousands(n as u64));
    }
    out
}

/// Left-aligned columns separated by ` | `, padded by display width.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(&fmt_row(headers.iter().copied(), &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&fmt_row(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn fmt_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, w)| format!("{cell}{}", " ".repeat(w.saturating_sub(cell.width()))))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}

/// `1234567` -> `1,234,567`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Trimmed text of at most `max` characters, the last one an ellipsis when
/// cut.
pub fn truncate(text: &str, max: usize) -> String {
    let t = text.trim();
    if t.chars().count() <= max {
        return t.to_string();
    }
    let mut cut: String = t.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Decoded, trimmed, and cut to [`SAMPLE_WIDTH`] characters.
pub fn sample_line(sample: &str) -> String {
    let decoded = decode_unicode_escapes(sample);
    let t = decoded.trim();
    if t.chars().count() <= SAMPLE_WIDTH {
        return t.to_string();
    }
    let mut cut: String = t.chars().take(SAMPLE_WIDTH).collect();
    cut.push('…');
    cut
}

/// Replace literal `\uXXXX` / `\UXXXXXXXX` sequences with the character they
/// name. Invalid code points are left untouched.
pub fn decode_unicode_escapes(s: &str) -> Cow<'_, str> {
    UNICODE_ESCAPE.replace_all(s, |caps: &Captures<'_>| {
        let hex = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    })
}
