//! Locates the highlight bullets and the per-day spans of generated text.

use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

/// `Day N` at the start of a line, optionally behind markdown heading,
/// emphasis, quote or list markers (`-`, `+`, `•`, `1.`). Whatever follows on
/// the line (a date label, a theme) belongs to the heading.
static DAY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t>#*_+•-]*(?:\d{1,2}[.)][ \t>#*_]*)?day[ \t]+(\d{1,4})\b[^\n]*$")
        .expect("valid day heading regex")
});

static HIGHLIGHTS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t>#*_]*(?:trip[ \t]+)?highlights[ \t*_]*:?[ \t*_]*$")
        .expect("valid highlights heading regex")
});

static BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-•+]|\*(?:\s|$)|\d{1,2}[.)])\s*(.*)$").expect("valid bullet regex")
});

/// Bullet texts under the first highlights heading that has any.
///
/// Blank lines between bullets are skipped; the run ends at the first line
/// that is neither blank nor a bullet.
pub(crate) fn highlight_bullets(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        if !HIGHLIGHTS_HEADING.is_match(line.trim_end()) {
            continue;
        }

        let bullets = collect_bullets(&lines[idx + 1..]);
        if !bullets.is_empty() {
            return bullets;
        }
    }

    Vec::new()
}

fn collect_bullets(lines: &[&str]) -> Vec<String> {
    let mut bullets = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let Some(captures) = BULLET.captures(line) else {
            break;
        };

        let text = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        if !text.is_empty() {
            bullets.push(text.to_string());
        }
    }

    bullets
}

/// Body text for every `Day N` heading found, keyed by day number.
///
/// A span runs from the end of its heading line to the start of the next day
/// heading (or the end of the text). When a day number repeats, the first
/// occurrence wins.
pub(crate) fn day_spans(text: &str) -> HashMap<u32, &str> {
    let headings: Vec<(Option<u32>, usize, usize)> = DAY_HEADING
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let number = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
            Some((number, whole.start(), whole.end()))
        })
        .collect();

    let mut spans = HashMap::new();

    for (idx, (number, _, body_start)) in headings.iter().enumerate() {
        let body_end = headings
            .get(idx + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(text.len());

        if let Some(number) = number {
            spans.entry(*number).or_insert(&text[*body_start..body_end]);
        }
    }

    spans
}
