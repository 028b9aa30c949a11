//! Field extraction for `<Slot>: title – description – $cost – category` lines.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{TimeSlot, TripActivity};

fn slot_label_regex(label: &str) -> Regex {
    // Label, optional "(9am)" style annotation, then a colon. Emphasis
    // markers may wrap either side.
    Regex::new(&format!(
        r"(?i)\b{label}\b[ \t*_]*(?:\([^)\n]*\))?[ \t*_]*:[ \t*_]*([^\n]*)"
    ))
    .expect("valid slot label regex")
}

static MORNING: LazyLock<Regex> = LazyLock::new(|| slot_label_regex("morning"));
static AFTERNOON: LazyLock<Regex> = LazyLock::new(|| slot_label_regex("afternoon"));
static EVENING: LazyLock<Regex> = LazyLock::new(|| slot_label_regex("evening"));

/// En dash, em dash, or a hyphen with whitespace on both sides.
const DELIMITER: &str = r"\s*(?:[–—]|\s--?\s)\s*";

static ACTIVITY_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(?P<title>.+?){d}(?P<description>.+?){d}\$\s*(?P<cost>\d[\d,]*){d}(?P<category>.+?)\s*$",
        d = DELIMITER
    ))
    .expect("valid activity fields regex")
});

static CATEGORY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:category|type)\s*:\s*").expect("valid category prefix regex")
});

fn label_regex(slot: TimeSlot) -> &'static Regex {
    match slot {
        TimeSlot::Morning => &MORNING,
        TimeSlot::Afternoon => &AFTERNOON,
        TimeSlot::Evening => &EVENING,
    }
}

/// First line in `day_text` for `slot` whose fields all parse.
///
/// A slot line with any missing or malformed field does not count as a
/// match; later lines for the same slot are still considered.
pub(crate) fn extract_activity(day_text: &str, slot: TimeSlot) -> Option<TripActivity> {
    label_regex(slot)
        .captures_iter(day_text)
        .filter_map(|captures| captures.get(1))
        .find_map(|rest| parse_fields(slot, rest.as_str()))
}

/// Split the remainder of a slot line into the four activity fields.
pub(crate) fn parse_fields(slot: TimeSlot, line: &str) -> Option<TripActivity> {
    let captures = ACTIVITY_FIELDS.captures(line)?;

    let name = clean_field(&captures["title"]);
    let description = clean_field(&captures["description"]);
    let cost = parse_cost(&captures["cost"])?;
    let category = clean_category(&captures["category"]);

    if name.is_empty() || description.is_empty() || category.is_empty() {
        return None;
    }

    Some(TripActivity {
        time_slot: slot,
        name,
        description,
        category,
        cost,
    })
}

fn parse_cost(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    digits.parse::<u32>().ok()
}

fn clean_field(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '[' | ']' | '"'))
        .trim()
        .to_string()
}

fn clean_category(raw: &str) -> String {
    let cleaned = clean_field(raw);
    let without_prefix = CATEGORY_PREFIX.replace(&cleaned, "");
    clean_field(&without_prefix)
        .trim_end_matches('.')
        .trim()
        .to_string()
}
