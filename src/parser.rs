//! Deterministic rule-based task parser.
//!
//! Extracts a due date, a priority, and a category from free text, stripping
//! each matched token from the working title as it goes. This is the fallback
//! path when no inference capability is configured or the remote call fails,
//! so it must be total: every input produces a well-formed result.
//!
//! Keyword sets cover English and French synonyms.

use chrono::{Duration, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::model::Priority;

/// Structured fields extracted from a raw task input.
///
/// Transient: feeds task construction and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTaskData {
    pub title: String,
    pub priority: Priority,
    pub category: String,
    pub due_date: Option<String>,
    #[serde(default)]
    pub notes: String,
}

// Relative-day phrase, with an optional "scheduled"/"prévu" prefix that is
// stripped along with the rest of the match.
static RELATIVE_DAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:(?:scheduled|prévu)\s+)?(?:in|dans)\s+(\d+)\s+(?:days?|jours?)\b")
        .expect("relative-days pattern")
});
static TOMORROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:tomorrow|demain)\b").expect("tomorrow pattern"));
static TODAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:today|aujourd'hui)\b").expect("today pattern"));

static HIGH_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:urgent|high|important|haute|fort)\b").expect("high-priority pattern")
});
static LOW_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:low|trivial|basse|faible)\b").expect("low-priority pattern")
});

// Category keyword sets, checked in fixed order; first match wins.
static CATEGORIES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"(?i)\b(?:work|boulot|travail|job|meeting|reunion|projet)\b")
                .expect("work pattern"),
            "Work",
        ),
        (
            Regex::new(r"(?i)\b(?:personal|perso|home|maison|achat|shopping)\b")
                .expect("personal pattern"),
            "Personal",
        ),
        (
            Regex::new(r"(?i)\b(?:health|santé|sante|sport|gym|doctor|medecin|rdv)\b")
                .expect("health pattern"),
            "Health",
        ),
        (
            Regex::new(r"(?i)\b(?:learn|study|apprendre|cours|ecole|école|read|lire)\b")
                .expect("learning pattern"),
            "Learning",
        ),
    ]
});

/// Parse a raw task input against today's local date.
pub fn parse(raw: &str) -> ParsedTaskData {
    parse_with_reference(raw, Local::now().date_naive())
}

/// Parse a raw task input against an explicit reference date.
///
/// Stages run in fixed order: date extraction, priority extraction, category
/// extraction, title cleanup. Each successful match strips its tokens from
/// the working title with a single global replace before the next stage.
pub fn parse_with_reference(raw: &str, today: NaiveDate) -> ParsedTaskData {
    let mut title = raw.to_string();

    // 1. Date extraction: only the first firing rule consumes its phrase. A
    // day count the capture cannot parse leaves the relative rule unfired, so
    // the remaining rules still get their turn. A count that parses but lands
    // outside the representable date range consumes the phrase and yields no
    // date; the result must stay total for any input.
    let mut due_date = None;
    let relative_days = RELATIVE_DAYS
        .captures(&title)
        .and_then(|caps| caps[1].parse::<i64>().ok());
    if let Some(days) = relative_days {
        due_date = Duration::try_days(days)
            .and_then(|delta| today.checked_add_signed(delta))
            .map(format_date);
        title = RELATIVE_DAYS.replace_all(&title, " ").into_owned();
    } else if TOMORROW.is_match(&title) {
        due_date = today.succ_opt().map(format_date);
        title = TOMORROW.replace_all(&title, " ").into_owned();
    } else if TODAY.is_match(&title) {
        due_date = Some(format_date(today));
        title = TODAY.replace_all(&title, " ").into_owned();
    }

    // 2. Priority extraction: high keywords shadow low keywords.
    let mut priority = Priority::Medium;
    if HIGH_PRIORITY.is_match(&title) {
        priority = Priority::High;
        title = HIGH_PRIORITY.replace_all(&title, " ").into_owned();
    } else if LOW_PRIORITY.is_match(&title) {
        priority = Priority::Low;
        title = LOW_PRIORITY.replace_all(&title, " ").into_owned();
    }

    // 3. Category extraction: fixed order, first match wins.
    let mut category = "Other";
    for (pattern, name) in CATEGORIES.iter() {
        if pattern.is_match(&title) {
            category = name;
            title = pattern.replace_all(&title, " ").into_owned();
            break;
        }
    }

    // 4. Title cleanup: collapse whitespace; an empty result reverts to the
    // raw input so the title is never blank.
    let cleaned = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let title = if cleaned.is_empty() {
        raw.to_string()
    } else {
        cleaned
    };

    ParsedTaskData {
        title,
        priority,
        category: category.to_string(),
        due_date,
        notes: String::new(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
