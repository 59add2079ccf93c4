//! Rule-based intake parser tests
use chrono::NaiveDate;
use taskdeck::{Priority, parse_with_reference};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

#[test]
fn test_all_stages_combine_on_one_input() {
    let parsed = parse_with_reference("Prepare meeting slides tomorrow urgent", reference());
    assert_eq!(parsed.title, "Prepare slides");
    assert_eq!(parsed.priority, Priority::High);
    assert_eq!(parsed.category, "Work");
    assert_eq!(parsed.due_date.as_deref(), Some("2025-07-02"));
}

#[test]
fn test_today_keyword_resolves_to_reference_date() {
    let parsed = parse_with_reference("Submit report today", reference());
    assert_eq!(parsed.title, "Submit report");
    assert_eq!(parsed.due_date.as_deref(), Some("2025-07-01"));
}

#[test]
fn test_french_relative_days_phrase() {
    let parsed = parse_with_reference("Renouveler le passeport dans 30 jours", reference());
    assert_eq!(parsed.title, "Renouveler le passeport");
    assert_eq!(parsed.due_date.as_deref(), Some("2025-07-31"));
}

#[test]
fn test_low_priority_keyword() {
    let parsed = parse_with_reference("Sort old photos low", reference());
    assert_eq!(parsed.title, "Sort old photos");
    assert_eq!(parsed.priority, Priority::Low);
}

#[test]
fn test_learning_category_from_study_keyword() {
    let parsed = parse_with_reference("study for the exam in 5 days", reference());
    assert_eq!(parsed.category, "Learning");
    assert_eq!(parsed.due_date.as_deref(), Some("2025-07-06"));
    assert_eq!(parsed.title, "for the exam");
}

#[test]
fn test_repeated_keyword_is_stripped_everywhere() {
    // One firing rule strips every occurrence of its keyword.
    let parsed = parse_with_reference("urgent call, urgent reply", reference());
    assert_eq!(parsed.priority, Priority::High);
    assert_eq!(parsed.title, "call, reply");
}

#[test]
fn test_no_keywords_yields_untouched_defaults() {
    let parsed = parse_with_reference("Fix the fence", reference());
    assert_eq!(parsed.title, "Fix the fence");
    assert_eq!(parsed.priority, Priority::Medium);
    assert_eq!(parsed.category, "Other");
    assert!(parsed.due_date.is_none());
}
