// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

#[test]
fn comment_with_signature_is_split() {
    let comment = Comment::parse("Great work (Jane Doe - Jan 5, 2021)");

    assert_eq!(comment.author.as_deref(), Some("Jane Doe"));
    assert_eq!(
        comment.created_at,
        Some(Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).unwrap())
    );
    assert_eq!(comment.text, "Great work ");
}

#[test]
fn comment_without_signature_keeps_full_text() {
    let comment = Comment::parse("Just a plain comment");

    assert_eq!(comment.author, None);
    assert_eq!(comment.created_at, None);
    assert_eq!(comment.text, "Just a plain comment");
}

#[parameterized(
    signature_not_at_end = { "(Jane Doe - Jan 5, 2021) and more" },
    nested_parens_in_name = { "hi (Jane (JD) Doe - Jan 5, 2021)" },
    numeric_month = { "hi (Jane Doe - 01 5, 2021)" },
    unknown_month_name = { "hi (Jane Doe - Foo 5, 2021)" },
    impossible_day = { "hi (Jane Doe - Feb 30, 2021)" },
    missing_separator = { "hi (Jane Doe Jan 5, 2021)" },
)]
fn comment_signature_must_match_exactly(cell: &str) {
    let comment = Comment::parse(cell);

    assert_eq!(comment.author, None);
    assert_eq!(comment.created_at, None);
    assert_eq!(comment.text, cell);
}

#[test]
fn comment_multiline_body_keeps_newlines() {
    let comment = Comment::parse("line one\nline two (Amy Bath - Oct 24, 2018)");

    assert_eq!(comment.author.as_deref(), Some("Amy Bath"));
    assert_eq!(comment.text, "line one\nline two ");
}

#[test]
fn comment_only_signature_yields_empty_text() {
    let comment = Comment::parse("(Amy Bath - Oct 24, 2018)");

    assert_eq!(comment.author.as_deref(), Some("Amy Bath"));
    assert_eq!(comment.text, "");
}

#[test]
fn story_record_new_has_empty_collections() {
    let created = Utc.with_ymd_and_hms(2018, 10, 24, 0, 0, 0).unwrap();
    let story = StoryRecord::new("161580207", created);

    assert_eq!(story.id, "161580207");
    assert_eq!(story.created_at, created);
    assert!(story.owners.is_empty());
    assert!(story.comments.is_empty());
    assert!(story.attachments.is_none());
}
