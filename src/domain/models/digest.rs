//! Digest rendering for diary issues.
//!
//! Builds the text posted to the notification topic: the issue title, the
//! checklist body with markers rewritten to status glyphs, and one line per
//! comment stamped with the local clock time.

use chrono::{DateTime, Duration, Utc};

use super::diary::{DiaryComment, DiaryIssue};

/// Fixed UTC offset, in hours, emulating the diary's local clock.
///
/// The shift is plain arithmetic on the UTC instant and the shifted value's
/// UTC fields are read back directly. Existing logged output depends on this
/// exact behavior, so no timezone-aware conversion is performed.
pub const LOCAL_OFFSET_HOURS: i64 = 9;

/// Heading placed between the issue body and the comment lines.
const COMMENTS_HEADING: &str = "コメント:";

const PENDING_MARKER: &str = "- [ ]";
const PENDING_GLYPH: &str = "- 🟩";
const DONE_MARKER: &str = "- [x]";
const DONE_GLYPH: &str = "- ✅";

/// Shift an instant onto the diary's local clock.
pub fn to_local(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant + Duration::hours(LOCAL_OFFSET_HOURS)
}

/// Render a creation instant as a zero-padded local `HH:MM:SS`.
pub fn clock_stamp(created_at: DateTime<Utc>) -> String {
    to_local(created_at).format("%H:%M:%S").to_string()
}

/// Rewrite checklist markers into status glyphs.
///
/// Matching is per line, case-sensitive, and anchored to the line start.
/// Mid-line occurrences of the marker text pass through untouched.
pub fn transform_checklist(body: &str) -> String {
    body.split('\n')
        .map(transform_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn transform_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix(PENDING_MARKER) {
        format!("{PENDING_GLYPH}{rest}")
    } else if let Some(rest) = line.strip_prefix(DONE_MARKER) {
        format!("{DONE_GLYPH}{rest}")
    } else {
        line.to_string()
    }
}

/// Render one digest line for a comment.
///
/// The `(@handle)` suffix appears only when the author differs from the
/// configured assignee; with no assignee configured, every handle is shown.
/// An empty comment body leaves the line ending at the separator space.
pub fn comment_line(comment: &DiaryComment, assignee: Option<&str>) -> String {
    let stamp = clock_stamp(comment.created_at);
    if assignee == Some(comment.author.as_str()) {
        format!("{stamp} {}", comment.body)
    } else {
        format!("{stamp} (@{}) {}", comment.author, comment.body)
    }
}

/// Render the full digest for one issue.
pub fn render_digest(
    issue: &DiaryIssue,
    comments: &[DiaryComment],
    assignee: Option<&str>,
) -> String {
    let lines: Vec<String> = comments
        .iter()
        .map(|comment| comment_line(comment, assignee))
        .collect();

    format!(
        "{}\n{}\n{COMMENTS_HEADING}\n{}\n",
        issue.title,
        transform_checklist(&issue.body),
        lines.join("\n")
    )
}

/// Title of the next diary entry: the local calendar date `offset_days`
/// after `now`, formatted as `YYYY-MM-DD`.
pub fn next_entry_title(now: DateTime<Utc>, offset_days: i64) -> String {
    (to_local(now) + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}
