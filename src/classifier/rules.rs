//! Classification rules
//!
//! First match wins, in this order:
//! 1. Denylist keyword anywhere in the text -> Forbidden
//! 2. Leading verb does not match the declared intent -> WrongIntent
//! 3. No whole-word reference to the permitted table -> OutOfScope
//! 4. Approved
//!
//! The denylist runs before everything else so a well-formed SELECT that
//! smuggles a forbidden keyword (subquery, comment) is still rejected.

use std::sync::LazyLock;

use regex::Regex;

/// The only table statements may read from or insert into.
pub const PERMITTED_TABLE: &str = "patient";

/// Mutating/administrative keywords that are never allowed, whole-word,
/// case-insensitive, regardless of declared intent.
static FORBIDDEN_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(update|delete|drop|alter|truncate|grant|revoke|attach|detach|pragma)\b")
        .expect("forbidden-keyword pattern is valid")
});

/// Read channel: statement must open with `select`.
static READ_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*select\b").expect("read-shape pattern is valid"));

/// Write channel: statement must open with `insert`.
static WRITE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*insert\b").expect("write-shape pattern is valid"));

/// Whole-word reference to the permitted table.
static TABLE_SCOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{}\b", PERMITTED_TABLE)).expect("table-scope pattern is valid")
});

/// Which transport channel a statement arrived on.
///
/// The channel constrains the SQL verb: the read channel (GET path
/// segment) only admits SELECT, the write channel (POST body) only
/// admits INSERT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Submitted via the read channel.
    Read,
    /// Submitted via the write channel.
    Write,
}

/// Outcome of classifying one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Contains a denylisted keyword; never executed.
    Forbidden,
    /// Leading verb does not match the channel the statement arrived on.
    WrongIntent,
    /// Does not reference the permitted table.
    OutOfScope,
    /// Safe to hand to the execution adapter.
    Approved,
}

/// Classifies a statement against the gate rules.
///
/// Matching is pattern-based, not a SQL parse: a denylisted keyword
/// appearing inside a string literal over-rejects, and obfuscation the
/// word-boundary patterns cannot see under-rejects. This is a documented
/// limitation of the gate, not an oversight.
///
/// Empty or whitespace-only text matches neither verb shape and yields
/// [`Classification::WrongIntent`].
pub fn classify(text: &str, intent: Intent) -> Classification {
    if FORBIDDEN_KEYWORDS.is_match(text) {
        return Classification::Forbidden;
    }

    let shape = match intent {
        Intent::Read => &*READ_SHAPE,
        Intent::Write => &*WRITE_SHAPE,
    };
    if !shape.is_match(text) {
        return Classification::WrongIntent;
    }

    if !TABLE_SCOPE.is_match(text) {
        return Classification::OutOfScope;
    }

    Classification::Approved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_select_is_approved() {
        let result = classify("select * from patient", Intent::Read);
        assert_eq!(result, Classification::Approved);
    }

    #[test]
    fn test_plain_insert_is_approved() {
        let result = classify(
            "insert into patient (name) values ('Ada Lovelace')",
            Intent::Write,
        );
        assert_eq!(result, Classification::Approved);
    }

    #[test]
    fn test_every_denylist_keyword_is_forbidden() {
        let keywords = [
            "update", "delete", "drop", "alter", "truncate", "grant", "revoke", "attach",
            "detach", "pragma",
        ];
        for keyword in keywords {
            let text = format!("{} something on patient", keyword);
            assert_eq!(
                classify(&text, Intent::Read),
                Classification::Forbidden,
                "keyword {} should be forbidden",
                keyword
            );
        }
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        assert_eq!(
            classify("DROP TABLE patient", Intent::Read),
            Classification::Forbidden
        );
        assert_eq!(
            classify("DeLeTe from patient", Intent::Write),
            Classification::Forbidden
        );
    }

    #[test]
    fn test_denylist_beats_valid_select_shape() {
        // A syntactically fine SELECT that smuggles a forbidden keyword
        // in a subquery must still be rejected.
        let result = classify(
            "select * from patient where id in (select id from patient); drop table patient",
            Intent::Read,
        );
        assert_eq!(result, Classification::Forbidden);
    }

    #[test]
    fn test_denylist_ignores_declared_intent() {
        assert_eq!(
            classify("truncate patient", Intent::Write),
            Classification::Forbidden
        );
    }

    #[test]
    fn test_denylist_requires_whole_word() {
        // "updated_at" contains "update" as a substring but not as a word.
        let result = classify("select updated_at from patient", Intent::Read);
        assert_eq!(result, Classification::Approved);
    }

    #[test]
    fn test_non_select_on_read_channel_is_wrong_intent() {
        let result = classify("insert into patient (name) values ('x')", Intent::Read);
        assert_eq!(result, Classification::WrongIntent);
    }

    #[test]
    fn test_non_insert_on_write_channel_is_wrong_intent() {
        let result = classify("select * from patient", Intent::Write);
        assert_eq!(result, Classification::WrongIntent);
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        let result = classify("   \t select * from patient", Intent::Read);
        assert_eq!(result, Classification::Approved);
    }

    #[test]
    fn test_verb_must_be_whole_word() {
        let result = classify("selection from patient", Intent::Read);
        assert_eq!(result, Classification::WrongIntent);
    }

    #[test]
    fn test_empty_text_is_wrong_intent() {
        assert_eq!(classify("", Intent::Read), Classification::WrongIntent);
        assert_eq!(classify("   ", Intent::Write), Classification::WrongIntent);
    }

    #[test]
    fn test_other_table_is_out_of_scope() {
        let result = classify("select * from other_table", Intent::Read);
        assert_eq!(result, Classification::OutOfScope);
    }

    #[test]
    fn test_table_reference_requires_whole_word() {
        // "patients" does not count as a reference to "patient".
        let result = classify("select * from patients", Intent::Read);
        assert_eq!(result, Classification::OutOfScope);
    }

    #[test]
    fn test_scope_pattern_tracks_permitted_table_constant() {
        let text = format!("select * from {}", PERMITTED_TABLE);
        assert_eq!(classify(&text, Intent::Read), Classification::Approved);
    }

    #[test]
    fn test_table_reference_is_case_insensitive() {
        let result = classify("SELECT * FROM Patient", Intent::Read);
        assert_eq!(result, Classification::Approved);
    }
}
