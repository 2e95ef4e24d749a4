//! Tests for separator module

use super::*;
use test_case::test_case;

/// Join lines the way the record accumulator does
fn assemble(policy: &mut dyn RecordSeparatorPolicy, lines: &[&str]) -> Vec<String> {
    let mut records = Vec::new();
    let mut current: Option<String> = None;

    for line in lines {
        let record = match current.take() {
            Some(partial) => policy.pre_process(&partial) + line,
            None => (*line).to_string(),
        };
        if policy.is_end_of_record(&record) {
            records.push(policy.post_process(&record));
        } else {
            current = Some(record);
        }
    }
    if let Some(partial) = current {
        records.push(policy.post_process(&partial));
    }
    records
}

// ============================================================================
// SingleLinePolicy Tests
// ============================================================================

#[test]
fn test_single_line_policy() {
    let mut policy = SingleLinePolicy;
    assert!(policy.is_end_of_record("anything"));
    assert!(policy.is_end_of_record(""));
    assert_eq!(policy.pre_process("a"), "a");
    assert_eq!(policy.post_process("a"), "a");
}

// ============================================================================
// QuoteContinuationPolicy Tests
// ============================================================================

#[test_case("a,b,c", true ; "plain line")]
#[test_case("a,\"b", false ; "open quote")]
#[test_case("a,\"b\"", true ; "closed quote")]
#[test_case("a,b\\", false ; "continuation marker")]
#[test_case("a,b\\  ", false ; "continuation marker with trailing space")]
fn test_quote_policy_end_of_record(record: &str, expected: bool) {
    let mut policy = QuoteContinuationPolicy::new();
    assert_eq!(policy.is_end_of_record(record), expected);
}

#[test]
fn test_quote_policy_keeps_newline_in_quotes() {
    let mut policy = QuoteContinuationPolicy::new();
    let records = assemble(&mut policy, &["1,\"multi", "line\",x", "2,y"]);
    assert_eq!(records, vec!["1,\"multi\nline\",x", "2,y"]);
}

#[test]
fn test_quote_policy_strips_continuation() {
    let mut policy = QuoteContinuationPolicy::new();
    let records = assemble(&mut policy, &["a,b\\", "c,d", "e"]);
    assert_eq!(records, vec!["a,bc,d", "e"]);
}

#[test]
fn test_quote_policy_custom_continuation() {
    let mut policy = QuoteContinuationPolicy::with_continuation("+");
    let records = assemble(&mut policy, &["foo+", "bar", "baz\\"]);
    assert_eq!(records, vec!["foobar", "baz\\"]);
}

// ============================================================================
// SuffixPolicy Tests
// ============================================================================

#[test]
fn test_suffix_policy_joins_until_suffix() {
    let mut policy = SuffixPolicy::new();
    let records = assemble(&mut policy, &["select *", "from t;", "delete;  "]);
    assert_eq!(records, vec!["select *from t", "delete"]);
}

#[test]
fn test_suffix_policy_partial_record_at_end() {
    let mut policy = SuffixPolicy::new();
    let records = assemble(&mut policy, &["a;", "unterminated"]);
    assert_eq!(records, vec!["a", "unterminated"]);
}

#[test]
fn test_suffix_policy_respects_whitespace_when_asked() {
    let mut policy = SuffixPolicy::with_suffix("|").ignore_whitespace(false);
    assert!(!policy.is_end_of_record("a| "));
    assert!(policy.is_end_of_record("a|"));
    assert_eq!(policy.post_process(" a|"), " a");
}

// ============================================================================
// JsonObjectPolicy Tests
// ============================================================================

#[test_case("{\"a\": 1}", true ; "single line object")]
#[test_case("{\"a\": {", false ; "nested open")]
#[test_case("{\"a\": {\"b\": 2}}", true ; "nested closed")]
#[test_case("{\"a\": 1}  ", true ; "trailing whitespace")]
#[test_case("\"a\"", false ; "no braces")]
fn test_json_policy_end_of_record(record: &str, expected: bool) {
    let mut policy = JsonObjectPolicy;
    assert_eq!(policy.is_end_of_record(record), expected);
}

#[test]
fn test_json_policy_multiline_objects() {
    let mut policy = JsonObjectPolicy;
    let records = assemble(
        &mut policy,
        &["{", "\"id\": 1,", "\"tags\": {\"x\": true}", "}", "{\"id\": 2}"],
    );
    assert_eq!(
        records,
        vec!["{\"id\": 1,\"tags\": {\"x\": true}}", "{\"id\": 2}"]
    );
}

// ============================================================================
// SeparatorConfig Tests
// ============================================================================

#[test]
fn test_separator_config_default() {
    let config = SeparatorConfig::default();
    assert_eq!(config.kind, SeparatorKind::Line);
    assert!(config.ignore_whitespace);
    assert_eq!(config, SeparatorConfig::line());
}

#[test]
fn test_separator_config_builds_suffix_policy() {
    let mut policy = SeparatorConfig::suffix("$").build();
    assert!(policy.is_end_of_record("a$"));
    assert!(!policy.is_end_of_record("a;"));
    assert_eq!(policy.post_process("a$"), "a");
}

#[test]
fn test_separator_config_builds_quoted_policy() {
    let mut policy = SeparatorConfig::quoted().build();
    assert!(!policy.is_end_of_record("\"open"));
}

#[test]
fn test_separator_config_builds_json_policy() {
    let mut policy = SeparatorConfig::json().build();
    assert!(!policy.is_end_of_record("{"));
    assert!(policy.is_end_of_record("{}"));
}

#[test]
fn test_separator_config_yaml() {
    let config: SeparatorConfig = serde_yaml::from_str("type: suffix\nsuffix: \"!\"").unwrap();
    assert_eq!(config.kind, SeparatorKind::Suffix);
    assert_eq!(config.suffix.as_deref(), Some("!"));
    assert!(config.ignore_whitespace);
}
