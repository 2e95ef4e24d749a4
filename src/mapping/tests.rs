//! Tests for mapping module

use super::*;
use crate::error::Error;
use serde_json::{json, Value};

// ============================================================================
// Mapped Tests
// ============================================================================

#[test]
fn test_mapped_into_item() {
    assert_eq!(Mapped::Item(3).into_item(), Some(3));
    assert_eq!(Mapped::<i32>::Skip.into_item(), None);
}

#[test]
fn test_mapped_map() {
    assert_eq!(Mapped::Item(2).map(|n| n * 10), Mapped::Item(20));
    assert_eq!(Mapped::<i32>::Skip.map(|n| n * 10), Mapped::Skip);
}

// ============================================================================
// PassThroughLineMapper Tests
// ============================================================================

#[test]
fn test_passthrough_mapper() {
    let mapper = PassThroughLineMapper::new();
    let mapped = mapper.map_line("testLine1", 1).unwrap();
    assert_eq!(mapped, Mapped::Item("testLine1".to_string()));
}

// ============================================================================
// Closure Mapper Tests
// ============================================================================

#[test]
fn test_closure_mapper() {
    let mapper = |record: &str, line: usize| -> crate::Result<Mapped<(usize, usize)>> {
        Ok(Mapped::Item((line, record.len())))
    };
    assert_eq!(mapper.map_line("abc", 4).unwrap(), Mapped::Item((4, 3)));
}

#[test]
fn test_closure_mapper_error_passes_through() {
    let mapper = |record: &str, line: usize| -> crate::Result<Mapped<i64>> {
        record
            .parse::<i64>()
            .map(Mapped::Item)
            .map_err(|e| Error::parse(line, record, e.to_string()))
    };
    assert_eq!(mapper.map_line("42", 1).unwrap(), Mapped::Item(42));

    let err = mapper.map_line("forty-two", 2).unwrap_err();
    match err {
        Error::Parse { line, input, .. } => {
            assert_eq!(line, 2);
            assert_eq!(input, "forty-two");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// JsonLineMapper Tests
// ============================================================================

#[test]
fn test_json_mapper_parses_record() {
    let mapper = JsonLineMapper::new();
    let mapped = mapper.map_line(r#" {"id": 1, "name": "Alice"} "#, 3).unwrap();
    assert_eq!(mapped, Mapped::Item(json!({"id": 1, "name": "Alice"})));
}

#[test]
fn test_json_mapper_skips_blank() {
    let mapper = JsonLineMapper::new();
    assert_eq!(mapper.map_line("   ", 1).unwrap(), Mapped::Skip);
}

#[test]
fn test_json_mapper_strict_blank() {
    let mapper = JsonLineMapper::new().strict_blank();
    assert!(matches!(
        mapper.map_line("", 9).unwrap_err(),
        Error::Parse { line: 9, .. }
    ));
}

#[test]
fn test_json_mapper_invalid_json() {
    let mapper = JsonLineMapper::new();
    let err = mapper.map_line("{not json", 5).unwrap_err();
    assert!(err.to_string().contains("line 5"));
    assert!(err.to_string().contains("{not json"));
}

// ============================================================================
// PatternSkipMapper Tests
// ============================================================================

#[test]
fn test_pattern_skip_mapper() {
    let mapper = PatternSkipMapper::new("^HEADER", PassThroughLineMapper).unwrap();
    assert_eq!(mapper.map_line("HEADER,a,b", 1).unwrap(), Mapped::Skip);
    assert_eq!(
        mapper.map_line("1,a,b", 2).unwrap(),
        Mapped::Item("1,a,b".to_string())
    );
    assert_eq!(mapper.pattern().as_str(), "^HEADER");
}

#[test]
fn test_pattern_skip_mapper_invalid_regex() {
    let err = PatternSkipMapper::new("(unclosed", PassThroughLineMapper).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

// ============================================================================
// MapperConfig Tests
// ============================================================================

#[test]
fn test_mapper_config_default_is_passthrough() {
    let config = MapperConfig::default();
    assert_eq!(config.kind, MapperKind::Passthrough);
    assert!(config.skip_pattern.is_none());

    let mapper = config.build().unwrap();
    assert_eq!(
        mapper.map_line("raw", 1).unwrap(),
        Mapped::Item(Value::String("raw".to_string()))
    );
}

#[test]
fn test_mapper_config_json_with_skip() {
    let mapper = MapperConfig::json()
        .with_skip_pattern("^#")
        .build()
        .unwrap();
    assert_eq!(mapper.map_line("# trailer", 1).unwrap(), Mapped::Skip);
    assert_eq!(
        mapper.map_line(r#"{"a": true}"#, 2).unwrap(),
        Mapped::Item(json!({"a": true}))
    );
}

#[test]
fn test_mapper_config_yaml() {
    let config: MapperConfig =
        serde_yaml::from_str("type: json\nskip_pattern: \"^id,\"").unwrap();
    assert_eq!(config, MapperConfig::json().with_skip_pattern("^id,"));
}
