use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use super::*;

#[derive(Debug, Serialize)]
struct Place {
    city: &'static str,
    state: &'static str,
}

#[test]
fn object_logs_raw_line_only_without_pretty_print() {
    let log = TraceLog::new();
    let result = inspect(&log, "fetchByZip", &json!({ "a": 1 }), false);

    assert_eq!(result, Inspection::Structured(json!({ "a": 1 })));
    assert!(result.is_structured());
    assert_eq!(result.failure(), None);
    assert_eq!(log.messages(), vec![r#"01: result from fetchByZip: {"a":1}"#]);
    assert!(log.lines().iter().all(|line| line.severity == Severity::Log));
}

#[test]
fn object_gets_indented_dump_with_pretty_print() {
    let log = TraceLog::new();
    let result = inspect(&log, "fetchByZip", &json!({ "a": 1 }), true);

    assert_eq!(result, Inspection::Structured(json!({ "a": 1 })));
    let lines = log.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].label, "02");
    assert!(lines[1].message.starts_with("result from fetchByZip (pretty JSON):\n"));
    assert!(lines[1].message.contains("  \"a\": 1"));
}

#[test]
fn encoded_object_string_is_decoded_then_treated_as_structured() {
    let quiet = TraceLog::new();
    let result = inspect(&quiet, "fetchByZip", r#"{"a":1}"#, false);
    assert_eq!(
        result,
        Inspection::EncodedString {
            original: r#"{"a":1}"#.to_string(),
            parsed: json!({ "a": 1 }),
        }
    );
    assert_eq!(quiet.len(), 1);
    assert_eq!(
        quiet.messages()[0],
        r#"01: result from fetchByZip: "{\"a\":1}""#
    );

    let pretty = TraceLog::new();
    let result = inspect(&pretty, "fetchByZip", r#"{"a":1}"#, true);
    assert!(result.is_structured());
    assert_eq!(pretty.len(), 2);
    assert!(pretty.messages()[1].contains("\"a\": 1"));
}

#[test]
fn plain_string_is_quoted_verbatim_and_stops_there() {
    let log = TraceLog::new();
    let result = inspect(&log, "fetchByZip", "hello world", true);

    assert_eq!(result, Inspection::PlainString("hello world".to_string()));
    assert_eq!(result.failure(), Some(ErrorKind::DecodeFailure));
    assert_eq!(result.value(), None);
    assert_eq!(
        log.messages(),
        vec![
            r#"01: result from fetchByZip: "hello world""#,
            r#"02: result from fetchByZip (plain string): "hello world""#,
        ]
    );
}

#[test]
fn numeric_string_takes_the_value_path() {
    let log = TraceLog::new();
    let result = inspect(&log, "count", "42", false);

    assert_eq!(
        result,
        Inspection::Scalar {
            original: Some("42".to_string()),
            value: json!(42),
        }
    );
    assert_eq!(
        log.messages().last().map(String::as_str),
        Some("02: result from count (value): 42")
    );
}

#[test]
fn quoted_string_decodes_to_its_contents() {
    let log = TraceLog::new();
    let result = inspect(&log, "count", r#""42""#, false);

    assert_eq!(
        result,
        Inspection::Scalar {
            original: Some(r#""42""#.to_string()),
            value: Value::String("42".to_string()),
        }
    );
    assert_eq!(result.original(), Some(r#""42""#));
    assert_eq!(
        log.messages().last().map(String::as_str),
        Some("02: result from count (value): 42")
    );
}

#[test]
fn null_is_a_value_not_a_structure() {
    let log = TraceLog::new();
    let result = inspect(&log, "lookup", &Value::Null, true);
    assert_eq!(
        result,
        Inspection::Scalar {
            original: None,
            value: Value::Null,
        }
    );
    assert_eq!(result.original(), None);
    assert!(!result.is_structured());
    assert_eq!(
        log.messages(),
        vec![
            "01: result from lookup: null",
            "02: result from lookup (value): null",
        ]
    );

    let log = TraceLog::new();
    let result = inspect(&log, "lookup", "null", true);
    assert_eq!(result.original(), Some("null"));
    assert_eq!(result.value(), Some(&Value::Null));

    let log = TraceLog::new();
    let result = inspect(&log, "lookup", &None::<u32>, false);
    assert_eq!(result.original(), None);
    assert_eq!(result.value(), Some(&Value::Null));
}

#[test]
fn non_finite_numbers_are_logged_by_name() {
    let log = TraceLog::new();
    let result = inspect(&log, "nan", &f64::NAN, false);
    inspect(&log, "inf", &f32::INFINITY, false);
    inspect(&log, "neg", &f64::NEG_INFINITY, false);

    assert!(matches!(result, Inspection::Scalar { original: None, .. }));
    assert_eq!(result.failure(), None);
    assert_eq!(
        log.messages(),
        vec![
            "01: result from nan: NaN",
            "02: result from nan (value): NaN",
            "01: result from inf: Infinity",
            "02: result from inf (value): Infinity",
            "01: result from neg: -Infinity",
            "02: result from neg (value): -Infinity",
        ]
    );
}

#[test]
fn encoded_extremes_use_exponent_notation() {
    let log = TraceLog::new();
    inspect(&log, "huge", "1e21", false);
    inspect(&log, "tiny", "1e-7", false);
    let result = inspect(&log, "overflow", "1e400", false);

    assert_eq!(result, Inspection::PlainString("1e400".to_string()));
    let classified = log
        .lines()
        .into_iter()
        .filter(|line| line.label == "02")
        .map(|line| line.message)
        .collect::<Vec<_>>();
    assert_eq!(
        classified,
        vec![
            "result from huge (value): 1e+21",
            "result from tiny (value): 1e-7",
            r#"result from overflow (plain string): "1e400""#,
        ]
    );
}

#[test]
fn scalars_render_like_a_console() {
    let log = TraceLog::new();
    inspect(&log, "ratio", &1.0_f64, false);
    inspect(&log, "ratio", &0.25_f64, false);
    inspect(&log, "flag", &true, false);
    inspect(&log, "big", &u64::MAX, false);

    let classified = log
        .lines()
        .into_iter()
        .filter(|line| line.label == "02")
        .map(|line| line.message)
        .collect::<Vec<_>>();
    assert_eq!(
        classified,
        vec![
            "result from ratio (value): 1",
            "result from ratio (value): 0.25",
            "result from flag (value): true",
            "result from big (value): 18446744073709551615",
        ]
    );
}

#[test]
fn serializable_structs_are_structured() {
    let log = TraceLog::new();
    let place = Place {
        city: "New York",
        state: "NY",
    };
    let result = inspect(&log, "fetchByZip", &place, false);

    assert_eq!(
        result,
        Inspection::Structured(json!({ "city": "New York", "state": "NY" }))
    );
    assert_eq!(
        log.messages(),
        vec![r#"01: result from fetchByZip: {"city":"New York","state":"NY"}"#]
    );
}

#[test]
fn encoded_arrays_and_empty_strings() {
    let log = TraceLog::new();
    assert!(matches!(
        inspect(&log, "list", "[1,2]", false),
        Inspection::EncodedString { parsed, .. } if parsed == json!([1, 2])
    ));
    assert_eq!(
        inspect(&log, "blank", "", false),
        Inspection::PlainString(String::new())
    );
}

#[test]
fn unserializable_values_degrade_to_unparseable() {
    let log = TraceLog::new();
    let mut grid = BTreeMap::new();
    grid.insert((0_u8, 1_u8), "x");

    let result = inspect(&log, "grid", &grid, true);
    let Inspection::Unparseable { original, message } = &result else {
        panic!("expected unparseable, got {result:?}");
    };
    assert_eq!(original, r#"{(0, 1): "x"}"#);
    assert!(message.contains("key must be a string"), "{message}");
    assert_eq!(result.failure(), Some(ErrorKind::FormatFailure));

    let lines = log.messages();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"01: result from grid: {(0, 1): "x"}"#);
    assert!(lines[1].starts_with("02: not valid JSON/object: "));
}

#[test]
#[allow(deprecated)]
fn display_result_alias_always_pretty_prints() {
    let log = TraceLog::new();
    let result = display_result(&log, "fetchByZip", r#"{"city":"Paris"}"#);

    assert!(result.is_structured());
    assert_eq!(log.len(), 2);
    assert!(log.messages()[1].contains("\"city\": \"Paris\""));
}
