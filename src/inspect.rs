//! Classifying and logging fetch results.
//!
//! Every call writes a raw line (`01`) and at most one classification line
//! (`02`). The order of the checks matters: whether the value is a string is
//! decided first, then whether that string decodes, then whether the decoded
//! value is an object or array. A string such as `42` therefore logs as the
//! value `42`, while `hello` logs as a plain string.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

use crate::ErrorKind;
use crate::format::format_number;
use crate::sink::DiagnosticSink;

const RAW_LINE: &str = "01";
const CLASSIFIED_LINE: &str = "02";

/// How an inspected value was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// A non-null object or array passed in directly.
    Structured(Value),
    /// A string whose contents decode to a non-null object or array.
    EncodedString { original: String, parsed: Value },
    /// A number, boolean, null or string. `original` holds the string it was
    /// decoded from, if any.
    Scalar {
        original: Option<String>,
        value: Value,
    },
    /// A string that does not decode as JSON.
    PlainString(String),
    /// Classification failed; `original` is the debug rendering of the input.
    Unparseable { original: String, message: String },
}

impl Inspection {
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_) | Self::EncodedString { .. })
    }

    /// The string a value was decoded from, when it came in encoded.
    pub fn original(&self) -> Option<&str> {
        match self {
            Self::EncodedString { original, .. } | Self::Unparseable { original, .. } => {
                Some(original.as_str())
            }
            Self::Scalar { original, .. } => original.as_deref(),
            Self::PlainString(text) => Some(text.as_str()),
            Self::Structured(_) => None,
        }
    }

    /// The decoded or direct value, when there is one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) | Self::Scalar { value, .. } => Some(value),
            Self::EncodedString { parsed, .. } => Some(parsed),
            Self::PlainString(_) | Self::Unparseable { .. } => None,
        }
    }

    /// Which degradation, if any, produced this classification.
    pub fn failure(&self) -> Option<ErrorKind> {
        match self {
            Self::PlainString(_) => Some(ErrorKind::DecodeFailure),
            Self::Unparseable { .. } => Some(ErrorKind::FormatFailure),
            _ => None,
        }
    }
}

/// Logs `value` under `label` and classifies it.
///
/// Structured values get an indented dump only when `pretty_print` is set;
/// otherwise the raw line is all that is written for them. Never fails:
/// anything that cannot be serialized comes back as
/// [`Inspection::Unparseable`].
pub fn inspect<T, S>(sink: &S, label: &str, value: &T, pretty_print: bool) -> Inspection
where
    T: Serialize + Debug + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let candidate = serde_json::to_value(value);
    // JSON has no NaN or infinities; serde_json turns them into null.
    let non_finite_number = matches!(candidate, Ok(Value::Null))
        .then(|| non_finite(value))
        .flatten();
    if let Some(number) = non_finite_number {
        let rendered = format_number(number);
        sink.log(RAW_LINE, format!("result from {label}: {rendered}"));
        sink.log(
            CLASSIFIED_LINE,
            format!("result from {label} (value): {rendered}"),
        );
        return Inspection::Scalar {
            original: None,
            value: Value::Null,
        };
    }

    let raw = match &candidate {
        Ok(json) => json.to_string(),
        Err(_) => format!("{value:?}"),
    };
    sink.log(RAW_LINE, format!("result from {label}: {raw}"));

    let candidate = match candidate {
        Ok(candidate) => candidate,
        Err(err) => return unparseable(sink, format!("{value:?}"), err.to_string()),
    };

    let (candidate, original) = match candidate {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => (parsed, Some(text)),
            Err(_) => {
                sink.log(
                    CLASSIFIED_LINE,
                    format!("result from {label} (plain string): \"{text}\""),
                );
                return Inspection::PlainString(text);
            }
        },
        other => (other, None),
    };

    if candidate.is_object() || candidate.is_array() {
        if pretty_print {
            match serde_json::to_string_pretty(&candidate) {
                Ok(pretty) => sink.log(
                    CLASSIFIED_LINE,
                    format!("result from {label} (pretty JSON):\n{pretty}"),
                ),
                Err(err) => return unparseable(sink, format!("{value:?}"), err.to_string()),
            }
        }
        return match original {
            Some(original) => Inspection::EncodedString {
                original,
                parsed: candidate,
            },
            None => Inspection::Structured(candidate),
        };
    }

    sink.log(
        CLASSIFIED_LINE,
        format!("result from {label} (value): {}", render_scalar(&candidate)),
    );
    Inspection::Scalar {
        original,
        value: candidate,
    }
}

/// Recognizes a bare `f32`/`f64` NaN or infinity by its `Debug` form.
fn non_finite<T: Debug + ?Sized>(value: &T) -> Option<f64> {
    match format!("{value:?}").as_str() {
        "NaN" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

/// Always-pretty variant kept for pages written against the older helper.
#[deprecated(note = "use `inspect` with `pretty_print = true`")]
pub fn display_result<T, S>(sink: &S, label: &str, value: &T) -> Inspection
where
    T: Serialize + Debug + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    inspect(sink, label, value, true)
}

fn unparseable<S>(sink: &S, original: String, message: String) -> Inspection
where
    S: DiagnosticSink + ?Sized,
{
    sink.log(CLASSIFIED_LINE, format!("not valid JSON/object: {message}"));
    Inspection::Unparseable { original, message }
}

/// Console-style rendering: strings bare, integral numbers without `.0`.
pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                number
                    .as_f64()
                    .map(format_number)
                    .unwrap_or_else(|| number.to_string())
            }
        }
        other => other.to_string(),
    }
}
