//! Record construction and JSON encoding.

use std::borrow::Cow;
use std::sync::OnceLock;

use chrono::{Local, SecondsFormat};
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::logger::finite::ensure_finite;

/// Line handed to the sink when a record cannot be encoded.
///
/// Written verbatim; it is never passed through the serializer.
pub const FALLBACK_LINE: &str = r#"{"level":"FATAL","msg":"failed marshal to json"}"#;

/// Annotations attached to a record.
pub type Items = Map<String, Value>;

static EMPTY_ITEMS: OnceLock<Items> = OnceLock::new();

/// Shared empty mapping substituted when a call carries no items.
pub fn empty_items() -> &'static Items {
    EMPTY_ITEMS.get_or_init(Items::new)
}

/// One log entry, as serialized onto the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord<'a> {
    time: String,
    level: &'a str,
    msg: &'a str,
    #[serde(skip_serializing_if = "items_empty")]
    items: Cow<'a, Items>,
}

fn items_empty(items: &Cow<'_, Items>) -> bool {
    items.is_empty()
}

impl<'a> LogRecord<'a> {
    /// Build a record stamped with the current wall-clock time.
    pub fn new(level: &'a str, msg: &'a str, items: Cow<'a, Items>) -> Self {
        Self {
            time: now_rfc3339(),
            level,
            msg,
            items,
        }
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn level(&self) -> &str {
        self.level
    }

    pub fn msg(&self) -> &str {
        self.msg
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    /// Encode as a single JSON line (no trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Current local time as RFC3339 with second precision (`Z` when UTC).
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convert caller-supplied annotations into the record's item map.
///
/// `None` and values that encode to JSON `null` yield the shared empty map.
/// Anything that does not encode to a JSON object, or that holds a NaN or
/// infinite float, is an error.
pub fn normalize_items<'a, I>(items: Option<&I>) -> Result<Cow<'a, Items>, serde_json::Error>
where
    I: Serialize + ?Sized,
{
    let Some(items) = items else {
        return Ok(Cow::Borrowed(empty_items()));
    };

    ensure_finite(items)?;
    match serde_json::to_value(items)? {
        Value::Object(map) => Ok(Cow::Owned(map)),
        Value::Null => Ok(Cow::Borrowed(empty_items())),
        other => Err(serde_json::Error::custom(format!(
            "items must encode as a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Run the full record pipeline and return the line for the sink.
///
/// Never fails: any encoding error is swapped for [`FALLBACK_LINE`].
pub(crate) fn render<I>(level: &str, msg: &str, items: Option<&I>) -> Cow<'static, str>
where
    I: Serialize + ?Sized,
{
    let encoded = normalize_items(items)
        .and_then(|items| LogRecord::new(level, msg, items).to_line());

    match encoded {
        Ok(line) => Cow::Owned(line),
        Err(e) => {
            tracing::debug!(error = %e, level, "Log record could not be encoded, using fallback line");
            Cow::Borrowed(FALLBACK_LINE)
        }
    }
}
