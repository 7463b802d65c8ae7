//! Credential redaction and response truncation

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Replacement for a redacted value
pub const REDACTED: &str = "[REDACTED]";

static SENSITIVE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|secret|authorization|client_id|client_secret)")
        .expect("sensitive-key pattern is valid")
});

static SENSITIVE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(authorization|token)").expect("header pattern is valid"));

/// Check if an object key names a credential
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEY.is_match(key)
}

/// Replace credential values anywhere in a document
///
/// Keys are matched case-insensitively; arrays and nested objects are
/// walked. Non-container values are returned as-is.
#[must_use]
pub fn redact_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let clean = if is_sensitive_key(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_sensitive(child)
                    };
                    (key.clone(), clean)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive).collect()),
        other => other.clone(),
    }
}

/// Header list as a JSON object with `authorization` / `token` values hidden
pub fn redact_headers<'a, I>(headers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADER.is_match(name) {
                REDACTED
            } else {
                value
            };
            (name.to_string(), Value::String(value.to_string()))
        })
        .collect()
}

/// Shrink a response for display
///
/// Any array longer than one keeps its first element (itself truncated)
/// followed by a `"[TRUNCATED - N more item(s)]"` marker. Objects are
/// walked; scalars are untouched.
#[must_use]
pub fn truncate_response(value: &Value) -> Value {
    match value {
        Value::Array(items) => match items.as_slice() {
            [] => Value::Array(Vec::new()),
            [only] => Value::Array(vec![truncate_response(only)]),
            [first, rest @ ..] => {
                let remaining = rest.len();
                let plural = if remaining == 1 { "" } else { "s" };
                Value::Array(vec![
                    truncate_response(first),
                    Value::String(format!("[TRUNCATED - {remaining} more item{plural}]")),
                ])
            }
        },
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), truncate_response(child)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_credentials_are_hidden() {
        let doc = json!({
            "username": "dev",
            "Password": "hunter2",
            "auth": {"client_secret": "abc", "scope": "pricing"},
            "items": [{"accessToken": "t"}, {"name": "ok"}]
        });
        assert_eq!(
            redact_sensitive(&doc),
            json!({
                "username": "dev",
                "Password": REDACTED,
                "auth": {"client_secret": REDACTED, "scope": "pricing"},
                "items": [{"accessToken": REDACTED}, {"name": "ok"}]
            })
        );
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(redact_sensitive(&json!("token")), json!("token"));
        assert_eq!(redact_sensitive(&Value::Null), Value::Null);
    }

    #[test]
    fn header_values_are_hidden() {
        let headers = redact_headers([
            ("Authorization", "Bearer x"),
            ("X-Refresh-Token", "y"),
            ("Content-Type", "application/json"),
        ]);
        assert_eq!(headers["Authorization"], json!(REDACTED));
        assert_eq!(headers["X-Refresh-Token"], json!(REDACTED));
        assert_eq!(headers["Content-Type"], json!("application/json"));
    }

    #[test]
    fn long_arrays_keep_the_first_item() {
        let doc = json!({
            "products": [
                {"rates": [1, 2, 3]},
                {"rates": [4]},
                {"rates": []}
            ],
            "single": [[1, 2]],
            "count": 3
        });
        assert_eq!(
            truncate_response(&doc),
            json!({
                "products": [
                    {"rates": [1, "[TRUNCATED - 2 more items]"]},
                    "[TRUNCATED - 2 more items]"
                ],
                "single": [[1, "[TRUNCATED - 1 more item]"]],
                "count": 3
            })
        );
    }
}
