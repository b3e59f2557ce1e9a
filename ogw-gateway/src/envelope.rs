//! Extraction of the raw request payload from an inbound body.

/// Pulls the hex payload out of an inbound body.
///
/// Accepts either a JSON object carrying a `data` string or a raw hex body;
/// both must start with `0x`. Malformed JSON is not an error, it falls
/// through to the raw-body check. `None` means no payload was present.
pub(crate) fn extract_payload(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(data) = value.get("data").and_then(|data| data.as_str()) {
            if data.starts_with("0x") {
                return Some(data.to_owned());
            }
        }
    }

    let raw = body.trim();
    if raw.starts_with("0x") {
        return Some(raw.to_owned());
    }

    None
}
