use serde_json::Value;

/// Parse the JSON text a rule left in its output slot.
pub fn decode(payload: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(payload)
}
