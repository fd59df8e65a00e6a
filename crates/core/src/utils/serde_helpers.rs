//! Serde value helpers

/// Read an identifier that hosts may hand over either as a number or a numeric string
pub fn id_from_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_number_and_string() {
        assert_eq!(id_from_value(&json!(42)), Some(42));
        assert_eq!(id_from_value(&json!(" 7 ")), Some(7));
        assert_eq!(id_from_value(&json!(-1)), None);
        assert_eq!(id_from_value(&json!("abc")), None);
        assert_eq!(id_from_value(&json!(null)), None);
    }
}
