//! Custom Tera filters.

use std::collections::HashMap;

use heck::ToKebabCase;
use tera::{Result, Value};

/// Anchor id for an option key (`tls.cipher-suite` → `tls-cipher-suite`).
pub(crate) fn anchor(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("anchor filter expects a string"))?;
    Ok(Value::String(s.to_kebab_case()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(input: &str) -> String {
        let val = Value::String(input.to_string());
        anchor(&val, &HashMap::new())
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_anchor() {
        assert_eq!(apply("max-capacity"), "max-capacity");
        assert_eq!(apply("tls.cipherSuite"), "tls-cipher-suite");
        assert_eq!(apply("connect_timeout"), "connect-timeout");
    }

    #[test]
    fn test_filter_rejects_non_string() {
        let val = Value::Number(42.into());
        assert!(anchor(&val, &HashMap::new()).is_err());
    }
}
