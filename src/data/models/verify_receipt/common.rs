use serde::Deserialize;

/// Apple encodes flags inconsistently across payloads: `true`, `"true"`,
/// `"1"` and `1` all occur.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum FlexibleBool {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FlexibleBool {
    pub(crate) fn as_bool(&self) -> Option<bool> {
        match self {
            FlexibleBool::Bool(b) => Some(*b),
            FlexibleBool::Int(0) => Some(false),
            FlexibleBool::Int(1) => Some(true),
            FlexibleBool::Int(_) => None,
            FlexibleBool::Str(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

/// Identifiers are usually strings, but some payloads carry them as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum FlexibleString {
    Str(String),
    Int(i64),
}

impl FlexibleString {
    pub(crate) fn into_string(self) -> String {
        match self {
            FlexibleString::Str(s) => s,
            FlexibleString::Int(i) => i.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", Some(true))]
    #[case("false", Some(false))]
    #[case("1", Some(true))]
    #[case("0", Some(false))]
    #[case("\"true\"", Some(true))]
    #[case("\"1\"", Some(true))]
    #[case("\"0\"", Some(false))]
    #[case("\"maybe\"", None)]
    #[case("7", None)]
    fn test_as_bool(#[case] json: &str, #[case] expected: Option<bool>) {
        let value: FlexibleBool = serde_json::from_str(json).unwrap();
        assert_eq!(value.as_bool(), expected);
    }

    #[test]
    fn test_flexible_string() {
        let s: FlexibleString = serde_json::from_str("1000000700000000").unwrap();
        assert_eq!(s.into_string(), "1000000700000000");
        let s: FlexibleString = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(s.into_string(), "abc");
    }
}
