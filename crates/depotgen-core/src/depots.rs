use serde::{Deserialize, Serialize};

/// One depot recognized on an application's depot listing.
///
/// Serialized as `{"id": "...", "name": "..."}`, which is also the shape
/// stored in the depot cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotRecord {
    /// Numeric depot identifier, kept as the exact string found in the page.
    pub id: String,
    /// Human-readable label. Never empty.
    pub name: String,
}

impl DepotRecord {
    /// Builds a record from a validated `id` and an optional label.
    ///
    /// A blank `name` is replaced with the synthesized `"Depot {id}"` label.
    #[must_use]
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        let id = id.into();
        let name = if name.trim().is_empty() {
            Self::placeholder_name(&id)
        } else {
            name.to_owned()
        };
        Self { id, name }
    }

    #[must_use]
    pub fn placeholder_name(id: &str) -> String {
        format!("Depot {id}")
    }
}

/// Returns `true` when `value` is a non-empty run of ASCII digits.
///
/// Signs, whitespace and trailing junk (`"+1"`, `"12 3"`, `"123abc"`) are
/// rejected. Length is unbounded; ids are kept as strings.
#[must_use]
pub fn is_integer_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_provided_name() {
        let record = DepotRecord::new("12345", "Main Content");
        assert_eq!(record.id, "12345");
        assert_eq!(record.name, "Main Content");
    }

    #[test]
    fn new_synthesizes_name_when_blank() {
        assert_eq!(DepotRecord::new("999", "").name, "Depot 999");
        assert_eq!(DepotRecord::new("999", "   ").name, "Depot 999");
    }

    #[test]
    fn is_integer_id_accepts_digits() {
        assert!(is_integer_id("0"));
        assert!(is_integer_id("228988"));
        assert!(is_integer_id("12345678901234567890"));
    }

    #[test]
    fn is_integer_id_rejects_signs() {
        assert!(!is_integer_id("+730"));
        assert!(!is_integer_id("-731"));
        assert!(!is_integer_id("-"));
    }

    #[test]
    fn is_integer_id_rejects_partial_and_empty() {
        assert!(!is_integer_id(""));
        assert!(!is_integer_id("abc"));
        assert!(!is_integer_id("123abc"));
        assert!(!is_integer_id("12.5"));
        assert!(!is_integer_id(" 12"));
    }

    #[test]
    fn serializes_as_id_name_object() {
        let json = serde_json::to_value(DepotRecord::new("1", "Base")).expect("serialize");
        assert_eq!(json, serde_json::json!({"id": "1", "name": "Base"}));
    }
}
