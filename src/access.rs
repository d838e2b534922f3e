//! Read-only, nested-path access over validated input data.

use crate::error::ValidationError;
use serde_json::Value;

/// Accessor over a payload, by reference.
///
/// A dotted identifier (`"user.age"`) is a path of single-segment lookups.
/// Objects are traversed by key (a numeric-looking segment on an object is
/// still a key lookup); arrays are indexed by numeric segments. A scalar
/// encountered mid-path makes the rest of the path absent; it is never an
/// error of its own.
///
/// ## Example
///
/// ```
/// use payload_validate::access::DataAccessor;
/// use serde_json::json;
///
/// let data = json!({"user": {"age": 30, "tags": ["a", "b"]}});
/// let accessor = DataAccessor::new(&data);
///
/// assert_eq!(accessor.get_field("user.age").unwrap(), &json!(30));
/// assert_eq!(accessor.get_field("user.tags.1").unwrap(), &json!("b"));
/// assert!(!accessor.has_field("user.name"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DataAccessor<'a> {
    data: &'a Value,
}

impl<'a> DataAccessor<'a> {
    /// Wrap a payload. No copy is made.
    pub fn new(data: &'a Value) -> Self {
        Self { data }
    }

    /// The wrapped payload, by reference.
    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// Whether the identifier resolves to a value (including null).
    pub fn has_field(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }

    /// Resolve the identifier.
    ///
    /// # Errors
    ///
    /// Fails when any path segment does not resolve.
    pub fn get_field(&self, id: &str) -> Result<&'a Value, ValidationError> {
        self.resolve(id).ok_or_else(|| {
            ValidationError::violation("field", format!("Field '{id}' does not exist."))
        })
    }

    /// Resolve the identifier, or fall back to a default.
    pub fn get_field_or(&self, id: &str, default: Value) -> Value {
        self.resolve(id).cloned().unwrap_or(default)
    }

    pub(crate) fn resolve(&self, id: &str) -> Option<&'a Value> {
        let mut node = self.data;
        for segment in id.split('.') {
            node = match node {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_null_is_present() {
        let data = json!({"user": {"age": null}});
        let accessor = DataAccessor::new(&data);

        assert!(accessor.has_field("user.age"));
        assert_eq!(accessor.get_field("user.age").unwrap(), &Value::Null);
    }

    #[test]
    fn scalar_parent_makes_path_absent() {
        let data = json!({"user": 42});
        let accessor = DataAccessor::new(&data);

        assert!(!accessor.has_field("user.age"));
        let err = accessor.get_field("user.age").unwrap_err();
        assert_eq!(err.message(), "Field 'user.age' does not exist.");
    }

    #[test]
    fn numeric_segments_index_arrays() {
        let data = json!({"items": [{"id": 1}, {"id": 2}]});
        let accessor = DataAccessor::new(&data);

        assert_eq!(accessor.get_field("items.1.id").unwrap(), &json!(2));
        assert!(!accessor.has_field("items.2.id"));
    }

    #[test]
    fn numeric_segments_on_objects_are_key_lookups() {
        let data = json!({"by_index": {"0": "zero"}});
        let accessor = DataAccessor::new(&data);

        assert_eq!(accessor.get_field("by_index.0").unwrap(), &json!("zero"));
    }

    #[test]
    fn get_field_or_falls_back() {
        let data = json!({"a": 1});
        let accessor = DataAccessor::new(&data);

        assert_eq!(accessor.get_field_or("a", json!(0)), json!(1));
        assert_eq!(accessor.get_field_or("b", json!(0)), json!(0));
    }

    #[test]
    fn data_returns_the_original_reference() {
        let data = json!({"a": 1});
        let accessor = DataAccessor::new(&data);
        assert!(std::ptr::eq(accessor.data(), &data));
    }
}
