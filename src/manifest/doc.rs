//! Manifest documents addressed by JSON Pointer paths.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The document kinds a drill operates on. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Namespace,
    Workload,
    Service,
    VolumeClaim,
    NetworkPolicy,
}

impl DocKind {
    /// Lowercase label used in error messages and log entries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Workload => "workload",
            Self::Service => "service",
            Self::VolumeClaim => "volume claim",
            Self::NetworkPolicy => "network policy",
        }
    }
}

/// One configuration document: an immutable kind plus a nested JSON body.
///
/// Fields are addressed with JSON Pointer syntax (`/spec/selector/app`).
/// Lookups return `Option` so detectors can treat absent structure as
/// "fault precondition not met" without panicking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDoc {
    kind: DocKind,
    body: Value,
}

impl ManifestDoc {
    #[must_use]
    pub const fn new(kind: DocKind, body: Value) -> Self {
        Self { kind, body }
    }

    #[must_use]
    pub const fn kind(&self) -> DocKind {
        self.kind
    }

    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Resolve a pointer; `None` when any step is absent.
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.body.pointer(pointer)
    }

    /// Resolve a pointer to a string field.
    #[must_use]
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.get(pointer).and_then(Value::as_str)
    }

    /// Resolve a pointer to an integer field.
    #[must_use]
    pub fn get_i64(&self, pointer: &str) -> Option<i64> {
        self.get(pointer).and_then(Value::as_i64)
    }

    /// Canonical string form of a scalar, so numeric and named ports compare
    /// the same way (`80` and `"80"` are equal).
    #[must_use]
    pub fn get_scalar_string(&self, pointer: &str) -> Option<String> {
        match self.get(pointer)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Mutable pointer access for injectors.
    #[must_use]
    pub fn get_mut(&mut self, pointer: &str) -> Option<&mut Value> {
        self.body.pointer_mut(pointer)
    }

    /// Overwrite the value at `pointer`. `false` when the parent is absent.
    #[must_use]
    pub fn set(&mut self, pointer: &str, value: Value) -> bool {
        match self.body.pointer_mut(pointer) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => self.set_in_parent(pointer, value),
        }
    }

    // Setting a key that does not exist yet: resolve the parent object and
    // insert the final segment.
    fn set_in_parent(&mut self, pointer: &str, value: Value) -> bool {
        let Some((parent, key)) = pointer.rsplit_once('/') else {
            return false;
        };
        let parent_value = if parent.is_empty() {
            Some(&mut self.body)
        } else {
            self.body.pointer_mut(parent)
        };
        match parent_value {
            Some(Value::Object(map)) => {
                map.insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    /// `metadata.name` of the document, when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str("/metadata/name")
    }
}

/// One scenario's full document state.
///
/// Exactly one workload and one service; the network policy exists only when
/// a fault created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub namespace: ManifestDoc,
    pub workload: ManifestDoc,
    pub service: ManifestDoc,
    pub volume_claim: ManifestDoc,
    pub network_policy: Option<ManifestDoc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> ManifestDoc {
        ManifestDoc::new(
            DocKind::Service,
            json!({
                "metadata": {"name": "app"},
                "spec": {
                    "selector": {"app": "app"},
                    "ports": [{"port": 80, "targetPort": 80}],
                },
            }),
        )
    }

    #[test]
    fn pointer_lookup_resolves_nested_fields() {
        let d = doc();
        assert_eq!(d.get_str("/spec/selector/app"), Some("app"));
        assert_eq!(d.get_i64("/spec/ports/0/port"), Some(80));
        assert_eq!(d.name(), Some("app"));
    }

    #[test]
    fn absent_pointer_is_none_not_panic() {
        let d = doc();
        assert!(d.get("/spec/missing/deeply").is_none());
        assert!(d.get_str("/spec/ports/5/port").is_none());
    }

    #[test]
    fn scalar_string_normalizes_numbers_and_strings() {
        let mut d = doc();
        assert_eq!(
            d.get_scalar_string("/spec/ports/0/targetPort"),
            Some("80".to_string())
        );
        assert!(d.set("/spec/ports/0/targetPort", json!("http")));
        assert_eq!(
            d.get_scalar_string("/spec/ports/0/targetPort"),
            Some("http".to_string())
        );
    }

    #[test]
    fn set_overwrites_existing_field() {
        let mut d = doc();
        assert!(d.set("/spec/selector/app", json!("appp")));
        assert_eq!(d.get_str("/spec/selector/app"), Some("appp"));
    }

    #[test]
    fn set_inserts_new_key_under_existing_parent() {
        let mut d = doc();
        assert!(d.set("/spec/storageClassName", json!("fast")));
        assert_eq!(d.get_str("/spec/storageClassName"), Some("fast"));
    }

    #[test]
    fn set_fails_when_parent_absent() {
        let mut d = doc();
        assert!(!d.set("/spec/nothing/here", json!(1)));
    }

    #[test]
    fn kind_is_fixed_at_creation() {
        let d = doc();
        assert_eq!(d.kind(), DocKind::Service);
        assert_eq!(d.kind().label(), "service");
    }
}
