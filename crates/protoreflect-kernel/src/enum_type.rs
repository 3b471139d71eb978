//! Reflected enum types.
//!
//! An enum maps symbolic names to wire ids. The forward map (`values`) is
//! authored; the reverse map (`values_by_id`) is derived from it on first
//! use and then kept for the life of the enum.
//!
//! ## Reverse map staleness
//!
//! The reverse map is a snapshot. It is built once, from `values` as they
//! are at that moment, and is never rebuilt: edits made through
//! [`EnumType::values_mut`] after the first read of
//! [`EnumType::values_by_id`] are not reflected in it. Enums are filled
//! while a schema loads and read afterwards, so callers that edit values
//! late must build a fresh enum.
//!
//! ## Aliases
//!
//! Ids need not be unique. When several names share an id, the name that
//! comes last in `values` order owns the id in the reverse map.

use crate::error::ReflectError;
use crate::json::{NodeJson, has_truthy_member};
use crate::node::{Options, ReflectionNode, SchemaNode};
use crate::value_id::ValueId;
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Enum values by symbolic name, in declaration order.
pub type EnumValues = IndexMap<String, ValueId>;

/// Symbolic names by id, derived from [`EnumValues`].
pub type ValuesById = IndexMap<ValueId, String>;

/// A reflected enum: a named set of symbolic constants and their ids.
#[derive(Debug, Clone)]
pub struct EnumType {
    node: SchemaNode,
    values: EnumValues,
    values_by_id: OnceLock<ValuesById>,
}

impl EnumType {
    /// Create an enum. Missing values default to an empty map; ids are
    /// stored as given, without validation.
    pub fn new(
        name: impl Into<String>,
        values: Option<EnumValues>,
        options: Option<Options>,
    ) -> Self {
        Self {
            node: SchemaNode::new(name, options),
            values: values.unwrap_or_default(),
            values_by_id: OnceLock::new(),
        }
    }

    /// Parse raw descriptor text and build an enum from it.
    ///
    /// Only malformed text fails; any well-formed JSON yields an enum, as
    /// [`NodeJson::from_json`] does.
    pub fn from_json_str(name: &str, text: &str) -> Result<Self, ReflectError> {
        let json: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(name, &json))
    }

    pub fn values(&self) -> &EnumValues {
        &self.values
    }

    /// Mutable access to the forward map.
    ///
    /// Does not touch an already built reverse map.
    pub fn values_mut(&mut self) -> &mut EnumValues {
        &mut self.values
    }

    /// Symbolic names by id, built on first call and cached.
    pub fn values_by_id(&self) -> &ValuesById {
        self.values_by_id.get_or_init(|| {
            let mut by_id = ValuesById::with_capacity(self.values.len());
            for (name, id) in &self.values {
                by_id.insert(id.clone(), name.clone());
            }
            tracing::trace!(
                enum_name = self.node.name(),
                values = self.values.len(),
                ids = by_id.len(),
                "built enum values_by_id"
            );
            by_id
        })
    }

    /// Whether the reverse map has been built yet.
    pub fn is_values_by_id_cached(&self) -> bool {
        self.values_by_id.get().is_some()
    }

    /// The id of a symbolic name.
    pub fn id_of(&self, name: &str) -> Option<&ValueId> {
        self.values.get(name)
    }

    /// The symbolic name owning an id, looked up through the cached
    /// reverse map.
    pub fn name_of(&self, id: impl Into<ValueId>) -> Option<&str> {
        self.values_by_id().get(&id.into()).map(String::as_str)
    }

    /// Whether `value` must be written on the wire.
    ///
    /// Zero is the implicit default and is never encoded; negative values
    /// are not considered present either. Works on any integer, registered
    /// in this enum or not.
    pub fn present(&self, value: i64) -> bool {
        value > 0
    }

    /// The descriptor form read by [`NodeJson::from_json`].
    pub fn to_json(&self) -> Value {
        let values: serde_json::Map<String, Value> = self
            .values
            .iter()
            .map(|(name, id)| (name.clone(), id.to_json_value()))
            .collect();
        match self.node.options() {
            Some(options) => json!({
                "options": options,
                "values": values,
            }),
            None => json!({
                "values": values,
            }),
        }
    }
}

impl PartialEq for EnumType {
    /// Compares name, options, and values. The reverse map is derived and
    /// does not take part.
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.values == other.values
    }
}

impl ReflectionNode for EnumType {
    fn node(&self) -> &SchemaNode {
        &self.node
    }
}

impl NodeJson for EnumType {
    /// An enum descriptor is any object with a truthy `values` member.
    fn test_json(json: &Value) -> bool {
        has_truthy_member(json, "values")
    }

    fn from_json(name: &str, json: &Value) -> Self {
        let values = match json.get("values") {
            Some(Value::Object(entries)) => Some(
                entries
                    .iter()
                    .map(|(symbol, id)| (symbol.clone(), ValueId::from_json_value(id)))
                    .collect::<EnumValues>(),
            ),
            Some(other) => {
                tracing::debug!(
                    enum_name = name,
                    values = %other,
                    "enum values is not an object, using none"
                );
                None
            }
            None => None,
        };
        let options = match json.get("options") {
            Some(Value::Object(options)) => Some(options.clone()),
            Some(other) => {
                tracing::debug!(
                    enum_name = name,
                    options = %other,
                    "enum options is not an object, ignoring"
                );
                None
            }
            None => None,
        };
        Self::new(name, values, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(entries: &[(&str, i64)]) -> EnumValues {
        entries
            .iter()
            .map(|(name, id)| ((*name).to_string(), ValueId::Int(*id)))
            .collect()
    }

    fn status() -> EnumType {
        EnumType::from_json(
            "Status",
            &json!({"values": {"UNKNOWN": 0, "ACTIVE": 1, "INACTIVE": 2}}),
        )
    }

    #[test]
    fn missing_values_default_to_empty() {
        let empty = EnumType::new("Empty", None, None);
        assert_eq!(empty.name(), "Empty");
        assert!(empty.values().is_empty());
        assert!(empty.values_by_id().is_empty());
        assert!(empty.options().is_none());
    }

    #[test]
    fn from_json_builds_both_maps() {
        let status = status();
        assert_eq!(status.name(), "Status");
        assert_eq!(
            status.values(),
            &values(&[("UNKNOWN", 0), ("ACTIVE", 1), ("INACTIVE", 2)])
        );
        assert_eq!(status.name_of(0), Some("UNKNOWN"));
        assert_eq!(status.name_of(1), Some("ACTIVE"));
        assert_eq!(status.name_of(2), Some("INACTIVE"));
        assert_eq!(status.values_by_id().len(), 3);
    }

    #[test]
    fn reverse_map_keys_are_the_distinct_ids() {
        let aliased = EnumType::new(
            "Aliased",
            Some(values(&[("A", 1), ("B", 2), ("C", 1), ("D", 3), ("E", 2)])),
            None,
        );
        let mut ids: Vec<i64> = aliased
            .values_by_id()
            .keys()
            .filter_map(ValueId::as_int)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn last_alias_wins_the_reverse_map() {
        let aliased = EnumType::new(
            "Aliased",
            Some(values(&[("FIRST", 1), ("OTHER", 2), ("SECOND", 1)])),
            None,
        );
        assert_eq!(aliased.name_of(1), Some("SECOND"));
        assert_eq!(aliased.name_of(2), Some("OTHER"));
        assert_eq!(aliased.id_of("FIRST"), Some(&ValueId::Int(1)));
    }

    #[test]
    fn reverse_map_is_not_rebuilt_after_mutation() {
        let mut status = status();
        assert!(!status.is_values_by_id_cached());
        let before = status.values_by_id().clone();
        assert!(status.is_values_by_id_cached());

        status
            .values_mut()
            .insert("RETIRED".to_string(), ValueId::Int(3));
        status
            .values_mut()
            .insert("ACTIVE".to_string(), ValueId::Int(9));

        assert_eq!(status.values_by_id(), &before);
        assert_eq!(status.name_of(3), None);
        assert_eq!(status.name_of(9), None);
        assert_eq!(status.id_of("RETIRED"), Some(&ValueId::Int(3)));
    }

    #[test]
    fn mutation_before_first_read_is_seen() {
        let mut status = status();
        status
            .values_mut()
            .insert("RETIRED".to_string(), ValueId::Int(3));
        assert_eq!(status.name_of(3), Some("RETIRED"));
    }

    #[test]
    fn fresh_instance_rederives_the_same_reverse_map() {
        let first = status();
        let second = EnumType::new("Status", Some(first.values().clone()), None);
        assert_eq!(first.values_by_id(), second.values_by_id());
    }

    #[test]
    fn concurrent_readers_share_one_reverse_map() {
        let status = status();
        let shared = &status;
        let seen: Vec<&ValuesById> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || shared.values_by_id()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("reader thread panicked"))
                .collect()
        });
        for map in &seen {
            assert!(std::ptr::eq(*map, seen[0]));
        }
    }

    #[test]
    fn test_json_requires_truthy_values() {
        assert!(!EnumType::test_json(&Value::Null));
        assert!(!EnumType::test_json(&json!({})));
        assert!(!EnumType::test_json(&json!({"values": null})));
        assert!(!EnumType::test_json(&json!({"values": 0})));
        assert!(!EnumType::test_json(&json!(42)));
        assert!(!EnumType::test_json(
            &json!({"fields": {"id": {"type": "int32", "id": 1}}})
        ));
        assert!(EnumType::test_json(&json!({"values": {}})));
        assert!(EnumType::test_json(&json!({"values": {"A": 0}})));
    }

    #[test]
    fn try_from_json_only_builds_matches() {
        assert!(EnumType::try_from_json("Nope", &json!({"nested": {}})).is_none());
        let built = EnumType::try_from_json("Yes", &json!({"values": {"A": 1}}));
        assert_eq!(built.map(|e| e.values().len()), Some(1));
    }

    #[test]
    fn from_json_tolerates_malformed_members() {
        let odd = EnumType::from_json("Odd", &json!({"values": true, "options": [1, 2]}));
        assert!(odd.values().is_empty());
        assert!(odd.options().is_none());

        let not_an_object = EnumType::from_json("Odd", &json!("values"));
        assert!(not_an_object.values().is_empty());
    }

    #[test]
    fn malformed_ids_flow_into_the_reverse_map() {
        let odd = EnumType::from_json(
            "Odd",
            &json!({"values": {"HALF": 1.5, "TEXT": "x", "NEG": -1}}),
        );
        assert_eq!(odd.name_of(ValueId::Raw("1.5".to_string())), Some("HALF"));
        assert_eq!(odd.name_of(ValueId::Raw("\"x\"".to_string())), Some("TEXT"));
        assert_eq!(odd.name_of(-1), Some("NEG"));
    }

    #[test]
    fn options_are_forwarded() {
        let aliased = EnumType::from_json(
            "Aliased",
            &json!({"values": {"A": 1, "B": 1}, "options": {"allow_alias": true}}),
        );
        assert_eq!(aliased.node().get_option("allow_alias"), Some(&json!(true)));
    }

    #[test]
    fn present_only_for_positive_values() {
        let status = status();
        assert!(!status.present(0));
        assert!(status.present(1));
        assert!(!status.present(-5));
        assert!(status.present(1_000));
    }

    #[test]
    fn to_json_round_trips() {
        let aliased = EnumType::from_json(
            "Aliased",
            &json!({"values": {"A": 1, "B": 1, "HALF": 0.5}, "options": {"allow_alias": true}}),
        );
        let rebuilt = EnumType::from_json("Aliased", &aliased.to_json());
        assert_eq!(rebuilt, aliased);
    }

    #[test]
    fn equality_ignores_the_cache() {
        let cached = status();
        let _ = cached.values_by_id();
        assert_eq!(cached, status());
    }

    #[test]
    fn to_json_snapshot() {
        let mut options = Options::new();
        options.insert("allow_alias".to_string(), json!(false));
        let status = EnumType::new(
            "Status",
            Some(values(&[("UNKNOWN", 0), ("ACTIVE", 1)])),
            Some(options),
        );

        insta::assert_json_snapshot!(status.to_json(), @r#"
        {
          "options": {
            "allow_alias": false
          },
          "values": {
            "UNKNOWN": 0,
            "ACTIVE": 1
          }
        }
        "#);
    }

    #[test]
    fn from_json_str_rejects_only_bad_text() {
        let status = EnumType::from_json_str("Status", r#"{"values": {"UNKNOWN": 0}}"#).unwrap();
        assert_eq!(status.id_of("UNKNOWN"), Some(&ValueId::Int(0)));

        let scalar = EnumType::from_json_str("Scalar", "7").unwrap();
        assert!(scalar.values().is_empty());

        let err = EnumType::from_json_str("Broken", "{\"values\":").unwrap_err();
        assert!(matches!(err, ReflectError::Json(_)));
    }
}
