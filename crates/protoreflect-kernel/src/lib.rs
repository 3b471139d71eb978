//! # Protoreflect Kernel
//!
//! Reflected schema nodes for interface-description models: the in-memory
//! tree a schema loader builds from JSON descriptors, before any message is
//! encoded.
//!
//! This crate is **schema-agnostic**: it does not assemble namespaces or
//! resolve types. It only prescribes how individual nodes store their data
//! and how a loader recognizes them in raw JSON.
//!
//! ## Architecture
//!
//! ```text
//! SchemaNode            ← name + opaque options, shared by every node
//!     │
//! ReflectionNode        ← the named, optioned capability a namespace holds
//!     │
//! NodeJson              ← test_json / from_json discrimination protocol
//!     │
//! EnumType              ← values by name, cached values by id, wire presence
//! ```
//!
//! ## Loading an enum
//!
//! ```
//! use protoreflect_kernel::{EnumType, NodeJson, ReflectionNode};
//! use serde_json::json;
//!
//! let descriptor = json!({"values": {"UNKNOWN": 0, "ACTIVE": 1}});
//! assert!(EnumType::test_json(&descriptor));
//!
//! let status = EnumType::from_json("Status", &descriptor);
//! assert_eq!(status.name(), "Status");
//! assert_eq!(status.name_of(1), Some("ACTIVE"));
//! assert!(!status.present(0));
//! ```

pub mod enum_type;
pub mod error;
pub mod json;
pub mod node;
pub mod value_id;

pub use enum_type::{EnumType, EnumValues, ValuesById};
pub use error::ReflectError;
pub use json::{NodeJson, has_truthy_member, is_truthy};
pub use node::{Options, ReflectionNode, SchemaNode};
pub use value_id::ValueId;
