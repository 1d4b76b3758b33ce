//! Schema generation for entity attribute metadata.
//!
//! [`generate`] turns an [`Entity`] (its attributes and relationships) into
//! an [`EntitySchema`], rendered in the dialect of a [`Strategy`]:
//!
//! ```
//! use attrschema::{generate, GenerationOptions, OpenApi};
//! use attrschema::model::{AttributeDescriptor, DataType, Model};
//! use serde_json::json;
//!
//! let user = Model::new("user").attribute(
//!     "age",
//!     AttributeDescriptor::new(DataType::Integer)
//!         .allow_null(false)
//!         .validate("min", 0)
//!         .validate("max", 10),
//! );
//!
//! let schema = generate(&user, &OpenApi::new(), &GenerationOptions::default()).unwrap();
//!
//! assert_eq!(
//!     schema.to_value(),
//!     json!({
//!         "type": "object",
//!         "properties": {
//!             "age": { "type": "integer", "minimum": 0, "maximum": 10 },
//!         },
//!         "required": ["age"],
//!     })
//! );
//! ```

mod custom;

mod generate;
pub use generate::{generate, Components, EntitySchema};

pub mod options;
pub use options::{GenerationOptions, UnknownRulePolicy};

pub mod relation;

pub mod strategy;
pub use strategy::{JsonSchema, NullableInput, OpenApi, Strategy};

pub mod ty;

pub mod validate;
pub use validate::Rule;

pub use attrschema_core::{model, Entity, Error, Fragment, Result};
