mod error;
pub use error::{Error, IntoError};

mod fragment;
pub use fragment::Fragment;

pub mod model;
pub use model::{AttributeDescriptor, DataType, Entity, Model, RelationDescriptor};

/// A Result type alias that uses attrschema's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
