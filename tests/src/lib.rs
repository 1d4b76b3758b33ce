mod fixtures;
pub use fixtures::*;

pub use validator::Validator;

pub use attrschema;
pub use std_util::*;

use attrschema::{generate, EntitySchema, GenerationOptions, Strategy};
use attrschema_core::model::Model;

/// Generates `model` with only the `include`d attributes and no
/// relationships.
pub fn generate_attributes(model: &Model, strategy: &dyn Strategy, include: &[&str]) -> EntitySchema {
    let options = GenerationOptions::new()
        .include(include.iter().copied())
        .associations(false);

    generate(model, strategy, &options).unwrap()
}

/// The rendered schema of one attribute of `model`.
pub fn property(model: &Model, strategy: &dyn Strategy, name: &str) -> serde_json::Value {
    generate_attributes(model, strategy, &[name])
        .properties
        .swap_remove(name)
        .unwrap_or_else(|| panic!("no property `{name}`"))
        .into_value()
}

/// Routes `tracing` output to the test harness. Filtered with `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runs each listed test function once per output strategy.
///
/// Every function takes the strategy by value:
///
/// ```ignore
/// fn renders_references(s: impl Strategy) { ... }
///
/// tests!(renders_references);
/// ```
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+ $(,)?
    ) => {
        mod openapi {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    $crate::init_logging();
                    super::$f($crate::attrschema::OpenApi::new());
                }
            )*
        }

        mod json_schema {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    $crate::init_logging();
                    super::$f($crate::attrschema::JsonSchema::new());
                }
            )*
        }
    };
}
