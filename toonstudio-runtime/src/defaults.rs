//! Initial panel contents.

use toonstudio_core::types::{ConversionOptions, DataFormat};

pub const SAMPLE_JSON: &str = r#"{
  "name": "Alice",
  "age": 30,
  "items": [
    {"id": 1, "name": "Apple"},
    {"id": 2, "name": "Banana"}
  ]
}"#;

pub const SAMPLE_TOON: &str = "[2,]{id,name}:\n  1,Apple\n  2,Banana";

pub const SAMPLE_QUERY_DATA: &str =
    r#"[{"id": 1, "name": "Alice", "age": 30}, {"id": 2, "name": "Bob", "age": 25}]"#;

pub fn default_conversion_options() -> ConversionOptions {
    ConversionOptions::default()
}

pub fn default_query_format() -> DataFormat {
    DataFormat::Json
}
