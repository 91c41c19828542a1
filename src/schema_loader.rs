//! JSON Schema validation for startup datasets.
//!
//! The dataset schema ships inside the binary so an installed host can
//! validate files without the source tree. Structural problems (missing
//! taxonomies, non-string descriptions, wrong id types) are reported here in
//! one pass; identity rules are left to the taxonomy store and manager.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const DATASET_SCHEMA: &str = include_str!("../schema/orchid_dataset.schema.json");

/// Compile a schema document into a validator.
pub(crate) fn compile_schema(schema: &Value, label: &str) -> Result<JSONSchema> {
    JSONSchema::compile(schema).map_err(|err| anyhow!("compiling schema {label}: {err}"))
}

/// Validator for the bundled dataset schema.
pub fn dataset_schema() -> Result<JSONSchema> {
    let schema: Value =
        serde_json::from_str(DATASET_SCHEMA).context("parsing bundled dataset schema")?;
    compile_schema(&schema, "orchid_dataset")
}

/// Check a parsed dataset document, listing every violation on failure.
pub fn validate_dataset_value(value: &Value) -> Result<()> {
    let schema = dataset_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("dataset failed schema validation:\n{details}");
    }
    Ok(())
}

/// Read a dataset file and validate it, returning the parsed document.
pub fn validate_dataset_file(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing dataset {}", path.display()))?;
    validate_dataset_value(&value).with_context(|| format!("validating {}", path.display()))?;
    Ok(value)
}
