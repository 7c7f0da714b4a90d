//! Data model for extracted function documentation: format-agnostic.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// One `Text[lang] = "..."` assignment inside a catalog String block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct CatalogEntry {
    pub resource: String,
    /// Small integer identifying the String block, kept as written.
    pub string: String,
    /// Inline `// ...` comment of the String block, e.g. "Name of Parameter 1".
    pub description: String,
    /// May be empty (default language).
    pub lang: String,
    pub text: String,
}

/// Parsed contents of the function-catalog file (`scfuncs.src`).
#[derive(Debug, Default)]
pub struct FunctionCatalog {
    /// First block comment mentioning "License", collapsed to one line.
    pub license: Option<String>,
    pub resources: HashMap<String, Vec<CatalogEntry>>,
}

/// One `String ID { Text = "..."; };` statement from the name-lookup file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct LookupEntry {
    pub resource: String,
    pub string: String,
    pub lang: String,
    pub text: String,
}

/// Parsed contents of the name-lookup file (`core_resource.src`).
pub type NameLookup = HashMap<String, Vec<LookupEntry>>;

/// Label → text mapping (e.g. "Description" → "Returns the absolute value").
pub type Labels = BTreeMap<String, String>;

/// Documentation for a single spreadsheet function.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    /// Function-level labels. Serialized inline next to `Parameters`.
    #[serde(flatten)]
    pub labels: Labels,
    /// One mapping per parameter position, 0-based and contiguous.
    #[serde(rename = "Parameters")]
    pub parameters: Vec<Labels>,
}

/// Final document written to disk.
#[derive(Debug, Default, Serialize)]
pub struct FunctionReference {
    #[serde(rename = "LICENSE")]
    pub license: String,
    #[serde(rename = "VERSION")]
    pub version: String,
    pub functions: BTreeMap<String, FunctionRecord>,
}
