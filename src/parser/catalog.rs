//! Function-catalog extractor for `scfuncs.src`.
//!
//! Layout after preprocessing:
//!
//! ```text
//! 	Resource SC_OPCODE_ABS
//! 	{
//! 		String 1 // Description
//! 		{
//! 			Text [ en-US ] = "Absolute value of a number." ;
//! 		};
//! 		String 2 // Name of Parameter 1
//! 		...
//! 	};
//! ```

use super::block::{BlockGrammar, BlockKind, INDENT_1, INDENT_2};
use super::preprocess;
use crate::model::{CatalogEntry, FunctionCatalog};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static RESOURCES: LazyLock<BlockGrammar> = LazyLock::new(|| {
    BlockGrammar::new(
        BlockKind::Resource,
        &format!(r"(?m)^{i}Resource (?P<id>[A-Z0-9_]+)\n{i}\{{", i = INDENT_1),
        &format!(r"(?m)^{i}\}};", i = INDENT_1),
    )
    .unwrap()
});

static STRINGS: LazyLock<BlockGrammar> = LazyLock::new(|| {
    BlockGrammar::new(
        BlockKind::String,
        &format!(
            r"(?m)^{i}String (?P<id>[0-9]+) // (?P<desc>.*)\n{i}\{{",
            i = INDENT_2
        ),
        &format!(r"(?m)^{i}\}};", i = INDENT_2),
    )
    .unwrap()
});

static RE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*Text\s*\[\s*([a-zA-Z0-9_-]*)\s*\]\s*=\s*"([^"]*)"\s*;"#).unwrap()
});

/// Parse the function catalog into per-resource entry lists.
pub fn parse(input: &str) -> FunctionCatalog {
    let license = preprocess::extract_license(input);
    let text = preprocess::apply_steps(input, preprocess::CATALOG_STEPS);

    let mut resources = HashMap::new();
    for resource in RESOURCES.scan(&text) {
        let entries = parse_resource(resource.identifier, resource.body);
        tracing::trace!(resource = resource.identifier, entries = entries.len());
        resources.insert(resource.identifier.to_string(), entries);
    }

    tracing::debug!(resources = resources.len(), "parsed function catalog");
    FunctionCatalog { license, resources }
}

fn parse_resource(resource: &str, body: &str) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for string in STRINGS.scan(body) {
        let description = string.description.unwrap_or_default();
        for caps in RE_TEXT.captures_iter(string.body) {
            entries.push(CatalogEntry {
                resource: resource.to_string(),
                string: string.identifier.to_string(),
                description: description.to_string(),
                lang: caps[1].to_string(),
                text: caps[2].to_string(),
            });
        }
    }

    entries
}
