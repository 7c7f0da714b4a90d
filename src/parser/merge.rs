//! Cross-reference merge: join catalog resources to canonical function names.
//!
//! The catalog is keyed by internal opcode identifiers (`SC_OPCODE_ABS`);
//! the lookup file maps those identifiers to public names (`ABS`).

use crate::model::*;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Lookup bucket holding the English/ODFF function names.
pub const ENGLISH_ODFF_NAMES: &str = "RID_STRLIST_FUNCTION_NAMES_ENGLISH_ODFF";

static RE_PARAMETER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) of Parameter ([0-9]+)").unwrap());

/// Where a catalog description routes its text.
#[derive(Debug, PartialEq, Eq)]
enum Label<'a> {
    Function(&'a str),
    Parameter { index: usize, label: &'a str },
    /// `... of Parameter 0`: no position to put it in.
    Unpositioned,
}

fn classify(description: &str) -> Label<'_> {
    let Some(caps) = RE_PARAMETER_LABEL.captures(description) else {
        return Label::Function(description);
    };
    let (Some(label), Some(number)) = (caps.get(1), caps.get(2)) else {
        return Label::Function(description);
    };
    match number.as_str().parse::<usize>() {
        Ok(0) => Label::Unpositioned,
        Ok(n) => Label::Parameter {
            index: n - 1,
            label: label.as_str(),
        },
        Err(_) => Label::Function(description),
    }
}

/// Identifier → canonical name, from the English/ODFF bucket only.
fn function_names(lookup: &NameLookup) -> HashMap<&str, &str> {
    let Some(entries) = lookup.get(ENGLISH_ODFF_NAMES) else {
        tracing::warn!("name lookup has no {} resource", ENGLISH_ODFF_NAMES);
        return HashMap::new();
    };

    entries
        .iter()
        .filter(|entry| !entry.text.is_empty())
        .map(|entry| (entry.string.as_str(), entry.text.as_str()))
        .collect()
}

/// Build one function's record from its catalog entries. Later labels win.
fn build_record(entries: &[CatalogEntry]) -> FunctionRecord {
    let mut labels = Labels::new();
    let mut params: BTreeMap<usize, Labels> = BTreeMap::new();

    for entry in entries {
        match classify(&entry.description) {
            Label::Function(label) => {
                labels.insert(label.to_string(), entry.text.clone());
            }
            Label::Parameter { index, label } => {
                params
                    .entry(index)
                    .or_default()
                    .insert(label.to_string(), entry.text.clone());
            }
            Label::Unpositioned => {
                tracing::trace!(
                    resource = %entry.resource,
                    description = %entry.description,
                    "dropping entry for parameter 0"
                );
            }
        }
    }

    let len = params.keys().next_back().map_or(0, |max| max + 1);
    let parameters = (0..len)
        .map(|index| params.remove(&index).unwrap_or_default())
        .collect();

    FunctionRecord { labels, parameters }
}

/// Merge the parsed catalog and lookup into the final reference document.
pub fn merge(catalog: &FunctionCatalog, lookup: &NameLookup, version: &str) -> FunctionReference {
    let names = function_names(lookup);

    let mut buckets: Vec<(&String, &Vec<CatalogEntry>)> = catalog.resources.iter().collect();
    buckets.sort_by(|a, b| a.0.cmp(b.0));

    let mut functions = BTreeMap::new();
    for (resource, entries) in buckets {
        let Some(name) = names.get(resource.as_str()) else {
            tracing::trace!(resource = %resource, "no function name, skipping");
            continue;
        };
        if functions
            .insert(name.to_string(), build_record(entries))
            .is_some()
        {
            tracing::debug!(
                resource = %resource,
                name = %name,
                "function defined twice, keeping the later one"
            );
        }
    }

    let license = catalog.license.clone().unwrap_or_else(|| {
        tracing::warn!("function catalog has no license comment");
        String::new()
    });

    tracing::debug!(functions = functions.len(), "merged function reference");
    FunctionReference {
        license,
        version: version.to_string(),
        functions,
    }
}
