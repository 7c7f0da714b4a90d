//! JSON renderer: four-space indentation, keys sorted at every level.

use crate::model::FunctionReference;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render the reference document as pretty JSON with a trailing newline.
pub fn to_json(reference: &FunctionReference) -> Result<String> {
    // serde_json::Map is ordered by key, so going through Value sorts
    // struct fields and flattened labels alike.
    let value = serde_json::to_value(reference).context("failed to serialize function reference")?;

    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .context("failed to serialize function reference")?;
    out.push(b'\n');

    String::from_utf8(out).context("serialized JSON is not UTF-8")
}
