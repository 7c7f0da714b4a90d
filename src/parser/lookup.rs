//! Name-lookup extractor for `core_resource.src`.
//!
//! Resources sit at column 0 and hold one-statement strings:
//!
//! ```text
//! Resource RID_STRLIST_FUNCTION_NAMES_ENGLISH_ODFF
//! {
//!     String SC_OPCODE_ABS
//!     {
//!         Text = "ABS" ;
//!     };
//! };
//! ```

use super::block::{BlockGrammar, BlockKind};
use crate::model::{LookupEntry, NameLookup};
use regex::Regex;
use std::sync::LazyLock;

static RESOURCES: LazyLock<BlockGrammar> = LazyLock::new(|| {
    BlockGrammar::new(
        BlockKind::Resource,
        r"(?m)^Resource (?P<id>[A-Z0-9_]+)\n\{",
        r"(?m)^\};",
    )
    .unwrap()
});

static RE_STRING_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)^\s*String\s+([A-Z0-9_]+)\s*\{\s*",
        r"Text\s*(?:\[\s*([a-zA-Z0-9_-]*)\s*\])?\s*=\s*",
        r#""([^"]*)"\s*;\s*\};"#
    ))
    .unwrap()
});

/// Parse the name-lookup file into per-resource entry lists.
pub fn parse(input: &str) -> NameLookup {
    let mut resources = NameLookup::new();

    for resource in RESOURCES.scan(input) {
        let entries: Vec<LookupEntry> = RE_STRING_TEXT
            .captures_iter(resource.body)
            .map(|caps| LookupEntry {
                resource: resource.identifier.to_string(),
                string: caps[1].to_string(),
                lang: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                text: caps[3].to_string(),
            })
            .collect();
        resources.insert(resource.identifier.to_string(), entries);
    }

    tracing::debug!(resources = resources.len(), "parsed name lookup");
    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"#include "core_resource.hrc"

Resource RID_STRLIST_FUNCTION_NAMES_ENGLISH_ODFF
{
    String SC_OPCODE_IF
    {
        Text = "IF" ;
    };
    String SC_OPCODE_ABS
    {
        Text = "ABS" ;
    };
};
Resource RID_STRLIST_FUNCTION_NAMES
{
    String SC_OPCODE_IF
    {
        Text [ en-US ] = "IF" ;
    };
};
"#;

    #[test]
    fn parses_resources() {
        let lookup = parse(SAMPLE);
        assert_eq!(lookup.len(), 2);

        let odff = &lookup["RID_STRLIST_FUNCTION_NAMES_ENGLISH_ODFF"];
        assert_eq!(odff.len(), 2);
        assert_eq!(
            odff[1],
            LookupEntry {
                resource: "RID_STRLIST_FUNCTION_NAMES_ENGLISH_ODFF".to_string(),
                string: "SC_OPCODE_ABS".to_string(),
                lang: String::new(),
                text: "ABS".to_string(),
            }
        );
    }

    #[test]
    fn keeps_language_tag() {
        let lookup = parse(SAMPLE);
        assert_eq!(lookup["RID_STRLIST_FUNCTION_NAMES"][0].lang, "en-US");
    }

    #[test]
    fn single_line_statement() {
        let input = "Resource R\n{\n    String SC_OPCODE_PI { Text = \"PI\" ; };\n};\n";
        let lookup = parse(input);
        assert_eq!(lookup["R"][0].string, "SC_OPCODE_PI");
        assert_eq!(lookup["R"][0].text, "PI");
    }

    #[test]
    fn unterminated_resource_is_dropped() {
        let input = "Resource R\n{\n    String A\n    {\n        Text = \"A\" ;\n    };\n";
        assert!(parse(input).is_empty());
    }

    #[test]
    fn indented_resource_is_not_top_level() {
        let input = "    Resource R\n    {\n    };\n";
        assert!(parse(input).is_empty());
    }

    #[test]
    fn string_with_extra_content_is_skipped() {
        let input = "Resource R\n{\n    String A\n    {\n        Text = \"A\" ;\n        Other = 1 ;\n    };\n    String B\n    {\n        Text = \"B\" ;\n    };\n};\n";
        let lookup = parse(input);
        assert_eq!(lookup["R"].len(), 1);
        assert_eq!(lookup["R"][0].text, "B");
    }
}
