//! Parser module: one extractor per source file, plus the merge step.

pub mod block;
pub mod catalog;
pub mod lookup;
pub mod merge;
pub mod preprocess;

use crate::model::{FunctionCatalog, NameLookup};
use crate::source::Sources;

/// Both source files, parsed independently.
#[derive(Debug)]
pub struct Parsed {
    pub catalog: FunctionCatalog,
    pub lookup: NameLookup,
}

/// Parse all source files.
pub fn parse_sources(sources: &Sources) -> Parsed {
    Parsed {
        catalog: catalog::parse(&sources.scfuncs),
        lookup: lookup::parse(&sources.core_resource),
    }
}
