//! calcdoc: generate spreadsheet function documentation from OpenOffice
//! resource sources.
//!
//! Pipeline:
//!
//! 1. **Obtain**: read `scfuncs.src` and `core_resource.src` from the cache,
//!    downloading them from the pinned upstream revision if missing
//! 2. **Parse**: extract the function catalog and the name lookup
//! 3. **Merge**: join both by opcode identifier into per-function records
//! 4. **Render**: write pretty JSON with sorted keys

mod metadata;
mod model;
mod parser;
mod render;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use source::{CacheMode, HttpFetcher, SourceCache};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "calcdoc",
    about = "Generate spreadsheet function documentation from OpenOffice resource sources"
)]
struct Cli {
    /// Directory holding downloaded source files
    #[arg(long, default_value = "_cache")]
    cache_dir: PathBuf,

    /// Output JSON file
    #[arg(short = 'o', long, default_value = "openoffice-function-docs.json")]
    output: PathBuf,

    /// Upstream git revision to download sources from
    #[arg(long, default_value = source::DEFAULT_REVISION)]
    revision: String,

    /// Never download; fail if a source file is not cached
    #[arg(long, conflicts_with = "refresh")]
    offline: bool,

    /// Download source files even if they are cached
    #[arg(long)]
    refresh: bool,

    /// package.json to read the VERSION tag from
    #[arg(long)]
    package_json: Option<PathBuf>,

    /// Use this VERSION tag instead of reading package.json
    #[arg(long)]
    version_tag: Option<String>,
}

impl Cli {
    fn cache_mode(&self) -> CacheMode {
        if self.offline {
            CacheMode::Offline
        } else if self.refresh {
            CacheMode::Refresh
        } else {
            CacheMode::Normal
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(&cli)
}

/// Log to stderr, filtered by `RUST_LOG` (default: info for this crate).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "calcdoc=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let version =
        metadata::resolve_version(cli.version_tag.as_deref(), cli.package_json.as_deref())?;

    let cache = SourceCache::new(&cli.cache_dir, &cli.revision, cli.cache_mode(), HttpFetcher);
    let sources = cache.obtain_all()?;

    let parsed = parser::parse_sources(&sources);
    let reference = parser::merge::merge(&parsed.catalog, &parsed.lookup, &version);

    tracing::info!("Saving function reference to {}", cli.output.display());
    let json = render::to_json(&reference)?;
    fs::write(&cli.output, json)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["calcdoc"]);
        assert_eq!(cli.cache_dir, PathBuf::from("_cache"));
        assert_eq!(cli.output, PathBuf::from("openoffice-function-docs.json"));
        assert_eq!(cli.revision, source::DEFAULT_REVISION);
        assert_eq!(cli.cache_mode(), CacheMode::Normal);
    }

    #[test]
    fn cache_mode_flags() {
        assert_eq!(
            Cli::parse_from(["calcdoc", "--offline"]).cache_mode(),
            CacheMode::Offline
        );
        assert_eq!(
            Cli::parse_from(["calcdoc", "--refresh"]).cache_mode(),
            CacheMode::Refresh
        );
    }

    #[test]
    fn offline_conflicts_with_refresh() {
        assert!(Cli::try_parse_from(["calcdoc", "--offline", "--refresh"]).is_err());
    }
}
