//! Upstream source files: revision-pinned URLs and an on-disk cache.
//!
//! Files are downloaded once and then read from `<cache>/<set>-<file>`.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SOURCE_SET: &str = "openoffice";

/// Upstream revision the defaults are pinned to.
pub const DEFAULT_REVISION: &str = "c014b5f2b55cff8d4b0c952d5c16d62ecde09ca1";

const RAW_PREFIX: &str = "https://github.com/apache/openoffice/raw";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFile {
    pub name: &'static str,
    /// Path inside the upstream repository.
    pub path: &'static str,
}

pub const SCFUNCS: SourceFile = SourceFile {
    name: "scfuncs.src",
    path: "main/sc/source/ui/src/scfuncs.src",
};

pub const CORE_RESOURCE: SourceFile = SourceFile {
    name: "core_resource.src",
    path: "main/formula/source/core/resource/core_resource.src",
};

impl SourceFile {
    pub fn url(&self, revision: &str) -> String {
        format!("{}/{}/{}", RAW_PREFIX, revision, self.path)
    }

    pub fn cache_name(&self) -> String {
        format!("{}-{}", SOURCE_SET, self.name)
    }
}

/// Raw text of every source file the pipeline needs.
#[derive(Debug, Clone)]
pub struct Sources {
    pub scfuncs: String,
    pub core_resource: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Got unexpected response {reason} ({code})")]
    UnexpectedStatus { reason: String, code: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to read response body")]
    Io(#[from] std::io::Error),
}

/// Retrieves the bytes behind a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain HTTP GET via ureq.
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match ureq::get(url).call() {
            Ok(resp) if resp.status() == 200 => {
                let mut body = Vec::new();
                resp.into_reader().read_to_end(&mut body)?;
                Ok(body)
            }
            Ok(resp) => Err(FetchError::UnexpectedStatus {
                reason: resp.status_text().to_string(),
                code: resp.status(),
            }),
            Err(ureq::Error::Status(code, resp)) => Err(FetchError::UnexpectedStatus {
                reason: resp.status_text().to_string(),
                code,
            }),
            Err(e) => Err(FetchError::Transport(e.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Read cached files, download missing ones.
    #[default]
    Normal,
    /// Never download; a missing file is an error.
    Offline,
    /// Ignore cached files and download everything again.
    Refresh,
}

pub struct SourceCache<F> {
    dir: PathBuf,
    revision: String,
    mode: CacheMode,
    fetcher: F,
}

impl<F: Fetch> SourceCache<F> {
    pub fn new(dir: &Path, revision: &str, mode: CacheMode, fetcher: F) -> Self {
        Self {
            dir: dir.to_path_buf(),
            revision: revision.to_string(),
            mode,
            fetcher,
        }
    }

    /// Return the text of `file`, downloading it if it is not cached.
    pub fn obtain(&self, file: &SourceFile) -> Result<String> {
        let local = self.dir.join(file.cache_name());

        if self.mode != CacheMode::Refresh && local.is_file() {
            tracing::info!("Reading {}", file.name);
            let bytes = fs::read(&local)
                .with_context(|| format!("failed to read {}", local.display()))?;
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        if self.mode == CacheMode::Offline {
            bail!(
                "{} is not cached at {} and --offline forbids downloading",
                file.name,
                local.display()
            );
        }

        let url = file.url(&self.revision);
        tracing::info!("Downloading {} from {}", file.name, url);
        let bytes = self
            .fetcher
            .fetch(&url)
            .with_context(|| format!("failed to download {}", file.name))?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create cache directory: {}", self.dir.display()))?;
        fs::write(&local, &bytes)
            .with_context(|| format!("failed to write {}", local.display()))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn obtain_all(&self) -> Result<Sources> {
        tracing::info!("Obtaining {} files", SOURCE_SET);
        Ok(Sources {
            scfuncs: self.obtain(&SCFUNCS)?,
            core_resource: self.obtain(&CORE_RESOURCE)?,
        })
    }
}
