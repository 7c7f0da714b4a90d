//! Package metadata: where the `VERSION` tag comes from.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when no file is named explicitly.
pub const DEFAULT_PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageInfo {
    version: String,
}

/// Read the `version` field of a package.json file.
pub fn read_package_version(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let info: PackageInfo = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse version from {}", path.display()))?;
    Ok(info.version)
}

/// Resolve the version tag: explicit tag, then the named package.json,
/// then `package.json` in the working directory if present, then this
/// crate's own version.
pub fn resolve_version(tag: Option<&str>, package_json: Option<&Path>) -> Result<String> {
    if let Some(tag) = tag {
        return Ok(tag.to_string());
    }
    if let Some(path) = package_json {
        return read_package_version(path);
    }

    let default = Path::new(DEFAULT_PACKAGE_JSON);
    if default.is_file() {
        read_package_version(default)
    } else {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_tag_wins() {
        let version = resolve_version(Some("9.9.9"), Some(Path::new("/nonexistent"))).unwrap();
        assert_eq!(version, "9.9.9");
    }

    #[test]
    fn reads_package_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{ "name": "docs", "version": "1.4.2", "private": true }"#).unwrap();
        assert_eq!(resolve_version(None, Some(path.as_path())).unwrap(), "1.4.2");
    }

    #[test]
    fn missing_named_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        let err = resolve_version(None, Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn missing_version_field_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{ "name": "docs" }"#).unwrap();
        let err = resolve_version(None, Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse version"));
    }
}
