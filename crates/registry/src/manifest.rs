use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs_err as fs;
use tracing::debug;

use crate::error::{Error, Result};

/// Descriptor manifest
///
/// A text resource with one search-path root per line. Lines are trimmed,
/// empty lines are skipped, and line order is preserved. Relative paths are
/// interpreted as written, against the process working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    search_paths: Vec<PathBuf>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ManifestNotFound { path: path.to_path_buf() }
            } else {
                Error::Io(e)
            }
        })?;

        let manifest = Self::parse(&content);
        debug!(
            "Loaded manifest {} listing {} search paths",
            path.display(),
            manifest.search_paths.len()
        );
        Ok(manifest)
    }

    /// Parse manifest text into search-path roots
    pub fn parse(content: &str) -> Self {
        let search_paths = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        Self { search_paths }
    }

    /// Search-path roots in manifest order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Whether the manifest lists no search paths
    pub fn is_empty(&self) -> bool {
        self.search_paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_line_order() {
        let manifest = Manifest::parse("proto/gen\nvendor/descriptors\n");
        assert_eq!(
            manifest.search_paths(),
            [PathBuf::from("proto/gen"), PathBuf::from("vendor/descriptors")]
        );
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let manifest = Manifest::parse("\n  proto/gen  \n\n\t\n");
        assert_eq!(manifest.search_paths(), [PathBuf::from("proto/gen")]);
    }

    #[test]
    fn test_parse_empty_content() {
        let manifest = Manifest::parse("");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_load_missing_manifest() {
        let err = Manifest::load(Path::new("no-such-manifest.txt")).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }
}
