use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs_err as fs;
use once_cell::sync::OnceCell;
use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::scan;

/// [`DescriptorRegistry`] configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Path of the descriptor manifest
    pub manifest_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("descriptors.txt"),
        }
    }
}

/// Aggregated protobuf file descriptors behind a compute-once cache
///
/// The registry is the owner of the memoized result; hold it in the hosting
/// application context (typically inside an `Arc`) rather than as ambient
/// global state. Concurrent first calls serialize on the cache cell, so the
/// filesystem is read once and every caller observes the same allocation.
pub struct DescriptorRegistry {
    config: RegistryConfig,
    cache: OnceCell<Arc<[FileDescriptorProto]>>,
}

impl DescriptorRegistry {
    /// Registry constructor
    pub fn new(config: RegistryConfig) -> Self {
        Self { config, cache: OnceCell::new() }
    }

    /// Aggregated file descriptors for the manifest's search paths
    ///
    /// The first successful load is cached; subsequent calls return the same
    /// allocation without re-reading the filesystem. A failed load is not
    /// cached and is retried on the next call.
    pub fn file_descriptors(&self) -> Result<Arc<[FileDescriptorProto]>> {
        self.cache
            .get_or_try_init(|| {
                let descriptors = load_file_descriptors(&self.config.manifest_path)?;
                Ok(Arc::from(descriptors))
            })
            .cloned()
    }
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

/// Loads all file descriptors reachable from a manifest, uncached.
///
/// Reads the manifest, walks each listed search path for `.desc` files, and
/// decodes each file as a [`FileDescriptorSet`], flattening the contained
/// descriptors in encounter order: manifest-line order first, then traversal
/// order within each search path, then in-file order. Duplicates across
/// files are preserved.
pub fn load_file_descriptors(manifest_path: &Path) -> Result<Vec<FileDescriptorProto>> {
    let manifest = Manifest::load(manifest_path)?;

    let mut descriptors = Vec::new();
    for root in manifest.search_paths() {
        for file in scan::find_descriptor_files(root)? {
            let bytes = fs::read(&file)?;
            let set = FileDescriptorSet::decode(bytes.as_slice())
                .map_err(|source| Error::Decode { path: file.clone(), source })?;
            debug!("Decoded {} file descriptors from {}", set.file.len(), file.display());
            descriptors.extend(set.file);
        }
    }

    info!(
        "Aggregated {} file descriptors from manifest {}",
        descriptors.len(),
        manifest_path.display()
    );
    Ok(descriptors)
}
