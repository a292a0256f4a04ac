use std::path::{Path, PathBuf};

use fs_err as fs;

use crate::error::{Error, Result};

/// File extension of descriptor-set binaries
pub const DESCRIPTOR_EXTENSION: &str = "desc";

/// Recursively collect descriptor-set files beneath a search root
///
/// Files are returned in directory-entry order, which is not guaranteed to
/// be sorted. A root (or subdirectory) that is missing or unreadable is an
/// error; a root containing no descriptor-set files is an empty result.
pub fn find_descriptor_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(root, &mut files)?;
    Ok(files)
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|source| Error::SearchPath { path: dir.to_path_buf(), source })?;

    for entry in entries {
        let entry =
            entry.map_err(|source| Error::SearchPath { path: dir.to_path_buf(), source })?;
        let path = entry.path();

        if path.is_dir() {
            collect(&path, files)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(DESCRIPTOR_EXTENSION) {
            files.push(path);
        }
    }

    Ok(())
}
