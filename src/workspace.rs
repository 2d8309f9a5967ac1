//! Workspace store: the directory tree the agent builds sites in.
//!
//! All tool and API file access goes through [`resolve`], which keeps paths
//! inside the workspace root. The workspace also knows how to derive folder
//! names from `mkdir` commands and how to pack a subfolder into a zip archive
//! for download.

use std::io::{Cursor, Read, Write};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Path escapes the workspace: {0}")]
    PathEscape(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Resolve a user- or model-supplied relative path inside the workspace.
///
/// Absolute paths and any `..` component are rejected. The returned path may
/// not exist yet; callers create it as needed.
pub fn resolve(workspace: &Path, relative: &str) -> Result<PathBuf, WorkspaceError> {
    let candidate = Path::new(relative);
    if candidate.is_absolute() {
        return Err(WorkspaceError::PathEscape(relative.to_string()));
    }
    for component in candidate.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(WorkspaceError::PathEscape(relative.to_string())),
        }
    }
    Ok(workspace.join(candidate))
}

/// Derive the created folder name from a `mkdir` shell command.
///
/// Returns the last non-flag token, stripped to `[A-Za-z0-9_-]`, so that
/// `mkdir -p portfolio-site` yields `portfolio-site`. Returns `None` when the
/// command is not a `mkdir` or no usable token remains.
pub fn folder_from_mkdir(command: &str) -> Option<String> {
    let trimmed = command.trim_start();
    if !trimmed.starts_with("mkdir ") {
        return None;
    }

    let folder = trimmed
        .split_whitespace()
        .rev()
        .find(|part| !part.starts_with('-') && !part.is_empty())?;

    let sanitized: String = folder
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if sanitized.is_empty() || sanitized == "mkdir" {
        None
    } else {
        Some(sanitized)
    }
}

/// Whether a folder name is safe to echo back to the client and use in URLs.
pub fn is_valid_folder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Pack a workspace subfolder into an in-memory zip archive.
///
/// Entry names are relative to the folder root, matching what a user expects
/// when unpacking `{folder}.zip`.
pub fn zip_folder(workspace: &Path, folder: &str) -> Result<Vec<u8>, WorkspaceError> {
    let root = resolve(workspace, folder)?;
    if !root.is_dir() {
        return Err(WorkspaceError::FolderNotFound(folder.to_string()));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        let relative = match path.strip_prefix(&root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let name = relative.to_string_lossy().replace('\\', "/");

        if path.is_dir() {
            writer.add_directory(name, options)?;
        } else if path.is_file() {
            writer.start_file(name, options)?;
            let mut file = std::fs::File::open(path)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            writer.write_all(&buf)?;
        }
    }

    Ok(writer.finish()?.into_inner())
}

/// Create the workspace root if it does not exist yet.
pub fn ensure_exists(workspace: &Path) -> Result<(), WorkspaceError> {
    std::fs::create_dir_all(workspace)?;
    Ok(())
}
