mod entry;
mod error;


pub use entry::FileEntry;
pub use error::SandboxError;

use crate::security::PathSanitizer;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use walkdir::WalkDir;

/// Immutable in-memory file store for one multi-file project
pub struct Sandbox {
    /// Single contiguous blob containing all file data
    arena: Vec<u8>,
    /// Virtual path -> arena slice, sorted by path
    index: BTreeMap<String, FileEntry>,
}

/// Mutable builder for constructing a sandbox
pub struct SandboxBuilder {
    arena: Vec<u8>,
    index: BTreeMap<String, FileEntry>,
    max_file_size: u64,
    max_total_size: u64,
}

impl SandboxBuilder {
    /// Create a new builder with default limits
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            index: BTreeMap::new(),
            max_file_size: 10 * 1024 * 1024,   // 10 MB per file
            max_total_size: 100 * 1024 * 1024, // 100 MB total
        }
    }

    /// Set maximum individual file size
    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set maximum total arena size
    pub fn max_total_size(mut self, size: u64) -> Self {
        self.max_total_size = size;
        self
    }

    /// Add a file to the sandbox arena
    pub fn add_file(&mut self, raw_path: &str, data: &[u8]) -> Result<(), SandboxError> {
        let virtual_path = PathSanitizer::sanitize(raw_path)?;

        if data.len() as u64 > self.max_file_size {
            return Err(SandboxError::FileTooLarge {
                size: data.len() as u64,
                max: self.max_file_size,
            });
        }

        let new_total = self.arena.len() as u64 + data.len() as u64;
        if new_total > self.max_total_size {
            return Err(SandboxError::FileTooLarge {
                size: new_total,
                max: self.max_total_size,
            });
        }

        let offset = self.arena.len();
        self.arena.extend_from_slice(data);

        self.index.insert(
            virtual_path.clone(),
            FileEntry {
                offset,
                length: data.len(),
                virtual_path,
            },
        );

        Ok(())
    }

    /// Extract every file of an in-memory ZIP archive into the arena
    pub fn ingest_zip(mut self, bytes: &[u8]) -> Result<Self, SandboxError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| SandboxError::ZipParseFailed(e.to_string()))?;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| SandboxError::ZipParseFailed(e.to_string()))?;

            if file.is_dir() {
                continue;
            }

            let raw_path = file.name().to_string();

            // Refuse to inflate entries that claim to be over the limit
            if file.size() > self.max_file_size {
                return Err(SandboxError::FileTooLarge {
                    size: file.size(),
                    max: self.max_file_size,
                });
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)
                .map_err(|e| SandboxError::ZipParseFailed(e.to_string()))?;

            self.add_file(&raw_path, &contents)?;
        }

        log::debug!("Ingested {} files from ZIP archive", self.index.len());
        Ok(self)
    }

    /// Load every regular file under `root`, keyed by its path relative to `root`
    pub fn ingest_directory(mut self, root: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let root = root.as_ref();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned();

            let data = std::fs::read(path).map_err(|source| SandboxError::Io {
                path: path.display().to_string(),
                source,
            })?;

            self.add_file(&relative, &data)?;
        }

        log::debug!(
            "Ingested {} files from {}",
            self.index.len(),
            root.display()
        );
        Ok(self)
    }

    /// Build the immutable sandbox
    pub fn build(self) -> Sandbox {
        Sandbox {
            arena: self.arena,
            index: self.index,
        }
    }
}

impl Default for SandboxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Get a file's contents as a byte slice (zero-copy)
    pub fn get(&self, virtual_path: &str) -> Option<&[u8]> {
        self.index
            .get(virtual_path)
            .map(|entry| &self.arena[entry.offset..entry.offset + entry.length])
    }

    /// Get a file's contents as text, replacing invalid UTF-8
    pub fn get_text(&self, virtual_path: &str) -> Option<Cow<'_, str>> {
        self.get(virtual_path).map(String::from_utf8_lossy)
    }

    /// List all files, sorted by virtual path
    pub fn list(&self) -> impl Iterator<Item = &FileEntry> {
        self.index.values()
    }

    /// All files with the given extension (case-insensitive, without dot)
    pub fn find_by_extension(&self, extension: &str) -> Vec<&FileEntry> {
        let wanted = extension.trim_start_matches('.').to_lowercase();
        self.index
            .values()
            .filter(|entry| entry.extension().as_deref() == Some(wanted.as_str()))
            .collect()
    }

    /// Get metadata for a file without reading contents
    pub fn get_entry(&self, virtual_path: &str) -> Option<&FileEntry> {
        self.index.get(virtual_path)
    }

    /// Get the total number of files
    pub fn file_count(&self) -> usize {
        self.index.len()
    }

    /// Get the total arena size in bytes
    pub fn total_size(&self) -> usize {
        self.arena.len()
    }
}
