/// Location of a single file in the sandbox arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Byte offset into the arena
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// Sanitized virtual path (e.g., "Files/File1.doc")
    pub virtual_path: String,
}

impl FileEntry {
    /// Lowercased extension of the virtual path, without the dot
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.virtual_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Directory part of the virtual path ("" for top-level files)
    pub fn parent_dir(&self) -> &str {
        self.virtual_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}
