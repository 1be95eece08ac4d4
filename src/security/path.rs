use crate::sandbox::SandboxError;
use std::path::{Component, Path};

pub struct PathSanitizer;

impl PathSanitizer {
    /// Sanitize a path from an archive or a directory walk to prevent:
    /// - Directory traversal (../)
    /// - Absolute paths (/etc/passwd)
    /// - Zip slip attacks
    ///
    /// Backslashes are treated as separators. Hidden files (starting with .)
    /// are allowed. Returns a normalized virtual path or an error.
    pub fn sanitize(raw_path: &str) -> Result<String, SandboxError> {
        Self::sanitize_with_options(raw_path, true)
    }

    /// Sanitize with custom options
    pub fn sanitize_with_options(
        raw_path: &str,
        allow_hidden: bool,
    ) -> Result<String, SandboxError> {
        if raw_path.is_empty() {
            return Err(SandboxError::InvalidPath("Empty path".to_string()));
        }

        let normalized = raw_path.replace('\\', "/");
        let mut components = Vec::new();

        for component in Path::new(&normalized).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(SandboxError::InvalidPath(format!(
                        "Absolute path not allowed: {}",
                        raw_path
                    )));
                }
                Component::ParentDir => {
                    return Err(SandboxError::InvalidPath(format!(
                        "Parent directory traversal not allowed: {}",
                        raw_path
                    )));
                }
                Component::CurDir => continue,
                Component::Normal(part) => {
                    let part = normal_part(part, raw_path)?;
                    if !allow_hidden && part.starts_with('.') {
                        return Err(SandboxError::InvalidPath(format!(
                            "Hidden files not allowed: {}",
                            raw_path
                        )));
                    }
                    components.push(part);
                }
            }
        }

        if components.is_empty() {
            return Err(SandboxError::InvalidPath(format!(
                "No valid components: {}",
                raw_path
            )));
        }

        Ok(components.join("/"))
    }

    /// Resolve a file reference relative to a directory inside the sandbox
    ///
    /// `..` may climb back out of `base_dir` but never above the sandbox
    /// root. An absolute reference is taken relative to the sandbox root.
    pub fn resolve_relative(base_dir: &str, reference: &str) -> Result<String, SandboxError> {
        let reference = reference.replace('\\', "/");
        let mut components: Vec<&str> = Vec::new();

        let from_root = reference.starts_with('/');
        if !from_root {
            components.extend(base_dir.split('/').filter(|p| !p.is_empty() && *p != "."));
        }

        for component in Path::new(&reference).components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => continue,
                Component::ParentDir => {
                    if components.pop().is_none() {
                        return Err(SandboxError::InvalidPath(format!(
                            "Reference escapes the sandbox root: {}",
                            reference
                        )));
                    }
                }
                Component::Normal(part) => components.push(normal_part(part, &reference)?),
            }
        }

        if components.is_empty() {
            return Err(SandboxError::InvalidPath(format!(
                "No valid components: {}",
                reference
            )));
        }

        Ok(components.join("/"))
    }
}

fn normal_part<'a>(part: &'a std::ffi::OsStr, raw_path: &str) -> Result<&'a str, SandboxError> {
    part.to_str()
        .ok_or_else(|| SandboxError::InvalidPath(format!("Invalid UTF-8 in path: {}", raw_path)))
}
