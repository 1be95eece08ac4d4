
use crate::config::CompilerConfig;
use crate::linkgraph::{parse_links, ProjectGraph};
use crate::metadata::keys;
use crate::sandbox::{FileEntry, Sandbox, SandboxError};
use crate::security::PathSanitizer;
use crate::segmenter::ContentKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("No *.{extension} project file found in sandbox")]
    NoProjectFile { extension: String },

    #[error(transparent)]
    Sandbox(#[from] SandboxError),
}

/// Compiles every file a project description references
///
/// The project file is parsed into a link graph, then each node with a
/// `file_path` gets its file segmented, built into blocks and analyzed.
pub struct ProjectCompiler {
    config: CompilerConfig,
}

impl ProjectCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Locate the project file in `sandbox` and compile its graph
    pub fn compile(&self, sandbox: &Sandbox) -> Result<ProjectGraph, ProjectError> {
        let project_entry = self.find_project_file(sandbox)?;
        let source = sandbox
            .get_text(&project_entry.virtual_path)
            .unwrap_or_default();

        let mut graph = parse_links(&source);
        let base_dir = project_entry.parent_dir();
        let mut compiled = 0usize;

        for node in &mut graph.nodes {
            let Some(file_path) = node.file_path.as_deref() else {
                continue;
            };

            let kind = ContentKind::from_path(file_path);
            let content_kind = kind.as_str();
            node.metadata.insert(keys::CONTENT_KIND.into(), content_kind.into());

            let Some(resolved) = locate(sandbox, base_dir, file_path) else {
                log::warn!(
                    "File '{}' referenced by node '{}' is not in the sandbox",
                    file_path,
                    node.name
                );
                node.metadata.insert(keys::MISSING_FILE.into(), true.into());
                continue;
            };

            let content = sandbox.get_text(&resolved).unwrap_or_default();
            node.parsed_content = Some(crate::compile(&content, kind, &resolved, &self.config));
            compiled += 1;
        }

        let project_file = project_entry.virtual_path.as_str();
        let metadata = &mut graph.metadata;
        metadata.insert(keys::PROJECT_FILE.into(), project_file.into());
        metadata.insert(keys::COMPILED_NODES.into(), compiled.into());

        log::debug!(
            "Compiled {} of {} nodes from {}",
            compiled,
            graph.len(),
            project_entry.virtual_path
        );

        Ok(graph)
    }

    fn find_project_file<'a>(&self, sandbox: &'a Sandbox) -> Result<&'a FileEntry, ProjectError> {
        let extension = self.config.project_extension.trim_start_matches('.');
        let candidates = sandbox.find_by_extension(extension);

        if candidates.len() > 1 {
            log::warn!(
                "Found {} *.{} files, using {}",
                candidates.len(),
                extension,
                candidates[0].virtual_path
            );
        }

        candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProjectError::NoProjectFile {
                extension: extension.to_string(),
            })
    }
}

/// Resolve a node's file reference against the project file's directory,
/// then against the sandbox root
fn locate(sandbox: &Sandbox, base_dir: &str, reference: &str) -> Option<String> {
    let relative = PathSanitizer::resolve_relative(base_dir, reference);
    let from_root = PathSanitizer::sanitize(reference);

    [relative, from_root]
        .into_iter()
        .filter_map(Result::ok)
        .find(|path| sandbox.get_entry(path).is_some())
}
