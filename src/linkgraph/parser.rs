use super::graph::{identity_key, ProjectGraph};
use crate::metadata::keys;
use std::path::Path;

/// A link declaration waiting for the second pass
#[derive(Debug)]
struct PendingLinks {
    line: usize,
    parent: String,
    children: Vec<String>,
}

/// What the value side of a `name: value` line declares
#[derive(Debug, PartialEq)]
enum Statement<'a> {
    Links(Vec<&'a str>),
    File(&'a str),
    Empty,
}

/// Parse link notation into a project graph
///
/// ```text
/// # comment
/// Dogs: Files/File1.doc      file mapping
/// Animals: (Dogs Cats)       link list
/// Zoo: Animals               bare link
/// ```
///
/// Pass one registers every named node and applies file mappings as they
/// are read; pass two resolves the collected link declarations,
/// synthesizing placeholder nodes for names never declared on their own.
pub fn parse_links(content: &str) -> ProjectGraph {
    let mut graph = ProjectGraph::new();
    let mut pending: Vec<PendingLinks> = Vec::new();
    let mut skipped_lines = 0usize;

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            log::warn!("Line {line_no}: missing ':' separator, skipping: {line}");
            skipped_lines += 1;
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            log::warn!("Line {line_no}: empty node name, skipping: {line}");
            skipped_lines += 1;
            continue;
        }

        let id = graph.get_or_insert(name);
        match classify_value(value) {
            Statement::Links(children) => pending.push(PendingLinks {
                line: line_no,
                parent: identity_key(name),
                children: children.into_iter().map(str::to_string).collect(),
            }),
            Statement::File(path) => {
                if let Some(node) = graph.node_mut(id) {
                    node.file_path = Some(path.to_string());
                }
            }
            Statement::Empty => {}
        }
    }

    resolve_links(&mut graph, pending);
    graph.infer_roots();

    let placeholders = graph.nodes.iter().filter(|n| n.is_placeholder()).count();
    let total_nodes = graph.nodes.len();
    let total_roots = graph.roots.len();

    let metadata = &mut graph.metadata;
    metadata.insert(keys::TOTAL_NODES.into(), total_nodes.into());
    metadata.insert(keys::TOTAL_ROOTS.into(), total_roots.into());
    metadata.insert(keys::PLACEHOLDER_NODES.into(), placeholders.into());
    metadata.insert(keys::SKIPPED_LINES.into(), skipped_lines.into());

    log::debug!(
        "Parsed link graph: {} nodes, {} roots, {} placeholders",
        total_nodes,
        total_roots,
        placeholders
    );

    graph
}

/// Second pass: attach children to parents, creating placeholders as needed
fn resolve_links(graph: &mut ProjectGraph, pending: Vec<PendingLinks>) {
    for decl in pending {
        let Some(parent) = graph.find(&decl.parent) else {
            log::warn!(
                "Line {}: parent '{}' is not registered, skipping its links",
                decl.line,
                decl.parent
            );
            continue;
        };

        for child_name in &decl.children {
            let child = match graph.find(child_name) {
                Some(id) => id,
                None => graph.insert_placeholder(child_name),
            };
            graph.link(parent, child);
        }
    }
}

fn classify_value(value: &str) -> Statement<'_> {
    if value.is_empty() {
        return Statement::Empty;
    }

    if let Some(inner) = value
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return Statement::Links(inner.split_whitespace().collect());
    }

    if is_bare_reference(value) {
        return Statement::Links(vec![value]);
    }

    Statement::File(value)
}

/// A single token with no path separator, parenthesis or file extension
fn is_bare_reference(value: &str) -> bool {
    !value.contains(['/', '\\', '(', ')'])
        && !value.contains(char::is_whitespace)
        && Path::new(value).extension().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_forms() {
        assert_eq!(classify_value("(A B  C)"), Statement::Links(vec!["A", "B", "C"]));
        assert_eq!(classify_value("()"), Statement::Links(vec![]));
        assert_eq!(classify_value("Animals"), Statement::Links(vec!["Animals"]));
        assert_eq!(classify_value("File3.doc"), Statement::File("File3.doc"));
        assert_eq!(classify_value("Files/File1"), Statement::File("Files/File1"));
        assert_eq!(classify_value(r"docs\readme"), Statement::File(r"docs\readme"));
        assert_eq!(classify_value("two words"), Statement::File("two words"));
        assert_eq!(classify_value("(unclosed"), Statement::File("(unclosed"));
        assert_eq!(classify_value(""), Statement::Empty);
    }
}
