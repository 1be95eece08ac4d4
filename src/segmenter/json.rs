use super::{Fragment, FragmentKind};
use crate::metadata::{keys, Metadata};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Nodes below this depth are dropped
pub const MAX_JSON_DEPTH: usize = 10;

/// Strings longer than this are worth a fragment of their own
pub const MIN_STRING_VALUE_LEN: usize = 20;

const MAX_OBJECT_PREVIEWS: usize = 5;
const MAX_ARRAY_PREVIEWS: usize = 3;
const PREVIEW_LEN: usize = 50;

/// Parse `content` without a nesting limit and segment it
///
/// Deep documents are parsed on a growable stack and dropped iteratively;
/// only the walk itself stops at [`MAX_JSON_DEPTH`].
pub fn segment_json(content: &str) -> Result<Vec<Fragment>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;

    let fragments = segment_value(&value);
    drop_iteratively(value);
    Ok(fragments)
}

/// Drop a value without recursing once per nesting level
fn drop_iteratively(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

/// Walk a parsed JSON document and emit fragments in post-order:
/// containers emit their summary after their worth-tokenizing children.
pub fn segment_value(value: &Value) -> Vec<Fragment> {
    let mut walker = JsonWalker::default();
    walker.walk(value, "root", 0);
    walker.fragments
}

#[derive(Default)]
struct JsonWalker {
    fragments: Vec<Fragment>,
}

impl JsonWalker {
    fn walk(&mut self, value: &Value, path: &str, depth: usize) {
        if depth > MAX_JSON_DEPTH {
            return;
        }

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    if is_worth_tokenizing(child) {
                        self.walk(child, &format!("{}.{}", path, key), depth + 1);
                    }
                }
                self.emit_object(map, path, depth);
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    if is_worth_tokenizing(child) {
                        self.walk(child, &format!("{}[{}]", path, index), depth + 1);
                    }
                }
                self.emit_array(items, path, depth);
            }
            Value::String(s) if s.chars().count() > MIN_STRING_VALUE_LEN => {
                let mut metadata = Metadata::new();
                metadata.insert(keys::PATH.into(), path.into());
                metadata.insert(keys::VALUE_TYPE.into(), "string".into());
                metadata.insert(keys::LENGTH.into(), s.chars().count().into());
                self.push(s.clone(), FragmentKind::JsonValue, path, metadata);
            }
            // short strings, numbers, booleans and null only show up in previews
            _ => {}
        }
    }

    fn emit_object(&mut self, map: &Map<String, Value>, path: &str, depth: usize) {
        let mut lines: Vec<String> = map
            .iter()
            .take(MAX_OBJECT_PREVIEWS)
            .map(|(key, value)| format!("{}: {}", key, preview(value)))
            .collect();
        if map.len() > MAX_OBJECT_PREVIEWS {
            lines.push(format!(
                "... and {} more properties",
                map.len() - MAX_OBJECT_PREVIEWS
            ));
        }
        let content = if lines.is_empty() {
            "{}".to_string()
        } else {
            lines.join("\n")
        };

        let mut metadata = Metadata::new();
        metadata.insert(keys::PATH.into(), path.into());
        metadata.insert(keys::PROPERTY_COUNT.into(), map.len().into());
        metadata.insert(keys::DEPTH.into(), depth.into());
        self.push(content, FragmentKind::JsonObject, path, metadata);
    }

    fn emit_array(&mut self, items: &[Value], path: &str, depth: usize) {
        let mut lines: Vec<String> = items
            .iter()
            .take(MAX_ARRAY_PREVIEWS)
            .enumerate()
            .map(|(index, value)| format!("[{}]: {}", index, preview(value)))
            .collect();
        if items.len() > MAX_ARRAY_PREVIEWS {
            lines.push(format!(
                "... and {} more items",
                items.len() - MAX_ARRAY_PREVIEWS
            ));
        }
        let content = if lines.is_empty() {
            "[]".to_string()
        } else {
            lines.join("\n")
        };

        let mut metadata = Metadata::new();
        metadata.insert(keys::PATH.into(), path.into());
        metadata.insert(keys::ARRAY_LENGTH.into(), items.len().into());
        metadata.insert(keys::DEPTH.into(), depth.into());
        self.push(content, FragmentKind::JsonArray, path, metadata);
    }

    fn push(&mut self, content: String, kind: FragmentKind, path: &str, metadata: Metadata) {
        self.fragments.push(Fragment {
            content,
            kind,
            order: self.fragments.len(),
            parent_key: Some(path.to_string()),
            metadata,
        });
    }
}

fn is_worth_tokenizing(value: &Value) -> bool {
    match value {
        Value::Object(_) | Value::Array(_) => true,
        Value::String(s) => s.chars().count() > MIN_STRING_VALUE_LEN,
        _ => false,
    }
}

/// Compact rendering, cut at `PREVIEW_LEN` characters
fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > PREVIEW_LEN {
        let cut: String = rendered.chars().take(PREVIEW_LEN).collect();
        format!("{}...", cut)
    } else {
        rendered
    }
}
