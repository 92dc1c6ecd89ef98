//! Semantic rules checked after structural validation.

use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value};

use crate::error::{Violation, Violations};

const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Upper bound on chained `$ref` hops when resolving a reference.
const MAX_REF_HOPS: usize = 32;

/// Run every semantic rule, collecting all violations.
pub fn check(root: &Value) -> Result<(), Violations> {
    let mut violations = Vec::new();
    check_references(root, &mut violations);
    check_operation_ids(root, &mut violations);
    check_path_parameters(root, &mut violations);
    Violations::into_result(violations)
}

// ---------------------------------------------------------------------------
// JSON pointer helpers
// ---------------------------------------------------------------------------

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn child(pointer: &str, token: &str) -> String {
    format!("{pointer}/{}", escape_token(token))
}

/// Decode `%XX` escapes in a URI fragment. Invalid escapes are kept verbatim.
fn percent_decode(fragment: &str) -> String {
    let bytes = fragment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = fragment.get(i + 1..i + 3)
            && let Ok(byte) = u8::from_str_radix(hex, 16)
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Resolve a local reference (`#/...`). Returns `None` for remote references
/// and for local ones that point nowhere.
fn resolve_local<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    let fragment = reference.strip_prefix('#')?;
    root.pointer(&percent_decode(fragment))
}

/// Follow `$ref` chains starting at `value`. Returns `None` if a local
/// reference is dangling, remote, or the chain is too long.
fn deref<'a>(root: &'a Value, value: &'a Value) -> Option<&'a Value> {
    let mut current = value;
    for _ in 0..MAX_REF_HOPS {
        match current.get("$ref").and_then(Value::as_str) {
            Some(reference) => current = resolve_local(root, reference)?,
            None => return Some(current),
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Rule: local references resolve
// ---------------------------------------------------------------------------

/// Keywords whose values are free-form data, never document structure.
const DATA_KEYWORDS: &[&str] = &["example", "default", "enum", "const"];

/// Keywords whose values map user-chosen names to document objects. Keys
/// inside these maps are names, so a property called `example` or a response
/// called `default` is still walked.
const NAME_MAP_KEYWORDS: &[&str] = &[
    "paths",
    "webhooks",
    "schemas",
    "responses",
    "parameters",
    "requestBodies",
    "headers",
    "securitySchemes",
    "links",
    "callbacks",
    "pathItems",
    "content",
    "encoding",
    "variables",
    "properties",
    "patternProperties",
    "definitions",
    "$defs",
    "dependentSchemas",
];

/// What kind of node the reference walk is looking at.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    /// An OpenAPI or Schema object: `$ref` is checked, data keywords skipped.
    Object,
    /// A map from names to objects.
    NameMap,
    /// An `examples` value: a map of Example objects, or (in a 3.1 schema) a
    /// list of sample values.
    Examples,
    /// An Example object, whose `value` is sample data.
    Example,
}

impl Position {
    fn of_key(key: &str) -> Self {
        if key == "examples" {
            Self::Examples
        } else if NAME_MAP_KEYWORDS.contains(&key) {
            Self::NameMap
        } else {
            Self::Object
        }
    }
}

struct ReferenceCheck<'a> {
    root: &'a Value,
    anchors: BTreeSet<&'a str>,
}

impl<'a> ReferenceCheck<'a> {
    fn new(root: &'a Value) -> Self {
        let mut anchors = BTreeSet::new();
        collect_anchors(root, &mut anchors);
        Self { root, anchors }
    }

    fn walk(&self, node: &Value, pointer: &str, position: Position, out: &mut Vec<Violation>) {
        match (node, position) {
            (Value::Array(_), Position::Examples) => {}
            (Value::Array(items), _) => {
                for (i, item) in items.iter().enumerate() {
                    self.walk(item, &child(pointer, &i.to_string()), Position::Object, out);
                }
            }
            (Value::Object(map), Position::NameMap) => {
                for (name, value) in map {
                    self.walk(value, &child(pointer, name), Position::Object, out);
                }
            }
            (Value::Object(map), Position::Examples) => {
                for (name, value) in map {
                    self.walk(value, &child(pointer, name), Position::Example, out);
                }
            }
            (Value::Object(map), Position::Object | Position::Example) => {
                if let Some(Value::String(reference)) = map.get("$ref") {
                    self.check(reference, child(pointer, "$ref"), out);
                }
                for (key, value) in map {
                    let data = DATA_KEYWORDS.contains(&key.as_str())
                        || key.starts_with("x-")
                        || (position == Position::Example && key == "value");
                    if !data {
                        self.walk(value, &child(pointer, key), Position::of_key(key), out);
                    }
                }
            }
            _ => {}
        }
    }

    fn check(&self, reference: &str, pointer: String, out: &mut Vec<Violation>) {
        let Some(fragment) = reference.strip_prefix('#') else {
            tracing::debug!(%reference, "skipping non-local reference");
            return;
        };
        let resolved = if fragment.is_empty() || fragment.starts_with('/') {
            resolve_local(self.root, reference).is_some()
        } else {
            self.anchors.contains(percent_decode(fragment).as_str())
        };
        if !resolved {
            out.push(Violation::new(
                pointer,
                format!("unresolvable reference '{reference}'"),
            ));
        }
    }
}

/// Every `$anchor` and `$dynamicAnchor` name in the document.
fn collect_anchors<'a>(node: &'a Value, anchors: &mut BTreeSet<&'a str>) {
    match node {
        Value::Object(map) => {
            for key in ["$anchor", "$dynamicAnchor"] {
                if let Some(name) = map.get(key).and_then(Value::as_str) {
                    anchors.insert(name);
                }
            }
            for value in map.values() {
                collect_anchors(value, anchors);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_anchors(item, anchors);
            }
        }
        _ => {}
    }
}

fn check_references(root: &Value, out: &mut Vec<Violation>) {
    ReferenceCheck::new(root).walk(root, "", Position::Object, out);
}

// ---------------------------------------------------------------------------
// Rule: operationId values are unique
// ---------------------------------------------------------------------------

/// Every operation under `paths` and `webhooks`, with its JSON pointer.
fn operations(root: &Value) -> Vec<(String, &Value)> {
    let mut found = Vec::new();
    for section in ["paths", "webhooks"] {
        let Some(items) = root.get(section).and_then(Value::as_object) else {
            continue;
        };
        for (name, item) in items {
            let item_pointer = child(&format!("/{section}"), name);
            let Some(item) = deref(root, item).and_then(Value::as_object) else {
                continue;
            };
            for method in HTTP_METHODS {
                if let Some(operation) = item.get(*method) {
                    found.push((child(&item_pointer, method), operation));
                }
            }
        }
    }
    found
}

fn check_operation_ids(root: &Value, out: &mut Vec<Violation>) {
    let mut seen: HashMap<&str, String> = HashMap::new();
    for (pointer, operation) in operations(root) {
        let Some(id) = operation.get("operationId").and_then(Value::as_str) else {
            continue;
        };
        if let Some(first) = seen.get(id) {
            out.push(Violation::new(
                child(&pointer, "operationId"),
                format!("duplicate operationId '{id}' (first used at {first})"),
            ));
        } else {
            seen.insert(id, pointer);
        }
    }
}

// ---------------------------------------------------------------------------
// Rule: path template parameters are declared, and declared ones are used
// ---------------------------------------------------------------------------

/// Names inside `{...}` in a path template, in order of appearance.
fn template_names(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

/// A parameter after reference resolution.
struct Param<'a> {
    name: &'a str,
    location: &'a str,
    required: bool,
    pointer: String,
}

/// Resolve a parameter list, reporting duplicate (name, in) pairs.
fn collect_params<'a>(
    root: &'a Value,
    list: Option<&'a Value>,
    pointer: &str,
    out: &mut Vec<Violation>,
) -> Vec<Param<'a>> {
    let mut params: Vec<Param<'a>> = Vec::new();
    let Some(items) = list.and_then(Value::as_array) else {
        return params;
    };
    for (i, raw) in items.iter().enumerate() {
        // Dangling references are already reported by the reference rule.
        let Some(param) = deref(root, raw) else {
            continue;
        };
        let (Some(name), Some(location)) = (
            param.get("name").and_then(Value::as_str),
            param.get("in").and_then(Value::as_str),
        ) else {
            continue;
        };
        let param_pointer = child(pointer, &i.to_string());
        if params
            .iter()
            .any(|p| p.name == name && p.location == location)
        {
            out.push(Violation::new(
                param_pointer,
                format!("duplicate parameter '{name}' in {location}"),
            ));
            continue;
        }
        params.push(Param {
            name,
            location,
            required: param.get("required").and_then(Value::as_bool) == Some(true),
            pointer: param_pointer,
        });
    }
    params
}

fn check_path_parameters(root: &Value, out: &mut Vec<Violation>) {
    let Some(paths) = root.get("paths").and_then(Value::as_object) else {
        return;
    };
    for (path, item) in paths {
        if !path.starts_with('/') {
            continue;
        }
        let item_pointer = child("/paths", path);
        let Some(item) = deref(root, item).and_then(Value::as_object) else {
            continue;
        };
        check_path_item(root, path, item, &item_pointer, out);
    }
}

fn check_path_item(
    root: &Value,
    path: &str,
    item: &Map<String, Value>,
    item_pointer: &str,
    out: &mut Vec<Violation>,
) {
    let template: BTreeSet<&str> = template_names(path).into_iter().collect();
    let shared = collect_params(
        root,
        item.get("parameters"),
        &child(item_pointer, "parameters"),
        out,
    );

    for method in HTTP_METHODS {
        let Some(operation) = item.get(*method) else {
            continue;
        };
        let op_pointer = child(item_pointer, method);
        let own = collect_params(
            root,
            operation.get("parameters"),
            &child(&op_pointer, "parameters"),
            out,
        );

        // Operation-level parameters override path-level ones with the same (name, in).
        let effective: Vec<&Param<'_>> = own
            .iter()
            .chain(shared.iter().filter(|s| {
                !own.iter()
                    .any(|o| o.name == s.name && o.location == s.location)
            }))
            .collect();

        for name in &template {
            let declared = effective
                .iter()
                .any(|p| p.location == "path" && p.name == *name);
            if !declared {
                out.push(Violation::new(
                    op_pointer.clone(),
                    format!("path parameter '{name}' in '{path}' is not declared"),
                ));
            }
        }

        for param in effective.iter().filter(|p| p.location == "path") {
            if !template.contains(param.name) {
                out.push(Violation::new(
                    param.pointer.clone(),
                    format!(
                        "path parameter '{}' does not appear in path '{path}'",
                        param.name
                    ),
                ));
            }
            if !param.required {
                out.push(Violation::new(
                    param.pointer.clone(),
                    format!("path parameter '{}' must have 'required: true'", param.name),
                ));
            }
        }
    }
}
