//! `${key}` placeholder expansion against a descriptor and its ancestors.
//!
//! Lookup order for a key:
//! 1. `project.groupId` and `project.version` read the descriptor's own values.
//! 2. The effective counterpart's properties, when one exists.
//! 3. The `properties` of the descriptor, then its parent, then the
//!    grandparent; the closest definition wins.
//!
//! A key that cannot be found at the top level stays in the output verbatim
//! and is logged. A property value that itself references a missing key, or
//! references itself, is an error: expanding it partially would put corrupt
//! text into the generated build.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::PomError;
use crate::descriptor::DescriptorId;
use crate::project::Workspace;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// Whether `text` still contains a `${...}` placeholder.
#[must_use]
pub fn has_placeholder(text: &str) -> bool {
    placeholder().is_match(text)
}

/// Expand every `${key}` in `text` in the context of descriptor `id`.
pub fn interpolate(workspace: &Workspace, text: &str, id: DescriptorId) -> Result<String, PomError> {
    let mut expanding = Vec::new();
    expand(workspace, text, id, &mut expanding)
}

/// Look up a property without expanding its value.
#[must_use]
pub fn lookup_property<'w>(workspace: &'w Workspace, key: &str, id: DescriptorId) -> Option<&'w str> {
    let descriptor = &workspace[id];
    match key {
        "project.groupId" => return descriptor.group_id.as_deref(),
        "project.version" => return descriptor.version.as_deref(),
        _ => {}
    }
    if let Some(value) = workspace.effective_of(id).and_then(|e| e.properties.get(key)) {
        return Some(value.as_str());
    }
    workspace
        .ancestors(id)
        .find_map(|ancestor| workspace[ancestor].properties.get(key))
        .map(String::as_str)
}

fn expand(
    workspace: &Workspace,
    text: &str,
    id: DescriptorId,
    expanding: &mut Vec<String>,
) -> Result<String, PomError> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for captures in placeholder().captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        let key = &captures[1];
        result.push_str(&text[last..whole.start()]);
        last = whole.end();

        if expanding.iter().any(|k| k == key) {
            return Err(nested_error(workspace, expanding, key, text, id));
        }

        match lookup_property(workspace, key, id) {
            Some(value) => {
                expanding.push(key.to_string());
                let expanded = expand(workspace, value, id, expanding)?;
                expanding.pop();
                result.push_str(&expanded);
            }
            None if expanding.is_empty() => {
                tracing::info!("Unresolved property ${{{key}}} in {}", workspace[id].id_and_path());
                result.push_str(whole.as_str());
            }
            None => return Err(nested_error(workspace, expanding, key, text, id)),
        }
    }

    result.push_str(&text[last..]);
    Ok(result)
}

fn nested_error(
    workspace: &Workspace,
    expanding: &[String],
    missing: &str,
    value: &str,
    id: DescriptorId,
) -> PomError {
    let key = expanding.last().map_or(missing, String::as_str);
    PomError::UnresolvedNestedProperty {
        key: key.to_string(),
        value: value.to_string(),
        coordinate: workspace[id].id_and_path(),
    }
}
