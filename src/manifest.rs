//! Workflow manifest templating.
//!
//! Workflow parameter manifests are stored as a region-neutral template
//! containing `{aws-region}` markers. Rendering writes one copy per region to
//! `<out_dir>/<region>/<region>.json`, ready to be uploaded to the input
//! bucket.
//!
//! [`substitute_placeholders`] handles the more general case of JSON values
//! whose entire string content is a `{key}` placeholder.

use crate::env::FileEnv;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const REGION_MARKER: &str = "{aws-region}";

/// Replace every region marker in `template` and append a trailing newline.
pub fn render_region(template: &str, region: &str) -> String {
    let mut rendered = template.replace(REGION_MARKER, region);
    rendered.push('\n');
    rendered
}

/// Destination directory and file for a region's manifest.
pub fn regional_paths(out_dir: &Path, region: &str) -> (PathBuf, PathBuf) {
    let folder = out_dir.join(region);
    let file = folder.join(format!("{region}.json"));
    (folder, file)
}

/// Render `template_path` for `region` into `out_dir`, returning the folder
/// the manifest was written to.
pub fn write_regional_manifest(
    fs: &dyn FileEnv,
    template_path: &Path,
    out_dir: &Path,
    region: &str,
) -> Result<PathBuf> {
    if region.is_empty() {
        return Err(Error::Manifest("region cannot be empty".to_string()));
    }
    if region.contains(['/', '\\']) || region == "." || region == ".." {
        return Err(Error::Manifest(format!("invalid region name: {region}")));
    }

    let template = fs.read_to_string(template_path).map_err(|e| {
        Error::Manifest(format!(
            "failed to read template {}: {e}",
            template_path.display()
        ))
    })?;

    let (folder, file) = regional_paths(out_dir, region);
    fs.create_dir_all(&folder)?;
    fs.write(&file, &render_region(&template, region))?;

    info!(region, path = %file.display(), "wrote regional manifest");
    Ok(folder)
}

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{.+\}$").expect("Valid regex pattern"));

/// Replace a single value if it is a whole-string `{key}` placeholder whose
/// key maps to a non-empty value. Anything else is returned unchanged.
///
/// The lookup key is the placeholder text with every `{`, `|` and `}`
/// removed, so `{a|b}` looks up `ab`. Mapped values that are `null`, `false`,
/// zero or the empty string leave the placeholder in place.
pub fn replace_placeholder(value: Value, mapping: &HashMap<String, Value>) -> Value {
    let Value::String(text) = &value else {
        return value;
    };
    if !PLACEHOLDER_REGEX.is_match(text) {
        return value;
    }

    let key: String = text.chars().filter(|c| !matches!(c, '{' | '|' | '}')).collect();
    match mapping.get(&key).filter(|replacement| !is_blank(replacement)) {
        Some(replacement) => {
            debug!(key = %key, "substituted placeholder");
            replacement.clone()
        }
        None => value,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Walk a JSON document replacing placeholders at every depth.
pub fn substitute_placeholders(value: Value, mapping: &HashMap<String, Value>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| substitute_placeholders(item, mapping))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k, substitute_placeholders(v, mapping)))
                .collect::<Map<String, Value>>(),
        ),
        other => replace_placeholder(other, mapping),
    }
}
