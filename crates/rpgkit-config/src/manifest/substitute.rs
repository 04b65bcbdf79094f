use indexmap::IndexMap;
use serde_json::Value;

/// Prefix marking a string value as an environment placeholder (`$ENV:NAME`)
pub const ENV_PLACEHOLDER: &str = "$ENV:";

/// Keys starting with this marker are internal and left untouched
pub const INTERNAL_KEY_MARKER: char = '_';

/// Replace `$ENV:NAME` string values with `envs[NAME]`, recursively.
///
/// Unknown variables become the empty string. Objects under keys that start
/// with [`INTERNAL_KEY_MARKER`] are neither substituted nor descended into.
pub fn replace_env_vars(value: &mut Value, envs: &IndexMap<String, String>) {
    match value {
        Value::String(s) => {
            if let Some(name) = s.strip_prefix(ENV_PLACEHOLDER) {
                let replacement = envs.get(name.trim()).cloned().unwrap_or_else(|| {
                    tracing::warn!(variable = name, "environment placeholder has no value");
                    String::new()
                });
                *s = replacement;
            }
        }
        Value::Array(items) => {
            for item in items {
                replace_env_vars(item, envs);
            }
        }
        Value::Object(map) => {
            for (key, item) in map.iter_mut() {
                if key.starts_with(INTERNAL_KEY_MARKER) {
                    continue;
                }
                replace_env_vars(item, envs);
            }
        }
        _ => {}
    }
}
