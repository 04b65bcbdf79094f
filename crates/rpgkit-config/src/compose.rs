//! Final composition hook.
//!
//! The last point where the bundler config can change. It receives the
//! fully resolved config and the project's raw `vite` override block and
//! returns the object handed to the bundler.

use serde_json::Value;

use crate::error::Result;

/// Turns the resolved config into the final bundler config.
///
/// Any `Fn(Value, &Value) -> Result<Value>` closure is a composer:
///
/// ```rust
/// use rpgkit_config::ConfigComposer;
/// use serde_json::{Value, json};
///
/// let composer = |mut resolved: Value, _overrides: &Value| -> rpgkit_config::Result<Value> {
///     resolved["clearScreen"] = json!(false);
///     Ok(resolved)
/// };
/// let out = composer.compose(json!({}), &Value::Null).unwrap();
/// assert_eq!(out["clearScreen"], json!(false));
/// ```
pub trait ConfigComposer: Send + Sync {
    fn compose(&self, resolved: Value, overrides: &Value) -> Result<Value>;
}

impl<F> ConfigComposer for F
where
    F: Fn(Value, &Value) -> Result<Value> + Send + Sync,
{
    fn compose(&self, resolved: Value, overrides: &Value) -> Result<Value> {
        self(resolved, overrides)
    }
}

/// Deep-merges the project overrides over the resolved config.
///
/// Empty override values (null, `""`, `[]`, `{}`) keep the resolved value.
/// An override block that is not a table is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComposer;

impl ConfigComposer for DefaultComposer {
    fn compose(&self, mut resolved: Value, overrides: &Value) -> Result<Value> {
        match overrides {
            Value::Object(_) => merge_non_empty(&mut resolved, overrides),
            Value::Null => {}
            other => tracing::warn!(value = %other, "ignoring `vite` block that is not a table"),
        }
        Ok(resolved)
    }
}

pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub fn merge_non_empty(target: &mut Value, update: &Value) {
    if is_empty_value(update) {
        return;
    }

    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match target_map.get_mut(key) {
                    Some(slot) => merge_non_empty(slot, value),
                    None if !is_empty_value(value) => {
                        target_map.insert(key.clone(), value.clone());
                    }
                    None => {}
                }
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_nested_objects() {
        let resolved = json!({
            "build": { "minify": false, "outDir": "/game/dist", "rollupOptions": { "output": { "dir": "/game/dist" } } },
            "mode": "production"
        });
        let overrides = json!({
            "build": { "sourcemap": true, "rollupOptions": { "output": { "manualChunks": { "pixi": ["pixi.js"] } } } },
            "base": "/play/"
        });

        let out = DefaultComposer.compose(resolved, &overrides).unwrap();
        assert_eq!(out["build"]["minify"], json!(false));
        assert_eq!(out["build"]["sourcemap"], json!(true));
        assert_eq!(out["build"]["rollupOptions"]["output"]["dir"], json!("/game/dist"));
        assert!(out["build"]["rollupOptions"]["output"]["manualChunks"].is_object());
        assert_eq!(out["base"], json!("/play/"));
    }

    #[test]
    fn empty_values_do_not_override() {
        let resolved = json!({ "root": ".", "plugins": [{ "name": "a" }], "define": { "x": 1 } });
        let overrides = json!({ "root": "", "plugins": [], "define": {}, "logLevel": null });

        let out = DefaultComposer.compose(resolved.clone(), &overrides).unwrap();
        assert_eq!(out, resolved);
    }

    #[test]
    fn scalars_and_arrays_replace() {
        let resolved = json!({ "build": { "minify": false }, "plugins": [{ "name": "a" }] });
        let overrides = json!({ "build": { "minify": "terser" }, "plugins": [{ "name": "b" }] });

        let out = DefaultComposer.compose(resolved, &overrides).unwrap();
        assert_eq!(out["build"]["minify"], json!("terser"));
        assert_eq!(out["plugins"], json!([{ "name": "b" }]));
    }

    #[test]
    fn non_table_override_keeps_resolved_config() {
        let resolved = json!({ "mode": "production", "build": { "minify": false } });

        for overrides in [json!(false), json!("x"), json!(3), json!([{ "name": "p" }])] {
            let out = DefaultComposer.compose(resolved.clone(), &overrides).unwrap();
            assert_eq!(out, resolved);
        }
    }

    #[test]
    fn closures_are_composers() {
        let composer = |mut resolved: Value, _overrides: &Value| -> Result<Value> {
            resolved["custom"] = json!(true);
            Ok(resolved)
        };
        let out = composer.compose(json!({}), &Value::Null).unwrap();
        assert_eq!(out["custom"], json!(true));
    }
}
