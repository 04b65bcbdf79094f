use serde::Serialize;

/// Asset file naming rule.
///
/// Tiled maps and tilesets are looked up by name at runtime, so they keep
/// their original file name. Everything else gets a content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNaming {
    /// Matched case-insensitively against the second dot-separated segment
    pub unhashed_extensions: Vec<String>,
    pub unhashed: String,
    pub hashed: String,
}

impl Default for AssetNaming {
    fn default() -> Self {
        Self {
            unhashed_extensions: vec!["tmx".to_string(), "tsx".to_string()],
            unhashed: "assets/[name][extname]".to_string(),
            hashed: "assets/[name]-[hash][extname]".to_string(),
        }
    }
}

impl AssetNaming {
    /// Output pattern for an emitted asset
    pub fn pattern_for(&self, asset_name: &str) -> &str {
        if self.keeps_name(asset_name) {
            &self.unhashed
        } else {
            &self.hashed
        }
    }

    pub fn keeps_name(&self, asset_name: &str) -> bool {
        let Some(ext) = asset_name.split('.').nth(1) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.unhashed_extensions
            .iter()
            .any(|candidate| ext.contains(candidate.as_str()))
    }

    /// Expand the pattern for `asset_name` with the given content hash
    pub fn file_name(&self, asset_name: &str, hash: &str) -> String {
        let (name, extname) = match asset_name.rfind('.') {
            Some(0) | None => (asset_name, ""),
            Some(idx) => asset_name.split_at(idx),
        };
        self.pattern_for(asset_name)
            .replace("[name]", name)
            .replace("[hash]", hash)
            .replace("[extname]", extname)
    }
}
