use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const STATIC_SITE: &str = "StaticSite";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct FeatureToggles {
    #[serde(flatten)]
    pub flags: HashMap<String, bool>,
}

impl FeatureToggles {
    // Load from a provided path or env var FEATURE_TOGGLES_PATH, defaulting to ./feature-toggles.json
    pub fn from_path(path: Option<String>) -> Self {
        let default_path = std::env::var("FEATURE_TOGGLES_PATH")
            .unwrap_or_else(|_| "feature-toggles.json".to_string());
        let path = path.unwrap_or(default_path);
        Self::read(Path::new(&path))
    }

    pub fn from_env_path() -> Self {
        Self::from_path(None)
    }

    // Missing file is normal; an unparsable one is worth a warning.
    fn read(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return FeatureToggles::default(),
        };
        match serde_json::from_str(&content) {
            Ok(toggles) => toggles,
            Err(e) => {
                tracing::warn!("Ignoring invalid feature toggles file {}: {}", path.display(), e);
                FeatureToggles::default()
            }
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn is_enabled_or(&self, name: &str, default: bool) -> bool {
        self.flags.get(name).copied().unwrap_or(default)
    }

    // Serve the bundled front end from STATIC_DIR. On unless switched off.
    pub fn static_site_enabled(&self) -> bool {
        self.is_enabled_or(STATIC_SITE, true)
    }

    pub fn enabled_features(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .flags
            .iter()
            .filter(|(_, &enabled)| enabled)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}
