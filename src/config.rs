//! Run configuration for token builds.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{TokenError, TokenResult};
use crate::resolver::{DEFAULT_IMAGE_EXTENSION, DEFAULT_TYPE_PREFIXES, ResolverRules};
use crate::token::TokenTemplate;

/// File name looked up in the working directory when no explicit configuration is given.
pub const DEFAULT_CONFIG_FILE: &str = "token_forge.config.json";

/// Discoverable configuration describing token defaults and resolver vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    /// Version written to `properties.xml`.
    pub format_version: String,
    /// MapTool token shape.
    pub token_shape: String,
    /// MapTool token type.
    pub token_type: String,
    /// Map layer tokens are placed on.
    pub layer: String,
    /// Extension of the source images.
    pub image_extension: String,
    /// Extension of the written archives.
    pub output_extension: String,
    /// Creature categories tried as image name prefixes, in priority order.
    pub type_prefixes: Vec<String>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        let template = TokenTemplate::default();
        Self {
            format_version: template.format_version,
            token_shape: template.token_shape,
            token_type: template.token_type,
            layer: template.layer,
            image_extension: DEFAULT_IMAGE_EXTENSION.into(),
            output_extension: template.output_extension,
            type_prefixes: DEFAULT_TYPE_PREFIXES.iter().map(|label| label.to_string()).collect(),
        }
    }
}

impl TokenConfig {
    /// Look for [`DEFAULT_CONFIG_FILE`] in `dir`.
    ///
    /// A missing or unparsable file yields the defaults so a plain run needs no setup.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file, ignoring errors.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Read configuration from a file the user asked for explicitly.
    pub fn load(path: &Path) -> TokenResult<Self> {
        let content = fs::read_to_string(path).map_err(TokenError::io(path))?;
        serde_json::from_str(&content).map_err(|source| TokenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolver rules for this configuration.
    pub fn to_rules(&self) -> ResolverRules {
        ResolverRules::new(self.type_prefixes.iter().cloned(), self.image_extension.as_str())
    }

    /// Token template for this configuration.
    pub fn to_template(&self) -> TokenTemplate {
        TokenTemplate {
            format_version: self.format_version.clone(),
            token_shape: self.token_shape.clone(),
            token_type: self.token_type.clone(),
            layer: self.layer.clone(),
            image_extension: self.image_extension.trim_start_matches('.').to_string(),
            output_extension: self.output_extension.trim_start_matches('.').to_string(),
        }
    }
}
