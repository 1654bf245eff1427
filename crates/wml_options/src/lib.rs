//! wml_options: wmlconfig.json parsing and parser options.
//!
//! Parses wmlconfig.json files and provides the ParserOptions structure
//! shared by the parser and the command-line front end.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default nesting limit for tags, macro calls, definitions, conditionals
/// and inline arrays.
pub const DEFAULT_MAX_DEPTH: u32 = 200;

/// Options controlling a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Maximum nesting depth before the parser reports an error and skips.
    pub max_depth: u32,
    /// Keep horizontal whitespace tokens on the document's trivia list.
    pub collect_trivia: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            collect_trivia: true,
        }
    }
}

/// The wmlconfig.json file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WmlConfig {
    pub parser_options: ParserOptions,
    /// Files and directories to parse, relative to the config file.
    pub include: Vec<String>,
    /// Paths containing any of these substrings are skipped.
    pub exclude: Vec<String>,
    /// File extensions picked up when walking directories.
    pub extensions: Vec<String>,
}

impl Default for WmlConfig {
    fn default() -> Self {
        Self {
            parser_options: ParserOptions::default(),
            include: Vec::new(),
            exclude: Vec::new(),
            extensions: vec!["cfg".to_string()],
        }
    }
}

impl WmlConfig {
    /// Whether `path` should be parsed when found while walking a directory.
    pub fn matches(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        has_extension && !self.is_excluded(path)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.exclude.iter().any(|pattern| !pattern.is_empty() && text.contains(pattern.as_str()))
    }

    /// `include` entries resolved against `base`.
    pub fn include_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.include.iter().map(|entry| base.join(entry)).collect()
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("maxDepth must be at least 1")]
    ZeroDepth,
}

/// Parse wmlconfig.json content.
pub fn parse_config(content: &str) -> Result<WmlConfig, ConfigError> {
    let config: WmlConfig = serde_json::from_str(content)?;
    if config.parser_options.max_depth == 0 {
        return Err(ConfigError::ZeroDepth);
    }
    Ok(config)
}

/// Parse a wmlconfig.json file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<WmlConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, WmlConfig::default());
        assert_eq!(config.parser_options.max_depth, 200);
        assert!(config.parser_options.collect_trivia);
        assert_eq!(config.extensions, vec!["cfg"]);
    }

    #[test]
    fn test_camel_case_fields() {
        let config = parse_config(
            r#"{
                "parserOptions": { "maxDepth": 32, "collectTrivia": false },
                "include": ["data/core"],
                "exclude": ["/test/"],
                "extensions": ["cfg", "wml"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.parser_options.max_depth, 32);
        assert!(!config.parser_options.collect_trivia);
        assert_eq!(config.include, vec!["data/core"]);
        assert_eq!(config.extensions.len(), 2);
    }

    #[test]
    fn test_partial_parser_options_keep_defaults() {
        let config = parse_config(r#"{ "parserOptions": { "collectTrivia": false } }"#).unwrap();
        assert_eq!(config.parser_options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = parse_config(r#"{ "parserOptions": { "maxDepth": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDepth));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_config("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_config_file("/nonexistent/wmlconfig.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/wmlconfig.json"));
    }

    #[test]
    fn test_matches_extension_and_exclude() {
        let config = WmlConfig {
            exclude: vec!["/test/".to_string()],
            ..WmlConfig::default()
        };
        assert!(config.matches(Path::new("data/units/elves.cfg")));
        assert!(config.matches(Path::new("data/units/ELVES.CFG")));
        assert!(!config.matches(Path::new("data/units/elves.lua")));
        assert!(!config.matches(Path::new("data/test/scenario.cfg")));
    }
}
