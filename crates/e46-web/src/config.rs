//! Page configuration sources
//!
//! Built-in defaults, then an optional inline TOML block
//! (`<script type="application/toml" id="e46-config">`), then URL query
//! parameters. A block that fails to parse or holds unusable viewer values
//! is logged and ignored.

use e46_core::PageConfig;
use tracing::Level;
use web_sys::{Document, Url};

use crate::dom;
use crate::error::PageError;

/// Id of the inline TOML override block
pub const CONFIG_BLOCK_ID: &str = "e46-config";

/// Query parameters understood by [`PageConfig::apply_query_param`]
const CONFIG_PARAMS: [&str; 2] = ["model", "engine"];

/// Query parameter selecting the console log level
const LOG_PARAM: &str = "log";

/// Log level used unless `?log=` says otherwise
pub const DEFAULT_LOG_LEVEL: Level = Level::WARN;

/// Resolve the page configuration from the document and URL
pub fn load() -> PageConfig {
    let mut config = match dom::document().and_then(|document| from_document(&document)) {
        Ok(Some(config)) => {
            tracing::debug!("Loaded inline configuration");
            config
        }
        Ok(None) => PageConfig::default(),
        Err(e) => {
            tracing::warn!("Using default configuration: {}", e);
            PageConfig::default()
        }
    };

    for key in CONFIG_PARAMS {
        if let Some(value) = query_param(key) {
            if !config.apply_query_param(key, &value) {
                tracing::warn!("Ignoring empty ?{}= parameter", key);
            }
        }
    }
    config
}

/// Parse and validate the inline block, if the page has one
fn from_document(document: &Document) -> Result<Option<PageConfig>, PageError> {
    let Some(content) = document
        .get_element_by_id(CONFIG_BLOCK_ID)
        .and_then(|block| block.text_content())
    else {
        return Ok(None);
    };
    Ok(Some(PageConfig::from_toml_str(&content)?))
}

/// Console log level from `?log=`, falling back to [`DEFAULT_LOG_LEVEL`]
pub fn log_level() -> Level {
    query_param(LOG_PARAM)
        .and_then(|value| parse_log_level(&value))
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

fn parse_log_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}

fn query_param(key: &str) -> Option<String> {
    let href = dom::window().ok()?.location().href().ok()?;
    let url = Url::new(&href).ok()?;
    url.search_params().get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_log_level("INFO"), Some(Level::INFO));
        assert_eq!(parse_log_level(" trace "), Some(Level::TRACE));
        assert_eq!(parse_log_level("loud"), None);
        assert_eq!(parse_log_level(""), None);
    }
}
