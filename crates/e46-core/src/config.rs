//! Page configuration
//!
//! Defaults describe the stock showcase markup. A page can override any
//! subset through a TOML block; URL parameters are applied last.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::EXPORT_FILENAME;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse page configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid viewer setting: {0}")]
    InvalidViewer(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub dom: DomConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub widgets: WidgetConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Element ids and selectors the page logic binds to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Id of the element hosting the 3D viewer
    pub viewer_container: String,
    /// Id given to the canvas Bevy renders into
    pub viewer_canvas: String,
    /// Id of the performance card container
    pub perf_cards: String,
    /// Id of the engine tab strip
    pub engine_tabs: String,
    /// Selector matching a single engine tab inside the strip
    pub engine_tab: String,
    pub design_tab: String,
    pub design_panel: String,
    pub reveal: String,
    pub lazy_image: String,
    /// Id of the gallery grid
    pub gallery_grid: String,
    pub lightbox: String,
    pub header: String,
    pub back_to_top: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            viewer_container: "e46-3d".to_string(),
            viewer_canvas: "e46-canvas".to_string(),
            perf_cards: "perf-cards".to_string(),
            engine_tabs: "engine-tabs".to_string(),
            engine_tab: ".chip[data-engine]".to_string(),
            design_tab: "[data-design-tab]".to_string(),
            design_panel: "#design-panels .panel".to_string(),
            reveal: ".reveal".to_string(),
            lazy_image: "img[data-src]".to_string(),
            gallery_grid: "gallery-grid".to_string(),
            lightbox: ".lightbox".to_string(),
            header: "header".to_string(),
            back_to_top: ".float-top".to_string(),
        }
    }
}

/// 3D viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Path of the glTF binary, relative to the page
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Larger horizontal extent of the model after normalization
    #[serde(default = "default_fit_size")]
    pub fit_size: f32,
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],
    /// Point the camera orbits around
    #[serde(default = "default_camera_target")]
    pub camera_target: [f32; 3],
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    /// Maximum polar angle as a fraction of PI (0.5 is the horizon)
    #[serde(default = "default_max_polar_fraction")]
    pub max_polar_fraction: f32,
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
    #[serde(default = "default_smooth_factor")]
    pub smooth_factor: f32,
}

impl ViewerConfig {
    /// Reject values the camera and model fit cannot work with
    ///
    /// Range checks fail for NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if !(f32::MIN_POSITIVE..=self.max_distance).contains(&self.min_distance) {
            format!(
                "distance range {}..{} is empty or not positive",
                self.min_distance, self.max_distance
            )
        } else if !(f32::MIN_POSITIVE..=f32::MAX).contains(&self.fit_size) {
            format!("fit_size {} must be positive", self.fit_size)
        } else if !(f32::MIN_POSITIVE..=0.5).contains(&self.max_polar_fraction) {
            format!("max_polar_fraction {} must be in (0, 0.5]", self.max_polar_fraction)
        } else if !(f32::MIN_POSITIVE..180.0).contains(&self.fov_degrees) {
            format!("fov_degrees {} must be in (0, 180)", self.fov_degrees)
        } else if !(f32::MIN_POSITIVE..self.far).contains(&self.near) {
            format!("clip range {}..{} is empty", self.near, self.far)
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidViewer(problem))
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            fit_size: default_fit_size(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            camera_position: default_camera_position(),
            camera_target: default_camera_target(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            max_polar_fraction: default_max_polar_fraction(),
            sensitivity: default_sensitivity(),
            zoom_speed: default_zoom_speed(),
            smooth_factor: default_smooth_factor(),
        }
    }
}

fn default_model_path() -> String {
    "assets/e46.glb".to_string()
}

fn default_fit_size() -> f32 {
    3.4
}

fn default_fov() -> f32 {
    45.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    100.0
}

fn default_camera_position() -> [f32; 3] {
    [3.6, 1.6, 4.6]
}

fn default_camera_target() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_min_distance() -> f32 {
    2.0
}

fn default_max_distance() -> f32 {
    10.0
}

fn default_max_polar_fraction() -> f32 {
    0.49
}

fn default_sensitivity() -> f32 {
    0.005
}

fn default_zoom_speed() -> f32 {
    0.1
}

fn default_smooth_factor() -> f32 {
    0.15
}

/// Widget behaviour knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Engine selected when the page loads
    #[serde(default = "default_engine")]
    pub default_engine: String,
    /// Visible fraction that triggers a reveal
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,
    /// Margin around the viewport within which lazy images start loading
    #[serde(default = "default_lazy_root_margin")]
    pub lazy_root_margin: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_engine: default_engine(),
            reveal_threshold: default_reveal_threshold(),
            lazy_root_margin: default_lazy_root_margin(),
        }
    }
}

fn default_engine() -> String {
    "318i".to_string()
}

fn default_reveal_threshold() -> f64 {
    0.12
}

fn default_lazy_root_margin() -> String {
    "200px".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_filename")]
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_export_filename(),
        }
    }
}

fn default_export_filename() -> String {
    EXPORT_FILENAME.to_string()
}

impl PageConfig {
    /// Parse a TOML override block; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.viewer.validate()?;
        Ok(config)
    }

    /// Apply one URL query parameter; returns whether it was recognised
    pub fn apply_query_param(&mut self, key: &str, value: &str) -> bool {
        match key {
            "model" if !value.is_empty() => {
                tracing::info!("Model path overridden by URL parameter: {}", value);
                self.viewer.model_path = value.to_string();
                true
            }
            "engine" if !value.is_empty() => {
                self.widgets.default_engine = value.to_string();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.dom.viewer_container, "e46-3d");
        assert_eq!(config.dom.engine_tab, ".chip[data-engine]");
        assert_eq!(config.viewer.model_path, "assets/e46.glb");
        assert_eq!(config.viewer.fit_size, 3.4);
        assert_eq!(config.widgets.default_engine, "318i");
        assert_eq!(config.widgets.lazy_root_margin, "200px");
        assert_eq!(config.export.filename, "bmw-e46-sedan-black-specs.json");
    }

    #[test]
    fn test_empty_block_is_default() {
        let config = PageConfig::from_toml_str("").unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let content = r#"
            [dom]
            perf_cards = "cards"

            [viewer]
            model_path = "models/touring.glb"
            max_distance = 12.0

            [widgets]
            default_engine = "330i"
        "#;
        let config = PageConfig::from_toml_str(content).unwrap();
        assert_eq!(config.dom.perf_cards, "cards");
        assert_eq!(config.dom.gallery_grid, "gallery-grid");
        assert_eq!(config.viewer.model_path, "models/touring.glb");
        assert_eq!(config.viewer.max_distance, 12.0);
        assert_eq!(config.viewer.min_distance, 2.0);
        assert_eq!(config.widgets.default_engine, "330i");
        assert_eq!(config.widgets.reveal_threshold, 0.12);
    }

    #[test]
    fn test_malformed_block() {
        let result = PageConfig::from_toml_str("[viewer]\nfit_size = \"big\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_inverted_distance_range_rejected() {
        let result = PageConfig::from_toml_str("[viewer]\nmin_distance = 12.0\n");
        assert!(matches!(result, Err(ConfigError::InvalidViewer(_))));

        let result = PageConfig::from_toml_str("[viewer]\nmax_distance = nan\n");
        assert!(matches!(result, Err(ConfigError::InvalidViewer(_))));
    }

    #[test]
    fn test_viewer_limits_rejected() {
        for content in [
            "[viewer]\nfit_size = 0.0\n",
            "[viewer]\nmax_polar_fraction = 0.75\n",
            "[viewer]\nmax_polar_fraction = 0.0\n",
            "[viewer]\nfov_degrees = 180.0\n",
            "[viewer]\nnear = 200.0\n",
        ] {
            let result = PageConfig::from_toml_str(content);
            assert!(matches!(result, Err(ConfigError::InvalidViewer(_))), "{}", content);
        }
    }

    #[test]
    fn test_default_viewer_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
        let config = PageConfig::from_toml_str("[viewer]\nmin_distance = 10.0\nmax_polar_fraction = 0.5\n").unwrap();
        assert_eq!(config.viewer.min_distance, 10.0);
    }

    #[test]
    fn test_query_params() {
        let mut config = PageConfig::default();
        assert!(config.apply_query_param("model", "cdn/e46.glb"));
        assert!(config.apply_query_param("engine", "325i"));
        assert!(!config.apply_query_param("model", ""));
        assert!(!config.apply_query_param("utm_source", "mail"));

        assert_eq!(config.viewer.model_path, "cdn/e46.glb");
        assert_eq!(config.widgets.default_engine, "325i");
    }
}
