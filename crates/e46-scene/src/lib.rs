//! E46 Scene - Bevy side of the showcase viewer
//!
//! This crate owns everything drawn inside the viewer panel: the camera and
//! its orbit controls, the lighting rig and ground disc, and the glTF model
//! with its ground-fit normalization. The web crate adds the window and the
//! DOM around it.

pub mod camera;
pub mod models;
pub mod scene;

use bevy::prelude::*;
use e46_core::ViewerConfig;

/// Plugin that sets up the viewer scene from a [`ViewerConfig`]
#[derive(Default)]
pub struct ShowcaseScenePlugin {
    pub viewer: ViewerConfig,
}

impl ShowcaseScenePlugin {
    pub fn new(viewer: ViewerConfig) -> Self {
        Self { viewer }
    }
}

impl Plugin for ShowcaseScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(CameraSettings::from_config(&self.viewer))
            .insert_resource(ModelSettings::from_config(&self.viewer))
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(models::ModelsPlugin);
    }
}

// Re-export commonly used types
pub use camera::{CameraSettings, MainCamera};
pub use models::{FailureReport, ModelRoot, ModelSettings, ModelStatus};
