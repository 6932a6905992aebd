//! glTF model loading and ground-fit normalization
//!
//! The model is requested once at startup. When the asset server reports it
//! loaded, its default scene is spawned under a [`ModelRoot`]; once the scene
//! instance has meshes, the root is scaled so the larger horizontal extent
//! matches the configured fit size, centred over the origin and rested on
//! the ground. A failed load is recorded in [`ModelStatus`] and never retried.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use e46_core::ViewerConfig;

/// Frames to wait for a spawned scene to produce meshes before giving up on
/// the fit and showing it as-is
const PLACEMENT_FRAME_LIMIT: u32 = 300;

/// Where to load the model from and how large to show it
#[derive(Debug, Clone, Resource)]
pub struct ModelSettings {
    pub path: String,
    pub fit_size: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl ModelSettings {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            path: config.model_path.clone(),
            fit_size: config.fit_size,
        }
    }
}

/// Load progress of the showcased model
#[derive(Debug, Clone, Default, PartialEq, Eq, Resource)]
pub enum ModelStatus {
    #[default]
    Idle,
    Loading,
    /// Scene spawned, waiting for meshes to measure
    Placing,
    Ready,
    Failed { path: String, reason: String },
}

impl ModelStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ModelStatus::Failed { .. })
    }
}

/// Hands out the user-facing failure message exactly once
#[derive(Debug, Clone, Default, Resource)]
pub struct FailureReport {
    reported: bool,
}

impl FailureReport {
    pub fn take(&mut self, status: &ModelStatus) -> Option<String> {
        match status {
            ModelStatus::Failed { path, .. } if !self.reported => {
                self.reported = true;
                Some(format!("Missing 3D model at {}", path))
            }
            _ => None,
        }
    }
}

/// Marker component for the spawned model's root entity
#[derive(Component)]
pub struct ModelRoot;

/// Handles of the in-flight load
#[derive(Resource, Default)]
struct ModelLoad {
    gltf: Option<Handle<Gltf>>,
    root: Option<Entity>,
    frames_waited: u32,
}

/// Axis-aligned bounds accumulated from mesh vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }
}

impl Bounds {
    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }
}

/// Transform that fits a model with world bounds `min..max` onto the ground
///
/// The larger of the X and Z extents becomes `fit_size`, the footprint is
/// centred on the origin and the lowest point lands on y=0. Returns `None`
/// for a model with no horizontal extent.
pub fn fit_transform(min: Vec3, max: Vec3, fit_size: f32) -> Option<Transform> {
    let size = max - min;
    let footprint = size.x.max(size.z);
    if !footprint.is_finite() || footprint <= 0.0 {
        return None;
    }

    let scale = fit_size / footprint;
    let center = (min + max) * 0.5;
    let translation = -center * scale + Vec3::new(0.0, size.y * scale * 0.5, 0.0);

    Some(Transform::from_translation(translation).with_scale(Vec3::splat(scale)))
}

pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelSettings>()
            .init_resource::<ModelStatus>()
            .init_resource::<FailureReport>()
            .init_resource::<ModelLoad>()
            .add_systems(Startup, start_model_load)
            .add_systems(Update, poll_model_load)
            .add_systems(Update, place_model.after(poll_model_load));
    }
}

fn start_model_load(
    settings: Res<ModelSettings>,
    asset_server: Res<AssetServer>,
    mut load: ResMut<ModelLoad>,
    mut status: ResMut<ModelStatus>,
) {
    tracing::info!("Starting to load model: {}", settings.path);
    load.gltf = Some(asset_server.load::<Gltf>(settings.path.clone()));
    *status = ModelStatus::Loading;
}

/// Check loading state and spawn the scene once the glTF is in
fn poll_model_load(
    mut commands: Commands,
    settings: Res<ModelSettings>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    mut load: ResMut<ModelLoad>,
    mut status: ResMut<ModelStatus>,
) {
    if *status != ModelStatus::Loading {
        return;
    }
    let Some(handle) = load.gltf.clone() else {
        return;
    };

    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            let scene = gltf_assets.get(&handle).and_then(|gltf| {
                gltf.default_scene
                    .clone()
                    .or_else(|| gltf.scenes.first().cloned())
            });

            match scene {
                Some(scene_handle) => {
                    tracing::info!("Model loaded: {}", settings.path);
                    let root = commands
                        .spawn((
                            SceneRoot(scene_handle),
                            Transform::default(),
                            ModelRoot,
                            Name::new("e46"),
                        ))
                        .id();
                    load.root = Some(root);
                    *status = ModelStatus::Placing;
                }
                None => {
                    tracing::error!("Model has no scenes: {}", settings.path);
                    *status = ModelStatus::Failed {
                        path: settings.path.clone(),
                        reason: "glTF contains no scenes".to_string(),
                    };
                }
            }
            load.gltf = None;
        }
        Some(LoadState::Failed(err)) => {
            tracing::error!("Failed to load model: {}: {}", settings.path, err);
            *status = ModelStatus::Failed {
                path: settings.path.clone(),
                reason: err.to_string(),
            };
            load.gltf = None;
        }
        _ => {
            // Still loading
        }
    }
}

/// Measure the spawned scene and fit it onto the ground
fn place_model(
    settings: Res<ModelSettings>,
    mut load: ResMut<ModelLoad>,
    mut status: ResMut<ModelStatus>,
    children_query: Query<&Children>,
    mesh_query: Query<(&Mesh3d, &GlobalTransform)>,
    mesh_assets: Res<Assets<Mesh>>,
    mut roots: Query<&mut Transform, With<ModelRoot>>,
) {
    if *status != ModelStatus::Placing {
        return;
    }
    let Some(root) = load.root else {
        return;
    };

    let mut bounds = Bounds::default();
    let mut meshes_pending = false;

    for entity in children_query.iter_descendants(root) {
        let Ok((mesh_handle, global_transform)) = mesh_query.get(entity) else {
            continue;
        };
        let Some(mesh) = mesh_assets.get(&mesh_handle.0) else {
            meshes_pending = true;
            continue;
        };
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3());
        if let Some(positions) = positions {
            for position in positions {
                bounds.include(global_transform.transform_point(Vec3::from_array(*position)));
            }
        }
    }

    if bounds.is_empty() || meshes_pending {
        load.frames_waited += 1;
        if load.frames_waited >= PLACEMENT_FRAME_LIMIT {
            tracing::warn!("Model has no measurable meshes, showing it unscaled");
            *status = ModelStatus::Ready;
        }
        return;
    }

    // Bounds were taken with the root at identity, so they are root-relative
    match (fit_transform(bounds.min, bounds.max, settings.fit_size), roots.get_mut(root)) {
        (Some(fit), Ok(mut transform)) => {
            tracing::info!(
                "Model placed: scale {:.3}, footprint {:?}",
                fit.scale.x,
                (bounds.max - bounds.min)
            );
            *transform = fit;
        }
        _ => {
            tracing::warn!("Model has no horizontal extent, showing it unscaled");
        }
    }
    *status = ModelStatus::Ready;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rests_on_ground() {
        let min = Vec3::new(-1.0, 0.5, -2.0);
        let max = Vec3::new(3.0, 2.5, 2.0);
        let fit = fit_transform(min, max, 3.4).unwrap();

        assert!((fit.scale.x - 0.85).abs() < 1e-6);
        assert_eq!(fit.scale.x, fit.scale.y);
        assert_eq!(fit.scale.x, fit.scale.z);

        let new_min = fit.transform_point(min);
        let new_max = fit.transform_point(max);

        // Bottom on the ground
        assert!(new_min.y.abs() < 1e-5);
        // Centred horizontally
        assert!((new_min.x + new_max.x).abs() < 1e-5);
        assert!((new_min.z + new_max.z).abs() < 1e-5);
        // Larger horizontal extent equals the fit size
        let extent = (new_max - new_min).abs();
        assert!((extent.x.max(extent.z) - 3.4).abs() < 1e-5);
    }

    #[test]
    fn test_fit_uses_larger_horizontal_extent() {
        // Long car body along Z, tall but narrow
        let fit = fit_transform(Vec3::new(-0.9, 0.0, -2.3), Vec3::new(0.9, 10.0, 2.3), 3.4).unwrap();
        assert!((fit.scale.x - 3.4 / 4.6).abs() < 1e-6);
    }

    #[test]
    fn test_fit_degenerate_footprint() {
        assert!(fit_transform(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 3.4).is_none());
        assert!(fit_transform(Vec3::splat(f32::MAX), Vec3::splat(f32::MIN), 3.4).is_none());
    }

    #[test]
    fn test_bounds() {
        let mut bounds = Bounds::default();
        assert!(bounds.is_empty());

        bounds.include(Vec3::new(1.0, -2.0, 3.0));
        bounds.include(Vec3::new(-1.0, 2.0, 0.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_failure_reported_once() {
        let mut report = FailureReport::default();
        assert_eq!(report.take(&ModelStatus::Loading), None);

        let failed = ModelStatus::Failed {
            path: "assets/e46.glb".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(
            report.take(&failed).as_deref(),
            Some("Missing 3D model at assets/e46.glb")
        );
        assert_eq!(report.take(&failed), None);
    }

    #[test]
    fn test_settings_from_config() {
        let settings = ModelSettings::default();
        assert_eq!(settings.path, "assets/e46.glb");
        assert_eq!(settings.fit_size, 3.4);
    }
}
