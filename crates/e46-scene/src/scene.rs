//! Scene setup - camera, lighting rig and ground disc

use bevy::prelude::*;

use crate::camera::{CameraSettings, MainCamera};

/// Ground disc radius in scene units
const GROUND_RADIUS: f32 = 8.0;
const GROUND_SEGMENTS: u32 = 64;
/// Lift above y=0 so the disc does not fight with the model's lowest faces
const GROUND_LIFT: f32 = 0.01;

/// Marker component for the key light
#[derive(Component)]
pub struct KeyLight;

/// Marker component for the fill light
#[derive(Component)]
pub struct FillLight;

/// Marker component for the ground disc
#[derive(Component)]
pub struct Ground;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    camera: Res<CameraSettings>,
) {
    // Camera, with a soft sky/ground ambient term attached
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        camera.transform(),
        AmbientLight {
            color: Color::srgb(0.85, 0.85, 0.9),
            brightness: 600.0,
            ..default()
        },
        MainCamera,
    ));

    // Key light - high, front right
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        KeyLight,
    ));

    // Fill light - low, back left
    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-6.0, 3.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
        FillLight,
    ));

    // Ground disc (#0b0c10, matte, slightly see-through)
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgba(11.0 / 255.0, 12.0 / 255.0, 16.0 / 255.0, 0.85),
        metallic: 0.0,
        perceptual_roughness: 1.0,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    // Circle meshes lie in the XY plane; lay it flat
    commands.spawn((
        Mesh3d(meshes.add(Circle::new(GROUND_RADIUS).mesh().resolution(GROUND_SEGMENTS))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, GROUND_LIFT, 0.0)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
        Ground,
    ));

    tracing::info!("Viewer scene ready");
}
