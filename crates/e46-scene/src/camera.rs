//! Camera controls and orbit navigation
//!
//! Y is up. The camera sits on a sphere around `target`: `azimuth` turns
//! around the vertical axis, `polar` is measured down from straight above.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use e46_core::ViewerConfig;

/// Smallest polar angle, keeps `looking_at` away from the pole
const MIN_POLAR: f32 = 0.01;

/// Pixels per scroll line when the browser reports pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub distance: f32,
    pub target_distance: f32, // For smooth zoom
    pub azimuth: f32,
    pub polar: f32,
    pub target: Vec3,
    pub target_focus: Vec3, // For smooth panning
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl CameraSettings {
    /// Derive the orbit from the configured eye position and target
    pub fn from_config(config: &ViewerConfig) -> Self {
        let target = Vec3::from_array(config.camera_target);
        let offset = Vec3::from_array(config.camera_position) - target;
        let radius = offset.length().max(f32::EPSILON);
        let max_polar = (std::f32::consts::PI * config.max_polar_fraction).max(MIN_POLAR);
        let (min_distance, max_distance) = distance_range(config);
        let distance = radius.clamp(min_distance, max_distance);

        Self {
            distance,
            target_distance: distance,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos().clamp(MIN_POLAR, max_polar),
            target,
            target_focus: target,
            min_distance,
            max_distance,
            max_polar,
            sensitivity: config.sensitivity,
            zoom_speed: config.zoom_speed,
            smooth_factor: config.smooth_factor,
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    /// Rotate around the target by a pointer delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * self.sensitivity;
        self.polar = (self.polar - delta.y * self.sensitivity).clamp(MIN_POLAR, self.max_polar);
    }

    /// Scale the goal distance; factors below one move closer
    pub fn zoom(&mut self, factor: f32) {
        self.target_distance =
            (self.target_distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Move the orbit target in the camera's right/up plane
    pub fn pan(&mut self, right: Vec3, up: Vec3, delta: Vec2) {
        let pan_speed = self.distance * 0.002;
        self.target_focus -= right * delta.x * pan_speed;
        self.target_focus += up * delta.y * pan_speed;
    }

    /// Ease distance and target towards their goals
    pub fn step(&mut self, dt: f32) {
        let lerp_factor = 1.0 - (-self.smooth_factor * 60.0 * dt).exp();
        self.distance += (self.target_distance - self.distance) * lerp_factor;
        self.target += (self.target_focus - self.target) * lerp_factor;
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

/// Aspect ratio of a drawing surface, `None` while it has no area
/// Zoom limits, falling back to the stock range when the configured one is
/// empty or NaN
fn distance_range(config: &ViewerConfig) -> (f32, f32) {
    if (f32::MIN_POSITIVE..=config.max_distance).contains(&config.min_distance) {
        return (config.min_distance, config.max_distance);
    }
    let stock = ViewerConfig::default();
    tracing::warn!(
        "Ignoring zoom range {}..{}, using {}..{}",
        config.min_distance,
        config.max_distance,
        stock.min_distance,
        stock.max_distance
    );
    (stock.min_distance, stock.max_distance)
}

pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    (width > 0.0 && height > 0.0).then(|| width / height)
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Update, (update_camera, sync_aspect_ratio));
    }
}

fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    time: Res<Time>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    // Orbit with left mouse drag
    if mouse_button.pressed(MouseButton::Left) {
        settings.orbit(mouse_motion.delta);
    }

    // Pan with right mouse drag
    if mouse_button.pressed(MouseButton::Right) {
        let right = transform.right().as_vec3();
        let up = transform.up().as_vec3();
        settings.pan(right, up, mouse_motion.delta);
    }

    // Zoom with scroll
    let scroll_lines = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };
    if scroll_lines != 0.0 {
        let zoom_factor = (1.0 - scroll_lines * settings.zoom_speed).max(0.1);
        settings.zoom(zoom_factor);
    }

    // Touch: one finger orbits, two fingers pinch
    let touches: Vec<_> = touch_input.iter().collect();
    match touches.as_slice() {
        [touch] => {
            let delta = touch.delta();
            if delta != Vec2::ZERO {
                settings.orbit(delta);
            }
        }
        [t1, t2] => {
            let curr_dist = t1.position().distance(t2.position());
            let prev_dist = (t1.position() - t1.delta()).distance(t2.position() - t2.delta());
            if curr_dist > 0.0 && prev_dist > 0.0 {
                settings.zoom(prev_dist / curr_dist);
            }
        }
        _ => {}
    }

    settings.step(time.delta_secs());
    *transform = settings.transform();
}

/// Keep the projection in step with the canvas when its container resizes
fn sync_aspect_ratio(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(aspect) = aspect_ratio(window.width(), window.height()) else {
        return;
    };

    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            if (perspective.aspect_ratio - aspect).abs() > f32::EPSILON {
                tracing::debug!(
                    "Viewer resized to {}x{}",
                    window.width(),
                    window.height()
                );
                perspective.aspect_ratio = aspect;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_initial_eye_matches_config() {
        let settings = CameraSettings::default();
        assert!(close(settings.eye(), Vec3::new(3.6, 1.6, 4.6)));
        assert!(close(settings.target, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut settings = CameraSettings::default();
        for _ in 0..100 {
            settings.zoom(0.5);
        }
        assert_eq!(settings.target_distance, 2.0);

        for _ in 0..100 {
            settings.zoom(2.0);
        }
        assert_eq!(settings.target_distance, 10.0);
    }

    #[test]
    fn test_cannot_orbit_below_ground() {
        let mut settings = CameraSettings::default();
        settings.orbit(Vec2::new(0.0, -100_000.0));
        assert!(settings.polar <= std::f32::consts::PI * 0.49 + 1e-6);

        // Eye stays above the target plane
        assert!(settings.eye().y > settings.target.y);

        settings.orbit(Vec2::new(0.0, 100_000.0));
        assert!(settings.polar >= MIN_POLAR);
    }

    #[test]
    fn test_step_converges() {
        let mut settings = CameraSettings::default();
        settings.zoom(0.5);
        settings.pan(Vec3::X, Vec3::Y, Vec2::new(-100.0, 0.0));
        for _ in 0..600 {
            settings.step(1.0 / 60.0);
        }
        assert!((settings.distance - settings.target_distance).abs() < 1e-3);
        assert!(close(settings.target, settings.target_focus));
    }

    #[test]
    fn test_inverted_zoom_range_falls_back() {
        let config = ViewerConfig {
            min_distance: 12.0,
            ..ViewerConfig::default()
        };
        let mut settings = CameraSettings::from_config(&config);
        assert_eq!(settings.min_distance, 2.0);
        assert_eq!(settings.max_distance, 10.0);

        settings.zoom(100.0);
        assert_eq!(settings.target_distance, 10.0);

        let config = ViewerConfig {
            max_distance: f32::NAN,
            ..ViewerConfig::default()
        };
        let settings = CameraSettings::from_config(&config);
        assert_eq!(settings.max_distance, 10.0);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(800.0, 400.0), Some(2.0));
        assert_eq!(aspect_ratio(0.0, 400.0), None);
        assert_eq!(aspect_ratio(800.0, 0.0), None);
    }
}
