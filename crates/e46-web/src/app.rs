//! Bevy application setup

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use e46_core::PageConfig;
use e46_scene::{FailureReport, ModelStatus, ShowcaseScenePlugin};

use crate::dom;
use crate::error::PageError;
use crate::warning::show_model_warning;

/// Id of the viewer container the failure notice goes into
#[derive(Debug, Clone, Resource)]
struct ViewerDom {
    container: String,
}

/// Make sure the viewer container holds the canvas Bevy renders into
fn ensure_canvas(config: &PageConfig) -> Result<(), PageError> {
    let document = dom::document()?;
    if document.get_element_by_id(&config.dom.viewer_canvas).is_some() {
        return Ok(());
    }
    let container = dom::element_by_id(&document, &config.dom.viewer_container)?;
    let canvas = document.create_element("canvas")?;
    canvas.set_id(&config.dom.viewer_canvas);
    canvas.set_attribute("style", "width: 100%; height: 100%; display: block;")?;
    container.append_child(&canvas)?;
    tracing::debug!("Created viewer canvas #{}", config.dom.viewer_canvas);
    Ok(())
}

pub fn run(config: &PageConfig) -> Result<(), PageError> {
    ensure_canvas(config)?;

    App::new()
        // Transparent so the page background shows around the car
        .insert_resource(ClearColor(Color::NONE))
        .insert_resource(WinitSettings::default())
        .insert_resource(ViewerDom {
            container: config.dom.viewer_container.clone(),
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "BMW E46".to_string(),
                        canvas: Some(format!("#{}", config.dom.viewer_canvas)),
                        fit_canvas_to_parent: true,
                        // Keep wheel and touch gestures inside the viewer
                        prevent_default_event_handling: true,
                        transparent: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    // Paths are relative to the page
                    file_path: "".to_string(),
                    // Static hosting has no .meta files
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                }),
        )
        .add_plugins(ShowcaseScenePlugin::new(config.viewer.clone()))
        .add_systems(Update, report_model_failure)
        .run();
    Ok(())
}

/// Surface a failed model load to the page once
fn report_model_failure(
    status: Res<ModelStatus>,
    mut report: ResMut<FailureReport>,
    viewer: Res<ViewerDom>,
) {
    if !status.is_changed() {
        return;
    }
    let Some(message) = report.take(&status) else {
        return;
    };
    if let Err(e) = show_model_warning(&viewer.container, &message) {
        tracing::error!("Failed to show model warning: {}", e);
    }
}
