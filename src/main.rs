use bevy::prelude::*;
use ::tactics::config::load_config;
use ::tactics::plugins::*;

fn main() {
    let config = load_config();
    let (width, height) = (config.settings.window_width, config.settings.window_height);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tactics - Grid Movement".into(),
                resolution: (width, height).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config)
        .add_plugins((MapLoaderPlugin, ScenePlugin, TacticsPlugin))
        .run();
}
