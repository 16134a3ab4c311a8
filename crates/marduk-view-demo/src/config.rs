use std::path::PathBuf;

use winit::dpi::LogicalSize;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "marduk-view".to_string(),
            initial_size: LogicalSize::new(1024.0, 640.0),
        }
    }
}

/// Scene tuning for the demo.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// World units per key press.
    pub pan_step: f32,
    /// Zoom multiplier per wheel notch.
    pub zoom_step: f32,
    /// Optional sprite file for the player; a generated sprite is used otherwise.
    pub sprite_path: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pan_step: 24.0,
            zoom_step: 1.1,
            sprite_path: None,
        }
    }
}

impl DemoConfig {
    /// Reads the optional sprite path from the first command-line argument.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        Self {
            sprite_path: args.nth(1).map(PathBuf::from),
            ..Self::default()
        }
    }
}
