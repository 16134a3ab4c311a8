mod config;
mod gpu;
mod present;
mod runtime;
mod scene;

use marduk_view::logging::{init_logging, LoggingConfig};

use crate::config::{DemoConfig, RuntimeConfig};
use crate::gpu::GpuInit;
use crate::runtime::Runtime;
use crate::scene::DemoScene;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // Usage: marduk-view-demo [ship.png]
    // Arrows/WASD pan, wheel zooms, left click logs the world position, Esc quits.
    let scene = DemoScene::new(DemoConfig::from_args(std::env::args()))?;
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), scene)
}
