//! Demo scene: a checkerboard world with a spinning ship, a HUD on top.

use std::time::Instant;

use anyhow::{Context, Result};
use marduk_view::{
    draw_passes, Camera, DrawOp, Filter, ImageSurface, Pass, RenderQueue, SharedCamera, Space,
    Surface, Vec2,
};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::DemoConfig;
use crate::runtime::{Control, Game};

const WORLD: usize = 0;
const HUD: usize = 1;

const TILE: u32 = 32;
const GRID: i32 = 12;

/// Pixels of wheel travel treated as one notch.
const PIXELS_PER_NOTCH: f32 = 40.0;

const LAYER_GROUND: i32 = 0;
const LAYER_SHADOW: i32 = 5;
const LAYER_SHIP: i32 = 10;
const LAYER_CURSOR: i32 = 20;

struct Sprites {
    tile_light: ImageSurface,
    tile_dark: ImageSurface,
    ship: ImageSurface,
    shadow: ImageSurface,
    cursor: ImageSurface,
    panel: ImageSurface,
    bar: ImageSurface,
}

impl Sprites {
    fn load(config: &DemoConfig) -> Result<Self> {
        let ship = match config.sprite_path.as_deref() {
            Some(path) => {
                let sprite = ImageSurface::open(path).context("loading ship sprite")?;
                log::info!("ship sprite {} ({}x{})", path.display(), sprite.width(), sprite.height());
                sprite
            }
            None => arrow(24, [240, 200, 60, 255]),
        };
        let shadow = ImageSurface::from_fn(ship.width(), ship.height(), |x, y| {
            if ship.pixel(x, y).is_some_and(|p| p[3] > 0) { [0, 0, 0, 96] } else { [0, 0, 0, 0] }
        });

        Ok(Self {
            tile_light: tile([70, 110, 80, 255]),
            tile_dark: tile([55, 90, 65, 255]),
            ship,
            shadow,
            cursor: ring(9, [255, 255, 255, 220]),
            panel: ImageSurface::filled(180, 44, [20, 20, 30, 180]),
            bar: ImageSurface::filled(100, 6, [120, 200, 255, 255]),
        })
    }
}

fn tile(rgba: [u8; 4]) -> ImageSurface {
    ImageSurface::from_fn(TILE, TILE, |x, y| {
        // One-pixel darker seam on the top and left edges.
        if x == 0 || y == 0 { [rgba[0] / 2, rgba[1] / 2, rgba[2] / 2, 255] } else { rgba }
    })
}

/// Right-pointing triangle, so rotation is visible.
fn arrow(size: u32, rgba: [u8; 4]) -> ImageSurface {
    let half = size as f32 / 2.0;
    ImageSurface::from_fn(size, size, |x, y| {
        let dy = (y as f32 + 0.5 - half).abs();
        if dy <= (size - x) as f32 / 2.0 { rgba } else { [0, 0, 0, 0] }
    })
}

fn ring(size: u32, rgba: [u8; 4]) -> ImageSurface {
    let c = size as f32 / 2.0;
    ImageSurface::from_fn(size, size, |x, y| {
        let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(Vec2::splat(c));
        if d <= c && d >= c - 1.5 { rgba } else { [0, 0, 0, 0] }
    })
}

/// Camera pan in screen-sized steps for a movement key, before zoom correction.
fn pan_direction(key: KeyCode) -> Option<(f32, f32)> {
    match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some((-1.0, 0.0)),
        KeyCode::ArrowRight | KeyCode::KeyD => Some((1.0, 0.0)),
        KeyCode::ArrowUp | KeyCode::KeyW => Some((0.0, -1.0)),
        KeyCode::ArrowDown | KeyCode::KeyS => Some((0.0, 1.0)),
        _ => None,
    }
}

/// Zoom factor for a wheel movement; positive notches zoom in.
fn wheel_zoom(delta: MouseScrollDelta, step: f32) -> f32 {
    let notches = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
    };
    step.powf(notches)
}

pub struct DemoScene {
    config: DemoConfig,
    camera: SharedCamera,
    passes: Vec<Pass<ImageSurface>>,
    screen: ImageSurface,
    sprites: Sprites,
    cursor: Vec2,
    started: Instant,
}

impl DemoScene {
    pub fn new(config: DemoConfig) -> Result<Self> {
        let sprites = Sprites::load(&config)?;
        let camera = Camera::new(1, 1, 0.0, 0.0, 2.0).shared();
        let passes = vec![Pass::world(&camera), Pass::canvas(&camera)];

        Ok(Self {
            config,
            camera,
            passes,
            screen: ImageSurface::new(1, 1),
            sprites,
            cursor: Vec2::zero(),
            started: Instant::now(),
        })
    }

    fn on_key(&mut self, key: KeyCode) -> Control {
        if key == KeyCode::Escape {
            return Control::Exit;
        }
        if let Some((dx, dy)) = pan_direction(key) {
            let mut camera = self.camera.borrow_mut();
            let step = self.config.pan_step / camera.zoom();
            camera.move_by(dx * step, dy * step);
        }
        Control::Continue
    }
}

impl Game for DemoScene {
    fn on_window_event(&mut self, event: &WindowEvent) -> Control {
        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    return self.on_key(key);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let factor = wheel_zoom(*delta, self.config.zoom_step);
                let zoom = self.camera.borrow_mut().zoom_by(factor).zoom();
                log::debug!("zoom {zoom:.3}");
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let world = self.camera.borrow().screen_to_world(self.cursor);
                log::info!("click at screen {:?} -> world {:?}", self.cursor, world);
            }

            _ => {}
        }
        Control::Continue
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.camera.borrow_mut().resize(width, height);
        for pass in &mut self.passes {
            pass.update_camera(&self.camera);
        }
        self.screen = ImageSurface::new(width, height);
        log::debug!("scene resized to {width}x{height}");
    }

    fn on_frame(&mut self) -> &ImageSurface {
        let t = self.started.elapsed().as_secs_f32();
        let Self { camera, passes, screen, sprites, cursor, .. } = self;

        let (cursor_world, zoom) = {
            let camera = camera.borrow();
            (camera.screen_to_world(*cursor), camera.zoom())
        };

        screen.clear();

        let mut render = |passes: &mut [Pass<ImageSurface>], _: &mut ImageSurface| {
            let mut queue = RenderQueue::with_capacity((4 * GRID * GRID) as usize + 3);

            // Enqueued top-down on purpose; layers sort them back.
            let cursor_sprite = &sprites.cursor;
            queue.enqueue_callback(
                move |target: &mut ImageSurface, camera: &Camera| {
                    let at = camera.world_to_screen(cursor_world);
                    DrawOp::new(cursor_sprite)
                        .center_origin()
                        .position(at.x, at.y)
                        .space(Space::Canvas)
                        .commit(target, camera);
                },
                LAYER_CURSOR,
            );
            queue.enqueue_draw(
                DrawOp::new(&sprites.ship)
                    .center_origin()
                    .rotation(t)
                    .filter(Filter::Linear),
                LAYER_SHIP,
            );
            queue.enqueue_draw(
                DrawOp::new(&sprites.shadow)
                    .center_origin()
                    .position(3.0, 5.0)
                    .rotation(t)
                    .filter(Filter::Linear),
                LAYER_SHADOW,
            );

            for ty in -GRID..GRID {
                for tx in -GRID..GRID {
                    let sprite = if (tx + ty).rem_euclid(2) == 0 {
                        &sprites.tile_light
                    } else {
                        &sprites.tile_dark
                    };
                    let op = DrawOp::new(sprite).position((tx * TILE as i32) as f32, (ty * TILE as i32) as f32);
                    queue.enqueue_draw(op, LAYER_GROUND);
                }
            }

            passes[WORLD].flush(&mut queue);

            DrawOp::new(&sprites.panel).position(12.0, 12.0).render(&mut passes[HUD]);
            DrawOp::new(&sprites.bar)
                .position(24.0, 24.0)
                .scale((zoom / 4.0).clamp(0.05, 1.5))
                .render(&mut passes[HUD]);
            DrawOp::new(&sprites.bar)
                .position(24.0, 36.0)
                .scale(0.6)
                .skew(0.4, 0.05)
                .render(&mut passes[HUD]);
        };

        if !draw_passes(screen, passes, &mut render) {
            log::warn!("frame skipped: a pass has no surface");
        }
        screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn arrows_and_wasd_pan_the_same_way() {
        assert_eq!(pan_direction(KeyCode::ArrowLeft), pan_direction(KeyCode::KeyA));
        assert_eq!(pan_direction(KeyCode::ArrowDown), Some((0.0, 1.0)));
        assert_eq!(pan_direction(KeyCode::Space), None);
    }

    #[test]
    fn wheel_up_zooms_in() {
        assert!(wheel_zoom(MouseScrollDelta::LineDelta(0.0, 1.0), 1.1) > 1.0);
        assert!(wheel_zoom(MouseScrollDelta::LineDelta(0.0, -2.0), 1.1) < 1.0);
        assert_eq!(wheel_zoom(MouseScrollDelta::LineDelta(0.0, 0.0), 1.1), 1.0);
    }

    #[test]
    fn pan_is_constant_on_screen_across_zoom() {
        let mut scene = DemoScene::new(DemoConfig::default()).unwrap();
        scene.camera.borrow_mut().set_zoom(4.0);
        scene.on_key(KeyCode::ArrowRight);
        let moved = scene.camera.borrow().position().x;
        assert_eq!(moved, DemoConfig::default().pan_step / 4.0);
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn frame_fills_screen_after_resize() {
        let mut scene = DemoScene::new(DemoConfig::default()).unwrap();
        scene.on_resize(64, 48);

        let screen = scene.on_frame();

        assert_eq!((screen.width(), screen.height()), (64, 48));
        assert!(!screen.is_blank());
        // HUD panel is drawn last at (12, 12).
        assert_eq!(screen.pixel(13, 13).map(|p| p[3]), Some(255));
    }

    #[test]
    fn escape_exits() {
        let mut scene = DemoScene::new(DemoConfig::default()).unwrap();
        assert_eq!(scene.on_key(KeyCode::Escape), Control::Exit);
        assert_eq!(scene.on_key(KeyCode::KeyQ), Control::Continue);
    }
}
