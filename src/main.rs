use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use scroll_path_camera::cli::Cli;
use scroll_path_camera::frame::{FixedFrames, FpsCounter, FrameClock};
use scroll_path_camera::path::PendingPath;
use scroll_path_camera::viewer::{Preview, ScrollCommand, SurfaceRenderer};
use scroll_path_camera::{Projection, RigConfig, ScrollRig};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 960;
const INITIAL_WINDOW_HEIGHT: u32 = 540;
const HEADLESS_HZ: f32 = 60.0;

// === Application ===

struct App {
    config: RigConfig,
    show_status: bool,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    rig: ScrollRig,
    preview: Preview,
    projection: Projection,
    clock: FrameClock,
    fps: FpsCounter,
}

impl App {
    fn new(config: RigConfig, show_status: bool) -> Self {
        let rig = config.mount(INITIAL_WINDOW_HEIGHT as f32);
        let projection = Projection::new(
            config.fov,
            INITIAL_WINDOW_WIDTH as f32 / INITIAL_WINDOW_HEIGHT as f32,
        );

        Self {
            config,
            show_status,
            window: None,
            renderer: None,
            rig,
            preview: Preview::default(),
            projection,
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
        self.projection.set_viewport(width, height);
        self.rig.scroll_mut().set_viewport_height(height as f32);
    }

    fn redraw(&mut self) {
        let frame = self.clock.tick();
        if let Some(fps) = self.fps.tick(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let report = self.rig.frame(frame.delta);

        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };

        let (width, height) = renderer.dimensions();
        let canvas = self.preview.render(
            width,
            height,
            &report.pose,
            &self.projection,
            self.rig.path(),
            report.index,
            self.rig.driver().look_at().point(),
        );
        if let Err(e) = renderer.present(&canvas) {
            log::error!("Render error: {e:#}");
        }

        if self.show_status {
            let sample = match report.index {
                Some(i) => i.to_string(),
                None => "-".into(),
            };
            window.set_title(&format!(
                "{} | {} | offset {:.3} | sample {} | {:.0} fps",
                self.config.path,
                self.rig.state().label(),
                report.offset,
                sample,
                self.fps.fps()
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("scroll-path-camera")
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SurfaceRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.dimensions();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.resize(width, height);
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(command) = ScrollCommand::from_event(&event) {
            command.apply(self.rig.scroll_mut());
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Simulate `frames` frames at a fixed rate while scrolling steadily from
/// start to end, printing one CSV row per frame
fn run_headless(config: &RigConfig, frames: u32) -> Result<()> {
    let result = pollster::block_on(config.store().load(&config.path));
    let viewport = INITIAL_WINDOW_HEIGHT as f32;
    let mut rig = ScrollRig::with_pending(
        PendingPath::completed(config.path.clone(), result),
        config.scroll(viewport),
        config.driver(),
    );

    println!("frame,offset,index,x,y,z,forward_x,forward_y,forward_z");
    let last = frames.saturating_sub(1).max(1) as f32;
    for frame in FixedFrames::new(HEADLESS_HZ, frames as u64) {
        rig.scroll_mut()
            .scroll_to_offset(frame.number as f32 / last);
        let report = rig.frame(frame.delta);

        let p = report.pose.position;
        let f = report.pose.forward();
        let index = report.index.map(|i| i.to_string()).unwrap_or_default();
        println!(
            "{},{:.4},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            frame.number, report.offset, index, p.x, p.y, p.z, f.x, f.y, f.z
        );
    }

    if let Some(e) = rig.state().error() {
        log::warn!("Trace ran with the fallback camera: {e}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = RigConfig::from_cli(&cli)?;

    if let Some(frames) = cli.headless {
        return run_headless(&config, frames);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, !cli.no_ui);

    log::info!("Controls: mouse wheel, arrows, PageUp/PageDown, Home/End, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
