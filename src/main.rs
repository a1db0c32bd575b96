use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wgpu_primer::cli::Cli;
use wgpu_primer::config::AppConfig;
use wgpu_primer::core::{resize_to_display, DisplayContext, FpsCounter};
use wgpu_primer::frame::FrameClock;
use wgpu_primer::logging::{init_logging, LoggingConfig};
use wgpu_primer::renderer::{OverlayStats, Renderer};
use wgpu_primer::scene::Scene;
use wgpu_primer::scenes::{create_demo, Demo};
use wgpu_primer::spiro;

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 400;

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    demo: Box<dyn Demo>,
    scene: Scene,
    clock: FrameClock,
    fps: FpsCounter,
    show_ui: bool,
}

impl App {
    fn new(demo: Box<dyn Demo>, show_ui: bool) -> Self {
        Self {
            window: None,
            renderer: None,
            demo,
            scene: Scene::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
            show_ui,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let frame = self.clock.tick();
        if let Some(fps) = self.fps.tick(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let display = DisplayContext::from(window.inner_size());
        if resize_to_display(renderer, display) {
            self.demo.camera_mut().set_aspect(display.aspect());
        }

        self.demo.update(&frame, &mut self.scene);

        let stats = OverlayStats {
            fps: self.fps.fps(),
            demo: self.demo.name().to_string(),
            status: self.demo.status(),
        };

        match renderer.render(&self.scene, self.demo.camera(), window, &stats) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                renderer.recover_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {}", e),
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
                .with_title(format!("wgpu primer - {}", self.demo.name()))
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone(), self.show_ui)) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.demo.setup(&mut self.scene);
        let display = DisplayContext::from(window.inner_size());
        self.demo.camera_mut().set_aspect(display.aspect());
        log::info!("{} nodes in scene after setup", self.scene.mesh_count() + self.scene.line_count());

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
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
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run_headless(config: &AppConfig, ticks: u64) -> anyhow::Result<()> {
    let params = config
        .spiro
        .resolve()
        .context("invalid spirograph parameters")?;
    let report = spiro::simulate(&params, ticks);

    log::info!(
        "simulated {} ticks: {} live segments ({} scene nodes), oldest {:?}, newest {:?}, {} evicted",
        report.ticks,
        report.live_segments,
        report.scene_nodes,
        report.oldest,
        report.newest,
        report.evictions
    );

    if !report.in_sync {
        bail!("line buffer and scene disagree after {} ticks", report.ticks);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::with_filter(cli.log_filter.clone()));

    let config = cli.load_config().context("failed to load configuration")?;

    if cli.headless {
        return run_headless(&config, cli.ticks);
    }

    let demo = create_demo(&config).context("failed to create demo")?;
    let event_loop = EventLoop::new()?;
    let mut app = App::new(demo, !cli.no_ui);

    log::info!("Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
