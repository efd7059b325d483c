//! Hilbertscope - live phase-space scope for a mono audio input
//!
//! Draws the analytic signal of the microphone as a fading curve whose
//! color follows the loudness, optionally with the plain waveform beside it.

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use hilbertscope::audio::{list_input_devices, CpalBlockSource};
use hilbertscope::cli::Args;
use hilbertscope::controls::{self, Control, ControlOutcome, Overlay};
use hilbertscope::params::{AudioConfig, RenderConfig, ViewState, Viewport};
use hilbertscope::rendering::{RenderSystem, WINDOW_TITLE};
use hilbertscope::scheduler::FrameScheduler;
use hilbertscope::snapshot::{self, ScreenshotSaver};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Signal pipeline
    source: Option<CpalBlockSource>,
    scheduler: FrameScheduler,

    // Configuration and live state
    audio_config: AudioConfig,
    render_config: RenderConfig,
    view: ViewState,
    overlay: Overlay,
    saver: ScreenshotSaver,

    // Time tracking
    last_tick: Option<Instant>,

    /// Fatal error that ended the event loop
    exit_error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let audio_config = args.audio_config().context("Invalid audio settings")?;
        let render_config = args.render_config().context("Invalid render settings")?;
        let view = args.view_state().context("Invalid view settings")?;

        let saver = ScreenshotSaver::new(&render_config.screenshot_dir)?;
        let scheduler = FrameScheduler::new(&audio_config, &render_config);
        let overlay = Overlay::new(render_config.overlay_lifetime_s);

        Ok(Self {
            window: None,
            render_system: None,
            source: None,
            scheduler,
            audio_config,
            render_config,
            view,
            overlay,
            saver,
            last_tick: None,
            exit_error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.render_config.clone(),
            self.audio_config.block_size,
        ))
        .map_err(|e| anyhow!(e))?;
        let (width, height) = render_system.size();
        self.view.viewport = Viewport::new(width, height);

        // Start capture last so the backlog does not fill during setup
        let source =
            CpalBlockSource::open(&self.audio_config).context("Failed to open audio input")?;

        info!("Hilbertscope is running");
        info!("Snapshots go to {}", self.saver.dir().display());
        info!("Q/A smoothing, W/S scale, Space freeze, Z mode, P snapshot, Esc quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.source = Some(source);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.exit_error = Some(err);
        event_loop.exit();
    }

    /// Run one pipeline tick and schedule the next
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(source), Some(render_system)) = (&mut self.source, &mut self.render_system)
        else {
            return;
        };

        let now = Instant::now();
        if !self.scheduler.clock().is_due(now) {
            if let Some(deadline) = self.scheduler.clock().deadline() {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            return;
        }

        let dt_s = self
            .last_tick
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last_tick = Some(now);

        let overlay = self.overlay.visible(self.scheduler.elapsed_s());
        let result = self
            .scheduler
            .tick(source, &self.view, overlay, render_system, dt_s);

        if let Err(e) = result {
            self.fail(event_loop, anyhow::Error::new(e).context("Audio capture failed"));
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }

        let deadline = self.scheduler.clock_mut().advance(Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }

    fn handle_control(&mut self, event_loop: &ActiveEventLoop, control: Control) {
        match controls::apply(control, &mut self.view) {
            ControlOutcome::Message(text) => {
                self.overlay.post(text, self.scheduler.elapsed_s());
            }
            ControlOutcome::Updated => {}
            ControlOutcome::Snapshot => self.take_snapshot(),
            ControlOutcome::Quit => event_loop.exit(),
        }
    }

    /// Save the current trail and report the outcome through the overlay
    fn take_snapshot(&mut self) {
        let Some(render_system) = &self.render_system else {
            return;
        };

        let result = render_system
            .capture_trail()
            .and_then(|(width, height, rgba)| {
                self.saver.save_rgba(width, height, &rgba)
            });

        let message = snapshot::status_message(&result);
        self.overlay.post_delayed(
            message,
            self.scheduler.elapsed_s(),
            self.render_config.snapshot_overlay_delay_s,
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(physical_size.width, physical_size.height);
                    let (width, height) = render_system.size();
                    self.view.viewport = Viewport::new(width, height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(control) = Control::from_key(key) {
                    self.handle_control(event_loop, control);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(render_system) = &mut self.render_system {
                    match render_system.render() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            render_system.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            self.fail(event_loop, anyhow!("GPU out of memory"));
                        }
                        Err(e) => warn!("Render error: {:?}", e),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.tick(event_loop);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_devices {
        for name in list_input_devices()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app).context("Event loop failed")?;

    match app.exit_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
