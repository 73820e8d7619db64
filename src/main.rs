use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use sky_octahedron::cli::Cli;
use sky_octahedron::core::{debounce, Debounced, FpsCounter, Viewport};
use sky_octahedron::renderer::SceneRenderer;
use sky_octahedron::{RenderContext, Scene, SceneConfig};

type Context = RenderContext<SceneRenderer>;
type ResizeHandler = fn(&mut Context, Viewport);

struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    context: Option<Context>,
    resize: Debounced<Context, Viewport, ResizeHandler>,
    fps: FpsCounter,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        let resize = debounce(Context::resize as ResizeHandler, config.resize_debounce());
        Self {
            config,
            window: None,
            context: None,
            resize,
            fps: FpsCounter::default(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(window_config.title.as_str())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        window_config.width,
                        window_config.height,
                    )),
            )?,
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);
        let scene = Scene::new(&self.config, viewport, &mut rng);
        let renderer = pollster::block_on(SceneRenderer::new(window.clone(), &scene, &self.config))?;

        let mut context = RenderContext::new(scene, renderer);
        context.resize(viewport);

        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            error!("Failed to initialize scene: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
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
            WindowEvent::Resized(size) => {
                debug!("Resize requested: {}x{}", size.width, size.height);
                self.resize.call(Viewport::new(size.width, size.height));
            }
            WindowEvent::RedrawRequested => {
                let Some(context) = &mut self.context else {
                    return;
                };

                match context.tick() {
                    Ok(delta) => {
                        if let Some(fps) = self.fps.tick(delta) {
                            debug!("FPS: {:.1}", fps);
                        }
                    }
                    Err(e) => {
                        error!("Render error: {:#}", e);
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(context) = &mut self.context {
            self.resize.poll(Instant::now(), context);
        }

        event_loop.set_control_flow(match self.resize.deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        });

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.scene_config()?;
    info!(
        "Starting {}x{} scene, resize debounce {:?}",
        config.window.width,
        config.window.height,
        config.resize_debounce()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
