//! The frame loop tying window, stage, renderer and resources together.

use std::time::Instant;

use crate::app::config::AppConfig;
use crate::app::deferred::{DeferredQueue, DeferredSender};
use crate::app::window::{HeadlessWindow, Window};
use crate::assets::store::ResourceCache;
use crate::event::event::Event;
use crate::foundation::core::Size;
use crate::foundation::error::{TableauError, TableauResult};
use crate::network::client::HttpClient;
use crate::network::transport::Transport;
use crate::render::backend::Renderer;
use crate::render::recording::RecordingRenderer;
use crate::scene::stage::Stage;

/// Owns everything one running program needs; no process-wide state.
///
/// Each frame: poll window events and dispatch them, drain the deferred queue, update the
/// stage, render it.
pub struct Application<W: Window, R: Renderer> {
    config: AppConfig,
    window: W,
    renderer: R,
    resources: ResourceCache,
    stage: Stage,
    deferred: DeferredQueue,
    http: Option<HttpClient>,
    running: bool,
    frame: u64,
}

impl Application<HeadlessWindow, RecordingRenderer> {
    /// Headless application recording its draw calls.
    pub fn headless(config: AppConfig) -> TableauResult<Self> {
        let window = HeadlessWindow::new(config.window_size());
        Self::new(config, window, RecordingRenderer::new())
    }
}

impl<W: Window, R: Renderer> Application<W, R> {
    /// Validate `config` and assemble the application around an existing window and renderer.
    pub fn new(config: AppConfig, mut window: W, renderer: R) -> TableauResult<Self> {
        config.validate()?;
        let size = window.size();
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(TableauError::platform(format!(
                "window reports an empty client area ({}x{})",
                size.width, size.height
            )));
        }
        window.set_title(&config.title);
        let mut stage = Stage::new(size);
        stage.set_render_borders(config.debug_borders);
        tracing::debug!(title = %config.title, width = size.width, height = size.height, "application created");
        Ok(Self {
            config,
            window,
            renderer,
            resources: ResourceCache::new(),
            stage,
            deferred: DeferredQueue::new(),
            http: None,
            running: true,
            frame: 0,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The stage, mutably.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The window.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The window, mutably.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The resource cache.
    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    /// The resource cache, mutably.
    pub fn resources_mut(&mut self) -> &mut ResourceCache {
        &mut self.resources
    }

    /// Handle for posting main-thread work from other threads.
    pub fn deferred(&self) -> DeferredSender {
        self.deferred.sender()
    }

    /// Start an HTTP client whose completions run on this application's frame loop.
    pub fn connect(&mut self, transport: impl Transport) -> TableauResult<&HttpClient> {
        let client = HttpClient::new(transport, self.deferred.sender())?;
        Ok(self.http.insert(client))
    }

    /// Start an HTTP client over `reqwest` using the configured timeouts.
    #[cfg(feature = "http")]
    pub fn connect_http(&mut self) -> TableauResult<&HttpClient> {
        let transport =
            crate::network::transport::ReqwestTransport::new(self.config.network.timeouts())?;
        self.connect(transport)
    }

    /// The HTTP client, once connected.
    pub fn http(&self) -> Option<&HttpClient> {
        self.http.as_ref()
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// `false` once the window closed or [`Application::quit`] was called.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Leave the loop after the current frame.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Process one frame advancing time by `dt` seconds.
    #[tracing::instrument(level = "trace", skip(self), fields(frame = self.frame))]
    pub fn tick(&mut self, dt: f64) -> TableauResult<()> {
        for event in self.window.poll_events() {
            match &event {
                Event::WindowResized { width, height } => {
                    self.stage
                        .set_window_size(Size::new(f64::from(*width), f64::from(*height)));
                }
                Event::WindowClosed => self.running = false,
                _ => {}
            }
            self.stage.dispatch(&event);
        }
        self.deferred.drain(&mut self.stage);
        self.stage.update(dt);

        self.renderer.begin_frame(self.config.clear_color);
        self.stage.render(&mut self.renderer);
        self.renderer.end_frame()?;
        self.frame += 1;
        Ok(())
    }

    /// Run `frames` frames of `dt` seconds each, stopping early if the application quits.
    pub fn run_frames(&mut self, frames: u64, dt: f64) -> TableauResult<()> {
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.tick(dt)?;
        }
        Ok(())
    }

    /// Run in real time until the window closes or [`Application::quit`] is called, capping
    /// the frame rate if configured.
    pub fn run(&mut self) -> TableauResult<()> {
        let interval = self.config.frame_interval();
        let mut last = Instant::now();
        while self.running {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;
            self.tick(dt)?;
            if let Some(interval) = interval {
                let spent = now.elapsed();
                if spent < interval {
                    std::thread::sleep(interval - spent);
                }
            }
        }
        tracing::debug!(frames = self.frame, "application stopped");
        Ok(())
    }
}

impl<W: Window, R: Renderer> Drop for Application<W, R> {
    fn drop(&mut self) {
        self.resources.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/application.rs"]
mod tests;
