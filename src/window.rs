//! winit application driving the simulator.
//!
//! One window, one [`FieldSim`], one redraw-driven loop: every
//! `RedrawRequested` advances the sim a tick, uploads the resulting frame
//! and re-requests a redraw. Typed characters build up the pending wish
//! text, Enter tosses it, and the window title doubles as the notification
//! surface for the boost window and the delayed reveal.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::field::FieldSim;
use crate::gpu::GpuState;
use crate::time::Time;

pub(crate) struct App {
    config: FieldConfig,
    title: String,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    sim: Option<FieldSim>,
    time: Time,
    wish: String,
    last_title: String,
}

impl App {
    pub(crate) fn new(config: FieldConfig, title: String) -> Self {
        Self {
            config,
            title,
            window: None,
            gpu: None,
            sim: None,
            time: Time::new(),
            wish: String::new(),
            last_title: String::new(),
        }
    }

    fn handle_key(&mut self, key: &Key, event_loop: &ActiveEventLoop) {
        match key {
            Key::Named(NamedKey::Escape) => {
                if let Some(sim) = &mut self.sim {
                    sim.stop();
                }
                event_loop.exit();
            }
            Key::Named(NamedKey::Enter) => {
                if let Some(sim) = &mut self.sim {
                    if sim.toss(&self.wish).accepted() {
                        self.wish.clear();
                    }
                }
            }
            Key::Named(NamedKey::Backspace) => {
                self.wish.pop();
            }
            Key::Named(NamedKey::Space) => {
                self.wish.push(' ');
            }
            Key::Character(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.wish.push(c);
                }
            }
            _ => {}
        }
    }

    /// Window title reflecting the toss lifecycle.
    fn current_title(&self) -> String {
        let Some(sim) = &self.sim else {
            return self.title.clone();
        };
        if sim.toss_active() && sim.revealed_text().is_none() {
            format!("{} - consumed by the void...", self.title)
        } else if let Some(wish) = sim.revealed_text() {
            format!("{} - {}", self.title, wish)
        } else if self.wish.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}_", self.title, self.wish)
        }
    }

    fn refresh_title(&mut self) {
        let title = self.current_title();
        if title != self.last_title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.last_title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let size = window.inner_size();
        self.sim = Some(FieldSim::new(
            self.config.clone(),
            size.width.max(1) as f32,
            size.height.max(1) as f32,
        ));

        match pollster::block_on(GpuState::new(window)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                eprintln!("GPU error: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(sim) = &mut self.sim {
                    sim.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(sim) = &mut self.sim {
                    sim.resize(
                        physical_size.width.max(1) as f32,
                        physical_size.height.max(1) as f32,
                    );
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    let key = event.logical_key.clone();
                    self.handle_key(&key, event_loop);
                }
            }
            WindowEvent::RedrawRequested => {
                let (elapsed, delta) = self.time.update();

                if let (Some(gpu), Some(sim)) = (&mut self.gpu, &mut self.sim) {
                    if let Some(frame) = sim.tick() {
                        gpu.prepare(frame);
                        match gpu.render(elapsed, delta) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => {
                                gpu.resize(winit::dpi::PhysicalSize {
                                    width: gpu.config.width,
                                    height: gpu.config.height,
                                })
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                            Err(e) => eprintln!("Render error: {:?}", e),
                        }
                    }
                }

                self.refresh_title();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // The loop schedules nothing once stopped; make that unconditional.
        if let Some(sim) = &mut self.sim {
            sim.stop();
        }
    }
}
