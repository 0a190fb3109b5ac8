// NES Emulator - Main Entry Point
//
// Minimal CLI: load an iNES ROM, open a window, and run the CPU until the
// user closes it or the CPU halts. The windowing/input loop here is the
// "host" the core talks to through `Emulator::step_instruction` and the
// end-of-frame callback; none of it is part of the core's tested contract.

use clap::Parser;
use nes_rs::controller::buttons;
use nes_rs::emulator::Emulator;
use nes_rs::frame;
use pixels::{Pixels, SurfaceTexture};
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const SCALE: u32 = 3;

/// A cycle-accurate NES (mapper 0) emulator
#[derive(Parser)]
#[command(name = "nes-rs", version, about)]
struct Cli {
    /// Path to an iNES (.nes) ROM file
    rom: std::path::PathBuf,
}

/// Application state driving the winit event loop
///
/// Runs CPU instructions eagerly in `about_to_wait` and redraws whenever the
/// end-of-frame callback has signaled a new frame is ready. Keyboard state
/// is written straight into controller 1's bitmap on every key event.
struct App {
    emulator: Emulator,
    frame_ready: Rc<RefCell<bool>>,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    button_bitmap: u8,
    halted: bool,
}

impl App {
    fn new(emulator: Emulator, frame_ready: Rc<RefCell<bool>>) -> Self {
        App {
            emulator,
            frame_ready,
            window: None,
            pixels: None,
            button_bitmap: 0,
            halted: false,
        }
    }

    fn set_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(bit) = button_bit(key) else {
            return;
        };
        if pressed {
            self.button_bitmap |= 1 << bit;
        } else {
            self.button_bitmap &= !(1 << bit);
        }
        self.emulator
            .cpu_mut()
            .bus
            .controller1_mut()
            .set_button_bitmap(self.button_bitmap);
    }

    fn run_until_frame_or_halt(&mut self) {
        if self.halted {
            return;
        }
        while !*self.frame_ready.borrow() {
            match self.emulator.step_instruction() {
                Ok(_) => {}
                Err(err) => {
                    log::error!("CPU halted: {err}");
                    self.halted = true;
                    return;
                }
            }
        }
        *self.frame_ready.borrow_mut() = false;
    }

    fn render(&mut self) {
        let Some(pixels) = &mut self.pixels else {
            return;
        };
        let src = self.emulator.cpu().bus.ppu().frame().as_bytes();
        let dst = pixels.frame_mut();
        for (rgb, rgba) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
            rgba[..3].copy_from_slice(rgb);
            rgba[3] = 0xFF;
        }
        if let Err(err) = pixels.render() {
            log::error!("render error: {err}");
        }
    }
}

fn button_bit(key: KeyCode) -> Option<u8> {
    Some(match key {
        KeyCode::KeyZ => buttons::A,
        KeyCode::KeyX => buttons::B,
        KeyCode::ShiftRight | KeyCode::ShiftLeft => buttons::SELECT,
        KeyCode::Enter => buttons::START,
        KeyCode::ArrowUp => buttons::UP,
        KeyCode::ArrowDown => buttons::DOWN,
        KeyCode::ArrowLeft => buttons::LEFT,
        KeyCode::ArrowRight => buttons::RIGHT,
        _ => return None,
    })
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let width = frame::WIDTH as u32 * SCALE;
        let height = frame::HEIGHT as u32 * SCALE;
        let window_attributes = Window::default_attributes()
            .with_title("nes-rs")
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );
        let surface_texture = SurfaceTexture::new(width, height, window.clone());
        let pixels = Pixels::new(frame::WIDTH as u32, frame::HEIGHT as u32, surface_texture)
            .expect("failed to create pixel buffer");

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                self.set_key(key, state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if self.halted {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.run_until_frame_or_halt();
        if self.halted {
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let frame_ready = Rc::new(RefCell::new(false));
    let frame_ready_cb = frame_ready.clone();
    let on_frame = Box::new(move |_frame: &nes_rs::Frame| {
        *frame_ready_cb.borrow_mut() = true;
    });

    let mut emulator = Emulator::new();
    emulator.load_rom(&cli.rom, on_frame)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(emulator, frame_ready);
    event_loop.run_app(&mut app)?;

    if app.halted {
        return Err("CPU halted on an illegal KIL opcode".into());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("nes-rs: {err}");
            ExitCode::FAILURE
        }
    }
}
