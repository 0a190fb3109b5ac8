// NES Emulator Library
// Core library: CPU, PPU, bus, cartridge/mapper, and controller for a
// mapper-0 (NROM) NES emulator core.

pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod frame;
pub mod ppu;

pub use bus::Bus;
pub use cartridge::{Cartridge, Mapper, Mirroring};
pub use controller::Controller;
pub use cpu::Cpu;
pub use emulator::Emulator;
pub use error::Error;
pub use frame::Frame;
pub use ppu::Ppu;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components_construct() {
        let _emulator = Emulator::new();
        let _controller = Controller::new();
        let _frame = Frame::new();
    }
}
