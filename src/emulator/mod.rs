// Emulator module - load/reset/step coordination
//
// `Emulator` is the thin seam between a host loop and the `Cpu`/`Bus` core:
// it owns the cartridge path, constructs the `Mapper0`/`Bus`/`Cpu` graph on
// load, and exposes `step_instruction` for the host to call repeatedly.

use crate::bus::Bus;
use crate::cartridge::mapper0::Mapper0;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::Error;
use crate::frame::Frame;
use std::path::{Path, PathBuf};

/// Coordinates cartridge loading and CPU stepping
///
/// Does not itself render or accept input; those are the host's job (see
/// `main.rs`). `Emulator` only owns what's needed to answer "load this ROM"
/// and "run one more instruction".
pub struct Emulator {
    cpu: Cpu,
    rom_path: Option<PathBuf>,
}

impl Emulator {
    /// Create an emulator with no cartridge loaded
    ///
    /// The CPU runs against a blank 32KB NROM image until [`Emulator::load_rom`]
    /// replaces it; every read returns 0.
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(Bus::new(Mapper0::new(blank_cartridge()), Box::new(|_frame| {}))),
            rom_path: None,
        }
    }

    /// Build an emulator around an already-loaded cartridge and frame callback
    ///
    /// `on_frame` is invoked once per completed frame (the VBlank false→true
    /// transition), synchronously from inside [`Emulator::step_instruction`].
    pub fn with_cartridge(cartridge: Cartridge, on_frame: Box<dyn FnMut(&Frame)>) -> Self {
        let mapper = Mapper0::new_checked(cartridge);
        let mut cpu = Cpu::new(Bus::new(mapper, on_frame));
        cpu.reset();
        Emulator {
            cpu,
            rom_path: None,
        }
    }

    /// Load an iNES ROM from disk and reset the CPU to run it
    ///
    /// Replaces the currently loaded cartridge, if any. `Error::BadFormat`
    /// propagates from a malformed header; a mapper other than 0 only logs a
    /// warning and continues in NROM-compatible mode (see `Mapper0::new_checked`).
    pub fn load_rom<P: AsRef<Path>>(
        &mut self,
        path: P,
        on_frame: Box<dyn FnMut(&Frame)>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|_| Error::BadFormat)?;
        let cartridge = Cartridge::load(&bytes)?;
        let mapper = Mapper0::new_checked(cartridge);

        self.cpu = Cpu::new(Bus::new(mapper, on_frame));
        self.cpu.reset();
        self.rom_path = Some(path.to_path_buf());

        log::info!("loaded {}", path.display());
        Ok(())
    }

    /// Reset the CPU to its power-on state, as if pressing the reset button
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute one CPU instruction
    ///
    /// Returns `Error::DecodeKill` once the CPU has halted on an illegal
    /// KIL/JAM opcode; every call after that returns the same error without
    /// advancing anything.
    pub fn step_instruction(&mut self) -> Result<u8, Error> {
        self.cpu.step_instruction()
    }

    /// Reference to the CPU, for inspecting registers/flags
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable reference to the CPU
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The currently loaded ROM's path, if one has been loaded
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

fn blank_cartridge() -> Cartridge {
    Cartridge {
        prg_rom: vec![0u8; 0x8000],
        chr_rom: vec![0u8; 0x2000],
        trainer: None,
        mapper: 0,
        mirroring: crate::cartridge::Mirroring::Horizontal,
        has_battery: false,
        chr_is_ram: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ines_header(prg_pages: u8, chr_pages: u8) -> Vec<u8> {
        let mut header = vec![b'N', b'E', b'S', 0x1A, prg_pages, chr_pages, 0, 0];
        header.extend_from_slice(&[0u8; 8]);
        header
    }

    #[test]
    fn test_new_runs_against_blank_rom() {
        let mut emulator = Emulator::new();
        emulator.reset();
        let result = emulator.step_instruction();
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_rom_rejects_bad_magic() {
        let mut emulator = Emulator::new();
        let path = std::env::temp_dir().join("nes_rs_test_bad_magic.nes");
        std::fs::write(&path, vec![0u8; 32]).unwrap();

        let result = emulator.load_rom(&path, Box::new(|_| {}));
        assert!(matches!(result, Err(Error::BadFormat)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rom_runs_reset_vector() {
        let mut data = ines_header(2, 1);
        let mut prg = vec![0u8; 0x8000];
        // RESET vector ($FFFC-$FFFD, at the end of a 32KB image) points at $8000
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        prg[0x0000] = 0xEA; // NOP
        data.extend(prg);
        data.extend(vec![0u8; 0x2000]);

        let path = std::env::temp_dir().join("nes_rs_test_load_rom.nes");
        std::fs::write(&path, data).unwrap();

        let mut emulator = Emulator::new();
        emulator.load_rom(&path, Box::new(|_| {})).expect("valid rom");
        assert_eq!(emulator.cpu().pc, 0x8000);

        let cycles = emulator.step_instruction().expect("not halted");
        assert_eq!(cycles, 2);
        assert_eq!(emulator.cpu().pc, 0x8001);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_step_instruction_surfaces_decode_kill() {
        let mut data = ines_header(2, 1);
        let mut prg = vec![0u8; 0x8000];
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        prg[0x0000] = 0x02; // KIL
        data.extend(prg);
        data.extend(vec![0u8; 0x2000]);

        let path = std::env::temp_dir().join("nes_rs_test_kil.nes");
        std::fs::write(&path, data).unwrap();

        let mut emulator = Emulator::new();
        emulator.load_rom(&path, Box::new(|_| {})).expect("valid rom");

        emulator.step_instruction().expect("KIL still executes once");
        match emulator.step_instruction() {
            Err(Error::DecodeKill(pc)) => assert_eq!(pc, 0x8000),
            other => panic!("expected DecodeKill, got {other:?}"),
        }

        std::fs::remove_file(&path).ok();
    }
}
