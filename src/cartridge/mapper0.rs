// Mapper 0 (NROM) - The simplest NES mapper with no bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB if only 16KB total)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// Variants:
// - NROM-128: 16KB PRG-ROM (mirrored to fill 32KB space)
// - NROM-256: 32KB PRG-ROM (no mirroring)
//
// CHR Configuration:
// - CHR-ROM: 8KB read-only pattern memory
// - CHR-RAM: 8KB writable pattern memory

use crate::cartridge::{Cartridge, Mapper, Mirroring};
use crate::error::Error;

/// Mapper 0 implementation (NROM)
///
/// This is the simplest mapper used by games like Super Mario Bros., Donkey
/// Kong, and Balloon Fight. It has no bank switching capability. A cartridge
/// whose header declares a different mapper number is still accepted here —
/// SPEC_FULL.md treats `UnsupportedMapper` as a warn-and-continue condition,
/// not a load failure, so the caller constructs a `Mapper0` regardless and
/// logs the mismatch itself (see `cartridge::mapper0::new_checked`).
pub struct Mapper0 {
    /// PRG-ROM data (16KB or 32KB)
    prg_rom: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is RAM (writable) or ROM (read-only)
    chr_is_ram: bool,
    /// Mirroring type (fixed, cannot be changed by the mapper)
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Create a new Mapper0 instance from a cartridge
    ///
    /// # Arguments
    /// * `cartridge` - The cartridge containing ROM data
    ///
    /// # Panics
    /// Panics if PRG-ROM size is not 16KB or 32KB (should be validated before mapper creation)
    pub fn new(cartridge: Cartridge) -> Self {
        let prg_rom_size = cartridge.prg_rom.len();

        // Validate PRG-ROM size (must be 16KB or 32KB)
        assert!(
            prg_rom_size == 16 * 1024 || prg_rom_size == 32 * 1024,
            "Mapper 0 requires 16KB or 32KB PRG-ROM, got {} bytes",
            prg_rom_size
        );

        Mapper0 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_rom,
            chr_is_ram: cartridge.chr_is_ram,
            mirroring: cartridge.mirroring,
        }
    }

    /// Create a `Mapper0` from a cartridge, warning instead of failing when
    /// the header declares a different mapper number
    ///
    /// Every cartridge this crate loads ends up NROM-mapped regardless of
    /// what its header says; a mismatch is surfaced as a `log::warn!` using
    /// `Error::UnsupportedMapper`'s own message, not as a load failure.
    pub fn new_checked(cartridge: Cartridge) -> Self {
        if cartridge.mapper != 0 {
            log::warn!("{}", Error::UnsupportedMapper(cartridge.mapper));
        }
        Self::new(cartridge)
    }
}

impl Mapper for Mapper0 {
    /// Read from CPU address space
    ///
    /// For NROM:
    /// - $8000-$BFFF: First 16KB of PRG-ROM
    /// - $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB for 16KB ROMs)
    fn cpu_read(&self, address: u16) -> u8 {
        match address {
            0x8000..=0xFFFF => {
                // Map address to PRG-ROM index
                let index = (address - 0x8000) as usize;

                // Use modulo to handle mirroring for 16KB ROMs
                // For 32KB ROMs, modulo has no effect since index < prg_rom.len()
                self.prg_rom[index % self.prg_rom.len()]
            }
            _ => {
                // Unmapped address (shouldn't happen if bus is implemented correctly)
                0
            }
        }
    }

    /// Write to CPU address space
    ///
    /// NROM has no writable registers, so all writes are ignored
    fn cpu_write(&mut self, _address: u16, _value: u8) {
        // NROM has no bank switching or other mapper registers
        // Writes to PRG-ROM space are ignored
    }

    /// Read from PPU address space
    ///
    /// For NROM:
    /// - $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
    fn ppu_read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => {
                let index = address as usize;
                self.chr_mem[index]
            }
            _ => {
                // Unmapped address (shouldn't happen if bus is implemented correctly)
                0
            }
        }
    }

    /// Write to PPU address space
    ///
    /// For NROM:
    /// - CHR-RAM: writes are allowed
    /// - CHR-ROM: writes are ignored
    fn ppu_write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x1FFF => {
                if self.chr_is_ram {
                    let index = address as usize;
                    self.chr_mem[index] = value;
                }
                // For CHR-ROM, writes are silently ignored
            }
            _ => {
                // Unmapped address (shouldn't happen if bus is implemented correctly)
            }
        }
    }

    /// Get the mirroring mode
    ///
    /// For NROM, mirroring is fixed and determined by the cartridge header
    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
