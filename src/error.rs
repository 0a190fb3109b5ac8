// Error types for cartridge loading and CPU execution failures

use thiserror::Error;

/// Errors surfaced by the emulator core
///
/// Most invalid conditions the real hardware would just shrug off (open-bus
/// reads, writes to ROM) are silently ignored rather than modeled as errors;
/// see the bus and PPU register documentation for those. This enum only
/// covers the handful of conditions that must abort a load or halt
/// execution.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte buffer does not start with the iNES magic `NES\x1A`
    #[error("not an iNES file: bad magic bytes")]
    BadFormat,

    /// The cartridge declares a mapper other than 0 (NROM)
    ///
    /// The cartridge still loads; this is a best-effort warning, not an
    /// abort (see `SPEC_FULL.md` §7).
    #[error("unsupported mapper {0}, continuing in NROM-compatible best-effort mode")]
    UnsupportedMapper(u8),

    /// PRG or CHR allocation failed
    #[error("out of memory while allocating cartridge data")]
    OutOfMemory,

    /// The CPU executed a KIL/JAM opcode and has halted
    #[error("CPU halted on KIL opcode at ${0:04X}")]
    DecodeKill(u16),
}
