// Bus module - the system bus tying the CPU to PPU, controllers, and cartridge
//
// The bus owns the PPU, the 2KB of CPU-side RAM, both controller ports, and
// the cartridge mapper. The CPU owns the bus. Every CPU instruction reports
// how many cycles it took; the bus ticks the PPU three times per CPU cycle
// (`tick`) and, on the dot the PPU's VBlank flag transitions false->true,
// invokes the end-of-frame callback supplied at construction — this is the
// only place a completed frame is observed from outside the emulator core.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4013, $4015, $4017: APU registers (accepted, not sonically emulated)
// $4014: OAM DMA
// $4016-$4017: Controller ports
// $4018-$401F: APU and I/O test functionality (usually disabled)
// $4020-$FFFF: Cartridge space (PRG-ROM via the mapper)
// ```

use crate::cartridge::mapper0::Mapper0;
use crate::cartridge::Mapper;
use crate::controller::Controller;
use crate::frame::Frame;
use crate::ppu::Ppu;

/// Trait for memory-mapped components
///
/// Not every component on the bus implements this — the PPU and mapper have
/// register contracts too specific to fit one `read`/`write` pair — but it's
/// kept for the plain RAM-shaped pieces and for test helpers that want a
/// uniform interface.
pub trait MemoryMappedDevice {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// The system bus
pub struct Bus {
    cpu_vram: [u8; 2048],
    ppu: Ppu,
    mapper: Mapper0,
    controller1: Controller,
    controller2: Controller,

    /// Total CPU cycles elapsed since power-on; OAM DMA's extra "+1 if odd" cycle depends on this.
    master_cycles: u64,

    on_frame: Box<dyn FnMut(&Frame)>,
}

impl Bus {
    /// Construct a bus around an already-loaded mapper and an end-of-frame callback
    ///
    /// `on_frame` is invoked synchronously, once, on the cycle the PPU's
    /// VBlank flag transitions from clear to set (see `tick`).
    pub fn new(mapper: Mapper0, on_frame: Box<dyn FnMut(&Frame)>) -> Self {
        let mirroring = mapper.mirroring();
        Bus {
            cpu_vram: [0; 2048],
            ppu: Ppu::new(mirroring),
            mapper,
            controller1: Controller::new(),
            controller2: Controller::new(),
            master_cycles: 0,
            on_frame,
        }
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn controller1_mut(&mut self) -> &mut Controller {
        &mut self.controller1
    }

    pub fn controller2_mut(&mut self) -> &mut Controller {
        &mut self.controller2
    }

    /// Advance the PPU (and, were it emulated, the APU) by `cpu_cycles` CPU
    /// cycles' worth of time — three PPU dots per CPU cycle.
    ///
    /// Invokes the end-of-frame callback exactly once if VBlank's rising edge
    /// was crossed during this call.
    pub fn tick(&mut self, cpu_cycles: u32) {
        self.master_cycles += cpu_cycles as u64;

        let vblank_before = self.ppu.status_vblank();
        self.ppu.tick_cycles(cpu_cycles * 3, &self.mapper);
        let vblank_after = self.ppu.status_vblank();

        if !vblank_before && vblank_after {
            (self.on_frame)(self.ppu.frame());
            log::trace!("frame complete at master cycle {}", self.master_cycles);
        }
    }

    /// Whether the CPU should service an NMI now (PPU's VBlank NMI, not yet delivered)
    pub fn nmi_pending(&self) -> bool {
        self.ppu.nmi_pending()
    }

    pub fn mark_nmi_delivered(&mut self) {
        self.ppu.mark_nmi_delivered();
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.cpu_vram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.read_register(addr & 0x0007, &mut self.mapper),
            0x4016 => self.controller1.read(),
            0x4017 => self.controller2.read(),
            0x4000..=0x4015 | 0x4018..=0x401F => {
                log::trace!("unhandled APU/IO read at ${:04X}", addr);
                0
            }
            0x4020..=0xFFFF => self.mapper.cpu_read(addr),
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.cpu_vram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => self.ppu.write_register(addr & 0x0007, data, &mut self.mapper),
            0x4014 => self.oam_dma(data),
            0x4016 => {
                // $4016 bit 0 strobes both controller shift registers at once
                self.controller1.write_strobe(data);
                self.controller2.write_strobe(data);
            }
            0x4017 => {
                log::trace!("unhandled APU frame counter write ${:02X}", data);
            }
            0x4000..=0x4015 | 0x4018..=0x401F => {
                log::trace!("unhandled APU/IO write at ${:04X} = ${:02X}", addr, data);
            }
            0x4020..=0xFFFF => self.mapper.cpu_write(addr, data),
        }
    }

    /// $4014 OAM DMA: copy 256 bytes from `(value << 8)..` into OAM, starting
    /// at the PPU's current OAMADDR. Burns 513 CPU cycles, or 514 if the
    /// transfer starts on an odd CPU cycle (one extra alignment cycle).
    fn oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        let start_addr = self.ppu.oam_addr();
        let odd_cycle = self.master_cycles % 2 == 1;

        for i in 0..256u16 {
            let byte = self.read(base + i);
            self.ppu.write_oam(start_addr.wrapping_add(i as u8), byte);
        }

        let dma_cycles = if odd_cycle { 514 } else { 513 };
        self.tick(dma_cycles);
    }

    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub fn write_u16(&mut self, addr: u16, data: u16) {
        let lo = (data & 0xFF) as u8;
        let hi = (data >> 8) as u8;
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }
}
