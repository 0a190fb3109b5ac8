// CPU execution and trace logging module

use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::OPCODE_TABLE;
use crate::cpu::Cpu;
use crate::error::Error;

impl Cpu {
    /// Execute one instruction, surfacing a halted CPU as an error
    ///
    /// This is what the host stepping loop calls. Once a KIL/JAM opcode has
    /// been decoded, `step` becomes a no-op and every subsequent call here
    /// returns `Error::DecodeKill` instead of silently doing nothing.
    pub fn step_instruction(&mut self) -> Result<u8, Error> {
        if self.halted {
            return Err(Error::DecodeKill(self.pc));
        }
        Ok(self.step())
    }

    /// Execute one CPU instruction
    ///
    /// Polls for a pending NMI first (interrupt delivery happens between
    /// instructions), then fetches, decodes, executes, and ticks the bus by
    /// the instruction's cycle cost.
    ///
    /// # Returns
    /// The number of cycles consumed by this instruction
    pub fn step(&mut self) -> u8 {
        if self.halted {
            return 0;
        }

        self.poll_nmi();

        // Fetch opcode from current PC
        let opcode = self.bus.read(self.pc);
        let opcode_info = &OPCODE_TABLE[opcode as usize];

        // Move PC past the opcode
        self.pc = self.pc.wrapping_add(1);

        // Calculate effective address based on addressing mode
        let addr_result = match opcode_info.mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(),
            AddressingMode::ZeroPage => self.addr_zero_page(),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(),
            AddressingMode::Relative => self.addr_relative(),
            AddressingMode::Absolute => self.addr_absolute(),
            AddressingMode::AbsoluteX => self.addr_absolute_x(),
            AddressingMode::AbsoluteY => self.addr_absolute_y(),
            AddressingMode::Indirect => self.addr_indirect(),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(),
        };

        // Execute the instruction (may return extra cycles for branches)
        let extra_cycles = self.execute_instruction(opcode, &addr_result);

        // Calculate actual cycles (base + page crossing penalty + branch cycles)
        let mut cycles = opcode_info.cycles;
        if opcode_info.page_cycle
            && addr_result.page_crossed
            && opcode_info.mode != AddressingMode::Relative
        {
            cycles += 1;
        }
        cycles += extra_cycles;

        // Update total cycle counter and advance the rest of the system
        self.cycles = self.cycles.wrapping_add(cycles as u64);
        self.bus.tick(cycles as u32);

        cycles
    }

    /// Execute a specific instruction based on its opcode
    /// Returns the number of extra cycles consumed (used by branch instructions)
    #[allow(clippy::too_many_lines)]
    fn execute_instruction(
        &mut self,
        opcode: u8,
        addr_result: &crate::cpu::addressing::AddressingResult,
    ) -> u8 {
        match opcode {
            // Load/Store instructions
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(addr_result),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(addr_result),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(addr_result),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(addr_result),
            0x86 | 0x96 | 0x8E => self.stx(addr_result),
            0x84 | 0x94 | 0x8C => self.sty(addr_result),

            // Arithmetic instructions
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(addr_result),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 | 0xEB => self.sbc(addr_result),
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(addr_result),
            0xE8 => self.inx(),
            0xC8 => self.iny(),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(addr_result),
            0xCA => self.dex(),
            0x88 => self.dey(),

            // Logical instructions
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(addr_result),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(addr_result),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(addr_result),
            0x24 | 0x2C => self.bit(addr_result),

            // Shift/Rotate instructions
            0x0A => self.asl(addr_result, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(addr_result, false),
            0x4A => self.lsr(addr_result, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(addr_result, false),
            0x2A => self.rol(addr_result, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(addr_result, false),
            0x6A => self.ror(addr_result, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(addr_result, false),

            // Compare instructions
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(addr_result),
            0xE0 | 0xE4 | 0xEC => self.cpx(addr_result),
            0xC0 | 0xC4 | 0xCC => self.cpy(addr_result),

            // Branch instructions (return extra cycles)
            0x90 => return self.bcc(addr_result),
            0xB0 => return self.bcs(addr_result),
            0xF0 => return self.beq(addr_result),
            0x30 => return self.bmi(addr_result),
            0xD0 => return self.bne(addr_result),
            0x10 => return self.bpl(addr_result),
            0x50 => return self.bvc(addr_result),
            0x70 => return self.bvs(addr_result),

            // Jump/Subroutine instructions
            0x4C | 0x6C => return self.jmp(addr_result),
            0x20 => return self.jsr(addr_result),
            0x60 => return self.rts(addr_result),

            // Stack instructions
            0x48 => return self.pha(addr_result),
            0x68 => return self.pla(addr_result),
            0x08 => return self.php(addr_result),
            0x28 => return self.plp(addr_result),
            0x9A => self.txs(),
            0xBA => self.tsx(),

            // Transfer instructions
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),

            // Flag instructions
            0x18 => return self.clc(addr_result),
            0xD8 => return self.cld(addr_result),
            0x58 => return self.cli(addr_result),
            0xB8 => return self.clv(addr_result),
            0x38 => return self.sec(addr_result),
            0xF8 => return self.sed(addr_result),
            0x78 => return self.sei(addr_result),

            // Miscellaneous instructions
            0x00 => return self.brk(addr_result),
            0x40 => return self.rti(addr_result),
            0xEA | 0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA => return self.nop(addr_result),

            // Unofficial read-modify-write combos
            0x03 | 0x07 | 0x0F | 0x13 | 0x17 | 0x1B | 0x1F => self.slo(addr_result),
            0x23 | 0x27 | 0x2F | 0x33 | 0x37 | 0x3B | 0x3F => self.rla(addr_result),
            0x43 | 0x47 | 0x4F | 0x53 | 0x57 | 0x5B | 0x5F => self.sre(addr_result),
            0x63 | 0x67 | 0x6F | 0x73 | 0x77 | 0x7B | 0x7F => self.rra(addr_result),
            0xC3 | 0xC7 | 0xCF | 0xD3 | 0xD7 | 0xDB | 0xDF => self.dcp(addr_result),
            0xE3 | 0xE7 | 0xEF | 0xF3 | 0xF7 | 0xFB | 0xFF => self.isc(addr_result),

            // Unofficial load/store combos
            0xA3 | 0xA7 | 0xAF | 0xB3 | 0xB7 | 0xBF => self.lax(addr_result),
            0x83 | 0x87 | 0x8F | 0x97 => self.aax(addr_result),
            0xBB => self.lar(addr_result),
            0x9E => self.sxa(addr_result),
            0x9C => self.sya(addr_result),
            0x9B => self.xas(addr_result),
            0x93 | 0x9F => self.axa(addr_result),

            // Unofficial immediate-operand combos
            0x0B | 0x2B => self.aac(addr_result),
            0x4B => self.asr(addr_result),
            0x6B => self.arr(addr_result),
            0xAB => self.atx(addr_result),
            0xCB => self.axs(addr_result),
            0x8B => self.xaa(addr_result),

            // Unofficial no-ops
            0x04 | 0x44 | 0x64 | 0x14 | 0x34 | 0x54 | 0x74 | 0xD4 | 0xF4 | 0x80 | 0x82 | 0x89
            | 0xC2 | 0xE2 => self.dop(addr_result),
            0x0C | 0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC => self.top(addr_result),

            // KIL/JAM - halts the CPU
            0x02 | 0x12 | 0x22 | 0x32 | 0x42 | 0x52 | 0x62 | 0x72 | 0x92 | 0xB2 | 0xD2 | 0xF2 => {
                self.kil();
            }

            _ => unreachable!("opcode ${opcode:02X} is not present in the decode table"),
        }
        0 // No extra cycles for non-branch instructions
    }

    /// Generate a trace log line in Nestest format
    ///
    /// Format: PC  OP OP OP  MNEMONIC $ADDR    A:XX X:XX Y:XX P:XX SP:XX PPU:XXX,XXX CYC:XXXX
    /// Example: C000  4C F5 C5  JMP $C5F5       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7
    pub fn trace(&mut self) -> String {
        let pc = self.pc;
        let opcode = self.bus.read(pc);
        let opcode_info = &OPCODE_TABLE[opcode as usize];

        // Read instruction bytes (opcode + operands)
        let byte1 = opcode;
        let byte2 = if opcode_info.bytes >= 2 {
            self.bus.read(pc.wrapping_add(1))
        } else {
            0
        };
        let byte3 = if opcode_info.bytes >= 3 {
            self.bus.read(pc.wrapping_add(2))
        } else {
            0
        };

        // Format the hex bytes with proper spacing (9 characters total)
        let hex_bytes = match opcode_info.bytes {
            1 => format!("{:02X}      ", byte1),
            2 => format!("{:02X} {:02X}   ", byte1, byte2),
            3 => format!("{:02X} {:02X} {:02X}", byte1, byte2, byte3),
            _ => format!("{:02X}      ", byte1),
        };

        // Disassemble the instruction with operand
        let opcode_info = *opcode_info;
        let disassembly = self.disassemble_instruction(pc, &opcode_info, byte2, byte3);

        // Format the trace line (pad disassembly to 32 characters from start)
        format!(
            "{:04X}  {}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    /// Disassemble an instruction into human-readable format
    #[allow(clippy::too_many_lines)]
    fn disassemble_instruction(
        &mut self,
        pc: u16,
        opcode_info: &crate::cpu::opcodes::OpcodeInfo,
        byte2: u8,
        byte3: u8,
    ) -> String {
        let mnemonic = opcode_info.mnemonic;

        match opcode_info.mode {
            AddressingMode::Implied | AddressingMode::Accumulator => {
                if opcode_info.mode == AddressingMode::Accumulator {
                    format!("{} A", mnemonic)
                } else {
                    mnemonic.to_string()
                }
            }
            AddressingMode::Immediate => {
                format!("{} #${:02X}", mnemonic, byte2)
            }
            AddressingMode::ZeroPage => {
                let addr = byte2;
                let value = self.bus.read(addr as u16);
                format!("{} ${:02X} = {:02X}", mnemonic, addr, value)
            }
            AddressingMode::ZeroPageX => {
                let base = byte2;
                let addr = base.wrapping_add(self.x);
                let value = self.bus.read(addr as u16);
                format!(
                    "{} ${:02X},X @ {:02X} = {:02X}",
                    mnemonic, base, addr, value
                )
            }
            AddressingMode::ZeroPageY => {
                let base = byte2;
                let addr = base.wrapping_add(self.y);
                let value = self.bus.read(addr as u16);
                format!(
                    "{} ${:02X},Y @ {:02X} = {:02X}",
                    mnemonic, base, addr, value
                )
            }
            AddressingMode::Relative => {
                let offset = byte2 as i8;
                let target = if offset >= 0 {
                    pc.wrapping_add(2).wrapping_add(offset as u16)
                } else {
                    pc.wrapping_add(2).wrapping_sub((-offset) as u16)
                };
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                let addr = u16::from_le_bytes([byte2, byte3]);
                if mnemonic == "JMP" || mnemonic == "JSR" {
                    format!("{} ${:04X}", mnemonic, addr)
                } else {
                    let value = self.bus.read(addr);
                    format!("{} ${:04X} = {:02X}", mnemonic, addr, value)
                }
            }
            AddressingMode::AbsoluteX => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.x as u16);
                let value = self.bus.read(addr);
                format!(
                    "{} ${:04X},X @ {:04X} = {:02X}",
                    mnemonic, base, addr, value
                )
            }
            AddressingMode::AbsoluteY => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.y as u16);
                let value = self.bus.read(addr);
                format!(
                    "{} ${:04X},Y @ {:04X} = {:02X}",
                    mnemonic, base, addr, value
                )
            }
            AddressingMode::Indirect => {
                let ptr = u16::from_le_bytes([byte2, byte3]);
                let lo = self.bus.read(ptr);
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr + 1
                };
                let hi = self.bus.read(hi_addr);
                let target = u16::from_le_bytes([lo, hi]);
                format!("{} (${:04X}) = {:04X}", mnemonic, ptr, target)
            }
            AddressingMode::IndexedIndirect => {
                let base = byte2;
                let ptr = base.wrapping_add(self.x);
                let lo = self.bus.read(ptr as u16);
                let hi = self.bus.read(ptr.wrapping_add(1) as u16);
                let addr = u16::from_le_bytes([lo, hi]);
                let value = self.bus.read(addr);
                format!(
                    "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                    mnemonic, base, ptr, addr, value
                )
            }
            AddressingMode::IndirectIndexed => {
                let ptr = byte2;
                let lo = self.bus.read(ptr as u16);
                let hi = self.bus.read(ptr.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([lo, hi]);
                let addr = base.wrapping_add(self.y as u16);
                let value = self.bus.read(addr);
                format!(
                    "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                    mnemonic, ptr, base, addr, value
                )
            }
        }
    }
}
