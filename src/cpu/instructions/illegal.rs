// Undocumented ("illegal") 6502 opcodes for the 6502 CPU
//
// These opcodes were never part of the official instruction set, but fall
// out of gaps in the CPU's instruction decode ROM and are exercised by a
// number of commercial cartridges. Several (ATX, AXA, AXS, LAR, SXA, SYA,
// XAA, XAS) are documented as unstable on real silicon — behavior can vary
// with bus capacitance and temperature. The implementations below follow the
// commonly accepted deterministic behavior used by reference emulators,
// which is good enough to run real software without crashing.

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Read-Modify-Write Combos
    // ========================================

    /// SLO (ASO) - Shift Left, then OR with Accumulator
    ///
    /// ASL the memory operand, then OR the result into A.
    ///
    /// Flags affected: C, Z, N
    pub fn slo(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address);
        self.set_carry((value & 0x80) != 0);
        let shifted = value << 1;
        self.bus.write(addr_result.address, shifted);
        self.a |= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RLA - Rotate Left, then AND with Accumulator
    ///
    /// ROL the memory operand, then AND the result into A.
    ///
    /// Flags affected: C, Z, N
    pub fn rla(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address);
        let old_carry = if self.get_carry() { 1 } else { 0 };
        self.set_carry((value & 0x80) != 0);
        let rotated = (value << 1) | old_carry;
        self.bus.write(addr_result.address, rotated);
        self.a &= rotated;
        self.update_zero_and_negative_flags(self.a);
    }

    /// SRE (LSE) - Shift Right, then EOR with Accumulator
    ///
    /// LSR the memory operand, then EOR the result into A.
    ///
    /// Flags affected: C, Z, N
    pub fn sre(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address);
        self.set_carry((value & 0x01) != 0);
        let shifted = value >> 1;
        self.bus.write(addr_result.address, shifted);
        self.a ^= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RRA - Rotate Right, then Add with Carry
    ///
    /// ROR the memory operand, then ADC the result into A.
    ///
    /// Flags affected: C, Z, V, N
    pub fn rra(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address);
        let old_carry = if self.get_carry() { 0x80 } else { 0 };
        let carry_out = (value & 0x01) != 0;
        let rotated = (value >> 1) | old_carry;
        self.bus.write(addr_result.address, rotated);

        let carry_in = if carry_out { 1 } else { 0 };
        let sum = self.a as u16 + rotated as u16 + carry_in as u16;
        self.set_carry(sum > 0xFF);
        let result = sum as u8;
        let overflow = (self.a ^ result) & (rotated ^ result) & 0x80 != 0;
        self.set_overflow(overflow);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// DCP (DCM) - Decrement Memory, then Compare with Accumulator
    ///
    /// Flags affected: C, Z, N
    pub fn dcp(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address).wrapping_sub(1);
        self.bus.write(addr_result.address, value);

        let result = self.a.wrapping_sub(value);
        self.set_carry(self.a >= value);
        self.set_zero(result == 0);
        self.set_negative((result & 0x80) != 0);
    }

    /// ISC (ISB/INS) - Increment Memory, then Subtract with Carry
    ///
    /// Flags affected: C, Z, V, N
    pub fn isc(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address).wrapping_add(1);
        self.bus.write(addr_result.address, value);

        let inverted = !value;
        let carry = if self.get_carry() { 1 } else { 0 };
        let sum = self.a as u16 + inverted as u16 + carry as u16;
        self.set_carry(sum > 0xFF);
        let result = sum as u8;
        let overflow = (self.a ^ result) & (inverted ^ result) & 0x80 != 0;
        self.set_overflow(overflow);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    // ========================================
    // Load/Store Combos
    // ========================================

    /// LAX - Load Accumulator and X Register
    ///
    /// Loads the same memory value into both A and X in one instruction.
    ///
    /// Flags affected: Z, N
    pub fn lax(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// AAX (SAX) - Store (A AND X)
    ///
    /// Stores the bitwise AND of A and X to memory. Affects no flags.
    ///
    /// Flags affected: None
    pub fn aax(&mut self, addr_result: &AddressingResult) {
        self.bus.write(addr_result.address, self.a & self.x);
    }

    /// LAR (LAS) - Load Accumulator, X, and Stack Pointer
    ///
    /// ANDs the memory operand with SP and loads the result into A, X, and SP.
    ///
    /// Flags affected: Z, N
    pub fn lar(&mut self, addr_result: &AddressingResult) {
        let value = self.bus.read(addr_result.address) & self.sp;
        self.a = value;
        self.x = value;
        self.sp = value;
        self.update_zero_and_negative_flags(value);
    }

    /// SXA (SHX) - Store (X AND (high byte of address + 1))
    ///
    /// Unstable on real hardware when the indexed address crosses a page;
    /// this models the commonly observed deterministic behavior.
    ///
    /// Flags affected: None
    pub fn sxa(&mut self, addr_result: &AddressingResult) {
        let high = (addr_result.address >> 8) as u8;
        let value = self.x & high.wrapping_add(1);
        self.bus.write(addr_result.address, value);
    }

    /// SYA (SHY) - Store (Y AND (high byte of address + 1))
    ///
    /// Flags affected: None
    pub fn sya(&mut self, addr_result: &AddressingResult) {
        let high = (addr_result.address >> 8) as u8;
        let value = self.y & high.wrapping_add(1);
        self.bus.write(addr_result.address, value);
    }

    /// XAS (TAS/SHS) - Transfer (A AND X) to Stack Pointer, then store masked value
    ///
    /// Flags affected: None
    pub fn xas(&mut self, addr_result: &AddressingResult) {
        self.sp = self.a & self.x;
        let high = (addr_result.address >> 8) as u8;
        let value = self.sp & high.wrapping_add(1);
        self.bus.write(addr_result.address, value);
    }

    /// AXA (SHA/AHX) - Store (A AND X AND (high byte of address + 1))
    ///
    /// Flags affected: None
    pub fn axa(&mut self, addr_result: &AddressingResult) {
        let high = (addr_result.address >> 8) as u8;
        let value = self.a & self.x & high.wrapping_add(1);
        self.bus.write(addr_result.address, value);
    }

    // ========================================
    // Immediate-Operand Combos
    // ========================================

    /// AAC (ANC) - AND Accumulator with Immediate, copy N into Carry
    ///
    /// Flags affected: C, Z, N
    pub fn aac(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
        self.set_carry(self.get_negative());
    }

    /// ASR (ALR) - AND Accumulator with Immediate, then LSR
    ///
    /// Flags affected: C, Z, N
    pub fn asr(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        self.a &= value;
        self.set_carry((self.a & 0x01) != 0);
        self.a >>= 1;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ARR - AND Accumulator with Immediate, then ROR
    ///
    /// Carry and overflow come out of bits 6 and 5 of the rotated result,
    /// rather than the usual shift-out bit, because the AND happens before
    /// the rotate's carry-in is consumed.
    ///
    /// Flags affected: C, Z, V, N
    pub fn arr(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        self.a &= value;

        let old_carry = if self.get_carry() { 0x80 } else { 0 };
        self.a = (self.a >> 1) | old_carry;
        self.update_zero_and_negative_flags(self.a);

        let bit6 = (self.a & 0x40) != 0;
        let bit5 = (self.a & 0x20) != 0;
        self.set_carry(bit6);
        self.set_overflow(bit6 ^ bit5);
    }

    /// ATX (LXA/OAL) - AND Accumulator with Immediate, copy into X
    ///
    /// Modeled deterministically as loading the immediate operand into both
    /// A and X (the "magic constant OR" some hardware exhibits is treated as
    /// all-ones, which reduces to this).
    ///
    /// Flags affected: Z, N
    pub fn atx(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// AXS (SBX) - (A AND X) minus Immediate, result into X
    ///
    /// Performs the subtraction as an unsigned compare: no borrow-in, and
    /// Carry is set when no borrow was needed (A & X >= operand).
    ///
    /// Flags affected: C, Z, N
    pub fn axs(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        let and_result = self.a & self.x;
        self.set_carry(and_result >= value);
        self.x = and_result.wrapping_sub(value);
        self.update_zero_and_negative_flags(self.x);
    }

    /// XAA (ANE) - highly unstable; modeled as (X AND Immediate) into Accumulator
    ///
    /// Flags affected: Z, N
    pub fn xaa(&mut self, addr_result: &AddressingResult) {
        let value = self.read_operand(addr_result);
        self.a = self.x & value;
        self.update_zero_and_negative_flags(self.a);
    }

    // ========================================
    // No-ops and Halt
    // ========================================

    /// DOP - Double NOP
    ///
    /// Reads and discards a one-byte operand (zero page or immediate
    /// addressing). No registers or flags are affected.
    ///
    /// Flags affected: None
    pub fn dop(&mut self, addr_result: &AddressingResult) {
        let _ = self.read_operand(addr_result);
    }

    /// TOP - Triple NOP
    ///
    /// Reads and discards a two-byte operand (absolute or absolute-indexed
    /// addressing). No registers or flags are affected.
    ///
    /// Flags affected: None
    pub fn top(&mut self, addr_result: &AddressingResult) {
        let _ = self.read_operand(addr_result);
    }

    /// KIL (JAM/HLT) - Halt the CPU
    ///
    /// Locks the processor in place; only a RESET can recover. Logs once at
    /// the halting PC so the host can report where execution died.
    ///
    /// Flags affected: None
    pub fn kil(&mut self) {
        if !self.halted {
            log::error!("CPU halted on KIL opcode at ${:04X}", self.pc.wrapping_sub(1));
        }
        self.halted = true;
    }
}
