// Flag manipulation instructions for 6502 CPU
// These instructions directly set or clear specific processor status flags.

use crate::cpu::addressing::AddressingResult;
use crate::cpu::flags;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Carry Flag Instructions
    // ========================================

    /// CLC - Clear Carry Flag
    ///
    /// Clears the carry flag in the processor status register.
    ///
    /// Operation: C = 0
    ///
    /// Flags affected:
    /// - C: Cleared to 0
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// CLC         ; Clear carry flag
    /// ADC #$10    ; Add with carry (C=0)
    /// ```
    ///
    /// # Common Usage
    /// Used before ADC (Add with Carry) operations to ensure a clean addition
    /// without any previous carry. Also used for multi-byte arithmetic.
    pub fn clc(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.clear_flag(flags::CARRY);
        0
    }

    /// SEC - Set Carry Flag
    ///
    /// Sets the carry flag in the processor status register.
    ///
    /// Operation: C = 1
    ///
    /// Flags affected:
    /// - C: Set to 1
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// SEC         ; Set carry flag
    /// SBC #$10    ; Subtract with borrow (C=1, no borrow)
    /// ```
    ///
    /// # Common Usage
    /// Used before SBC (Subtract with Carry) operations. In the 6502, SBC works
    /// with an inverted borrow, so SEC is used to indicate "no borrow".
    pub fn sec(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.set_flag(flags::CARRY);
        0
    }

    // ========================================
    // Interrupt Disable Flag Instructions
    // ========================================

    /// CLI - Clear Interrupt Disable Flag
    ///
    /// Clears the interrupt disable flag, enabling IRQ interrupts.
    ///
    /// Operation: I = 0
    ///
    /// Flags affected:
    /// - I: Cleared to 0 (interrupts enabled)
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// CLI         ; Enable interrupts
    /// ; IRQ interrupts can now occur
    /// ```
    ///
    /// # Important Note
    /// This instruction only affects IRQ interrupts. NMI (Non-Maskable Interrupt)
    /// cannot be disabled and will always trigger regardless of the I flag state.
    pub fn cli(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.clear_flag(flags::INTERRUPT_DISABLE);
        0
    }

    /// SEI - Set Interrupt Disable Flag
    ///
    /// Sets the interrupt disable flag, disabling IRQ interrupts.
    ///
    /// Operation: I = 1
    ///
    /// Flags affected:
    /// - I: Set to 1 (interrupts disabled)
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// SEI         ; Disable interrupts
    /// ; Critical section - IRQ interrupts cannot occur
    /// CLI         ; Re-enable interrupts
    /// ```
    ///
    /// # Important Note
    /// This instruction only affects IRQ interrupts. NMI (Non-Maskable Interrupt)
    /// cannot be disabled and will always trigger regardless of the I flag state.
    /// The I flag is automatically set when an interrupt occurs.
    pub fn sei(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.set_flag(flags::INTERRUPT_DISABLE);
        0
    }

    // ========================================
    // Decimal Mode Flag Instructions
    // ========================================

    /// CLD - Clear Decimal Mode Flag
    ///
    /// Clears the decimal mode flag, setting the CPU to binary mode.
    ///
    /// Operation: D = 0
    ///
    /// Flags affected:
    /// - D: Cleared to 0 (binary mode)
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// CLD         ; Clear decimal mode (binary mode)
    /// ADC #$10    ; Add in binary mode
    /// ```
    ///
    /// # NES-Specific Note
    /// The decimal mode is not functional in the NES/Famicom version of the 6502
    /// (the 2A03/2A07 CPU). The flag can be set and cleared, but ADC and SBC
    /// always operate in binary mode. This instruction is included for compatibility
    /// with the standard 6502 instruction set.
    pub fn cld(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.clear_flag(flags::DECIMAL);
        0
    }

    /// SED - Set Decimal Mode Flag
    ///
    /// Sets the decimal mode flag, instructing the CPU to use BCD arithmetic.
    ///
    /// Operation: D = 1
    ///
    /// Flags affected:
    /// - D: Set to 1 (decimal/BCD mode)
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// SED         ; Set decimal mode (BCD arithmetic)
    /// ADC #$09    ; Add in BCD mode
    /// CLD         ; Clear decimal mode
    /// ```
    ///
    /// # NES-Specific Note
    /// The decimal mode is not functional in the NES/Famicom version of the 6502
    /// (the 2A03/2A07 CPU). The flag can be set and cleared, but ADC and SBC
    /// always operate in binary mode. This instruction is included for compatibility
    /// with the standard 6502 instruction set, but has no effect on calculations
    /// in the NES.
    pub fn sed(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.set_flag(flags::DECIMAL);
        0
    }

    // ========================================
    // Overflow Flag Instructions
    // ========================================

    /// CLV - Clear Overflow Flag
    ///
    /// Clears the overflow flag in the processor status register.
    ///
    /// Operation: V = 0
    ///
    /// Flags affected:
    /// - V: Cleared to 0
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// CLV         ; Clear overflow flag
    /// ADC #$50    ; Add, checking for overflow
    /// BVC no_overflow  ; Branch if no overflow occurred
    /// ```
    ///
    /// # Note
    /// This is the only instruction that can clear the overflow flag. There is
    /// no corresponding "SEV" instruction to set the overflow flag. The overflow
    /// flag is typically set automatically by ADC and SBC operations when a
    /// signed overflow occurs, or by the BIT instruction based on bit 6 of the
    /// tested value.
    pub fn clv(&mut self, _addr_result: &AddressingResult) -> u8 {
        self.clear_flag(flags::OVERFLOW);
        0
    }
}
