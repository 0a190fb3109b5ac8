// Branch instructions for 6502 CPU
// These instructions perform conditional branches based on processor status flags.
// All branch instructions use relative addressing mode and do not modify any flags.

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Branch Instructions
    // ========================================

    /// BCC - Branch if Carry Clear
    ///
    /// Branches if the Carry flag (C) is clear (0).
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    pub fn bcc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_carry(), addr_result)
    }

    /// BCS - Branch if Carry Set
    ///
    /// Branches if the Carry flag (C) is set (1).
    ///
    /// Flags affected: None
    pub fn bcs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_carry(), addr_result)
    }

    /// BEQ - Branch if Equal (Zero Set)
    ///
    /// Branches if the Zero flag (Z) is set (1).
    ///
    /// Flags affected: None
    pub fn beq(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_zero(), addr_result)
    }

    /// BNE - Branch if Not Equal (Zero Clear)
    ///
    /// Branches if the Zero flag (Z) is clear (0).
    ///
    /// Flags affected: None
    pub fn bne(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_zero(), addr_result)
    }

    /// BMI - Branch if Minus (Negative Set)
    ///
    /// Branches if the Negative flag (N) is set (1).
    ///
    /// Flags affected: None
    pub fn bmi(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_negative(), addr_result)
    }

    /// BPL - Branch if Plus (Negative Clear)
    ///
    /// Branches if the Negative flag (N) is clear (0).
    ///
    /// Flags affected: None
    pub fn bpl(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_negative(), addr_result)
    }

    /// BVC - Branch if Overflow Clear
    ///
    /// Branches if the Overflow flag (V) is clear (0).
    ///
    /// Flags affected: None
    pub fn bvc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_overflow(), addr_result)
    }

    /// BVS - Branch if Overflow Set
    ///
    /// Branches if the Overflow flag (V) is set (1).
    ///
    /// Flags affected: None
    pub fn bvs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_overflow(), addr_result)
    }

    // ========================================
    // Helper Methods
    // ========================================

    /// Internal branch helper method
    ///
    /// Branch timing:
    /// - Base cost: 2 cycles (included in instruction execution, not returned here)
    /// - +1 cycle if branch is taken (returned as 1)
    /// - +1 cycle if branch crosses page boundary (returned as 2 total)
    #[inline]
    fn branch(&mut self, condition: bool, addr_result: &AddressingResult) -> u8 {
        if condition {
            self.pc = addr_result.address;

            if addr_result.page_crossed {
                2
            } else {
                1
            }
        } else {
            0
        }
    }
}
