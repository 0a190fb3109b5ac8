// Register Transfer instructions for 6502 CPU

use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Register Transfer Instructions
    // ========================================
    // Transfer instructions move values between registers.
    // Most transfer instructions update the Zero (Z) and Negative (N) flags,
    // except TXS which does not affect any flags.

    /// TAX - Transfer Accumulator to X
    ///
    /// Copies the value from the accumulator (A) to the X register.
    /// Updates Zero and Negative flags based on the transferred value.
    ///
    /// Flags affected: Z, N
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TAY - Transfer Accumulator to Y
    ///
    /// Copies the value from the accumulator (A) to the Y register.
    /// Updates Zero and Negative flags based on the transferred value.
    ///
    /// Flags affected: Z, N
    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    /// TXA - Transfer X to Accumulator
    ///
    /// Copies the value from the X register to the accumulator (A).
    /// Updates Zero and Negative flags based on the transferred value.
    ///
    /// Flags affected: Z, N
    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TYA - Transfer Y to Accumulator
    ///
    /// Copies the value from the Y register to the accumulator (A).
    /// Updates Zero and Negative flags based on the transferred value.
    ///
    /// Flags affected: Z, N
    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TSX - Transfer Stack Pointer to X
    ///
    /// Copies the value from the stack pointer (SP) to the X register.
    /// Updates Zero and Negative flags based on the transferred value.
    ///
    /// Flags affected: Z, N
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TXS - Transfer X to Stack Pointer
    ///
    /// Copies the value from the X register to the stack pointer (SP).
    /// Does NOT affect any flags (unlike other transfer instructions).
    ///
    /// Flags affected: None
    pub fn txs(&mut self) {
        self.sp = self.x;
    }
}
