// Shift and rotate instructions for 6502 CPU

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Shift Instructions
    // ========================================

    /// ASL - Arithmetic Shift Left
    ///
    /// Shifts all bits left one position. Bit 0 is filled with 0.
    /// Bit 7 is shifted into the Carry flag.
    ///
    /// Formula: C <- [76543210] <- 0
    ///
    /// This instruction is commonly used for:
    /// - Multiplying by 2 (in binary)
    /// - Extracting the high bit
    /// - Building bit patterns
    ///
    /// Flags affected: C, Z, N
    /// - C: Set to the value of bit 7 before the shift
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set
    ///
    /// # Arguments
    /// * `addr_result` - The addressing result containing the address or accumulator value
    /// * `is_accumulator` - True if operating on accumulator, false if operating on memory
    ///
    /// # Note
    /// This instruction can operate on either the accumulator or a memory location.
    /// When operating on the accumulator, is_accumulator should be true.
    pub fn asl(&mut self, addr_result: &AddressingResult, is_accumulator: bool) {
        let value = if is_accumulator {
            self.a
        } else {
            self.bus.read(addr_result.address)
        };

        // Bit 7 goes to Carry flag
        self.set_carry((value & 0x80) != 0);

        // Shift left by 1, bit 0 becomes 0
        let result = value << 1;

        // Update flags based on result
        self.update_zero_and_negative_flags(result);

        // Write back the result
        if is_accumulator {
            self.a = result;
        } else {
            self.bus.write(addr_result.address, result);
        }
    }

    /// LSR - Logical Shift Right
    ///
    /// Shifts all bits right one position. Bit 7 is filled with 0.
    /// Bit 0 is shifted into the Carry flag.
    ///
    /// Formula: 0 -> [76543210] -> C
    ///
    /// This instruction is commonly used for:
    /// - Dividing by 2 (unsigned)
    /// - Extracting the low bit
    /// - Processing bit patterns
    ///
    /// Flags affected: C, Z, N
    /// - C: Set to the value of bit 0 before the shift
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set (always 0 for LSR)
    ///
    /// # Arguments
    /// * `addr_result` - The addressing result containing the address or accumulator value
    /// * `is_accumulator` - True if operating on accumulator, false if operating on memory
    ///
    /// # Note
    /// This instruction can operate on either the accumulator or a memory location.
    /// After LSR, the Negative flag is always clear since bit 7 is always 0.
    pub fn lsr(&mut self, addr_result: &AddressingResult, is_accumulator: bool) {
        let value = if is_accumulator {
            self.a
        } else {
            self.bus.read(addr_result.address)
        };

        // Bit 0 goes to Carry flag
        self.set_carry((value & 0x01) != 0);

        // Shift right by 1, bit 7 becomes 0
        let result = value >> 1;

        // Update flags based on result
        self.update_zero_and_negative_flags(result);

        // Write back the result
        if is_accumulator {
            self.a = result;
        } else {
            self.bus.write(addr_result.address, result);
        }
    }

    // ========================================
    // Rotate Instructions
    // ========================================

    /// ROL - Rotate Left
    ///
    /// Rotates all bits left one position through the Carry flag.
    /// Bit 0 is filled with the current Carry flag value.
    /// Bit 7 is shifted into the Carry flag.
    ///
    /// Formula: C <- [76543210] <- C
    ///
    /// This instruction is commonly used for:
    /// - Rotating multi-byte values
    /// - Implementing circular shifts
    /// - Multiplying by 2 while preserving the overflow
    ///
    /// Flags affected: C, Z, N
    /// - C: Set to the value of bit 7 before the rotate
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set
    ///
    /// # Arguments
    /// * `addr_result` - The addressing result containing the address or accumulator value
    /// * `is_accumulator` - True if operating on accumulator, false if operating on memory
    ///
    /// # Note
    /// ROL differs from ASL in that it rotates the old Carry flag into bit 0,
    /// while ASL always sets bit 0 to 0.
    pub fn rol(&mut self, addr_result: &AddressingResult, is_accumulator: bool) {
        let value = if is_accumulator {
            self.a
        } else {
            self.bus.read(addr_result.address)
        };

        // Save the current Carry flag
        let old_carry = if self.get_carry() { 1 } else { 0 };

        // Bit 7 goes to Carry flag
        self.set_carry((value & 0x80) != 0);

        // Shift left by 1, and set bit 0 to old Carry
        let result = (value << 1) | old_carry;

        // Update flags based on result
        self.update_zero_and_negative_flags(result);

        // Write back the result
        if is_accumulator {
            self.a = result;
        } else {
            self.bus.write(addr_result.address, result);
        }
    }

    /// ROR - Rotate Right
    ///
    /// Rotates all bits right one position through the Carry flag.
    /// Bit 7 is filled with the current Carry flag value.
    /// Bit 0 is shifted into the Carry flag.
    ///
    /// Formula: C -> [76543210] -> C
    ///
    /// This instruction is commonly used for:
    /// - Rotating multi-byte values
    /// - Implementing circular shifts
    /// - Dividing by 2 while preserving the remainder
    ///
    /// Flags affected: C, Z, N
    /// - C: Set to the value of bit 0 before the rotate
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set (equal to old Carry flag)
    ///
    /// # Arguments
    /// * `addr_result` - The addressing result containing the address or accumulator value
    /// * `is_accumulator` - True if operating on accumulator, false if operating on memory
    ///
    /// # Note
    /// ROR differs from LSR in that it rotates the old Carry flag into bit 7,
    /// while LSR always sets bit 7 to 0.
    pub fn ror(&mut self, addr_result: &AddressingResult, is_accumulator: bool) {
        let value = if is_accumulator {
            self.a
        } else {
            self.bus.read(addr_result.address)
        };

        // Save the current Carry flag
        let old_carry = if self.get_carry() { 0x80 } else { 0 };

        // Bit 0 goes to Carry flag
        self.set_carry((value & 0x01) != 0);

        // Shift right by 1, and set bit 7 to old Carry
        let result = (value >> 1) | old_carry;

        // Update flags based on result
        self.update_zero_and_negative_flags(result);

        // Write back the result
        if is_accumulator {
            self.a = result;
        } else {
            self.bus.write(addr_result.address, result);
        }
    }
}
