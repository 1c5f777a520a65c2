/// # Opcodes
///
/// Instruction words are 16 bits each, decoded by nibble. The high nibble
/// selects the opcode family; depending on the family the remaining bits
/// carry operands:
/// - `[_nnn]` a 12-bit address
/// - `[_x__]` the register Vx, or the bound of a register range V0..Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate (sprite height, ALU sub-select)
/// - `[__kk]` an 8-bit immediate
pub trait Opcode {
    /// The word split into its four component nibbles, high to low.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The lowest nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The low byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// Everything below the family selector, as an address.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
