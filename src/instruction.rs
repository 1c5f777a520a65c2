use crate::opcode::Opcode;
use crate::operations::{self, Operation};

/// Selects the Operation for a given Opcode.
///
/// Bit patterns that name no documented instruction fall through to `noop`;
/// the decode is deliberately lenient rather than failing hard.
pub fn from_op(op: &dyn Opcode) -> Operation {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => operations::clr,
        (0x0, 0x0, 0xE, 0xE) => operations::rts,
        (0x1, ..) => operations::jump,
        (0x2, ..) => operations::call,
        (0x3, ..) => operations::ske,
        (0x4, ..) => operations::skne,
        (0x5, .., 0x0) => operations::skre,
        (0x6, ..) => operations::load,
        (0x7, ..) => operations::add,
        (0x8, .., 0x0) => operations::mv,
        (0x8, .., 0x1) => operations::or,
        (0x8, .., 0x2) => operations::and,
        (0x8, .., 0x3) => operations::xor,
        (0x8, .., 0x4) => operations::addr,
        (0x8, .., 0x5) => operations::sub,
        (0x8, .., 0x6) => operations::shr,
        (0x8, .., 0x7) => operations::subn,
        (0x8, .., 0xE) => operations::shl,
        (0x9, .., 0x0) => operations::skrne,
        (0xA, ..) => operations::loadi,
        (0xB, ..) => operations::jumpi,
        (0xC, ..) => operations::rand,
        (0xD, ..) => operations::draw,
        (0xE, .., 0x9, 0xE) => operations::skpr,
        (0xE, .., 0xA, 0x1) => operations::skup,
        (0xF, .., 0x0, 0x7) => operations::moved,
        (0xF, .., 0x0, 0xA) => operations::keyd,
        (0xF, .., 0x1, 0x5) => operations::loads,
        (0xF, .., 0x1, 0x8) => operations::ld,
        (0xF, .., 0x1, 0xE) => operations::addi,
        (0xF, .., 0x2, 0x9) => operations::ldspr,
        (0xF, .., 0x3, 0x3) => operations::bcd,
        (0xF, .., 0x5, 0x5) => operations::stor,
        (0xF, .., 0x6, 0x5) => operations::read,
        _ => operations::noop,
    }
}
