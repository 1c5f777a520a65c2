use thiserror::Error;

use crate::constants::STACK_DEPTH;

/// An error encountered while loading a ROM image.
///
/// Loading is all-or-nothing: memory is untouched unless the whole image
/// fits above the program origin.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("ROM is {size} bytes but only {capacity} bytes fit above the program origin")]
    TooLarge { size: usize, capacity: usize },
}

/// An error that aborted a CPU cycle.
///
/// Opcode semantics are deliberately lenient (unknown bit patterns are
/// no-ops), so these only cover accesses that have no defined result:
/// running off the ends of memory or the call stack. A failed cycle leaves
/// the machine state exactly as it was before the fetch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleError {
    #[error("program counter 0x{0:04X} is outside addressable memory")]
    ProgramCounterOutOfRange(u16),

    #[error("memory access at 0x{0:04X} runs outside addressable memory")]
    MemoryOutOfRange(u16),

    #[error("call at 0x{0:04X} overflowed the {depth}-frame stack", depth = STACK_DEPTH)]
    StackOverflow(u16),

    #[error("return at 0x{0:04X} with an empty stack")]
    StackUnderflow(u16),
}
