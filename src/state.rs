use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, STACK_DEPTH,
};

/// A snapshot of the machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag and is
///       overwritten by every ALU, shift, and draw opcode
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always even, stepping by 2
///
/// Pointer
/// - (sp) an 8-bit stack pointer, indexing one past the top of the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - nothing in the core decrements them; the host drives
///   [`Chip8::tick_timers`](crate::Chip8::tick_timers) at 60 Hz
///
/// ## Memory
/// - 16-slot stack storing return addresses of subroutine calls
/// - 4096 bytes of addressable memory, sprite sheet baked in at 0x000
/// - 64x32 frame buffer holding the next frame to be drawn
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        // 0x000 - 0x050 is reserved for the sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed state of the 16 hexadecimal keys, indexed by key value.
///
/// Written by the host between cycles; the execution engine only reads it.
pub type Keys = [bool; 16];
