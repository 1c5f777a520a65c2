/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded and where the program counter starts.
pub const PROGRAM_START: usize = 0x200;

/// Maximum number of return addresses the stack can hold.
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes per font glyph; glyphs are 8x5 sprites packed one row per byte.
pub const GLYPH_SIZE: u16 = 5;

/// CPU cycles executed per rendered frame.
///
/// Timers tick once per frame (~60 Hz), so this works out to roughly 600
/// instructions per second, in line with what most ROMs were written for.
pub const CYCLES_PER_FRAME: usize = 10;

/// Target duration of one frame/timer tick.
pub const FRAME_DURATION_MS: u64 = 16;

/// # Sprite sheet
/// Sprites for the hexadecimal digits 0..F, baked into memory at 0x000.
///
/// Each sprite is 5 bytes; each byte is one 8-pixel row, though only the
/// high nibble is ever set. The `Fx29` opcode resolves a digit to its
/// sprite's address.
///
/// As an example, `0x2` is stored as:
/// ```text
/// 0xF0 -> 1111 ----
/// 0x10 -> ---1 ----
/// 0xF0 -> 1111 ----
/// 0x80 -> 1--- ----
/// 0xF0 -> 1111 ----
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
