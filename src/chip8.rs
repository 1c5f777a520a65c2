use std::io::Read;

use tracing::trace;

use crate::constants::{MEMORY_SIZE, PROGRAM_START};
use crate::error::{CycleError, LoadError};
use crate::instruction;
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, Keys, State};

/// # Chip-8
/// A Chip-8 virtual machine.
///
/// Owns all of the machine's mutable state and is the only thing that
/// transforms it. Supplies interfaces for:
/// - loading ROMs
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - ticking its timers (the host drives these at 60 Hz)
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    pressed_keys: Keys,
    quirks: Quirks,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    /// Build a machine with non-default [`Quirks`].
    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; 16],
            quirks,
        }
    }

    /// Load a ROM into memory at the program origin.
    ///
    /// Nothing is written unless the whole image fits; a failed load leaves
    /// memory (and any previously loaded ROM) as it was.
    ///
    /// # Arguments
    /// * `reader` a reader over a ROM image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;

        let capacity = MEMORY_SIZE - PROGRAM_START;
        if rom.len() > capacity {
            return Err(LoadError::TooLarge {
                size: rom.len(),
                capacity,
            });
        }

        self.state.memory[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(&rom);
        Ok(())
    }

    /// Exposes the frame buffer if it changed since the last call.
    pub fn frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex value of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex value of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = false;
    }

    /// Executes exactly one instruction: fetch, decode, execute.
    ///
    /// On error the machine state is untouched, so the caller decides
    /// whether to halt or carry on.
    pub fn cycle(&mut self) -> Result<(), CycleError> {
        let op = self.fetch()?;
        trace!(
            "op {:04X} pc {:04X} i {:04X} v {:02X?}",
            op,
            self.state.pc,
            self.state.i,
            self.state.v
        );
        let operation = instruction::from_op(&op);
        self.state = operation(&op, &self.state, self.pressed_keys, self.quirks)?;
        Ok(())
    }

    /// Decrements both timers toward zero.
    ///
    /// The core attaches no clock of its own; the host calls this at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether the sound timer is live (the host should be beeping).
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Fetches the big-endian instruction word at the pc.
    /// Memory holds bytes but instructions are 16 bits, so two consecutive
    /// bytes are combined.
    fn fetch(&self) -> Result<u16, CycleError> {
        let pc = self.state.pc as usize;
        let err = CycleError::ProgramCounterOutOfRange(self.state.pc);
        let left = *self.state.memory.get(pc).ok_or(err)?;
        let right = *self.state.memory.get(pc + 1).ok_or(err)?;
        Ok(u16::from(left) << 8 | u16::from(right))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(chip8: &mut Chip8, program: &[u8]) {
        let mut rom: &[u8] = program;
        chip8.load_rom(&mut rom).unwrap();
    }

    #[test]
    fn test_fetches_big_endian_op() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch().unwrap(), 0xAABB);
    }

    #[test]
    fn test_fetch_rejects_pc_out_of_range() {
        let mut chip8 = Chip8::new();
        chip8.state.pc = 0xFFF;
        assert_eq!(
            chip8.cycle(),
            Err(CycleError::ProgramCounterOutOfRange(0xFFF))
        );
        // state untouched
        assert_eq!(chip8.state.pc, 0xFFF);
    }

    #[test]
    fn test_load_rom_copies_to_program_origin() {
        let mut chip8 = Chip8::new();
        load(&mut chip8, &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(chip8.state.memory[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_load_rom_rejects_oversized_image() {
        let mut chip8 = Chip8::new();
        let rom = vec![0xFF; MEMORY_SIZE - PROGRAM_START + 1];
        let result = chip8.load_rom(&mut rom.as_slice());
        assert!(matches!(
            result,
            Err(LoadError::TooLarge { size: 3585, capacity: 3584 })
        ));
        // nothing was copied
        assert!(chip8.state.memory[PROGRAM_START..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_cycle_advances_pc() {
        let mut chip8 = Chip8::new();
        load(&mut chip8, &[0x00, 0xE0]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_register_add_program() {
        // 6A05: VA = 5; 6B03: VB = 3; 8AB4: VA += VB
        let mut chip8 = Chip8::new();
        load(&mut chip8, &[0x6A, 0x05, 0x6B, 0x03, 0x8A, 0xB4]);
        for _ in 0..3 {
            chip8.cycle().unwrap();
        }
        assert_eq!(chip8.state.v[0xA], 8);
        assert_eq!(chip8.state.v[0xB], 3);
        assert_eq!(chip8.state.v[0xF], 0);
    }

    #[test]
    fn test_call_and_return_resume_after_call() {
        // 0x200: call 0x300; 0x300: return
        let mut chip8 = Chip8::new();
        load(&mut chip8, &[0x23, 0x00]);
        chip8.state.memory[0x300..0x302].copy_from_slice(&[0x00, 0xEE]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x300);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.sp, 0);
    }

    #[test]
    fn test_glyph_draw_program() {
        // A210: I = 0x210; D005: draw 5 rows at (V0, V0)
        let mut chip8 = Chip8::new();
        load(&mut chip8, &[0xA2, 0x10, 0xD0, 0x05]);
        // a solid 4x5 block glyph at 0x210
        chip8.state.memory[0x210..0x215].copy_from_slice(&[0xF0; 5]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        for y in 0..5 {
            assert_eq!(chip8.state.frame_buffer[y][0..4], [1, 1, 1, 1]);
        }
        assert_eq!(chip8.state.v[0xF], 0);
    }

    #[test]
    fn test_blocks_on_key_wait_until_key_press() {
        // F20A: V2 = blocking key read
        let mut chip8 = Chip8::new();
        load(&mut chip8, &[0xF2, 0x0A]);
        for _ in 0..3 {
            chip8.cycle().unwrap();
            assert_eq!(chip8.state.pc, 0x200);
        }
        chip8.key_press(0x7);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.v[0x2], 0x7);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0xE);
        assert!(chip8.pressed_keys[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.pressed_keys[0xE]);
    }

    #[test]
    fn test_timers_tick_toward_zero() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 2;
        chip8.state.sound_timer = 1;
        chip8.tick_timers();
        assert_eq!(chip8.state.delay_timer, 1);
        assert_eq!(chip8.state.sound_timer, 0);
        assert!(!chip8.sound_active());
        // ticking at zero stays at zero
        chip8.tick_timers();
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_frame_returned_once_per_draw() {
        let mut chip8 = Chip8::new();
        assert!(chip8.frame().is_none());
        load(&mut chip8, &[0x00, 0xE0]);
        chip8.cycle().unwrap();
        assert!(chip8.frame().is_some());
        assert!(chip8.frame().is_none());
    }

    #[test]
    fn test_quirky_load_includes_last_register() {
        let quirks = Quirks {
            load_store_includes_last: true,
            load_advances_index: false,
        };
        let mut chip8 = Chip8::with_quirks(quirks);
        // A300: I = 0x300; F165: V0..=V1 = mem[I..]
        load(&mut chip8, &[0xA3, 0x00, 0xF1, 0x65]);
        chip8.state.memory[0x300..0x302].copy_from_slice(&[0xAB, 0xCD]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.v[0x0], 0xAB);
        assert_eq!(chip8.state.v[0x1], 0xCD);
        assert_eq!(chip8.state.i, 0x300);
    }
}
