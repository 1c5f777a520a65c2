use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use tracing::{error, info};

use vip8::constants::{CYCLES_PER_FRAME, FRAME_DURATION_MS};
use vip8::Chip8;

use crate::display::Display;
use crate::keymap::keymap;

/// Runs a ROM until the window is closed or a cycle faults.
///
/// Each frame: forward key events, run a batch of CPU cycles, tick the
/// timers once, render if the frame buffer changed, then sleep off the rest
/// of the ~16ms frame. Timers end up at roughly 60 Hz and the CPU at
/// `CYCLES_PER_FRAME` times that.
pub fn run(rom: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::new();

    let file = File::open(&rom)?;
    chip8.load_rom(&mut BufReader::new(file))?;
    info!(rom = %rom.display(), "loaded ROM");

    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl)?;
    let mut events = sdl.event_pump()?;

    let frame_time = Duration::from_millis(FRAME_DURATION_MS);

    'frame: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'frame,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            }
        }

        // Update state
        for _ in 0..CYCLES_PER_FRAME {
            if let Err(e) = chip8.cycle() {
                error!("halting: {e}");
                break 'frame;
            }
        }
        chip8.tick_timers();

        if let Some(frame) = chip8.frame() {
            display.render(frame)?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}
