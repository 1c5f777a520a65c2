use std::error::Error;

use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vip8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8::FrameBuffer;

const SCALE: usize = 16;

/// # Display
/// The Chip-8 display is 64x32 black/white pixels, encoded as 1/0 in the
/// frame buffer. `render` is only called when the frame buffer changed.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a window bound to an sdl2 context, scaled up from the
    /// native resolution but holding its 2:1 aspect ratio.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, Box<dyn Error>> {
        let video = sdl.video()?;
        let window = video
            .window(
                "vip8",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        Ok(Display { canvas })
    }

    /// Formats a frame buffer for rendering as an SDL2 RGB24 texture.
    ///
    /// The texture is a 1D array of concatenated RGB pixel rows, so this:
    /// - flattens the 2D frame buffer by concatenating its rows
    /// - triplicates each cell into identical R, G, and B components
    /// - multiplies by 255 to map the binary cell to black or white
    ///
    /// # Arguments
    /// * `frame` a Chip-8 frame buffer
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|cell| std::iter::repeat(cell).take(3))
            .map(|cell| cell * 255)
            .collect()
    }

    /// Renders the frame buffer as a streaming texture stretched over the
    /// whole window.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 frame buffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&Display::frame_to_texture(frame));
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
