pub use chip8::Chip8;
pub use error::{CycleError, LoadError};
pub use quirks::Quirks;
pub use state::{FrameBuffer, Keys, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod quirks;
pub mod state;
