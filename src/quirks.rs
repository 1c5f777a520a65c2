/// # Quirks
/// Compatibility switches for opcode behaviors that differ between
/// historical interpreters. ROMs exist that depend on either side of each
/// switch, so the choice has to be explicit rather than silently "fixed".
///
/// The defaults reproduce the reference behavior this machine was modeled
/// on; flipping a flag gives the conventional COSMAC VIP semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `Fx55`/`Fx65` copy registers `V0..Vx` exclusive of `Vx` by default.
    /// When set, `Vx` itself is included (the conventional behavior).
    pub load_store_includes_last: bool,

    /// `Fx65` leaves the index register untouched by default, asymmetric
    /// with `Fx55` which always advances it. When set, `Fx65` advances the
    /// index the same way.
    pub load_advances_index: bool,
}
