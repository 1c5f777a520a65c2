use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_SIZE};
use crate::error::CycleError;
use crate::opcode::Opcode;
use crate::quirks::Quirks;
use crate::state::{Keys, State};

/// One opcode's worth of work: a pure snapshot-in, snapshot-out function.
///
/// Only the returned snapshot is committed, so an `Err` leaves the machine
/// exactly as it was before the fetch.
pub type Operation = fn(&dyn Opcode, &State, Keys, Quirks) -> Result<State, CycleError>;

/// clear the frame buffer
pub fn clr(
    _op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: state.pc + 0x2,
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    })
}

/// PC = STACK.pop()
/// The pushed address was that of the call itself, so the default advance
/// still applies and lands on the instruction after the call.
pub fn rts(
    _op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    if state.sp == 0 {
        return Err(CycleError::StackUnderflow(state.pc));
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize] + 0x2,
        sp,
        ..*state
    })
}

/// PC = nnn
pub fn jump(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: op.nnn(),
        ..*state
    })
}

/// STACK.push(PC); PC = nnn
pub fn call(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut stack = state.stack;
    let slot = stack
        .get_mut(state.sp as usize)
        .ok_or(CycleError::StackOverflow(state.pc))?;
    *slot = state.pc;
    Ok(State {
        pc: op.nnn(),
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let pc = if state.v[op.x() as usize] == op.kk() {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if Vx != kk then pc += 2
pub fn skne(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let pc = if state.v[op.x() as usize] != op.kk() {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if Vx == Vy then pc += 2
pub fn skre(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let pc = if state.v[op.x() as usize] == state.v[op.y() as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// Vx = kk
pub fn load(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] = op.kk();
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx += kk
/// Wraps mod 256 and never touches VF.
pub fn add(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] = v[op.x() as usize].wrapping_add(op.kk());
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx = Vy
pub fn mv(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] = v[op.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx |= Vy
pub fn or(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] |= v[op.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx &= Vy
pub fn and(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] &= v[op.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx ^= Vy
pub fn xor(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] ^= v[op.y() as usize];
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx += Vy; VF = carry
pub fn addr(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let (res, over) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    let mut v = state.v;
    v[0xF] = over as u8;
    v[op.x() as usize] = res;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx -= Vy; VF = 1 iff Vx > Vy beforehand
pub fn sub(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[0xF] = (v[op.x() as usize] > v[op.y() as usize]) as u8;
    v[op.x() as usize] = state.v[op.x() as usize].wrapping_sub(state.v[op.y() as usize]);
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[0xF] = v[op.x() as usize] & 0x1;
    v[op.x() as usize] >>= 1;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx = Vy - Vx; VF = 1 iff Vy > Vx beforehand
pub fn subn(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[0xF] = (v[op.y() as usize] > v[op.x() as usize]) as u8;
    v[op.x() as usize] = state.v[op.y() as usize].wrapping_sub(state.v[op.x() as usize]);
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[0xF] = (v[op.x() as usize] & 0x80 != 0) as u8;
    v[op.x() as usize] <<= 1;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// if Vx != Vy then pc += 2
pub fn skrne(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let pc = if state.v[op.x() as usize] != state.v[op.y() as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// I = nnn
pub fn loadi(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: state.pc + 0x2,
        i: op.nnn(),
        ..*state
    })
}

/// PC = V0 + nnn
pub fn jumpi(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: op.nnn() + u16::from(state.v[0x0]),
        ..*state
    })
}

/// Vx = rand_byte & kk
pub fn rand(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let rand_byte: u8 = rand::random();
    let mut v = state.v;
    v[op.x() as usize] = rand_byte & op.kk();
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// draw_sprite(x=Vx y=Vy height=n)
/// XORs the sprite at memory[I..I+n] onto the frame buffer at (Vx, Vy),
/// wrapping around both display edges. VF is cleared first and set if any
/// drawn bit lands on an already-set cell; once set it stays set for the
/// rest of the sprite.
pub fn draw(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let start = state.i as usize;
    let rows = state
        .memory
        .get(start..start + op.n() as usize)
        .ok_or(CycleError::MemoryOutOfRange(state.i))?;

    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    // VF doubles as the collision flag
    v[0xF] = 0x0;

    for (row, byte) in rows.iter().enumerate() {
        let y = (state.v[op.y() as usize] as usize + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (state.v[op.x() as usize] as usize + bit) % DISPLAY_WIDTH;
            let pixel = (byte >> (7 - bit)) & 0x1;
            v[0xF] |= pixel & frame_buffer[y][x];
            frame_buffer[y][x] ^= pixel;
        }
    }

    Ok(State {
        pc: state.pc + 0x2,
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// if key[Vx] pressed then pc += 2
pub fn skpr(
    op: &dyn Opcode,
    state: &State,
    keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let pc = if keys[(state.v[op.x() as usize] & 0xF) as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if key[Vx] not pressed then pc += 2
pub fn skup(
    op: &dyn Opcode,
    state: &State,
    keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let pc = if !keys[(state.v[op.x() as usize] & 0xF) as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// Vx = DT
pub fn moved(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let mut v = state.v;
    v[op.x() as usize] = state.delay_timer;
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}

/// block until a key is pressed, then Vx = lowest pressed key
/// While nothing is pressed the pc simply doesn't advance, so the same
/// instruction re-executes next cycle; control still returns to the host.
pub fn keyd(
    op: &dyn Opcode,
    state: &State,
    keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    match keys.iter().position(|&pressed| pressed) {
        Some(key) => {
            let mut v = state.v;
            v[op.x() as usize] = key as u8;
            Ok(State {
                pc: state.pc + 0x2,
                v,
                ..*state
            })
        }
        None => Ok(*state),
    }
}

/// DT = Vx
pub fn loads(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: state.pc + 0x2,
        delay_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// ST = Vx
pub fn ld(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: state.pc + 0x2,
        sound_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// I += Vx
/// Not masked to 12 bits; an out-of-range value only errors when used.
pub fn addi(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: state.pc + 0x2,
        i: state.i.wrapping_add(u16::from(state.v[op.x() as usize])),
        ..*state
    })
}

/// I = Vx * 5
/// Resolve Vx to its glyph's address in the sprite sheet. Values above 0xF
/// name no glyph and leave I unchanged.
pub fn ldspr(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let digit = state.v[op.x() as usize];
    let i = if digit < 16 {
        u16::from(digit) * GLYPH_SIZE
    } else {
        state.i
    };
    Ok(State {
        pc: state.pc + 0x2,
        i,
        ..*state
    })
}

/// mem[I..I+3] = bcd(Vx)
/// Store the decimal digits of Vx (hundreds, tens, units) at I.
pub fn bcd(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    let value = state.v[op.x() as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let start = state.i as usize;
    let mut memory = state.memory;
    memory
        .get_mut(start..start + 3)
        .ok_or(CycleError::MemoryOutOfRange(state.i))?
        .copy_from_slice(&digits);
    Ok(State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    })
}

/// mem[I..] = V0..Vx; I += x + 1
/// By default the copy excludes Vx itself; see [`Quirks`].
pub fn stor(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    quirks: Quirks,
) -> Result<State, CycleError> {
    let count = op.x() as usize + quirks.load_store_includes_last as usize;
    let start = state.i as usize;
    let mut memory = state.memory;
    memory
        .get_mut(start..start + count)
        .ok_or(CycleError::MemoryOutOfRange(state.i))?
        .copy_from_slice(&state.v[..count]);
    Ok(State {
        pc: state.pc + 0x2,
        i: state.i.wrapping_add(u16::from(op.x()) + 1),
        memory,
        ..*state
    })
}

/// V0..Vx = mem[I..]
/// Same register range rule as `stor`, but I stays put unless
/// [`Quirks::load_advances_index`] is set.
pub fn read(
    op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    quirks: Quirks,
) -> Result<State, CycleError> {
    let count = op.x() as usize + quirks.load_store_includes_last as usize;
    let start = state.i as usize;
    let src = state
        .memory
        .get(start..start + count)
        .ok_or(CycleError::MemoryOutOfRange(state.i))?;
    let mut v = state.v;
    v[..count].copy_from_slice(src);
    let i = if quirks.load_advances_index {
        state.i.wrapping_add(u16::from(op.x()) + 1)
    } else {
        state.i
    };
    Ok(State {
        pc: state.pc + 0x2,
        i,
        v,
        ..*state
    })
}

/// Unrecognized bit patterns execute as no-ops that still advance the pc.
/// Historical ROMs rely on this leniency, so it is deliberate.
pub fn noop(
    _op: &dyn Opcode,
    state: &State,
    _keys: Keys,
    _quirks: Quirks,
) -> Result<State, CycleError> {
    Ok(State {
        pc: state.pc + 0x2,
        ..*state
    })
}
