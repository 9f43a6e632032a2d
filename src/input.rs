// Input module - controller strobe/shift-register latch
//
// The NES exposes one controller as a serial shift register at $4016/$4017
// (§4.2, GLOSSARY). This module re-models the teacher crate's
// `input::ControllerIO` per §9's "Global input latch" note: rather than
// module-scope state, the latch is a small object owned by `CpuBus` and
// mutated only by the strobe write and the data read.
//
// The host "key-state provider" (§6) is an external collaborator, specified
// here only as the `KeyState` trait — this core never constructs one.

/// Snapshot of all eight NES controller buttons, LSB-first order
/// A, B, Select, Start, Up, Down, Left, Right (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub a: bool,
    pub b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Buttons {
    /// Pack into the byte the shift register latches: bit 0 = A ... bit 7 = Right.
    pub fn to_byte(self) -> u8 {
        (self.a as u8)
            | (self.b as u8) << 1
            | (self.select as u8) << 2
            | (self.start as u8) << 3
            | (self.up as u8) << 4
            | (self.down as u8) << 5
            | (self.left as u8) << 6
            | (self.right as u8) << 7
    }
}

/// Host-supplied controller state. The coordinator polls this once per
/// scanline boundary (§4.5) and forwards the snapshot into the bus; it is
/// never called from inside an instruction.
pub trait KeyState {
    /// Current pressed/released state of all eight buttons.
    fn buttons(&self) -> Buttons;

    /// Whether the host wants the emulation loop to stop. Defaults to
    /// never quitting, since most key-state providers only track buttons.
    fn should_quit(&self) -> bool {
        false
    }
}

/// Strobed shift register for one controller (§4.2, §9 "Global input latch").
///
/// On a 1→0 strobe transition the register is reloaded from the most
/// recent button snapshot and the read pointer resets to bit 0 (A). While
/// held at 1, every read keeps returning the live A-button bit. Reads past
/// the eighth shift in the all-ones bits that hardware's open bus would
/// return (§4.2 "read from $4016").
#[derive(Debug, Clone, Copy)]
pub struct InputLatch {
    strobe: bool,
    shift: u8,
}

impl InputLatch {
    pub fn new() -> Self {
        InputLatch {
            strobe: false,
            shift: 0,
        }
    }

    /// Handle a write to $4016. `buttons` is the latest snapshot the
    /// coordinator polled from the key-state provider.
    pub fn write_strobe(&mut self, value: u8, buttons: Buttons) {
        let new_strobe = value & 1 != 0;
        if new_strobe || (self.strobe && !new_strobe) {
            self.shift = buttons.to_byte();
        }
        self.strobe = new_strobe;
    }

    /// Handle a read of $4016: returns the next bit and advances the
    /// pointer unless strobe is still held high.
    pub fn read(&mut self) -> u8 {
        let bit = self.shift & 1;
        if !self.strobe {
            self.shift = (self.shift >> 1) | 0x80;
        }
        bit
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}
