// nes-core - a cycle-driven 6502 CPU and scanline-granularity PPU for NROM
// (mapper 0) cartridges.
//
// Host concerns - windowing, audio, a real input device, save states - are
// explicitly out of scope (§5 Non-goals); this crate is the emulation core a
// host program drives through `Emulator`.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod input;
pub mod ppu;
pub mod ram;

pub use bus::Bus;
pub use cartridge::{Cartridge, INesHeader, Mapper, Mapper0, Mirroring};
pub use cpu::Cpu;
pub use emulator::{Emulator, EmulatorConfig};
pub use error::{EmuError, INesError};
pub use input::{Buttons, InputLatch, KeyState};
pub use ppu::{FrameBuffer, Ppu, Sprite0HitMode};
pub use ram::Ram;
