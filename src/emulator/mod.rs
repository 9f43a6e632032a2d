// Emulator module - the clock/coordinator (§4.5)
//
// Drives the CPU one instruction at a time, accumulates the cycles it
// consumed, and advances the PPU by a whole scanline every time the
// accumulator crosses the configured cycles-per-scanline threshold. NMI
// raised by the PPU entering VBlank is serviced before the CPU's next
// instruction decodes (§5 ordering invariant) rather than mid-instruction.
// Host concerns this teacher crate used to own here - save states,
// screenshots, speed control, a recent-ROMs list - are out of scope
// (§1 Non-goals) and have been removed; a host program drives this
// coordinator and owns all of that itself.

mod config;

pub use config::{EmulatorConfig, Sprite0HitModeConfig, DEFAULT_CYCLES_PER_SCANLINE};

use log::debug;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::INesError;
use crate::input::{Buttons, KeyState};
use crate::ppu::FrameBuffer;

const SCANLINES_PER_FRAME: u16 = 262;

/// Coordinates the CPU and PPU co-simulation described in §4.5. Owns the
/// `Cpu` and `Bus` (which in turn owns RAM, PPU, mapper, and input latch)
/// and exposes a `run_frame` that steps until one full frame is ready.
pub struct Emulator {
    cpu: Cpu,
    bus: Bus,
    config: EmulatorConfig,
    scanline: u16,
    cycle_accumulator: u32,
    paused: bool,
}

impl Emulator {
    pub fn new() -> Self {
        Emulator::with_config(EmulatorConfig::load_or_default())
    }

    pub fn with_config(config: EmulatorConfig) -> Self {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        cpu.reset(&mut bus);
        Emulator {
            cpu,
            bus,
            config,
            scanline: 0,
            cycle_accumulator: 0,
            paused: false,
        }
    }

    /// Parse and load an iNES image, replacing any cartridge already
    /// loaded, then reset (§4.1, §4.5 "Lifecycle: load -> reset -> run").
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<(), INesError> {
        let cartridge = Cartridge::load(bytes)?;
        debug!(
            "loaded cartridge: mapper {}, {} PRG bank(s), {} CHR bank(s)",
            cartridge.mapper_number, cartridge.prg_rom_count, cartridge.chr_rom_count
        );

        self.bus = Bus::with_cartridge(cartridge, self.config.sprite0_hit_mode.into());
        self.cpu = Cpu::new();
        self.cpu.reset(&mut self.bus);
        self.scanline = 0;
        self.cycle_accumulator = 0;
        self.paused = false;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.scanline = 0;
        self.cycle_accumulator = 0;
        self.paused = false;
    }

    /// Run until a full frame (all 262 scanlines) has been produced,
    /// polling `keys` once per scanline boundary for button state and a
    /// quit request (§4.5, §6 "key-state provider").
    ///
    /// Returns `true` if the host asked to quit mid-frame.
    pub fn run_frame(&mut self, keys: &dyn KeyState) -> bool {
        if self.paused {
            return keys.should_quit();
        }

        loop {
            if keys.should_quit() {
                return true;
            }

            if self.bus.take_nmi_pending() {
                self.cpu.nmi(&mut self.bus);
            }

            let cycles = self.cpu.step(&mut self.bus);
            self.cycle_accumulator += cycles as u32;

            while self.cycle_accumulator >= self.config.cycles_per_scanline {
                self.cycle_accumulator -= self.config.cycles_per_scanline;
                self.bus.set_buttons(keys.buttons());
                self.bus.step_scanline(self.scanline);
                self.scanline += 1;

                if self.scanline >= SCANLINES_PER_FRAME {
                    self.scanline = 0;
                    return false;
                }
            }
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    /// Most recently completed frame (§6 "frame-sink").
    pub fn frame(&self) -> FrameBuffer {
        self.bus.frame()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

/// A `KeyState` that never presses anything and never quits, for driving
/// `run_frame` in tests and benches without a real host input source.
pub struct NullKeys;

impl KeyState for NullKeys {
    fn buttons(&self) -> Buttons {
        Buttons::default()
    }
}
