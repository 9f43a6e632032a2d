// PPU module - scanline-granularity picture processing unit
//
// Models the 2C02 at scanline granularity rather than per-dot (§1, §9
// redesign note "Scanline-granularity rendering"): the coordinator calls
// `step_scanline` once per scanline, and this module renders an entire
// line's worth of pixels in one call instead of ticking 341 PPU dots.
//
// Register access ($2000-$2007, mirrored every 8 bytes) is exposed through
// `read_register`/`write_register`, taking the cartridge mapper by
// reference since pattern-table data lives there, not in `PpuMemory`.

mod memory;
mod palette;
mod registers;
mod rendering;

use crate::cartridge::{Mapper, Mirroring};

use memory::PpuMemory;
pub use rendering::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use registers::{status_byte, PpuCtrl, PpuMask};

/// Resolves the sprite-0-hit open question (§6): real hardware gates the
/// flag on rendering being enabled and the 8-pixel clip region being off;
/// `Loose` drops those gates and flags on raw pixel overlap, which is
/// occasionally useful for indexing coarse test ROMs against this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite0HitMode {
    Strict,
    Loose,
}

impl Default for Sprite0HitMode {
    fn default() -> Self {
        Sprite0HitMode::Strict
    }
}

/// Events the coordinator must react to after stepping a scanline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineEvent {
    pub raise_nmi: bool,
    pub entered_vblank: bool,
}

pub struct Ppu {
    ctrl: PpuCtrl,
    mask: PpuMask,
    vblank: bool,
    sprite0_hit: bool,
    sprite_overflow: bool,

    oam_addr: u8,
    oam: [u8; 256],

    vram_addr: u16,
    vram_read_buffer: u8,
    scroll_x: u8,
    scroll_y: u8,
    write_toggle: bool,

    memory: PpuMemory,
    mirror: Mirroring,
    sprite0_mode: Sprite0HitMode,
    frame: FrameBuffer,
}

impl Ppu {
    pub fn new(mirror: Mirroring, sprite0_mode: Sprite0HitMode) -> Self {
        Ppu {
            ctrl: PpuCtrl::default(),
            mask: PpuMask::default(),
            vblank: false,
            sprite0_hit: false,
            sprite_overflow: false,
            oam_addr: 0,
            oam: [0; 256],
            vram_addr: 0,
            vram_read_buffer: 0,
            scroll_x: 0,
            scroll_y: 0,
            write_toggle: false,
            memory: PpuMemory::new(),
            mirror,
            sprite0_mode,
            frame: FrameBuffer::new(),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Render the given scanline (0-239 visible; 240-260 are vblank and a
    /// no-op here) and advance vblank/NMI state at the scanline boundaries
    /// the real PPU hits at dot 1 of lines 241 and 261 (§4.4).
    pub fn step_scanline(&mut self, scanline: u16, mapper: &dyn Mapper) -> ScanlineEvent {
        let mut event = ScanlineEvent::default();

        if scanline < SCREEN_HEIGHT as u16 {
            let hit = rendering::render_scanline(
                scanline,
                &self.ctrl,
                &self.mask,
                self.scroll_x,
                self.scroll_y,
                &self.oam,
                &self.memory,
                self.mirror,
                mapper,
                self.sprite0_mode,
                &mut self.frame,
            );
            if hit {
                self.sprite0_hit = true;
            }
        } else if scanline == SCREEN_HEIGHT as u16 + 1 {
            self.vblank = true;
            event.entered_vblank = true;
            if self.ctrl.nmi_enable {
                event.raise_nmi = true;
            }
        } else if scanline == 261 {
            self.vblank = false;
            self.sprite0_hit = false;
            self.sprite_overflow = false;
        }

        event
    }

    /// CPU-side register read, `reg` already masked to 0-7 ($2000 + reg).
    pub fn read_register(&mut self, reg: u16, mapper: &dyn Mapper) -> u8 {
        match reg {
            2 => {
                let value = status_byte(self.vblank, self.sprite0_hit, self.sprite_overflow);
                self.vblank = false;
                self.write_toggle = false;
                value
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let addr = self.vram_addr & 0x3FFF;
                let result = if addr < 0x2000 {
                    let buffered = self.vram_read_buffer;
                    self.vram_read_buffer = mapper.ppu_read(addr);
                    buffered
                } else if addr < 0x3F00 {
                    let buffered = self.vram_read_buffer;
                    self.vram_read_buffer = self.memory.read_nametable(addr);
                    buffered
                } else {
                    self.memory.read_palette(addr)
                };
                self.vram_addr = self.vram_addr.wrapping_add(self.ctrl.vram_increment);
                result
            }
            _ => 0,
        }
    }

    /// CPU-side register write, `reg` already masked to 0-7 ($2000 + reg).
    /// Returns `true` if this write must raise an NMI immediately (§4.4:
    /// enabling NMI while the vblank flag is already set).
    pub fn write_register(&mut self, reg: u16, value: u8, mapper: &mut dyn Mapper) -> bool {
        match reg {
            0 => {
                let was_enabled = self.ctrl.nmi_enable;
                self.ctrl = PpuCtrl::from_byte(value);
                !was_enabled && self.ctrl.nmi_enable && self.vblank
            }
            1 => {
                self.mask = PpuMask::from_byte(value);
                false
            }
            3 => {
                self.oam_addr = value;
                false
            }
            4 => {
                self.oam[self.oam_addr as usize] = value;
                self.oam_addr = self.oam_addr.wrapping_add(1);
                false
            }
            5 => {
                if !self.write_toggle {
                    self.scroll_x = value;
                } else {
                    self.scroll_y = value;
                }
                self.write_toggle = !self.write_toggle;
                false
            }
            6 => {
                if !self.write_toggle {
                    self.vram_addr = (self.vram_addr & 0x00FF) | ((value as u16 & 0x3F) << 8);
                } else {
                    self.vram_addr = (self.vram_addr & 0xFF00) | value as u16;
                }
                self.write_toggle = !self.write_toggle;
                false
            }
            7 => {
                let addr = self.vram_addr & 0x3FFF;
                if addr < 0x2000 {
                    mapper.ppu_write(addr, value);
                } else if addr < 0x3F00 {
                    self.memory.write_nametable(addr, value, self.mirror);
                } else {
                    self.memory.write_palette(addr, value);
                }
                self.vram_addr = self.vram_addr.wrapping_add(self.ctrl.vram_increment);
                false
            }
            _ => false,
        }
    }

    /// One byte of an OAM DMA transfer triggered by a CPU write to $4014.
    pub fn oam_dma_write(&mut self, offset: u8, value: u8) {
        self.oam[offset as usize] = value;
    }
}
