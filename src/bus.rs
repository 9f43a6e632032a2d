// CPU bus - address decode and device routing ($0000-$FFFF)
//
// Routes every CPU-visible address to its backing device (§4.2, §3 "CPU
// address space"): 2KB internal RAM mirrored through $1FFF, PPU registers
// mirrored every 8 bytes through $3FFF, the controller shift register at
// $4016/$4017, an APU stub (out of scope, §1 Non-goals) at $4000-$4017/
// $4018-$401F, and the cartridge's mapper for everything at $4020 and up.
//
// Unlike the teacher's `Bus`, this one actually owns the `Ppu`, the
// cartridge `Mapper`, and the controller latch rather than stubbing them
// out (§9 "Cyclic references" redesign note) — a real PPU register read
// has side effects (VBlank clears on a $2002 read, $2007 is buffered), so
// `Ppu` and `InputLatch` sit behind a `RefCell` to let `read` keep the
// teacher's `&self` shape while still mutating on access. `Mapper` itself
// needs no such wrapper: CPU writes already take `&mut Bus`, and PPU reads
// only ever borrow it immutably.

use std::cell::RefCell;

use crate::cartridge::{Cartridge, Mapper, Mirroring};
use crate::input::{Buttons, InputLatch};
use crate::ppu::{Ppu, ScanlineEvent, Sprite0HitMode};
use crate::ram::Ram;

/// A `Mapper` that backs a plain writable array instead of real cartridge
/// data, covering $4020-$FFFF the way the teacher's `Bus` used a flat `rom:
/// [u8; 0xC000]` array before cartridge/mapper support existed. `Bus::new`
/// uses this so CPU unit tests can write and read back anywhere in the
/// address space, including the reset/IRQ/NMI vectors, without needing a
/// real iNES image.
struct NullMapper {
    rom: [u8; 0xC000],
}

impl NullMapper {
    fn new() -> Self {
        NullMapper { rom: [0; 0xC000] }
    }
}

impl Mapper for NullMapper {
    fn cpu_read(&self, addr: u16) -> u8 {
        self.rom[(addr - 0x4020) as usize]
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        self.rom[(addr - 0x4020) as usize] = value;
    }

    fn ppu_read(&self, _addr: u16) -> u8 {
        0
    }

    fn ppu_write(&mut self, _addr: u16, _value: u8) {}

    fn mirroring(&self) -> Mirroring {
        Mirroring::Horizontal
    }
}

pub struct Bus {
    ram: Ram,
    ppu: RefCell<Ppu>,
    mapper: Box<dyn Mapper>,
    input: RefCell<InputLatch>,
    buttons: Buttons,
    nmi_pending: bool,
}

impl Bus {
    /// A bus with a writable dummy mapper in place of a cartridge, for CPU
    /// unit tests that only care about RAM-shaped read/write round trips.
    pub fn new() -> Self {
        Bus::with_mapper(Box::new(NullMapper::new()), Mirroring::Horizontal, Sprite0HitMode::Strict)
    }

    /// A bus wired to a real cartridge (§4.1, §4.2), as `Emulator` uses it.
    pub fn with_cartridge(cartridge: Cartridge, sprite0_mode: Sprite0HitMode) -> Self {
        let mirror = cartridge.mirror;
        Bus::with_mapper(Box::new(cartridge.into_mapper()), mirror, sprite0_mode)
    }

    fn with_mapper(mapper: Box<dyn Mapper>, mirror: Mirroring, sprite0_mode: Sprite0HitMode) -> Self {
        Bus {
            ram: Ram::new(),
            ppu: RefCell::new(Ppu::new(mirror, sprite0_mode)),
            mapper,
            input: RefCell::new(InputLatch::new()),
            buttons: Buttons::default(),
            nmi_pending: false,
        }
    }

    /// Read a byte from the bus (§4.2 address decode table).
    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr & 0x07FF),
            0x2000..=0x3FFF => self.ppu.borrow_mut().read_register(addr & 7, &*self.mapper),
            0x4016 => self.input.borrow_mut().read(),
            0x4000..=0x4015 | 0x4017..=0x401F => 0,
            0x4020..=0xFFFF => self.mapper.cpu_read(addr),
        }
    }

    /// Write a byte to the bus (§4.2 address decode table).
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr & 0x07FF, value),
            0x2000..=0x3FFF => {
                let raise_nmi = self.ppu.get_mut().write_register(addr & 7, value, &mut *self.mapper);
                if raise_nmi {
                    self.nmi_pending = true;
                }
            }
            0x4014 => self.oam_dma(value),
            0x4016 => self.input.get_mut().write_strobe(value, self.buttons),
            0x4000..=0x4013 | 0x4015 | 0x4017..=0x401F => {}
            0x4020..=0xFFFF => self.mapper.cpu_write(addr, value),
        }
    }

    /// OAM DMA triggered by a write to $4014: copies the 256-byte page
    /// `value * 0x100 .. value * 0x100 + 0x100` into OAM (§4.2, GLOSSARY
    /// "OAM DMA"). Modeled as an instantaneous transfer; the 513/514-cycle
    /// stall this costs on real hardware is the coordinator's concern, not
    /// this bus's.
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for offset in 0..=255u8 {
            let byte = self.read(base.wrapping_add(offset as u16));
            self.ppu.get_mut().oam_dma_write(offset, byte);
        }
    }

    pub fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub fn write_u16(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Render one scanline and latch any NMI it raises (§4.4, §4.5).
    pub fn step_scanline(&mut self, scanline: u16) -> ScanlineEvent {
        let event = self.ppu.get_mut().step_scanline(scanline, &*self.mapper);
        if event.raise_nmi {
            self.nmi_pending = true;
        }
        event
    }

    /// Consume the pending-NMI latch; the coordinator services it between
    /// instructions (§4.5, §5 ordering invariant).
    pub fn take_nmi_pending(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    /// Most recently completed frame (§6 "frame-sink").
    pub fn frame(&self) -> crate::ppu::FrameBuffer {
        self.ppu.borrow().frame().clone()
    }

    /// Latch the host's latest button snapshot for the next $4016 strobe
    /// (§4.5: the coordinator polls input once per scanline boundary).
    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.buttons = buttons;
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
