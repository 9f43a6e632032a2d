// Cartridge module - iNES ROM parsing and mapper dispatch
//
// Parses the iNES container format (§6) into an immutable `Cartridge`, then
// hands it to a `Mapper` implementation that answers CPU/PPU bus accesses.
// Only mapper 0 (NROM) is implemented; every other mapper number is a fatal
// `INesError::UnsupportedMapper` at load time (§1 scope, §4.1).

mod mapper0;

use crate::error::INesError;
pub use mapper0::Mapper0;

const INES_MAGIC: [u8; 4] = [b'N', b'E', b'S', 0x1A];
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;

/// Nametable mirroring mode, read from header flags6 bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Parsed iNES header fields, kept around mostly for diagnostics; the
/// derived values (`mapper_number`, `mirroring`, trainer presence) are
/// folded into `Cartridge` itself.
#[derive(Debug, Clone, Copy)]
pub struct INesHeader {
    pub prg_rom_count: u8,
    pub chr_rom_count: u8,
    pub flags6: u8,
    pub flags7: u8,
}

impl INesHeader {
    fn parse(bytes: &[u8]) -> Result<Self, INesError> {
        if bytes.len() < HEADER_SIZE || bytes[0..4] != INES_MAGIC {
            return Err(INesError::BadMagic);
        }
        Ok(INesHeader {
            prg_rom_count: bytes[4],
            chr_rom_count: bytes[5],
            flags6: bytes[6],
            flags7: bytes[7],
        })
    }

    /// `mapper_number = (flags6 >> 4) | (flags7 & 0xF0)` (§4.1, §6).
    pub fn mapper_number(&self) -> u8 {
        (self.flags6 >> 4) | (self.flags7 & 0xF0)
    }

    pub fn has_trainer(&self) -> bool {
        self.flags6 & 0b0000_0100 != 0
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }
}

/// An immutable, fully-loaded cartridge image (§3 "Cartridge image").
///
/// Never mutated after `load`. CHR-RAM carts (header says zero CHR banks)
/// are represented by an 8 KiB zero-filled `chr_rom`, matching the teacher
/// crate's `Mapper0::new` convention of detecting CHR-RAM by an all-zero
/// 8 KiB bank rather than a separate flag.
#[derive(Debug, Clone)]
pub struct Cartridge {
    pub prg_rom_count: u8,
    pub chr_rom_count: u8,
    pub mapper_number: u8,
    pub mirror: Mirroring,
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub trainer: Option<[u8; TRAINER_SIZE]>,
}

impl Cartridge {
    /// Parse a full iNES image per §4.1/§6. Fails with `BadMagic`,
    /// `UnsupportedMapper`, or `Truncated`.
    pub fn load(bytes: &[u8]) -> Result<Self, INesError> {
        let header = INesHeader::parse(bytes)?;
        let mapper_number = header.mapper_number();
        if mapper_number != 0 {
            return Err(INesError::UnsupportedMapper(mapper_number));
        }

        let mut offset = HEADER_SIZE;
        let trainer = if header.has_trainer() {
            let end = offset + TRAINER_SIZE;
            let slice = bytes.get(offset..end).ok_or(INesError::Truncated)?;
            offset = end;
            let mut buf = [0u8; TRAINER_SIZE];
            buf.copy_from_slice(slice);
            Some(buf)
        } else {
            None
        };

        let prg_len = PRG_BANK_SIZE * header.prg_rom_count as usize;
        let prg_end = offset + prg_len;
        let prg_rom = bytes
            .get(offset..prg_end)
            .ok_or(INesError::Truncated)?
            .to_vec();
        offset = prg_end;

        let chr_len = CHR_BANK_SIZE * header.chr_rom_count as usize;
        let chr_rom = if chr_len == 0 {
            vec![0u8; CHR_BANK_SIZE]
        } else {
            let chr_end = offset + chr_len;
            bytes.get(offset..chr_end).ok_or(INesError::Truncated)?.to_vec()
        };

        Ok(Cartridge {
            prg_rom_count: header.prg_rom_count,
            chr_rom_count: header.chr_rom_count,
            mapper_number,
            mirror: header.mirroring(),
            prg_rom,
            chr_rom,
            trainer,
        })
    }

    /// Build the mapper this cartridge declares. Only mapper 0 exists today;
    /// `load` already rejects everything else, so this never fails, but it
    /// keeps the same shape as the teacher's `create_mapper` factory for
    /// when a second mapper is added.
    pub fn into_mapper(self) -> Mapper0 {
        Mapper0::new(self)
    }
}

/// Trait for memory-mapped cartridge mappers (CPU and PPU address space).
///
/// Modeled on the teacher's `Mapper` trait used by `Mapper0`/`create_mapper`;
/// kept minimal since only NROM is implemented, but shaped so a second
/// mapper would slot in without touching `CpuBus`/`PpuMemory`.
pub trait Mapper {
    fn cpu_read(&self, addr: u16) -> u8;
    fn cpu_write(&mut self, addr: u16, value: u8);
    fn ppu_read(&self, addr: u16) -> u8;
    fn ppu_write(&mut self, addr: u16, value: u8);
    fn mirroring(&self) -> Mirroring;
}
