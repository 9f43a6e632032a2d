// Error types module
//
// The teacher crate's `cartridge::mappers::MapperError` establishes the house
// style for error types in this codebase: a plain enum, a hand-written
// `Display` impl, and a marker `impl std::error::Error`. No `thiserror` or
// `anyhow` appear anywhere in the dependency table this core was grown from,
// so none are introduced here either.

use std::fmt;

/// Errors surfaced by the cartridge loader (§4.1, §7 of the design doc).
///
/// These are fatal at startup: a cartridge that fails to parse cannot be
/// run, and the caller is expected to abort rather than recover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum INesError {
    /// The first four bytes were not `'N','E','S',0x1A`.
    BadMagic,
    /// The file ended before the header promised enough PRG/CHR data.
    Truncated,
    /// The header names a mapper number this core does not implement.
    UnsupportedMapper(u8),
}

impl fmt::Display for INesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            INesError::BadMagic => write!(f, "not an iNES image: bad magic bytes"),
            INesError::Truncated => write!(f, "iNES image is truncated"),
            INesError::UnsupportedMapper(n) => write!(f, "mapper {} is not supported", n),
        }
    }
}

impl std::error::Error for INesError {}

/// Errors that indicate a programming bug in the CPU/bus rather than a bad
/// ROM (§7). Production builds may prefer to treat these as open-bus reads
/// of `0xFF` instead of propagating them; this core exposes both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmuError {
    /// A CPU bus access landed outside the documented memory map.
    UnhandledBusAccess(u16),
    /// An opcode byte had no decode table entry.
    UnknownOpcode(u8),
}

impl fmt::Display for EmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmuError::UnhandledBusAccess(addr) => {
                write!(f, "unhandled bus access at ${:04X}", addr)
            }
            EmuError::UnknownOpcode(op) => write!(f, "unknown opcode ${:02X}", op),
        }
    }
}

impl std::error::Error for EmuError {}
