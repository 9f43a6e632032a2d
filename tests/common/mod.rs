// Common test utilities for ROM-based integration tests
//
// Shared functionality for running and validating externally-supplied test
// ROMs (nestest, blargg-style instruction tests) that the sandbox does not
// ship alongside this crate; tests using these helpers are `#[ignore]`d and
// expect the ROM under `tests/roms/` when run manually.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use nes_core::{Bus, Cartridge, Cpu, Sprite0HitMode};

/// Maximum number of CPU cycles to run before timing out.
pub const MAX_TEST_CYCLES: u64 = 100_000_000;

/// Result of running a test ROM that follows the common $6000/$6001 status
/// protocol (blargg's test harness convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(u8),
    Timeout,
    Unknown,
}

pub struct TestConfig {
    pub max_cycles: u64,
    /// Starting PC (None = use the cartridge's reset vector).
    pub start_pc: Option<u16>,
    pub start_cycles: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            max_cycles: MAX_TEST_CYCLES,
            start_pc: None,
            start_cycles: 0,
        }
    }
}

pub fn load_cartridge(path: &Path) -> Result<Cartridge, String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    Cartridge::load(&bytes).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
}

/// Check the $6000/$6001 status protocol most blargg-style test ROMs use:
/// $6000 is 0 while the test is running, non-zero once it finishes, and
/// $6001 carries a result code (0 = pass) once $6000 is non-zero.
pub fn check_test_result(bus: &Bus) -> TestResult {
    let status = bus.read(0x6000);
    if status == 0 {
        return TestResult::Unknown;
    }

    match bus.read(0x6001) {
        0 => TestResult::Passed,
        code => TestResult::Failed(code),
    }
}

pub fn read_string(bus: &Bus, addr: u16, max_len: usize) -> String {
    let mut result = String::new();
    let mut current_addr = addr;

    for _ in 0..max_len {
        let byte = bus.read(current_addr);
        if byte == 0 {
            break;
        }
        if (0x20..=0x7E).contains(&byte) {
            result.push(byte as char);
        }
        current_addr = current_addr.wrapping_add(1);
    }

    result
}

pub fn run_test_rom(rom_path: &Path, config: &TestConfig) -> Result<TestResult, String> {
    let cartridge = load_cartridge(rom_path)?;
    let mut bus = Bus::with_cartridge(cartridge, Sprite0HitMode::Strict);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    if let Some(pc) = config.start_pc {
        cpu.pc = pc;
    }
    cpu.cycles = config.start_cycles;

    while cpu.cycles < config.max_cycles {
        if bus.take_nmi_pending() {
            cpu.nmi(&mut bus);
        }
        cpu.step(&mut bus);

        match check_test_result(&bus) {
            TestResult::Passed | TestResult::Failed(_) => return Ok(check_test_result(&bus)),
            TestResult::Unknown => {}
            TestResult::Timeout => return Ok(TestResult::Timeout),
        }
    }

    Ok(TestResult::Timeout)
}

pub fn format_result(result: &TestResult) -> String {
    match result {
        TestResult::Passed => "PASSED".to_string(),
        TestResult::Failed(code) => format!("FAILED (error code: ${:02X})", code),
        TestResult::Timeout => "TIMEOUT".to_string(),
        TestResult::Unknown => "UNKNOWN".to_string(),
    }
}
