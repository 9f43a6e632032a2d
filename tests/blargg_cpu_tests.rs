// Blargg-style instruction test ROMs, run through the common $6000/$6001
// status protocol (§8 scenario 2: "feed a blargg instr_test ROM, expect a
// pass code"). Ignored by default; the sandbox does not ship these ROMs.
// Run with a local copy via:
//   cargo test --test blargg_cpu_tests -- --ignored --nocapture

mod common;

use std::path::Path;

use common::{format_result, run_test_rom, TestConfig, TestResult};

fn assert_passes(rom_path: &str) {
    let result = run_test_rom(Path::new(rom_path), &TestConfig::default())
        .unwrap_or_else(|e| panic!("failed to run {}: {}", rom_path, e));
    println!("{}: {}", rom_path, format_result(&result));
    assert_eq!(result, TestResult::Passed, "{}", rom_path);
}

#[test]
#[ignore]
fn instr_test_v5_official_all() {
    assert_passes("tests/roms/instr_test-v5/all_instrs.nes");
}

#[test]
#[ignore]
fn instr_test_v5_basics() {
    assert_passes("tests/roms/instr_test-v5/rom_singles/01-basics.nes");
}

#[test]
#[ignore]
fn instr_test_v5_implied() {
    assert_passes("tests/roms/instr_test-v5/rom_singles/02-implied.nes");
}

#[test]
#[ignore]
fn instr_test_v5_branches() {
    assert_passes("tests/roms/instr_test-v5/rom_singles/10-branches.nes");
}

#[test]
#[ignore]
fn instr_test_v5_stack() {
    assert_passes("tests/roms/instr_test-v5/rom_singles/11-stack.nes");
}

#[test]
#[ignore]
fn cpu_dummy_reads() {
    assert_passes("tests/roms/cpu_dummy_reads/cpu_dummy_reads.nes");
}
