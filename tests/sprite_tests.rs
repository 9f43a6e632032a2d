// Sprite-0-hit and sprite-overflow conformance ROMs (§4.4 sprite
// evaluation/hit semantics), run through the common $6000/$6001 status
// protocol. Ignored by default; the sandbox does not ship these ROMs.
//   cargo test --test sprite_tests -- --ignored --nocapture

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
fn sprite_hit_basics() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/01.basics.nes");
}

#[test]
#[ignore]
fn sprite_hit_alignment() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/02.alignment.nes");
}

#[test]
#[ignore]
fn sprite_hit_corners() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/03.corners.nes");
}

#[test]
#[ignore]
fn sprite_hit_flip() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/04.flip.nes");
}

#[test]
#[ignore]
fn sprite_hit_left_clip() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/05.left_clip.nes");
}

#[test]
#[ignore]
fn sprite_hit_right_edge() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/06.right_edge.nes");
}

#[test]
#[ignore]
fn sprite_hit_screen_bottom() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/07.screen_bottom.nes");
}

#[test]
#[ignore]
fn sprite_hit_double_height() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/08.double_height.nes");
}

#[test]
#[ignore]
fn sprite_hit_timing_basics() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/09.timing_basics.nes");
}

#[test]
#[ignore]
fn sprite_hit_timing_order() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/10.timing_order.nes");
}

#[test]
#[ignore]
fn sprite_hit_edge_timing() {
    assert_passes("tests/roms/sprite_hit_tests_2005.10.05/11.edge_timing.nes");
}

#[test]
#[ignore]
fn sprite_overflow_basics() {
    assert_passes("tests/roms/sprite_overflow_tests/1.Basics.nes");
}

#[test]
#[ignore]
fn sprite_overflow_details() {
    assert_passes("tests/roms/sprite_overflow_tests/2.Details.nes");
}

#[test]
#[ignore]
fn sprite_overflow_timing() {
    assert_passes("tests/roms/sprite_overflow_tests/3.Timing.nes");
}

#[test]
#[ignore]
fn sprite_overflow_obscure() {
    assert_passes("tests/roms/sprite_overflow_tests/4.Obscure.nes");
}

#[test]
#[ignore]
fn sprite_overflow_emulator() {
    assert_passes("tests/roms/sprite_overflow_tests/5.Emulator.nes");
}
