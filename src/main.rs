// nestest-trace - run an iNES image headlessly and emit a nestest-format
// instruction trace to stdout, one line per instruction executed (§8
// scenario 1: "feed nestest.nes, diff the trace against the known-good
// log"). This binary exists only to exercise the library from the command
// line; it owns no window, no audio, no input device (§1 Non-goals).

use std::env;
use std::fs;
use std::process;

use log::{error, info};
use nes_core::{Bus, Cartridge, Cpu, Sprite0HitMode};

fn main() {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: nestest-trace <rom.nes> [max-instructions]");
            process::exit(2);
        }
    };

    let max_instructions: u64 = env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(u64::MAX);

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("failed to read {}: {}", path, err);
            process::exit(1);
        }
    };

    let cartridge = match Cartridge::load(&bytes) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            error!("failed to load {}: {}", path, err);
            process::exit(1);
        }
    };

    info!(
        "loaded {}: mapper {}, {} PRG bank(s), {} CHR bank(s)",
        path, cartridge.mapper_number, cartridge.prg_rom_count, cartridge.chr_rom_count
    );

    let mut bus = Bus::with_cartridge(cartridge, Sprite0HitMode::Strict);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    let mut count: u64 = 0;
    while count < max_instructions {
        println!("{}", cpu.trace(&mut bus));
        if bus.take_nmi_pending() {
            cpu.nmi(&mut bus);
        }
        cpu.step(&mut bus);
        count += 1;
    }
}
