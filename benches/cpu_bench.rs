// CPU Benchmarks
// Performance benchmarks for CPU instruction execution

use criterion::{criterion_group, criterion_main, Criterion};
use nes_core::{Bus, Cpu};
use std::hint::black_box;

/// A fresh CPU/bus pair with `pc` parked at the start of cartridge space,
/// so benchmarked opcodes land on the `NullMapper`'s plain writable array
/// rather than RAM mirroring or PPU/APU register ranges.
fn cpu_and_bus() -> (Cpu, Bus) {
    let mut cpu = Cpu::new();
    let mut bus = Bus::new();
    cpu.reset(&mut bus);
    cpu.pc = 0x8000;
    (cpu, bus)
}

/// Benchmark CPU instruction execution
/// Tests various common instruction patterns to measure dispatch and execution performance
fn bench_cpu_instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_instructions");

    // NOP (simplest operation)
    group.bench_function("nop", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        for i in 0..256u16 {
            bus.write(0x8000 + i, 0xEA); // NOP
        }

        b.iter(|| {
            cpu.pc = 0x8000;
            cpu.step(black_box(&mut bus));
        });
    });

    // LDA immediate (common load operation)
    group.bench_function("lda_immediate", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        bus.write(0x8000, 0xA9); // LDA immediate
        bus.write(0x8001, 0x42);

        b.iter(|| {
            cpu.pc = 0x8000;
            cpu.step(black_box(&mut bus));
        });
    });

    // ADC immediate (arithmetic operation)
    group.bench_function("adc_immediate", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        bus.write(0x8000, 0x69); // ADC immediate
        bus.write(0x8001, 0x01);

        b.iter(|| {
            cpu.pc = 0x8000;
            cpu.step(black_box(&mut bus));
        });
    });

    // STA absolute (memory write operation)
    group.bench_function("sta_absolute", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        bus.write(0x8000, 0x8D); // STA absolute
        bus.write(0x8001, 0x00);
        bus.write(0x8002, 0x02);

        b.iter(|| {
            cpu.pc = 0x8000;
            cpu.step(black_box(&mut bus));
        });
    });

    // JMP absolute (control flow) - a self-loop
    group.bench_function("jmp_absolute", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        bus.write(0xC000, 0x4C); // JMP absolute
        bus.write(0xC001, 0x00);
        bus.write(0xC002, 0xC0);
        cpu.pc = 0xC000;

        b.iter(|| {
            cpu.step(black_box(&mut bus));
        });
    });

    group.finish();
}

/// Benchmark a sequence of mixed instructions (realistic workload)
fn bench_instruction_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("instruction_sequences");

    group.bench_function("typical_sequence", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        let mut addr = 0xC000u16;

        // LDA #$00
        bus.write(addr, 0xA9);
        addr += 1;
        bus.write(addr, 0x00);
        addr += 1;

        // STA $0200
        bus.write(addr, 0x8D);
        addr += 1;
        bus.write(addr, 0x00);
        addr += 1;
        bus.write(addr, 0x02);
        addr += 1;

        // LDX #$05
        bus.write(addr, 0xA2);
        addr += 1;
        bus.write(addr, 0x05);
        addr += 1;

        // INX
        bus.write(addr, 0xE8);
        addr += 1;

        // DEX
        bus.write(addr, 0xCA);
        addr += 1;

        // BNE back to LDA
        bus.write(addr, 0xD0);
        addr += 1;
        bus.write(addr, 0xF6); // -10 bytes

        cpu.pc = 0xC000;

        b.iter(|| {
            for _ in 0..11 {
                cpu.step(black_box(&mut bus));
            }
        });
    });

    group.finish();
}

/// Benchmark CPU execution over multiple frames
/// Simulates realistic emulator workload
fn bench_frame_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_execution");
    group.sample_size(20); // Reduce sample size for longer benchmarks

    group.bench_function("1000_cycles", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        for offset in 0..=0x7FFFu16 {
            bus.write(0x8000u16.wrapping_add(offset), 0xEA); // NOP
        }
        cpu.pc = 0x8000;

        b.iter(|| {
            let start_cycles = cpu.cycles;
            while cpu.cycles - start_cycles < 1000 {
                cpu.step(black_box(&mut bus));
            }
        });
    });

    group.bench_function("29780_cycles_one_frame", |b| {
        let (mut cpu, mut bus) = cpu_and_bus();
        for offset in 0..=0x7FFFu16 {
            bus.write(0x8000u16.wrapping_add(offset), 0xEA); // NOP
        }
        cpu.pc = 0x8000;

        b.iter(|| {
            // NES CPU runs at ~1.789773 MHz; at 60 FPS: ~29,780 cycles/frame
            let start_cycles = cpu.cycles;
            while cpu.cycles - start_cycles < 29780 {
                cpu.step(black_box(&mut bus));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cpu_instructions,
    bench_instruction_sequence,
    bench_frame_execution
);
criterion_main!(benches);
