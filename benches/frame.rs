// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use vdp_core::pattern::{PaletteResolver, PatternChip, PriorityCombiner};
use vdp_core::{Model, Resolution, TickEvent, Vdp, VdpConfig};

type BenchVdp = Vdp<PatternChip, PriorityCombiner, PaletteResolver>;

fn powered(model: Model) -> BenchVdp {
    let mut vdp = Vdp::from_config(
        &VdpConfig::new(model),
        PatternChip::for_slot,
        PriorityCombiner::new,
        PaletteResolver::new(),
    );
    vdp.power();
    vdp
}

fn uniform_frame(c: &mut Criterion) {
    let mut vdp = powered(Model::PcEngine);
    c.bench_function("uniform 256 frame", |b| {
        b.iter(|| black_box(vdp.run_frame().unwrap()))
    });

    let mut vdp = powered(Model::SuperGrafx);
    vdp.resolver_mut().set_resolution(Resolution::W512);
    c.bench_function("uniform 512 frame, two chips", |b| {
        b.iter(|| black_box(vdp.run_frame().unwrap()))
    });
}

fn mixed_frame(c: &mut Criterion) {
    let mut vdp = powered(Model::SuperGrafx);
    c.bench_function("mixed 256/344/512 frame, two chips", |b| {
        b.iter(|| loop {
            let res = Resolution::SUPPORTED[usize::from(vdp.timing().vcounter) % 3];
            vdp.resolver_mut().set_resolution(res);
            if let TickEvent::Frame(report) = vdp.tick().unwrap() {
                break black_box(report);
            }
        })
    });
}

criterion_group!(benches, uniform_frame, mixed_frame);
criterion_main!(benches);
