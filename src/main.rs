// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

// A simple demo program for the SuperVDP engine.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use vdp_core::pattern::{PaletteResolver, PatternChip, PriorityCombiner};
use vdp_core::{Model, Resolution, SCREEN, TickEvent, Vdp, VdpConfig};

fn main() -> Result<()> {
    env_logger::init();

    let mut config_path: Option<PathBuf> = None;
    let mut supergrafx = false;
    let mut mixed = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--supergrafx" => supergrafx = true,
            "--mixed" => mixed = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => config_path = Some(PathBuf::from(path)),
        }
    }

    let mut config = match &config_path {
        Some(path) => VdpConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VdpConfig::default(),
    };
    if supergrafx {
        config.model = Model::SuperGrafx;
    }

    println!("SuperVDP v0.1.0");
    println!("===============");
    println!();
    println!(
        "Raster {}x{}, nominal {}x{}, {} colors, {:.2} Hz",
        SCREEN.raster_width,
        SCREEN.raster_height,
        SCREEN.width,
        SCREEN.height,
        SCREEN.colors,
        SCREEN.refresh_hz
    );
    println!("Model: {}", config.model);
    println!();

    let mut vdp = Vdp::from_config(
        &config,
        PatternChip::for_slot,
        PriorityCombiner::new,
        PaletteResolver::new(),
    );
    vdp.power();

    for _ in 0..config.frames {
        let report = loop {
            if mixed {
                // odd lines low-res, even lines high-res
                let line = vdp.timing().vcounter;
                let res = if line % 2 == 1 {
                    Resolution::W256
                } else {
                    Resolution::W512
                };
                vdp.resolver_mut().set_resolution(res);
            }
            if let TickEvent::Frame(report) = vdp.tick()? {
                break report;
            }
        };
        println!(
            "Frame {}: {} (viewport {}, {} rows stretched, {} skipped)",
            report.frame, report.target, report.viewport, report.stretched_rows, report.skipped_rows
        );
    }

    let frame = vdp.frame();
    let checksum = frame
        .viewport_rows()
        .flatten()
        .fold(0u32, |acc, &pixel| acc.rotate_left(5) ^ pixel);
    println!();

    let stats = vdp.stats();
    println!("Final state:");
    println!("  Clock:       {}", stats.clock);
    println!("  Frames:      {}", stats.frame_count);
    println!("  Scanline:    {}", stats.vcounter);
    println!("  Checksum:    0x{checksum:08X}");

    Ok(())
}
