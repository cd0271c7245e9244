// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scanline composition: one row of resolved colors per active line.

use bitvec::prelude::*;

use crate::chip::{Chips, ColorResolver, Combiner, PixelSource};
use crate::core::FrameBuffer;
use crate::core::timing::{MAX_LINES, is_active_line};
use crate::error::VdpFault;
use crate::resolution::{Resolution, ResolutionUsage};

type LineMask = BitArr!(for MAX_LINES);

/// Frame-scoped bookkeeping: which resolutions were used and what each
/// composed line was rendered at.
#[derive(Clone)]
pub struct FrameRecord {
    usage: ResolutionUsage,
    widths: [Resolution; MAX_LINES],
    composed: LineMask,
}

impl FrameRecord {
    pub fn new() -> Self {
        Self {
            usage: ResolutionUsage::empty(),
            widths: [Resolution::default(); MAX_LINES],
            composed: LineMask::ZERO,
        }
    }

    /// Forget everything about the previous frame.
    pub fn clear(&mut self) {
        self.usage = ResolutionUsage::empty();
        self.composed.fill(false);
    }

    pub fn usage(&self) -> ResolutionUsage {
        self.usage
    }

    /// Resolution `line` was composed at this frame, if it was composed.
    pub fn resolution(&self, line: u16) -> Option<Resolution> {
        let line = line as usize;
        if line < MAX_LINES && self.composed[line] {
            Some(self.widths[line])
        } else {
            None
        }
    }

    /// Number of lines composed so far this frame.
    pub fn composed_lines(&self) -> usize {
        self.composed.count_ones()
    }

    pub(crate) fn record(&mut self, line: u16, resolution: Resolution) {
        let line = line as usize;
        self.widths[line] = resolution;
        self.composed.set(line, true);
        self.usage |= resolution.usage();
    }
}

impl Default for FrameRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose scanline `line` into `buffer`.
///
/// Re-running it for the same line overwrites the row; nothing accumulates.
pub fn compose_line<P, M, R>(
    line: u16,
    chips: &mut Chips<P, M>,
    resolver: &R,
    record: &mut FrameRecord,
    buffer: &mut FrameBuffer,
) -> Result<Resolution, VdpFault>
where
    P: PixelSource,
    M: Combiner<P>,
    R: ColorResolver,
{
    if !is_active_line(line) {
        return Err(VdpFault::LineOutsideActiveBand { line });
    }

    let resolution = resolver.current_resolution();
    let width = resolution.line_width();
    let grayscale = resolver.grayscale();
    let row = &mut buffer.row_mut(line as usize)[..width];

    match chips {
        Chips::Single { a } => {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = resolver.resolve(grayscale, a.output_index_at(x));
            }
        }
        Chips::Dual { a, b, combiner } => {
            combiner.render(a, b);
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = resolver.resolve(grayscale, combiner.output_index_at(x));
            }
        }
    }

    if !resolution.is_recognized() {
        log::warn!("scanline {line}: encoder reported {resolution}");
    }
    record.record(line, resolution);
    log::trace!("scanline {line} composed at {resolution}");
    Ok(resolution)
}
