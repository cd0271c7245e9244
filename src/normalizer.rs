// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Post-frame resolution normalization.
//!
//! A frame whose active lines all share one width only needs a crop
//! rectangle. A frame that mixes widths is brought to one common width by
//! replicating every source pixel of each narrower row in place, working from
//! the right edge of the row back to column 0 so that no source pixel is
//! overwritten before it has been read. Rows are independent of each other;
//! nothing is interpolated.
//!
//! The common width is the widest width used, as long as every used width
//! divides it. Mixes that do not divide (anything with 344) go to the
//! 1024-column composite raster with the fixed factors 4, 3 and 2.

use std::fmt;

use crate::composer::FrameRecord;
use crate::core::timing::{ACTIVE_BAND, ACTIVE_LINES, ACTIVE_START};
use crate::core::{FrameBuffer, Pixel, Viewport};
use crate::resolution::{COMPOSITE_WIDTH, Resolution, ResolutionUsage};

/// What the normalizer brought the frame to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeTarget {
    /// Every composed line used this resolution; nothing was stretched.
    Uniform(Resolution),
    /// Mixed frame stretched to the widest resolution it used.
    Widest(Resolution),
    /// Mixed frame stretched onto the 1024-column composite raster.
    Composite,
    /// No line used a recognized resolution.
    Fallback,
}

impl NormalizeTarget {
    pub fn select(usage: ResolutionUsage) -> Self {
        if let Some(only) = usage.uniform() {
            return NormalizeTarget::Uniform(only);
        }
        let Some(widest) = usage.resolutions().last() else {
            return NormalizeTarget::Fallback;
        };
        if usage
            .resolutions()
            .all(|res| widest.width() % res.width() == 0)
        {
            NormalizeTarget::Widest(widest)
        } else {
            NormalizeTarget::Composite
        }
    }

    pub fn viewport(self) -> Viewport {
        match self {
            NormalizeTarget::Uniform(res) | NormalizeTarget::Widest(res) => res.viewport(),
            NormalizeTarget::Composite => Viewport::new(
                0,
                ACTIVE_START as usize,
                COMPOSITE_WIDTH,
                ACTIVE_LINES as usize,
            ),
            NormalizeTarget::Fallback => Viewport::default(),
        }
    }

    /// Replication factor for a row composed at `res`, or `None` when the
    /// row cannot be stretched onto this target.
    pub fn factor(self, res: Resolution) -> Option<usize> {
        if !res.is_recognized() {
            return None;
        }
        match self {
            NormalizeTarget::Uniform(_) | NormalizeTarget::Fallback => Some(1),
            NormalizeTarget::Widest(widest) => {
                let (target, width) = (widest.width(), res.width());
                (target % width == 0).then(|| target / width)
            }
            NormalizeTarget::Composite => res.composite_factor(),
        }
    }

    pub fn stretches(self) -> bool {
        matches!(self, NormalizeTarget::Widest(_) | NormalizeTarget::Composite)
    }
}

impl fmt::Display for NormalizeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeTarget::Uniform(res) => write!(f, "uniform {res}"),
            NormalizeTarget::Widest(res) => write!(f, "mixed, stretched to {res}"),
            NormalizeTarget::Composite => write!(f, "mixed, stretched to {COMPOSITE_WIDTH}"),
            NormalizeTarget::Fallback => write!(f, "no recognized resolution"),
        }
    }
}

/// Outcome of normalizing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames completed before this one
    pub frame: u64,
    pub usage: ResolutionUsage,
    pub target: NormalizeTarget,
    pub viewport: Viewport,
    /// Rows whose pixels were replicated
    pub stretched_rows: usize,
    /// Active rows left untouched because their record was unset or unrecognized
    pub skipped_rows: usize,
}

impl FrameReport {
    pub fn mixed(&self) -> bool {
        self.usage.is_mixed()
    }
}

/// Replicate the first `width` pixels of `row` `factor` times each, in place.
///
/// Returns `false`, leaving the row alone, when the stretched row would not
/// fit.
pub fn stretch_row(row: &mut [Pixel], width: usize, factor: usize) -> bool {
    let Some(stretched) = width.checked_mul(factor) else {
        return false;
    };
    if factor == 0 || stretched > row.len() {
        return false;
    }
    for x in (0..width).rev() {
        let color = row[x];
        row[x * factor..(x + 1) * factor].fill(color);
    }
    true
}

/// Normalize the frame `record` describes and choose its viewport.
pub fn normalize(frame: u64, record: &FrameRecord, buffer: &mut FrameBuffer) -> FrameReport {
    let usage = record.usage();
    let target = NormalizeTarget::select(usage);
    let mut report = FrameReport {
        frame,
        usage,
        target,
        viewport: target.viewport(),
        stretched_rows: 0,
        skipped_rows: 0,
    };

    if !target.stretches() {
        log::debug!("frame {frame}: {target}, viewport {}", report.viewport);
        return report;
    }

    for line in ACTIVE_BAND {
        let Some(res) = record.resolution(line) else {
            log::warn!("frame {frame}: scanline {line} has no resolution record, left as is");
            report.skipped_rows += 1;
            continue;
        };
        let Some(factor) = target.factor(res) else {
            log::warn!("frame {frame}: scanline {line} at {res} cannot be stretched, left as is");
            report.skipped_rows += 1;
            continue;
        };
        if factor == 1 {
            continue;
        }
        if stretch_row(buffer.row_mut(line as usize), res.width(), factor) {
            report.stretched_rows += 1;
        } else {
            log::warn!("frame {frame}: scanline {line} at {res} x{factor} overflows the row");
            report.skipped_rows += 1;
        }
    }

    log::debug!(
        "frame {frame}: {target}, {} rows stretched, {} skipped, viewport {}",
        report.stretched_rows,
        report.skipped_rows,
        report.viewport
    );
    report
}
