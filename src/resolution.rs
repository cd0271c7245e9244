// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Horizontal resolutions produced by the color encoder's dot clock and the
//! per-frame bookkeeping of which ones were used.

use std::fmt;

use bitflags::bitflags;

use crate::core::timing::{ACTIVE_LINES, ACTIVE_START, CYCLES_PER_LINE};
use crate::core::Viewport;

/// Width of the composite raster used when a frame mixes widths that do not
/// divide each other.
pub const COMPOSITE_WIDTH: usize = 1024;

/// Horizontal pixel count of one scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    #[default]
    W256,
    W344,
    W512,
    /// A width the encoder reported that none of the known dot clocks produce
    Unrecognized(u16),
}

impl Resolution {
    /// Every supported resolution, narrowest first.
    pub const SUPPORTED: [Resolution; 3] = [Resolution::W256, Resolution::W344, Resolution::W512];

    pub fn from_width(width: u16) -> Self {
        match width {
            256 => Resolution::W256,
            344 => Resolution::W344,
            512 => Resolution::W512,
            other => Resolution::Unrecognized(other),
        }
    }

    /// Pixel count of a line at this resolution.
    pub fn width(self) -> usize {
        match self {
            Resolution::W256 => 256,
            Resolution::W344 => 344,
            Resolution::W512 => 512,
            Resolution::Unrecognized(width) => width as usize,
        }
    }

    /// Pixels the composer may write: unrecognized widths are clamped to the
    /// row stride.
    pub fn line_width(self) -> usize {
        self.width().min(CYCLES_PER_LINE as usize)
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Resolution::Unrecognized(_))
    }

    /// Usage flag for this resolution; empty when unrecognized.
    pub fn usage(self) -> ResolutionUsage {
        match self {
            Resolution::W256 => ResolutionUsage::W256,
            Resolution::W344 => ResolutionUsage::W344,
            Resolution::W512 => ResolutionUsage::W512,
            Resolution::Unrecognized(_) => ResolutionUsage::empty(),
        }
    }

    /// First raster row shown when a whole frame uses this width.
    pub fn viewport_top(self) -> usize {
        match self {
            Resolution::W512 => ACTIVE_START as usize + 2,
            _ => ACTIVE_START as usize,
        }
    }

    /// Crop rectangle for a frame rendered entirely at this width.
    pub fn viewport(self) -> Viewport {
        Viewport::new(0, self.viewport_top(), self.width(), ACTIVE_LINES as usize)
    }

    /// Replication factor onto the 1024-column composite raster.
    pub fn composite_factor(self) -> Option<usize> {
        match self {
            Resolution::W256 => Some(4),
            Resolution::W344 => Some(3),
            Resolution::W512 => Some(2),
            Resolution::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Unrecognized(width) => write!(f, "unrecognized({width})"),
            known => write!(f, "{}", known.width()),
        }
    }
}

bitflags! {
    /// Which resolutions the scanlines of one frame used.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResolutionUsage: u8 {
        const W256 = 0x01;
        const W344 = 0x02;
        const W512 = 0x04;
    }
}

impl ResolutionUsage {
    /// More than one resolution was used.
    pub fn is_mixed(self) -> bool {
        self.bits().count_ones() > 1
    }

    /// The single resolution used, if exactly one was.
    pub fn uniform(self) -> Option<Resolution> {
        let mut used = self.resolutions();
        match (used.next(), used.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Used resolutions, narrowest first.
    pub fn resolutions(self) -> impl Iterator<Item = Resolution> {
        Resolution::SUPPORTED
            .into_iter()
            .filter(move |res| self.contains(res.usage()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_round_trip_through_from_width() {
        for res in Resolution::SUPPORTED {
            assert_eq!(Resolution::from_width(res.width() as u16), res);
        }
        assert_eq!(Resolution::from_width(320), Resolution::Unrecognized(320));
    }

    #[test]
    fn composite_factors_cover_1024_columns() {
        for res in Resolution::SUPPORTED {
            let factor = res.composite_factor().unwrap();
            assert!(res.width() * factor >= COMPOSITE_WIDTH);
            assert!(res.width() * factor <= CYCLES_PER_LINE as usize);
        }
        assert_eq!(Resolution::Unrecognized(300).composite_factor(), None);
    }

    #[test]
    fn uniform_viewports() {
        assert_eq!(Resolution::W256.viewport(), Viewport::new(0, 21, 256, 239));
        assert_eq!(Resolution::W344.viewport(), Viewport::new(0, 21, 344, 239));
        assert_eq!(Resolution::W512.viewport(), Viewport::new(0, 23, 512, 239));
    }

    #[test]
    fn usage_detects_mixing() {
        let mut usage = ResolutionUsage::empty();
        assert_eq!(usage.uniform(), None);
        usage |= Resolution::W344.usage();
        assert!(!usage.is_mixed());
        assert_eq!(usage.uniform(), Some(Resolution::W344));
        usage |= Resolution::W512.usage();
        assert!(usage.is_mixed());
        assert_eq!(usage.uniform(), None);
        assert_eq!(
            usage.resolutions().collect::<Vec<_>>(),
            vec![Resolution::W344, Resolution::W512]
        );
    }

    #[test]
    fn unrecognized_sets_no_flag() {
        assert!(Resolution::Unrecognized(100).usage().is_empty());
        assert_eq!(Resolution::Unrecognized(4000).line_width(), 1365);
    }
}
