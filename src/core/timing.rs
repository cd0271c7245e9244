// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Raster timing constants and the scheduler's counters.

use std::ops::Range;

/// Master clock: six times the NTSC colorburst (21.477 MHz)
pub const MASTER_CLOCK_HZ: u64 = 21_477_270;

/// Master cycles in one scanline
pub const CYCLES_PER_LINE: u32 = 1365;

/// Cycles consumed before the display controllers' mid-line clock
pub const HSYNC_CYCLES: u32 = 512;

/// Nominal scanlines per frame, before the extra-line adjustment
pub const LINES_PER_FRAME: u16 = 262;

/// Tallest raster the frame buffer has to hold (one extra line)
pub const MAX_LINES: usize = 263;

/// First visible scanline
pub const ACTIVE_START: u16 = 21;

/// Height of the visible band
pub const ACTIVE_LINES: u16 = 239;

/// Scanlines carrying composed pixels.
pub const ACTIVE_BAND: Range<u16> = ACTIVE_START..ACTIVE_START + ACTIVE_LINES;

/// Whether `line` lies in the visible band.
pub fn is_active_line(line: u16) -> bool {
    ACTIVE_BAND.contains(&line)
}

/// Horizontal/vertical counters plus the cumulative master clock.
///
/// Only the scheduler in [`crate::vdp`] mutates these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingState {
    /// Cycles elapsed within the current scanline
    pub hcounter: u32,
    /// Current scanline
    pub vcounter: u16,
    /// Cycles elapsed since power-on
    pub clock: u64,
    /// Wrap threshold used when the previous scanline ended
    pub(crate) frame_lines: u16,
}

impl TimingState {
    pub fn new() -> Self {
        Self {
            hcounter: 0,
            vcounter: 0,
            clock: 0,
            frame_lines: LINES_PER_FRAME,
        }
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Wrap threshold applied when the previous scanline ended.
    pub fn frame_lines(&self) -> u16 {
        self.frame_lines
    }

    /// Advance both the line-local and the cumulative counters.
    pub(crate) fn advance(&mut self, cycles: u32) {
        self.hcounter += cycles;
        self.clock += u64::from(cycles);
    }

    /// Cycles left until the end of the current scanline.
    pub(crate) fn remaining_in_line(&self) -> u32 {
        debug_assert!(self.hcounter <= CYCLES_PER_LINE);
        CYCLES_PER_LINE.saturating_sub(self.hcounter)
    }

    /// Close the scanline against a threshold of the nominal line count plus
    /// `extra_lines`, read now. Returns `true` when the frame wrapped.
    pub(crate) fn end_line(&mut self, extra_lines: u16) -> bool {
        self.frame_lines = LINES_PER_FRAME.saturating_add(extra_lines);
        self.hcounter = 0;
        self.vcounter += 1;
        if self.vcounter >= self.frame_lines {
            self.vcounter = 0;
            true
        } else {
            false
        }
    }
}

impl Default for TimingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_band_bounds() {
        assert!(!is_active_line(20));
        assert!(is_active_line(21));
        assert!(is_active_line(259));
        assert!(!is_active_line(260));
        assert_eq!(ACTIVE_BAND.len(), ACTIVE_LINES as usize);
    }

    #[test]
    fn end_line_wraps_at_threshold_read_on_each_line() {
        let mut timing = TimingState::new();
        timing.vcounter = 261;
        assert!(!timing.end_line(1));
        assert_eq!(timing.vcounter, 262);
        assert_eq!(timing.frame_lines(), 263);
        assert!(timing.end_line(1));
        assert_eq!(timing.vcounter, 0);

        // lowering the count past the current line wraps on the next line end
        timing.vcounter = 262;
        assert!(timing.end_line(0));
        assert_eq!(timing.frame_lines(), 262);
    }

    #[test]
    fn advance_tracks_line_and_clock() {
        let mut timing = TimingState::new();
        timing.advance(HSYNC_CYCLES);
        assert_eq!(timing.remaining_in_line(), CYCLES_PER_LINE - HSYNC_CYCLES);
        timing.advance(CYCLES_PER_LINE - HSYNC_CYCLES);
        assert_eq!(timing.clock, u64::from(CYCLES_PER_LINE));
        timing.end_line(0);
        assert_eq!(timing.hcounter, 0);
        assert_eq!(timing.clock, u64::from(CYCLES_PER_LINE));
    }

}
