// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical frame buffer, the viewport rectangle and the host-facing screen
//! geometry.

use std::fmt;

use super::timing::{
    ACTIVE_LINES, ACTIVE_START, CYCLES_PER_LINE, LINES_PER_FRAME, MASTER_CLOCK_HZ, MAX_LINES,
};

/// Resolved display color: grayscale flag in bit 9 over a 9-bit palette word.
pub type Pixel = u32;

/// Geometry the host display pipeline should assume for this raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    /// Full raster: one cell per master cycle, one row per scanline
    pub raster_width: usize,
    pub raster_height: usize,
    /// Nominal visible output size
    pub width: usize,
    pub height: usize,
    /// Horizontal and vertical scale from raster cells to output pixels
    pub scale_x: f32,
    pub scale_y: f32,
    /// Display aspect correction (numerator, denominator)
    pub aspect: (u32, u32),
    /// Distinct pixel values the color resolver can produce
    pub colors: u32,
    /// Frames per second at the nominal line count
    pub refresh_hz: f64,
}

pub const SCREEN: ScreenGeometry = ScreenGeometry {
    raster_width: CYCLES_PER_LINE as usize,
    raster_height: MAX_LINES,
    width: 1088,
    height: ACTIVE_LINES as usize,
    scale_x: 0.25,
    scale_y: 1.0,
    aspect: (8, 7),
    colors: 1 << 10,
    refresh_hz: MASTER_CLOCK_HZ as f64 / (CYCLES_PER_LINE as f64 * LINES_PER_FRAME as f64),
};

/// Rectangle of the frame buffer that carries the finished picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, ACTIVE_START as usize, 256, ACTIVE_LINES as usize)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Raster-sized pixel grid, overwritten in place every frame.
pub struct FrameBuffer {
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    /// Row stride in pixels
    pub const STRIDE: usize = CYCLES_PER_LINE as usize;
    pub const HEIGHT: usize = MAX_LINES;

    pub fn new() -> Self {
        Self {
            pixels: vec![0; Self::STRIDE * Self::HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// One full-stride row. Rows past the raster height wrap, matching the
    /// way the counters address it.
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = (y % Self::HEIGHT) * Self::STRIDE;
        &self.pixels[start..start + Self::STRIDE]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = (y % Self::HEIGHT) * Self::STRIDE;
        &mut self.pixels[start..start + Self::STRIDE]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.row(y).get(x).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a finished frame.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    buffer: &'a FrameBuffer,
    viewport: Viewport,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(buffer: &'a FrameBuffer, viewport: Viewport) -> Self {
        Self { buffer, viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn buffer(&self) -> &'a FrameBuffer {
        self.buffer
    }

    /// Full-stride raster row `y`.
    pub fn row(&self, y: usize) -> &'a [Pixel] {
        self.buffer.row(y)
    }

    /// Rows of the viewport, cropped to its width.
    pub fn viewport_rows(&self) -> impl Iterator<Item = &'a [Pixel]> + 'a {
        let Viewport {
            x,
            y,
            width,
            height,
        } = self.viewport;
        let buffer = self.buffer;
        (y..y + height).map(move |row| {
            let line = buffer.row(row);
            let end = (x + width).min(line.len());
            &line[x.min(end)..end]
        })
    }

    /// Copy the viewport into a tightly packed vector.
    pub fn to_vec(&self) -> Vec<Pixel> {
        let mut out = Vec::with_capacity(self.viewport.width * self.viewport.height);
        for row in self.viewport_rows() {
            out.extend_from_slice(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_covers_full_raster() {
        let buffer = FrameBuffer::new();
        assert_eq!(buffer.as_slice().len(), 1365 * 263);
        assert_eq!(buffer.row(262).len(), FrameBuffer::STRIDE);
    }

    #[test]
    fn rows_are_independent() {
        let mut buffer = FrameBuffer::new();
        buffer.row_mut(21)[0] = 0x1FF;
        buffer.row_mut(22)[1364] = 0x155;
        assert_eq!(buffer.pixel(0, 21), 0x1FF);
        assert_eq!(buffer.pixel(1364, 22), 0x155);
        assert_eq!(buffer.pixel(0, 22), 0);
        assert_eq!(buffer.pixel(2000, 22), 0);
    }

    #[test]
    fn frame_crops_to_viewport() {
        let mut buffer = FrameBuffer::new();
        for y in 21..260 {
            buffer.row_mut(y)[..256].fill(y as Pixel);
            buffer.row_mut(y)[256] = 0xDEAD;
        }
        let frame = Frame::new(&buffer, Viewport::default());
        let rows: Vec<_> = frame.viewport_rows().collect();
        assert_eq!(rows.len(), 239);
        assert!(rows.iter().all(|row| row.len() == 256));
        assert_eq!(rows[0][0], 21);
        assert_eq!(frame.to_vec().len(), 256 * 239);
        assert!(!frame.to_vec().contains(&0xDEAD));
    }

    #[test]
    fn screen_geometry_matches_raster() {
        assert_eq!(SCREEN.raster_width, FrameBuffer::STRIDE);
        assert_eq!(SCREEN.raster_height, FrameBuffer::HEIGHT);
        assert_eq!(SCREEN.colors, 1024);
        assert!((SCREEN.refresh_hz - 60.054).abs() < 0.001);
    }
}
