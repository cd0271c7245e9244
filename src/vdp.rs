// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scanline scheduler
//!
//! [`Vdp`] owns the timing counters, the frame-scoped resolution record and
//! the canonical frame buffer. Each [`Vdp::tick`] advances exactly one
//! scanline:
//!
//! 1. horizontal sync on every display controller
//! 2. at line 0, vertical sync and a fresh frame record
//! 3. 512 cycles of horizontal blanking, forwarded to the DMA engines
//! 4. the controllers' mid-line clock
//! 5. composition, on active lines
//! 6. the rest of the 1365-cycle line, forwarded to the DMA engines
//! 7. the controllers' end-of-line clock
//! 8. counter update against the nominal line count plus the encoder's
//!    current extra-line count; on wrap the frame is normalized and reported
//!
//! Chip A is always driven before chip B.

use crate::chip::{ChipId, Chips, ColorResolver, Combiner, Model, PixelSource};
use crate::composer::{FrameRecord, compose_line};
use crate::config::VdpConfig;
use crate::core::timing::{HSYNC_CYCLES, is_active_line};
use crate::core::{Frame, FrameBuffer, TimingState, Viewport};
use crate::error::VdpFault;
use crate::normalizer::{FrameReport, normalize};
use crate::resolution::Resolution;

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Line,
    /// The frame wrapped; the buffer and viewport can be read until the next tick.
    Frame(FrameReport),
}

/// Video display processor: scheduler, composer and normalizer around a set
/// of collaborator chips.
pub struct Vdp<P, M, R> {
    chips: Chips<P, M>,
    resolver: R,
    timing: TimingState,
    record: FrameRecord,
    buffer: FrameBuffer,
    viewport: Viewport,
    frame_count: u64,
}

impl<P, M, R> Vdp<P, M, R>
where
    P: PixelSource,
    M: Combiner<P>,
    R: ColorResolver,
{
    pub fn new(chips: Chips<P, M>, resolver: R) -> Self {
        log::debug!("vdp: {} wiring", chips.model());
        Self {
            chips,
            resolver,
            timing: TimingState::new(),
            record: FrameRecord::new(),
            buffer: FrameBuffer::new(),
            viewport: Viewport::default(),
            frame_count: 0,
        }
    }

    /// Build the wiring `config` asks for.
    pub fn from_config(
        config: &VdpConfig,
        chip: impl FnMut(ChipId) -> P,
        combiner: impl FnOnce() -> M,
        resolver: R,
    ) -> Self {
        Self::new(Chips::for_model(config.model, chip, combiner), resolver)
    }

    /// Power-on: zero the counters, drop the frame record and the picture,
    /// and power every collaborator.
    pub fn power(&mut self) {
        self.timing.reset();
        self.record.clear();
        self.buffer.clear();
        self.viewport = Viewport::default();
        self.frame_count = 0;
        self.resolver.power();
        self.chips.power();
        log::debug!("vdp: power on ({})", self.chips.model());
    }

    /// Advance exactly one scanline.
    pub fn tick(&mut self) -> Result<TickEvent, VdpFault> {
        let TimingState {
            hcounter, vcounter, ..
        } = self.timing;
        if hcounter != 0 || vcounter >= self.timing.frame_lines() {
            return Err(VdpFault::CounterOutOfRange {
                hcounter,
                vcounter,
                frame_lines: self.timing.frame_lines(),
            });
        }

        self.chips.each(P::hsync);

        if vcounter == 0 {
            self.chips.each(P::vsync);
            self.record.clear();
            log::trace!("frame {} starts", self.frame_count);
        }

        self.step(HSYNC_CYCLES);

        self.chips.each(P::hclock);

        if is_active_line(vcounter) {
            self.compose_current_line()?;
        }

        self.step(self.timing.remaining_in_line());

        self.chips.each(P::vclock);

        if !self.timing.end_line(self.resolver.extra_lines()) {
            return Ok(TickEvent::Line);
        }
        log::trace!(
            "frame {}: wrapped after {} lines",
            self.frame_count,
            self.timing.frame_lines()
        );

        let report = normalize(self.frame_count, &self.record, &mut self.buffer);
        self.viewport = report.viewport;
        self.frame_count += 1;
        Ok(TickEvent::Frame(report))
    }

    /// Tick until the current frame completes.
    pub fn run_frame(&mut self) -> Result<FrameReport, VdpFault> {
        loop {
            if let TickEvent::Frame(report) = self.tick()? {
                return Ok(report);
            }
        }
    }

    /// Run the specified number of frames, returning the last report.
    pub fn run_frames(&mut self, frames: u32) -> Result<Option<FrameReport>, VdpFault> {
        let mut last = None;
        for _ in 0..frames {
            last = Some(self.run_frame()?);
        }
        Ok(last)
    }

    /// Compose the scanline the counters point at. The scheduler calls this
    /// on active lines; calling it again before the frame wraps overwrites
    /// the same row.
    pub fn compose_current_line(&mut self) -> Result<Resolution, VdpFault> {
        compose_line(
            self.timing.vcounter,
            &mut self.chips,
            &self.resolver,
            &mut self.record,
            &mut self.buffer,
        )
    }

    /// Forward elapsed cycles to the clock and to every DMA engine.
    fn step(&mut self, cycles: u32) {
        self.timing.advance(cycles);
        self.chips.step_dma(cycles);
    }

    /// The finished picture. Meaningful between a frame event and the next
    /// tick.
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(&self.buffer, self.viewport)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn timing(&self) -> TimingState {
        self.timing
    }

    pub fn record(&self) -> &FrameRecord {
        &self.record
    }

    pub fn model(&self) -> Model {
        self.chips.model()
    }

    pub fn chips(&self) -> &Chips<P, M> {
        &self.chips
    }

    pub fn chips_mut(&mut self) -> &mut Chips<P, M> {
        &mut self.chips
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Get current execution statistics
    pub fn stats(&self) -> VdpStats {
        VdpStats {
            clock: self.timing.clock,
            frame_count: self.frame_count,
            hcounter: self.timing.hcounter,
            vcounter: self.timing.vcounter,
        }
    }
}

/// Scheduler statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VdpStats {
    pub clock: u64,
    pub frame_count: u64,
    pub hcounter: u32,
    pub vcounter: u16,
}
