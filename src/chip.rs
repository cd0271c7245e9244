// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interfaces to the chips the engine drives but does not implement.
//!
//! The display controllers, the priority combiner and the color encoder are
//! collaborators: the engine only calls their synchronization hooks and reads
//! their per-pixel output. [`Chips`] fixes, once at construction, whether one
//! controller feeds the encoder directly or two controllers feed it through a
//! combiner.

use std::fmt;

use crate::core::Pixel;
use crate::resolution::Resolution;

/// Palette entry selected by a display controller or the combiner.
pub type PaletteIndex = u16;

/// Consumes master-clock cycles to advance in-flight transfers.
pub trait DmaStepper {
    fn advance(&mut self, cycles: u32);
}

/// A display controller producing one palette index per pixel.
///
/// Every controller drives its own DMA engine, so it is also a
/// [`DmaStepper`].
pub trait PixelSource: DmaStepper {
    fn power(&mut self);
    /// Start of a scanline.
    fn hsync(&mut self);
    /// Start of a frame.
    fn vsync(&mut self);
    /// Mid-line clock, after the horizontal blanking interval.
    fn hclock(&mut self);
    /// End of a scanline.
    fn vclock(&mut self);
    /// Output for column `x` of the current line, valid below the current width.
    fn output_index_at(&self, x: usize) -> PaletteIndex;
}

/// Merges two controllers' outputs for the current line.
pub trait Combiner<P: PixelSource> {
    fn power(&mut self);
    /// Populate the merged output for the current line from both controllers.
    fn render(&mut self, a: &P, b: &P);
    fn output_index_at(&self, x: usize) -> PaletteIndex;
}

/// The color encoder: palette lookup plus the dot-clock setting.
pub trait ColorResolver {
    fn power(&mut self);
    /// Resolution selected by the current dot clock.
    fn current_resolution(&self) -> Resolution;
    /// Global grayscale switch.
    fn grayscale(&self) -> bool;
    fn resolve(&self, grayscale: bool, index: PaletteIndex) -> Pixel;
    /// Lines appended to the nominal frame length.
    fn extra_lines(&self) -> u16;
}

/// Console model: decides how many display controllers are wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-spec", serde(rename_all = "kebab-case"))]
pub enum Model {
    #[default]
    PcEngine,
    SuperGrafx,
}

impl Model {
    pub fn dual_chip(self) -> bool {
        matches!(self, Model::SuperGrafx)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::PcEngine => write!(f, "PC Engine"),
            Model::SuperGrafx => write!(f, "SuperGrafx"),
        }
    }
}

/// Identifies a display controller slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipId {
    A,
    B,
}

/// The pixel-source wiring, selected once.
pub enum Chips<P, M> {
    Single { a: P },
    Dual { a: P, b: P, combiner: M },
}

impl<P: PixelSource, M: Combiner<P>> Chips<P, M> {
    /// Build the wiring a model needs. `combiner` is only called for
    /// dual-chip models.
    pub fn for_model(
        model: Model,
        mut chip: impl FnMut(ChipId) -> P,
        combiner: impl FnOnce() -> M,
    ) -> Self {
        if model.dual_chip() {
            Chips::Dual {
                a: chip(ChipId::A),
                b: chip(ChipId::B),
                combiner: combiner(),
            }
        } else {
            Chips::Single { a: chip(ChipId::A) }
        }
    }

    pub fn model(&self) -> Model {
        match self {
            Chips::Single { .. } => Model::PcEngine,
            Chips::Dual { .. } => Model::SuperGrafx,
        }
    }

    pub fn chip_a(&self) -> &P {
        match self {
            Chips::Single { a } | Chips::Dual { a, .. } => a,
        }
    }

    pub fn chip_b(&self) -> Option<&P> {
        match self {
            Chips::Single { .. } => None,
            Chips::Dual { b, .. } => Some(b),
        }
    }

    pub fn combiner(&self) -> Option<&M> {
        match self {
            Chips::Single { .. } => None,
            Chips::Dual { combiner, .. } => Some(combiner),
        }
    }

    /// Run `hook` on chip A, then on chip B when it is wired.
    pub(crate) fn each(&mut self, mut hook: impl FnMut(&mut P)) {
        match self {
            Chips::Single { a } => hook(a),
            Chips::Dual { a, b, .. } => {
                hook(a);
                hook(b);
            }
        }
    }

    pub(crate) fn power(&mut self) {
        self.each(P::power);
        if let Chips::Dual { combiner, .. } = self {
            combiner.power();
        }
    }

    /// Forward elapsed cycles to every controller's DMA engine.
    pub(crate) fn step_dma(&mut self, cycles: u32) {
        self.each(|chip| chip.advance(cycles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StubChip {
        id: Option<ChipId>,
        log: Vec<&'static str>,
        dma: u32,
    }

    impl DmaStepper for StubChip {
        fn advance(&mut self, cycles: u32) {
            self.dma += cycles;
        }
    }

    impl PixelSource for StubChip {
        fn power(&mut self) {
            self.log.push("power");
        }
        fn hsync(&mut self) {
            self.log.push("hsync");
        }
        fn vsync(&mut self) {}
        fn hclock(&mut self) {}
        fn vclock(&mut self) {}
        fn output_index_at(&self, _x: usize) -> PaletteIndex {
            0
        }
    }

    struct NullCombiner(bool);

    impl Combiner<StubChip> for NullCombiner {
        fn power(&mut self) {
            self.0 = true;
        }
        fn render(&mut self, _a: &StubChip, _b: &StubChip) {}
        fn output_index_at(&self, _x: usize) -> PaletteIndex {
            0
        }
    }

    fn stub(id: ChipId) -> StubChip {
        StubChip {
            id: Some(id),
            ..StubChip::default()
        }
    }

    #[test]
    fn model_selects_wiring() {
        let single: Chips<StubChip, NullCombiner> =
            Chips::for_model(Model::PcEngine, stub, || NullCombiner(false));
        assert_eq!(single.model(), Model::PcEngine);
        assert!(single.chip_b().is_none());
        assert!(single.combiner().is_none());

        let dual: Chips<StubChip, NullCombiner> =
            Chips::for_model(Model::SuperGrafx, stub, || NullCombiner(false));
        assert_eq!(dual.model(), Model::SuperGrafx);
        assert_eq!(dual.chip_a().id, Some(ChipId::A));
        assert_eq!(dual.chip_b().and_then(|b| b.id), Some(ChipId::B));
    }

    #[test]
    fn hooks_reach_chip_b_only_in_dual_mode() {
        let mut single: Chips<StubChip, NullCombiner> =
            Chips::for_model(Model::PcEngine, stub, || NullCombiner(false));
        single.each(PixelSource::hsync);
        single.step_dma(40);
        assert_eq!(single.chip_a().log, vec!["hsync"]);
        assert_eq!(single.chip_a().dma, 40);

        let mut dual: Chips<StubChip, NullCombiner> =
            Chips::for_model(Model::SuperGrafx, stub, || NullCombiner(false));
        dual.power();
        dual.step_dma(40);
        assert_eq!(dual.chip_a().log, vec!["power"]);
        assert_eq!(dual.chip_b().map(|b| b.dma), Some(40));
        assert_eq!(dual.combiner().map(|c| c.0), Some(true));
    }
}
