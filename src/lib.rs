// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! PC Engine / SuperGrafx video timing and composition engine
//!
//! This library drives one or two display controllers through a 262-line,
//! 1365-cycle-per-line frame, composes each active scanline into a canonical
//! frame buffer and normalizes frames that mix horizontal resolutions.

pub mod chip;
pub mod composer;
pub mod config;
pub mod core;
pub mod error;
pub mod normalizer;
pub mod pattern;
pub mod resolution;
pub mod vdp;

// Re-export commonly used types
pub use chip::{ChipId, Chips, ColorResolver, Combiner, DmaStepper, Model, PaletteIndex, PixelSource};
pub use config::VdpConfig;
pub use crate::core::{Frame, FrameBuffer, Pixel, SCREEN, Viewport};
pub use error::{ConfigError, VdpFault};
pub use normalizer::{FrameReport, NormalizeTarget};
pub use resolution::{Resolution, ResolutionUsage};
pub use vdp::{TickEvent, Vdp, VdpStats};
