// Copyright (C) 2025 Dayton Fishell
// SuperVDP video display processor emulator
// This file is part of SuperVDP.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Internal-consistency faults. Any of these means the engine state is
/// corrupt; none is worth retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VdpFault {
    #[error("counters out of range at tick entry: hcounter {hcounter}, vcounter {vcounter} (frame has {frame_lines} lines)")]
    CounterOutOfRange {
        hcounter: u32,
        vcounter: u16,
        frame_lines: u16,
    },
    #[error("scanline {line} reached the composer outside the active band")]
    LineOutsideActiveBand { line: u16 },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde-spec")]
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[cfg(feature = "serde-spec")]
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
