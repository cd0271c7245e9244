//! Reference collaborators.
//!
//! Small, deterministic stand-ins for the display controllers, the priority
//! combiner and the color encoder. The demo binary, the benchmarks and the
//! tests drive the engine with them.

use crate::chip::{ChipId, ColorResolver, Combiner, DmaStepper, PaletteIndex, PixelSource};
use crate::core::{FrameBuffer, Pixel};
use crate::resolution::Resolution;

/// Palette words in color RAM
pub const CRAM_SIZE: usize = 0x200;

/// Display controller emitting a diagonal palette ramp.
///
/// Every `stripe` columns the output alternates between the ramp and the
/// transparent index, so a second controller can show through.
pub struct PatternChip {
    palette_base: PaletteIndex,
    stripe: usize,
    line: u16,
    output: Vec<PaletteIndex>,
    /// Hook invocation counts, in the order hsync, vsync, hclock, vclock
    hooks: [u64; 4],
    dma_cycles: u64,
}

impl PatternChip {
    pub fn new(palette_base: PaletteIndex, stripe: usize) -> Self {
        Self {
            palette_base: palette_base & 0x1F0,
            stripe,
            line: 0,
            output: vec![0; FrameBuffer::STRIDE],
            hooks: [0; 4],
            dma_cycles: 0,
        }
    }

    /// Chip A draws background palettes with transparent stripes; chip B
    /// draws sprite palettes everywhere.
    pub fn for_slot(id: ChipId) -> Self {
        match id {
            ChipId::A => Self::new(0x000, 16),
            ChipId::B => Self::new(0x100, 0),
        }
    }

    /// Scanline the chip believes it is on.
    pub fn line(&self) -> u16 {
        self.line
    }

    pub fn hsync_count(&self) -> u64 {
        self.hooks[0]
    }

    pub fn vsync_count(&self) -> u64 {
        self.hooks[1]
    }

    pub fn hclock_count(&self) -> u64 {
        self.hooks[2]
    }

    pub fn vclock_count(&self) -> u64 {
        self.hooks[3]
    }

    /// Cycles forwarded to this chip's DMA engine.
    pub fn dma_cycles(&self) -> u64 {
        self.dma_cycles
    }

    fn render_line(&mut self) {
        let line = self.line as usize;
        for (x, slot) in self.output.iter_mut().enumerate() {
            let transparent = self.stripe != 0 && (x / self.stripe) % 2 == 1;
            *slot = if transparent {
                self.palette_base
            } else {
                let shade = 1 + ((x + line) % 15) as PaletteIndex;
                self.palette_base | shade
            };
        }
    }
}

impl DmaStepper for PatternChip {
    fn advance(&mut self, cycles: u32) {
        self.dma_cycles += u64::from(cycles);
    }
}

impl PixelSource for PatternChip {
    fn power(&mut self) {
        self.line = 0;
        self.output.fill(0);
        self.hooks = [0; 4];
        self.dma_cycles = 0;
    }

    fn hsync(&mut self) {
        self.hooks[0] += 1;
    }

    fn vsync(&mut self) {
        self.hooks[1] += 1;
        self.line = 0;
    }

    fn hclock(&mut self) {
        self.hooks[2] += 1;
        self.render_line();
    }

    fn vclock(&mut self) {
        self.hooks[3] += 1;
        self.line = self.line.wrapping_add(1);
    }

    fn output_index_at(&self, x: usize) -> PaletteIndex {
        self.output.get(x).copied().unwrap_or(0)
    }
}

/// Chip A wins wherever its pixel is opaque; chip B fills the rest.
pub struct PriorityCombiner {
    output: Vec<PaletteIndex>,
    renders: u64,
}

impl PriorityCombiner {
    pub fn new() -> Self {
        Self {
            output: vec![0; FrameBuffer::STRIDE],
            renders: 0,
        }
    }

    /// Lines merged since power-on.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn output_index_at(&self, x: usize) -> PaletteIndex {
        self.output.get(x).copied().unwrap_or(0)
    }
}

impl Default for PriorityCombiner {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PixelSource> Combiner<P> for PriorityCombiner {
    fn power(&mut self) {
        self.output.fill(0);
        self.renders = 0;
    }

    fn render(&mut self, a: &P, b: &P) {
        for (x, slot) in self.output.iter_mut().enumerate() {
            let front = a.output_index_at(x);
            *slot = if front & 0x0F != 0 {
                front
            } else {
                b.output_index_at(x)
            };
        }
        self.renders += 1;
    }

    fn output_index_at(&self, x: usize) -> PaletteIndex {
        PriorityCombiner::output_index_at(self, x)
    }
}

/// Color encoder with an identity-initialized color RAM and a dot clock the
/// host sets between ticks.
pub struct PaletteResolver {
    cram: [u16; CRAM_SIZE],
    grayscale: bool,
    resolution: Resolution,
    extra_lines: u16,
}

impl PaletteResolver {
    pub fn new() -> Self {
        let mut cram = [0; CRAM_SIZE];
        for (index, word) in cram.iter_mut().enumerate() {
            *word = index as u16;
        }
        Self {
            cram,
            grayscale: false,
            resolution: Resolution::W256,
            extra_lines: 0,
        }
    }

    pub fn write_cram(&mut self, index: PaletteIndex, value: u16) {
        self.cram[index as usize & (CRAM_SIZE - 1)] = value & 0x1FF;
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    pub fn set_grayscale(&mut self, grayscale: bool) {
        self.grayscale = grayscale;
    }

    pub fn set_extra_lines(&mut self, lines: u16) {
        self.extra_lines = lines;
    }
}

impl Default for PaletteResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorResolver for PaletteResolver {
    fn power(&mut self) {
        *self = Self::new();
    }

    fn current_resolution(&self) -> Resolution {
        self.resolution
    }

    fn grayscale(&self) -> bool {
        self.grayscale
    }

    fn resolve(&self, grayscale: bool, index: PaletteIndex) -> Pixel {
        let word = self.cram[index as usize & (CRAM_SIZE - 1)];
        (Pixel::from(grayscale) << 9) | Pixel::from(word)
    }

    fn extra_lines(&self) -> u16 {
        self.extra_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_a_has_transparent_stripes() {
        let mut chip = PatternChip::for_slot(ChipId::A);
        chip.hclock();
        assert_ne!(chip.output_index_at(0) & 0x0F, 0);
        assert_eq!(chip.output_index_at(16) & 0x0F, 0);
        assert_ne!(chip.output_index_at(32) & 0x0F, 0);
    }

    #[test]
    fn chip_b_is_opaque_sprite_palette() {
        let mut chip = PatternChip::for_slot(ChipId::B);
        chip.hclock();
        assert!((0..1024).all(|x| {
            let index = chip.output_index_at(x);
            index & 0x100 != 0 && index & 0x0F != 0
        }));
    }

    #[test]
    fn line_follows_sync_hooks() {
        let mut chip = PatternChip::for_slot(ChipId::A);
        chip.vclock();
        chip.vclock();
        assert_eq!(chip.line(), 2);
        chip.vsync();
        assert_eq!(chip.line(), 0);
        assert_eq!(chip.vsync_count(), 1);
    }

    #[test]
    fn combiner_prefers_opaque_front_pixels() {
        let mut a = PatternChip::for_slot(ChipId::A);
        let mut b = PatternChip::for_slot(ChipId::B);
        a.hclock();
        b.hclock();
        let mut combiner = PriorityCombiner::new();
        combiner.render(&a, &b);
        assert_eq!(combiner.output_index_at(0), a.output_index_at(0));
        assert_eq!(combiner.output_index_at(20), b.output_index_at(20));
        assert_eq!(combiner.renders(), 1);
    }

    #[test]
    fn resolver_packs_grayscale_above_palette_word() {
        let mut resolver = PaletteResolver::new();
        resolver.write_cram(0x12, 0x1AB);
        assert_eq!(resolver.resolve(false, 0x12), 0x1AB);
        assert_eq!(resolver.resolve(true, 0x12), 0x3AB);
        assert_eq!(resolver.resolve(false, 0x212), 0x1AB);
    }
}
