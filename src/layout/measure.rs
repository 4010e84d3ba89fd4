//! Text measurement for tag chips.

use unicode_width::UnicodeWidthStr;

/// Measures how wide a tag chip would be.
///
/// The returned width must include the chip's own padding and margin, not
/// just the text, since layout compares it directly against the free space.
pub trait TextMeasurer {
    /// Width of a chip showing `text`.
    fn measure(&self, text: &str) -> usize;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> usize,
{
    fn measure(&self, text: &str) -> usize {
        self(text)
    }
}

/// Terminal chip measurer.
///
/// A chip is drawn as `padding + text + padding` on a colored background,
/// followed by `margin` blank cells. Text width is the display width in
/// terminal cells, so CJK and other wide characters count double.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipMeasurer {
    /// Cells of padding on each side of the text.
    pub padding: u16,
    /// Blank cells after the chip.
    pub margin: u16,
}

impl ChipMeasurer {
    /// Create a measurer with explicit chrome sizes.
    pub fn new(padding: u16, margin: u16) -> Self {
        Self { padding, margin }
    }

    /// Cells taken by everything except the text.
    pub fn chrome(&self) -> usize {
        usize::from(self.padding) * 2 + usize::from(self.margin)
    }
}

impl Default for ChipMeasurer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl TextMeasurer for ChipMeasurer {
    fn measure(&self, text: &str) -> usize {
        text.width() + self.chrome()
    }
}

/// Fixed width per character plus fixed chrome.
///
/// Deterministic stand-in for real font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthMeasurer {
    per_char: usize,
    chrome: usize,
}

impl FixedWidthMeasurer {
    pub fn new(per_char: usize, chrome: usize) -> Self {
        Self { per_char, chrome }
    }
}

impl TextMeasurer for FixedWidthMeasurer {
    fn measure(&self, text: &str) -> usize {
        text.chars().count() * self.per_char + self.chrome
    }
}
