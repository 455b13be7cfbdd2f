//! Digit glyphs on a 3x5 cell grid.
//!
//! Each digit is drawn as 15 rectangular cells, 3 columns by 5 rows, indexed
//! row-major (`index = row * 3 + col`). A [`Glyph`] says which cells are lit.
//!
//! ```text
//!  0  1  2
//!  3  4  5
//!  6  7  8
//!  9 10 11
//! 12 13 14
//! ```
//!
//! Digits 6, 7 and 9 have an optional "tail" controlled by [`TailStyle`]:
//!
//! | Digit | Tail cells | Meaning when lit            |
//! |-------|------------|-----------------------------|
//! | 6     | 1, 2       | top bar extends to the right |
//! | 7     | 3          | hook below the top-left      |
//! | 9     | 12, 13     | bottom bar extends to the left |

/// Number of grid columns per digit.
pub const GRID_COLUMNS: usize = 3;

/// Number of grid rows per digit.
pub const GRID_ROWS: usize = 5;

/// Number of cells per digit.
pub const CELL_COUNT: usize = GRID_COLUMNS * GRID_ROWS;

/// Base glyphs, one row per digit. Tail cells hold placeholder values and are
/// overwritten by [`illumination`].
#[rustfmt::skip]
const BASE_GLYPHS: [[u8; CELL_COUNT]; 10] = [
    [1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1],
    [1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 0, 1, 1, 0, 0, 1, 1, 1, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 1],
    [1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1],
];

const SIX_TAIL_CELLS: [usize; 2] = [1, 2];
const SEVEN_TAIL_CELLS: [usize; 1] = [3];
const NINE_TAIL_CELLS: [usize; 2] = [12, 13];

/// Which digits are drawn with their decorative tail.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TailStyle {
    pub six: bool,
    pub seven: bool,
    pub nine: bool,
}

/// Lit/unlit state of the 15 cells of one digit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph([bool; CELL_COUNT]);

impl Glyph {
    /// Glyph with every cell unlit.
    pub const BLANK: Self = Self([false; CELL_COUNT]);

    /// Glyph with every cell lit.
    pub const FULL: Self = Self([true; CELL_COUNT]);

    pub const fn from_cells(cells: [bool; CELL_COUNT]) -> Self { Self(cells) }

    /// Whether the cell at `index` is lit. Out-of-range indices are unlit.
    #[inline]
    pub fn is_lit(&self, index: usize) -> bool { self.0.get(index).copied().unwrap_or(false) }

    /// Cells in row-major order.
    pub const fn cells(&self) -> &[bool; CELL_COUNT] { &self.0 }

    /// Number of lit cells.
    pub fn lit_count(&self) -> usize { self.0.iter().filter(|lit| **lit).count() }

    fn set_all(
        &mut self,
        indices: &[usize],
        lit: bool,
    ) {
        for &index in indices {
            if let Some(cell) = self.0.get_mut(index) {
                *cell = lit;
            }
        }
    }
}

/// Glyph for `digit` with the given tail style.
///
/// # Panics
///
/// Panics if `digit > 9`. Callers decompose times into decimal digits, so a
/// larger value is a bug at the call site.
pub fn illumination(
    digit: u8,
    tails: TailStyle,
) -> Glyph {
    assert!(digit <= 9, "digit out of range: {digit}");

    let base = BASE_GLYPHS[usize::from(digit)];
    let mut glyph = Glyph(base.map(|cell| cell != 0));

    match digit {
        6 => glyph.set_all(&SIX_TAIL_CELLS, tails.six),
        7 => glyph.set_all(&SEVEN_TAIL_CELLS, tails.seven),
        9 => glyph.set_all(&NINE_TAIL_CELLS, tails.nine),
        _ => {}
    }

    glyph
}

/// All ten glyphs for one tail style.
///
/// Built when the style changes and read on every frame, so drawing never
/// recomputes tail cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GlyphTable {
    tails: TailStyle,
    glyphs: [Glyph; 10],
}

impl GlyphTable {
    pub fn new(tails: TailStyle) -> Self {
        let mut glyphs = [Glyph::BLANK; 10];
        for (digit, glyph) in (0u8..).zip(glyphs.iter_mut()) {
            *glyph = illumination(digit, tails);
        }
        Self { tails, glyphs }
    }

    /// Tail style the table was built for.
    pub const fn tails(&self) -> TailStyle { self.tails }

    /// Glyph for `digit`.
    ///
    /// # Panics
    ///
    /// Panics if `digit > 9`, like [`illumination`].
    pub fn glyph(
        &self,
        digit: u8,
    ) -> Glyph {
        assert!(digit <= 9, "digit out of range: {digit}");
        self.glyphs[usize::from(digit)]
    }
}

impl Default for GlyphTable {
    fn default() -> Self { Self::new(TailStyle::default()) }
}

// =============================================================================
// Tests
// =============================================================================
