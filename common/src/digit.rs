//! Digit rendering on a non-uniform 3x5 cell grid.
//!
//! A digit's bounding box is split into 3 columns and 5 rows. When the box
//! size is not divisible, the leftover pixels are handed out symmetrically so
//! the glyph never looks lopsided:
//!
//! | Width remainder | Columns widened |
//! |-----------------|-----------------|
//! | 1               | 1 (center)      |
//! | 2               | 0, 2            |
//!
//! | Height remainder | Rows heightened |
//! |------------------|-----------------|
//! | 1                | 2 (center)      |
//! | 2                | 1, 3            |
//! | 3                | 0, 2, 4         |
//! | 4                | 0, 1, 3, 4      |
//!
//! The cells always tile the box exactly: no gaps, no overlap.

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::segments::{CELL_COUNT, GRID_COLUMNS, GRID_ROWS, Glyph};

/// Whether column `col` gets one extra pixel of width for a width remainder.
pub const fn width_correction(
    remainder: u32,
    col: usize,
) -> bool {
    matches!((remainder, col), (1, 1) | (2, 0 | 2))
}

/// Whether row `row` gets one extra pixel of height for a height remainder.
pub const fn height_correction(
    remainder: u32,
    row: usize,
) -> bool {
    match remainder {
        1 => row == 2,
        2 => row == 1 || row == 3,
        3 => row != 1 && row != 3,
        4 => row != 2,
        _ => false,
    }
}

/// The 15 cell rectangles of a digit box, row-major.
///
/// Widths in each row sum to the box width and heights in each column sum to
/// the box height. A zero-sized box yields zero-sized cells.
pub fn cell_rects(bounds: Rectangle) -> [Rectangle; CELL_COUNT] {
    let Size { width, height } = bounds.size;

    let cell_w = width / GRID_COLUMNS as u32;
    let cell_h = height / GRID_ROWS as u32;
    let rem_w = width - GRID_COLUMNS as u32 * cell_w;
    let rem_h = height - GRID_ROWS as u32 * cell_h;

    let mut rects = [Rectangle::zero(); CELL_COUNT];
    let mut cursor = bounds.top_left;

    for (index, rect) in rects.iter_mut().enumerate() {
        let col = index % GRID_COLUMNS;
        let row = index / GRID_COLUMNS;

        let w = cell_w + u32::from(width_correction(rem_w, col));
        let h = cell_h + u32::from(height_correction(rem_h, row));

        *rect = Rectangle::new(cursor, Size::new(w, h));

        if col == GRID_COLUMNS - 1 {
            cursor.x = bounds.top_left.x;
            cursor.y = cursor.y.saturating_add(h as i32);
        } else {
            cursor.x = cursor.x.saturating_add(w as i32);
        }
    }

    rects
}

/// Fill the lit cells of `glyph` inside `bounds` with `color`.
///
/// Unlit cells are left untouched so the background shows through. Nothing is
/// drawn for a zero-sized box.
pub fn draw_digit<D, C>(
    display: &mut D,
    bounds: Rectangle,
    color: C,
    glyph: &Glyph,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    if bounds.size.width == 0 || bounds.size.height == 0 {
        return Ok(());
    }

    for (index, cell) in cell_rects(bounds).iter().enumerate() {
        if glyph.is_lit(index) && cell.size.width > 0 && cell.size.height > 0 {
            display.fill_solid(cell, color)?;
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;

    use super::*;
    use crate::segments::{TailStyle, illumination};

    #[test]
    fn test_width_correction_table() {
        assert_eq!([0, 1, 2].map(|c| width_correction(0, c)), [false, false, false]);
        assert_eq!([0, 1, 2].map(|c| width_correction(1, c)), [false, true, false]);
        assert_eq!([0, 1, 2].map(|c| width_correction(2, c)), [true, false, true]);
    }

    #[test]
    fn test_height_correction_table() {
        let rows = [0, 1, 2, 3, 4];
        assert_eq!(rows.map(|r| height_correction(0, r)), [false; 5]);
        assert_eq!(rows.map(|r| height_correction(1, r)), [false, false, true, false, false]);
        assert_eq!(rows.map(|r| height_correction(2, r)), [false, true, false, true, false]);
        assert_eq!(rows.map(|r| height_correction(3, r)), [true, false, true, false, true]);
        assert_eq!(rows.map(|r| height_correction(4, r)), [true, true, false, true, true]);
    }

    #[test]
    fn test_cell_rects_even_box() {
        let rects = cell_rects(Rectangle::new(Point::new(10, 20), Size::new(30, 50)));
        assert_eq!(rects[0], Rectangle::new(Point::new(10, 20), Size::new(10, 10)));
        assert_eq!(rects[4], Rectangle::new(Point::new(20, 30), Size::new(10, 10)));
        assert_eq!(rects[14], Rectangle::new(Point::new(30, 60), Size::new(10, 10)));
    }

    #[test]
    fn test_cell_rects_distribute_remainders() {
        // 87 = 3 * 29 + 0, 87 = 5 * 17 + 2
        let rects = cell_rects(Rectangle::new(Point::zero(), Size::new(87, 87)));
        let widths = [rects[0].size.width, rects[1].size.width, rects[2].size.width];
        let heights = [0, 3, 6, 9, 12].map(|i| rects[i].size.height);
        assert_eq!(widths, [29, 29, 29]);
        assert_eq!(heights, [17, 18, 17, 18, 17]);

        // 88 = 3 * 29 + 1, 89 = 5 * 17 + 4
        let rects = cell_rects(Rectangle::new(Point::zero(), Size::new(88, 89)));
        let widths = [rects[0].size.width, rects[1].size.width, rects[2].size.width];
        let heights = [0, 3, 6, 9, 12].map(|i| rects[i].size.height);
        assert_eq!(widths, [29, 30, 29]);
        assert_eq!(heights, [18, 18, 17, 18, 18]);
    }

    #[test]
    fn test_cell_rects_tile_box() {
        let bounds = Rectangle::new(Point::new(-3, 5), Size::new(47, 23));
        let rects = cell_rects(bounds);

        let mut covered = 0u32;
        for (i, a) in rects.iter().enumerate() {
            covered += a.size.width * a.size.height;
            assert!(bounds.intersection(a) == *a, "cell {i} leaves the box");
            for b in rects.iter().skip(i + 1) {
                let overlap = a.intersection(b).size;
                assert!(overlap.width == 0 || overlap.height == 0, "cells overlap");
            }
        }
        assert_eq!(covered, 47 * 23);
    }

    #[test]
    fn test_cell_rects_zero_box() {
        let rects = cell_rects(Rectangle::new(Point::new(4, 4), Size::zero()));
        assert!(rects.iter().all(|r| r.size == Size::zero()));
    }

    #[test]
    fn test_draw_digit_one() {
        let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
        let glyph = illumination(1, TailStyle::default());
        draw_digit(
            &mut display,
            Rectangle::new(Point::zero(), Size::new(3, 5)),
            BinaryColor::On,
            &glyph,
        )
        .unwrap();

        display.assert_pattern(&[
            "##", //
            " #", //
            " #", //
            " #", //
            "###",
        ]);
    }

    #[test]
    fn test_draw_digit_zero_size_draws_nothing() {
        let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
        draw_digit(
            &mut display,
            Rectangle::new(Point::new(5, 5), Size::new(0, 40)),
            BinaryColor::On,
            &Glyph::FULL,
        )
        .unwrap();
        display.assert_pattern(&[]);
    }
}
