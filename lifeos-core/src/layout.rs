use crate::model::GridSpan;
use ratatui::layout::Rect;

/// Pack component cells into a two-column grid, in list order. A
/// `Two`-wide cell takes a full row; consecutive `One`-wide cells pair up
/// side by side. `Two`-high cells double the row height. Rows that run
/// past the bottom of `area` are clipped rather than dropped, so callers
/// can skip zero-height rects.
pub fn grid_areas(area: Rect, cells: &[(GridSpan, GridSpan)], row_height: u16) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(cells.len());
    let left_width = area.width / 2;
    let right_width = area.width - left_width;
    let bottom = area.y + area.height;

    let mut y = area.y;
    // Height of a half-filled row, waiting for a right-hand neighbour.
    let mut pending_left: Option<u16> = None;

    let clip = |y: u16, height: u16| -> u16 { height.min(bottom.saturating_sub(y)) };

    for &(w, h) in cells {
        let height = row_height * h.cells();
        match w {
            GridSpan::Two => {
                if let Some(left_height) = pending_left.take() {
                    y = y.saturating_add(left_height);
                }
                rects.push(Rect {
                    x: area.x,
                    y,
                    width: area.width,
                    height: clip(y, height),
                });
                y = y.saturating_add(height);
            }
            GridSpan::One => match pending_left.take() {
                None => {
                    rects.push(Rect {
                        x: area.x,
                        y,
                        width: left_width,
                        height: clip(y, height),
                    });
                    pending_left = Some(height);
                }
                Some(left_height) => {
                    rects.push(Rect {
                        x: area.x + left_width,
                        y,
                        width: right_width,
                        height: clip(y, height),
                    });
                    y = y.saturating_add(left_height.max(height));
                }
            },
        }
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: u16 = 5;

    fn one() -> (GridSpan, GridSpan) {
        (GridSpan::One, GridSpan::One)
    }

    #[test]
    fn single_wide_pair_shares_a_row() {
        let area = Rect::new(0, 0, 80, 20);
        let rects = grid_areas(area, &[one(), one()], ROW);
        assert_eq!(rects[0], Rect::new(0, 0, 40, 5));
        assert_eq!(rects[1], Rect::new(40, 0, 40, 5));
    }

    #[test]
    fn double_wide_takes_full_row() {
        let area = Rect::new(0, 0, 80, 20);
        let rects = grid_areas(
            area,
            &[(GridSpan::Two, GridSpan::One), one(), one()],
            ROW,
        );
        assert_eq!(rects[0], Rect::new(0, 0, 80, 5));
        assert_eq!(rects[1], Rect::new(0, 5, 40, 5));
        assert_eq!(rects[2], Rect::new(40, 5, 40, 5));
    }

    #[test]
    fn double_wide_closes_a_half_filled_row() {
        let area = Rect::new(0, 0, 80, 20);
        let rects = grid_areas(area, &[one(), (GridSpan::Two, GridSpan::One)], ROW);
        assert_eq!(rects[0], Rect::new(0, 0, 40, 5));
        // The lone left cell keeps its row to itself.
        assert_eq!(rects[1], Rect::new(0, 5, 80, 5));
    }

    #[test]
    fn tall_cell_doubles_the_row_height() {
        let area = Rect::new(0, 0, 80, 30);
        let rects = grid_areas(area, &[(GridSpan::One, GridSpan::Two), one(), one()], ROW);
        assert_eq!(rects[0], Rect::new(0, 0, 40, 10));
        assert_eq!(rects[1], Rect::new(40, 0, 40, 5));
        // The next row starts below the taller of the pair.
        assert_eq!(rects[2], Rect::new(0, 10, 40, 5));
    }

    #[test]
    fn rows_past_the_bottom_are_clipped() {
        let area = Rect::new(0, 0, 80, 6);
        let cells = [(GridSpan::Two, GridSpan::One), (GridSpan::Two, GridSpan::One)];
        let rects = grid_areas(area, &cells, ROW);
        assert_eq!(rects[0].height, 5);
        assert_eq!(rects[1].height, 1);
    }

    #[test]
    fn empty_input_yields_no_rects() {
        assert!(grid_areas(Rect::new(0, 0, 80, 20), &[], ROW).is_empty());
    }

    #[test]
    fn odd_widths_give_the_remainder_to_the_right_column() {
        let area = Rect::new(0, 0, 81, 20);
        let rects = grid_areas(area, &[one(), one()], ROW);
        assert_eq!(rects[0].width, 40);
        assert_eq!(rects[1].width, 41);
        assert_eq!(rects[1].x, 40);
    }
}
