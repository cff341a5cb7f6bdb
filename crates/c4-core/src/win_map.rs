//! Precomputed winning lines and the lines passing through each cell.
//!
//! A winning line is a window of `connect` consecutive cells in one of four
//! directions. Lines are numbered in enumeration order: horizontals, then
//! verticals, then up-right diagonals, then up-left diagonals. The map is
//! built once per game and shared read-only by every search state.

use tracing::debug;

use crate::dimensions::Dimensions;

/// Endpoints of one winning line, as `(column, row)` pairs.
///
/// `start` is the first cell of the window, which is also the lowest cell
/// in bottom-to-top, left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinLine {
    /// First cell of the line.
    pub start: (usize, usize),
    /// Last cell of the line.
    pub end: (usize, usize),
}

impl WinLine {
    /// Iterate over every cell of the line from `start` to `end`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x0, y0) = (self.start.0 as isize, self.start.1 as isize);
        let (x1, y1) = (self.end.0 as isize, self.end.1 as isize);
        let dx = (x1 - x0).signum();
        let dy = (y1 - y0).signum();
        let len = (x1 - x0).abs().max((y1 - y0).abs()) + 1;
        (0..len).map(move |k| ((x0 + k * dx) as usize, (y0 + k * dy) as usize))
    }

    /// Return `true` if `(x, y)` lies on this line.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells().any(|cell| cell == (x, y))
    }
}

/// Number of winning lines on a `width x height` board with connect length `n`.
pub fn win_line_count(width: usize, height: usize, n: usize) -> usize {
    let (x, y, n) = (width as i64, height as i64, n as i64);
    let count = if x < n && y < n {
        0
    } else if x < n {
        x * (y - n + 1)
    } else if y < n {
        y * (x - n + 1)
    } else {
        4 * x * y - 3 * x * n - 3 * y * n + 3 * x + 3 * y - 4 * n + 2 * n * n + 2
    };
    count as usize
}

/// Per-cell index of the winning lines through that cell.
///
/// Stored in compressed rows: the lines through cell `i` are
/// `entries[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinMap {
    dims: Dimensions,
    lines: Vec<WinLine>,
    offsets: Vec<usize>,
    entries: Vec<u32>,
}

impl WinMap {
    /// Enumerate every winning line for `dims`.
    pub fn build(dims: Dimensions) -> WinMap {
        let (w, h, n) = (dims.width(), dims.height(), dims.connect());
        let mut per_cell: Vec<Vec<u32>> = vec![Vec::with_capacity(4 * n); dims.cell_count()];
        let mut lines = Vec::with_capacity(win_line_count(w, h, n));

        let mut add_line = |origin: (usize, usize), step: (isize, isize)| {
            let index = lines.len() as u32;
            let mut cell = origin;
            for k in 0..n {
                per_cell[dims.index(cell.0, cell.1)].push(index);
                if k + 1 < n {
                    cell = (
                        cell.0.wrapping_add_signed(step.0),
                        cell.1.wrapping_add_signed(step.1),
                    );
                }
            }
            lines.push(WinLine {
                start: origin,
                end: cell,
            });
        };

        if w >= n {
            for y in 0..h {
                for x in 0..=w - n {
                    add_line((x, y), (1, 0));
                }
            }
        }

        if h >= n {
            for x in 0..w {
                for y in 0..=h - n {
                    add_line((x, y), (0, 1));
                }
            }
        }

        if w >= n && h >= n {
            for y in 0..=h - n {
                for x in 0..=w - n {
                    add_line((x, y), (1, 1));
                }
            }
            for y in 0..=h - n {
                for x in (n - 1..w).rev() {
                    add_line((x, y), (-1, 1));
                }
            }
        }

        let mut offsets = Vec::with_capacity(per_cell.len() + 1);
        let mut entries = Vec::with_capacity(per_cell.iter().map(Vec::len).sum());
        offsets.push(0);
        for cell_lines in &per_cell {
            entries.extend_from_slice(cell_lines);
            offsets.push(entries.len());
        }
        debug!(%dims, lines = lines.len(), "built win map");

        WinMap {
            dims,
            lines,
            offsets,
            entries,
        }
    }

    /// The dimensions this map was built for.
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Total number of winning lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Indices of the lines through `(x, y)`, in ascending order.
    #[inline]
    pub fn lines_through(&self, x: usize, y: usize) -> &[u32] {
        let cell = self.dims.index(x, y);
        &self.entries[self.offsets[cell]..self.offsets[cell + 1]]
    }

    /// Endpoints of line `index`.
    #[inline]
    pub fn line(&self, index: usize) -> WinLine {
        self.lines[index]
    }
}

#[cfg(test)]
mod tests {
    use super::{WinLine, WinMap, win_line_count};
    use crate::dimensions::Dimensions;

    fn map(w: usize, h: usize, n: usize) -> WinMap {
        WinMap::build(Dimensions::new(w, h, n).unwrap())
    }

    #[test]
    fn standard_board_has_69_lines() {
        assert_eq!(win_line_count(7, 6, 4), 69);
        assert_eq!(map(7, 6, 4).line_count(), 69);
    }

    #[test]
    fn closed_form_matches_enumeration() {
        for w in 1..=9 {
            for h in 1..=9 {
                for n in 1..=6 {
                    assert_eq!(
                        map(w, h, n).line_count(),
                        win_line_count(w, h, n),
                        "line count mismatch for {w}x{h} connect {n}"
                    );
                }
            }
        }
    }

    #[test]
    fn connect_longer_than_both_sides_has_no_lines() {
        let m = map(3, 3, 4);
        assert_eq!(m.line_count(), 0);
        assert!(m.lines_through(1, 1).is_empty());
    }

    #[test]
    fn narrow_board_only_has_verticals() {
        let m = map(2, 5, 3);
        assert_eq!(m.line_count(), 2 * 3);
        assert_eq!(m.line(0).start, (0, 0));
        assert_eq!(m.line(0).end, (0, 2));
    }

    #[test]
    fn corner_and_center_memberships() {
        let m = map(7, 6, 4);
        // bottom-left corner: one horizontal, one vertical, one diagonal
        assert_eq!(m.lines_through(0, 0).len(), 3);
        // central cells sit on 13 lines
        assert_eq!(m.lines_through(3, 2).len(), 13);
    }

    #[test]
    fn every_listed_line_contains_its_cell() {
        let m = map(6, 5, 3);
        for x in 0..6 {
            for y in 0..5 {
                for &index in m.lines_through(x, y) {
                    assert!(
                        m.line(index as usize).contains(x, y),
                        "line {index} listed for ({x}, {y}) but does not cover it"
                    );
                }
            }
        }
    }

    #[test]
    fn line_numbering_order() {
        let m = map(4, 4, 3);
        // first horizontal
        assert_eq!(m.line(0), WinLine { start: (0, 0), end: (2, 0) });
        // first vertical comes after 8 horizontals
        assert_eq!(m.line(8), WinLine { start: (0, 0), end: (0, 2) });
        // first up-right diagonal after 8 verticals
        assert_eq!(m.line(16), WinLine { start: (0, 0), end: (2, 2) });
        // first up-left diagonal starts at the right edge
        assert_eq!(m.line(20), WinLine { start: (3, 0), end: (1, 2) });
    }

    #[test]
    fn cells_walk_between_endpoints() {
        let line = WinLine { start: (3, 0), end: (0, 3) };
        let cells: Vec<_> = line.cells().collect();
        assert_eq!(cells, vec![(3, 0), (2, 1), (1, 2), (0, 3)]);
    }

    #[test]
    fn connect_one_gives_four_lines_per_cell() {
        let m = map(3, 2, 1);
        assert_eq!(m.line_count(), win_line_count(3, 2, 1));
        assert_eq!(m.lines_through(2, 1).len(), 4);
    }
}
