//! Center-outward column order used for play and for move ordering in search.

/// Columns ordered from the center outwards.
///
/// For 7 columns this is `3, 4, 2, 5, 1, 6, 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOrder {
    columns: Vec<usize>,
}

impl DropOrder {
    /// Build the order for a board `width` columns wide.
    pub fn new(width: usize) -> DropOrder {
        let mut columns = Vec::with_capacity(width);
        let mut column = (width as isize - 1) / 2;
        for i in 1..=width as isize {
            columns.push(column as usize);
            column += if i % 2 == 1 { i } else { -i };
        }
        DropOrder { columns }
    }

    /// The columns in visiting order.
    #[inline]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Iterate over the columns in visiting order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }
}
