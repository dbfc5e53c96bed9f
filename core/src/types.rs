use ndarray::Array2;

/// Row or column index. Boards never grow past 255 cells per side.
pub type Coord = u8;

/// Cell totals, wide enough for a full 255×255 board.
pub type CellCount = u16;

/// A `(row, col)` position, also used for board sizes.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a board of `size`.
pub const fn cell_count(size: Coord2) -> CellCount {
    (size.0 as CellCount).saturating_mul(size.1 as CellCount)
}

/// Grid lookups shared by boards and the raw masks used during generation.
pub trait GridExt {
    fn iter_neighbors(&self, center: Coord2) -> Neighbors;
}

impl<T> GridExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> Neighbors {
        let (rows, cols) = self.dim();
        Neighbors::around(center, (rows as Coord, cols as Coord))
    }
}

/// Offsets of the 3×3 block in row-major order. Index 4 is the centre.
const BLOCK: [(i8, i8); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const CENTER: usize = 4;

fn shift((row, col): Coord2, (d_row, d_col): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
    let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
    let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
    Some((row, col))
}

/// In-bounds positions of a 3×3 block, row by row.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    next: usize,
    with_center: bool,
}

impl Neighbors {
    /// The 8-neighbourhood of `center`.
    pub fn around(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
            with_center: false,
        }
    }

    /// The whole 3×3 block, `center` included.
    pub fn block(center: Coord2, bounds: Coord2) -> Self {
        Self {
            with_center: true,
            ..Self::around(center, bounds)
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = BLOCK.get(self.next) {
            let index = self.next;
            self.next += 1;
            if index == CENTER && !self.with_center {
                continue;
            }
            if let Some(pos) = shift(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}

/// The in-bounds 3×3 area around `center`.
pub fn iter_area(center: Coord2, bounds: Coord2) -> Neighbors {
    Neighbors::block(center, bounds)
}
