use crate::shape::{Vec2, AABB};
use fnv::FnvHashMap;

pub type CellIdx = (i32, i32);

/// SparseStorage stores cells in a HashMap to be used in a ShapeGrid.
/// It is Sparse because cells are allocated on first use, and cleaned when they are empty.
#[derive(Clone)]
pub struct SparseStorage<T: Default> {
    cell_size: i32,
    cells: FnvHashMap<CellIdx, T>,
}

impl<T: Default> SparseStorage<T> {
    pub fn new(cell_size: i32) -> Self {
        assert!(
            cell_size > 0,
            "Cell size ({}) cannot be less than or equal to zero",
            cell_size
        );
        Self {
            cell_size,
            cells: Default::default(),
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cells(&self) -> &FnvHashMap<CellIdx, T> {
        &self.cells
    }

    /// Allocates the cell if needed.
    pub fn cell_mut(&mut self, id: CellIdx) -> &mut T {
        self.cells.entry(id).or_default()
    }

    pub fn existing_cell_mut(&mut self, id: CellIdx) -> Option<&mut T> {
        self.cells.get_mut(&id)
    }

    pub fn remove_cell(&mut self, id: CellIdx) -> Option<T> {
        self.cells.remove(&id)
    }

    pub fn cell(&self, id: CellIdx) -> Option<&T> {
        self.cells.get(&id)
    }

    pub fn cell_range(&self, ll: CellIdx, ur: CellIdx) -> XYRange {
        XYRange::new(ll, ur)
    }

    /// Floors, so cells are `[k * cell_size, (k + 1) * cell_size)` on both sides of zero.
    pub fn cell_id(&self, pos: Vec2) -> CellIdx {
        let size = self.cell_size as f32;
        ((pos.x / size).floor() as i32, (pos.y / size).floor() as i32)
    }

    pub fn cell_aabb(&self, (x, y): CellIdx) -> AABB {
        let size = self.cell_size as f32;
        let ll = Vec2::new(x as f32 * size, y as f32 * size);

        AABB::new(ll, ll + Vec2::splat(size))
    }
}

/// Number of cells in the inclusive rectangle of ids, zero when inverted.
pub fn cell_count((x1, y1): CellIdx, (x2, y2): CellIdx) -> u64 {
    let w = (x2 as i64 - x1 as i64 + 1).max(0) as u64;
    let h = (y2 as i64 - y1 as i64 + 1).max(0) as u64;
    w.saturating_mul(h)
}

/// Row-major iterator over the cells of an inclusive rectangle of ids.
pub struct XYRange {
    x1: i64,
    x2: i64,
    y2: i64,
    x: i64,
    y: i64,
}

impl XYRange {
    fn new((x1, y1): CellIdx, (x2, y2): CellIdx) -> Self {
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        Self {
            x1,
            x2,
            // an inverted x range yields nothing
            y2: if x2 < x1 { y1 - 1 } else { y2 },
            x: x1,
            y: y1,
        }
    }
}

impl Iterator for XYRange {
    type Item = CellIdx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y > self.y2 {
            return None;
        }

        let v = (self.x as i32, self.y as i32);
        self.x += 1;
        if self.x > self.x2 {
            self.x = self.x1;
            self.y += 1;
        }

        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_id_floors() {
        let s = SparseStorage::<()>::new(10);

        assert_eq!(s.cell_id(Vec2::new(15.0, 15.0)), (1, 1));
        assert_eq!(s.cell_id(Vec2::new(5.0, 15.0)), (0, 1));
        assert_eq!(s.cell_id(Vec2::new(-5.0, 5.0)), (-1, 0));
        assert_eq!(s.cell_id(Vec2::new(-15.0, -10.0)), (-2, -1));
        assert_eq!(s.cell_id(Vec2::new(10.0, 0.0)), (1, 0));
    }

    #[test]
    fn test_cell_aabb() {
        let s = SparseStorage::<()>::new(10);
        assert_eq!(s.cell_aabb((-1, 2)), AABB::new([-10.0, 20.0], [0.0, 30.0]));
        assert!(s.cell_aabb((3, -4)).contains(Vec2::new(35.0, -35.0)));
    }

    #[test]
    fn test_xy_range() {
        let s = SparseStorage::<()>::new(10);
        assert_eq!(
            s.cell_range((1, 0), (2, 1)).collect::<Vec<_>>(),
            vec![(1, 0), (2, 0), (1, 1), (2, 1)]
        );
        assert_eq!(s.cell_range((3, 3), (3, 3)).count(), 1);
        assert_eq!(s.cell_range((3, 0), (2, 5)).count(), 0);
        assert_eq!(s.cell_range((0, 3), (5, 2)).count(), 0);
        assert_eq!(
            s.cell_range((i32::MAX, 0), (i32::MAX, 1)).collect::<Vec<_>>(),
            vec![(i32::MAX, 0), (i32::MAX, 1)]
        );
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(cell_count((1, 0), (2, 1)), 4);
        assert_eq!(cell_count((3, 3), (3, 3)), 1);
        assert_eq!(cell_count((3, 0), (2, 5)), 0);
        assert_eq!(cell_count((0, 0), (i32::MAX, 0)), 1 << 31);
        assert_eq!(
            cell_count((i32::MIN, i32::MIN), (i32::MAX, i32::MAX)),
            u64::MAX
        );
    }

    #[test]
    fn test_cells_are_lazy() {
        let mut s = SparseStorage::<Vec<u32>>::new(10);
        assert!(s.existing_cell_mut((0, 0)).is_none());
        s.cell_mut((0, 0)).push(1);
        s.cell_mut((1, 0));
        assert_eq!(s.cells().len(), 2);

        assert_eq!(s.remove_cell((1, 0)), Some(vec![]));
        assert_eq!(s.cells().len(), 1);
        assert_eq!(s.cell((0, 0)), Some(&vec![1]));
        assert_eq!(s.cell((1, 0)), None);
    }

    #[test]
    #[should_panic]
    fn test_zero_cell_size() {
        let _s = SparseStorage::<()>::new(0);
    }
}
