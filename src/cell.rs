use crate::shapegrid::ShapeGridHandle;

/// A handle and whether its shape fits in this single cell.
pub type CellObject = (ShapeGridHandle, bool);

/// A single cell of the grid, can be empty
#[derive(Default, Clone)]
pub struct ShapeGridCell {
    pub objs: Vec<CellObject>,
}

impl ShapeGridCell {
    pub fn push(&mut self, handle: ShapeGridHandle, single_cell: bool) {
        self.objs.push((handle, single_cell));
    }

    /// Returns false if the handle was not in this cell.
    pub fn remove(&mut self, handle: ShapeGridHandle) -> bool {
        match self.objs.iter().position(|(x, _)| *x == handle) {
            Some(p) => {
                self.objs.swap_remove(p);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }
}
