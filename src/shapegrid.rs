use crate::cell::ShapeGridCell;
use crate::shape::{Circle, Intersect, Shape, Shape2D, Vec2, AABB};
use crate::storage::{cell_count, CellIdx, SparseStorage};
use fnv::FnvHashSet;
use slotmap::new_key_type;
use slotmap::SlotMap;

/// Shapes overlapping more cells than this are kept but not indexed.
pub const MAX_CELLS_PER_SHAPE: u64 = 1 << 20;

pub type ShapeGridObjects<O> = SlotMap<ShapeGridHandle, StoreObject<O>>;

new_key_type! {
    /// This handle is used to modify the associated object or to update its shape.
    /// It is returned by the _insert_ method of a ShapeGrid.
    pub struct ShapeGridHandle;
}

/// The actual object stored in the store
#[derive(Clone)]
pub struct StoreObject<O> {
    /// User-defined object to be associated with a value
    obj: O,
    pub shape: Shape2D,
}

/// ShapeGrid is a broad phase for [`Shape2D`]s: a sparse grid of cells, each listing the
/// shapes that overlap it.
///
/// Queries visit the cells overlapped by the query's bounding box, then keep the candidates
/// that pass the exact collision test, so the results are the same as testing every shape.
///
/// ## Fast queries
/// It only works well if the cell size is adapted to the problem, about the same magnitude
/// as the shapes and the queries.
///
/// ## Dynamicity
/// Removals and shape updates are eager, for big shapes (spanning many cells) this can be
/// expensive.
///
/// ## Limits
/// A shape whose bounding box is not finite, or spans more than [`MAX_CELLS_PER_SHAPE`]
/// cells, is stored but never returned by queries. Queries bigger than that visit the
/// allocated cells instead of the whole range.
///
/// ## Examples
/// ```rust
/// use nexus_shape2d::{Circle, Polygon, ShapeGrid};
///
/// let mut g: ShapeGrid<&str> = ShapeGrid::new(10);
/// let a = g.insert(Circle::new([2.0, 2.0], 3.0), "ball");
/// let b = g.insert(Polygon::new_rectangle(20.0, 0.0, 5.0, 5.0), "crate");
///
/// let around: Vec<_> = g.query_around([0.0, 0.0], 5.0).map(|(id, _shape, _obj)| id).collect();
/// assert_eq!(around, vec![a]);
///
/// assert_eq!(g.remove(a).map(|(_, obj)| obj), Some("ball"));
/// assert_eq!(g.handles().collect::<Vec<_>>(), vec![b]);
/// assert!(g.get(a).is_none());
/// ```
#[derive(Clone)]
pub struct ShapeGrid<O> {
    storage: SparseStorage<ShapeGridCell>,
    objects: ShapeGridObjects<O>,
}

impl<O> ShapeGrid<O> {
    /// Creates an empty grid.
    /// The cell size should be about the same magnitude as your queries size.
    ///
    /// # Panics
    /// If `cell_size` is not positive.
    pub fn new(cell_size: i32) -> Self {
        Self {
            storage: SparseStorage::new(cell_size),
            objects: SlotMap::with_key(),
        }
    }

    /// Cell range of the shape, `None` if it is not indexed.
    fn indexed_range(
        storage: &SparseStorage<ShapeGridCell>,
        bbox: AABB,
    ) -> Option<(CellIdx, CellIdx)> {
        if !bbox.is_finite() {
            return None;
        }

        let ll = storage.cell_id(bbox.min);
        let ur = storage.cell_id(bbox.max);
        if cell_count(ll, ur) > MAX_CELLS_PER_SHAPE {
            return None;
        }
        Some((ll, ur))
    }

    /// Calls `f` for every cell overlapped by the shape, with whether that is its only cell.
    fn cells_apply(
        storage: &mut SparseStorage<ShapeGridCell>,
        shape: &Shape2D,
        mut f: impl FnMut(&mut SparseStorage<ShapeGridCell>, CellIdx, bool),
    ) {
        let (ll, ur) = match Self::indexed_range(storage, shape.bbox()) {
            Some(range) => range,
            None => return,
        };

        for id in storage.cell_range(ll, ur) {
            if !shape.intersects(&storage.cell_aabb(id)) {
                continue;
            }
            f(storage, id, ll == ur)
        }
    }

    fn attach(
        storage: &mut SparseStorage<ShapeGridCell>,
        handle: ShapeGridHandle,
        shape: &Shape2D,
    ) {
        if Self::indexed_range(storage, shape.bbox()).is_none() {
            log::warn!(
                "{} shape {:?} is unbounded or spans more than {} cells, queries will not find it",
                shape.kind(),
                handle,
                MAX_CELLS_PER_SHAPE
            );
        }
        Self::cells_apply(storage, shape, |storage, id, single_cell| {
            storage.cell_mut(id).push(handle, single_cell)
        });
    }

    fn detach(
        storage: &mut SparseStorage<ShapeGridCell>,
        handle: ShapeGridHandle,
        shape: &Shape2D,
    ) {
        Self::cells_apply(storage, shape, |storage, id, _| {
            let emptied = match storage.existing_cell_mut(id) {
                Some(cell) => cell.remove(handle) && cell.is_empty(),
                None => false,
            };
            if emptied {
                storage.remove_cell(id);
            }
        });
    }

    /// Inserts a new shape with an associated object.
    /// Returns the unique and stable handle to be used with get.
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{Circle, ShapeGrid};
    /// let mut g: ShapeGrid<()> = ShapeGrid::new(10);
    /// let h = g.insert(Circle::new([2.0, 2.0], 3.0), ());
    /// ```
    pub fn insert(&mut self, shape: impl Into<Shape2D>, obj: O) -> ShapeGridHandle {
        let Self { storage, objects } = self;

        let h = objects.insert(StoreObject {
            obj,
            shape: shape.into(),
        });
        let shape = &objects[h].shape;
        Self::attach(storage, h, shape);
        log::trace!("inserted {} shape {:?}", shape.kind(), h);
        h
    }

    /// Replaces the shape of an object. Does nothing if the handle was removed.
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{Circle, Ellipse, ShapeGrid};
    /// let mut g: ShapeGrid<()> = ShapeGrid::new(10);
    /// let h = g.insert(Circle::new([2.0, 2.0], 3.0), ());
    ///
    /// g.set_shape(h, Ellipse::new([61.0, 35.0], [8.0, 2.0]));
    /// ```
    pub fn set_shape(&mut self, handle: ShapeGridHandle, shape: impl Into<Shape2D>) {
        let Self { storage, objects } = self;

        let obj = match objects.get_mut(handle) {
            Some(obj) => obj,
            None => {
                log::debug!("set_shape on {:?} which is not in the grid anymore", handle);
                return;
            }
        };

        Self::detach(storage, handle, &obj.shape);
        obj.shape = shape.into();
        Self::attach(storage, handle, &obj.shape);
        log::trace!("relocated {:?} as a {} shape", handle, obj.shape.kind());
    }

    /// Removes an object from the grid, returning its shape and object.
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{Circle, ShapeGrid};
    /// let mut g: ShapeGrid<()> = ShapeGrid::new(10);
    /// let h = g.insert(Circle::new([2.0, 2.0], 3.0), ());
    /// assert!(g.remove(h).is_some());
    /// assert!(g.remove(h).is_none());
    /// ```
    pub fn remove(&mut self, handle: ShapeGridHandle) -> Option<(Shape2D, O)> {
        let st = self.objects.remove(handle)?;

        Self::detach(&mut self.storage, handle, &st.shape);
        log::trace!("removed {} shape {:?}", st.shape.kind(), handle);
        Some((st.shape, st.obj))
    }

    /// Iterate over all handles
    pub fn handles(&self) -> impl Iterator<Item = ShapeGridHandle> + '_ {
        self.objects.keys()
    }

    /// Iterate over all objects
    pub fn objects(&self) -> impl Iterator<Item = &O> + '_ {
        self.objects.values().map(|x| &x.obj)
    }

    /// Returns a reference to the shape and its associated object, using the handle.
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{Shape2D, ShapeGrid, AABB};
    /// let mut g: ShapeGrid<i32> = ShapeGrid::new(10);
    /// let h = g.insert(AABB::new([5.0, 3.0], [6.0, 4.0]), 42);
    /// assert_eq!(g.get(h), Some((&Shape2D::AABB(AABB::new([5.0, 3.0], [6.0, 4.0])), &42)));
    /// ```
    pub fn get(&self, id: ShapeGridHandle) -> Option<(&Shape2D, &O)> {
        self.objects.get(id).map(|x| (&x.shape, &x.obj))
    }

    /// Returns a mutable reference to the associated object, using the handle.
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{ShapeGrid, AABB};
    /// let mut g: ShapeGrid<i32> = ShapeGrid::new(10);
    /// let h = g.insert(AABB::new([5.0, 3.0], [6.0, 4.0]), 42);
    /// *g.get_mut(h).unwrap().1 = 56;
    /// assert_eq!(g.get(h).unwrap().1, &56);
    /// ```
    pub fn get_mut(&mut self, id: ShapeGridHandle) -> Option<(&Shape2D, &mut O)> {
        self.objects.get_mut(id).map(|x| (&x.shape, &mut x.obj))
    }

    /// The underlying storage
    pub fn storage(&self) -> &SparseStorage<ShapeGridCell> {
        &self.storage
    }

    /// Queries for objects intersecting a given shape.
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{Circle, Line, ShapeGrid};
    ///
    /// let mut g: ShapeGrid<()> = ShapeGrid::new(10);
    /// let a = g.insert(Circle::new([2.0, 2.0], 3.0), ());
    /// let b = g.insert(Line::new([5.0, 2.0], [25.0, 2.0]), ());
    ///
    /// let around: Vec<_> = g
    ///     .query(Circle::new([0.0, 0.0], 10.0))
    ///     .map(|(id, _shape, _obj)| id)
    ///     .collect();
    ///
    /// assert_eq!(vec![a, b], around);
    /// ```
    pub fn query<'a, Q>(
        &'a self,
        shape: Q,
    ) -> impl Iterator<Item = (ShapeGridHandle, &'a Shape2D, &'a O)> + 'a
    where
        Q: Shape + Intersect<AABB> + Intersect<Shape2D> + Clone + 'a,
    {
        self.query_broad(shape.clone())
            .map(move |h| {
                let obj = &self.objects[h];
                (h, &obj.shape, &obj.obj)
            })
            .filter(move |&(_, x, _)| <Q as Intersect<Shape2D>>::intersects(&shape, x))
    }

    /// Queries for objects whose shape contains the point.
    pub fn query_point(
        &self,
        point: impl Into<Vec2>,
    ) -> impl Iterator<Item = (ShapeGridHandle, &Shape2D, &O)> + '_ {
        let point = point.into();
        self.query_broad(AABB::new(point, point))
            .map(move |h| {
                let obj = &self.objects[h];
                (h, &obj.shape, &obj.obj)
            })
            .filter(move |&(_, x, _)| x.contains_point(point))
    }

    /// Queries for objects around a point, same as querying a circle at pos with a given radius.
    pub fn query_around(
        &self,
        pos: impl Into<Vec2>,
        radius: f32,
    ) -> impl Iterator<Item = (ShapeGridHandle, &Shape2D, &O)> + '_ {
        self.query(Circle::new(pos, radius))
    }

    /// Queries for all objects in the cells intersecting the given shape
    ///
    /// # Example
    /// ```rust
    /// use nexus_shape2d::{Circle, ShapeGrid};
    ///
    /// let mut g: ShapeGrid<()> = ShapeGrid::new(10);
    /// let a = g.insert(Circle::new([5.0, 5.0], 1.0), ());
    ///
    /// let around: Vec<_> = g.query_broad(Circle::new([0.0, 0.0], 1.0)).collect();
    ///
    /// assert_eq!(vec![a], around); // a is given even if it doesn't intersect, because this only looks at the cells
    /// ```
    pub fn query_broad<'a, Q>(&'a self, shape: Q) -> impl Iterator<Item = ShapeGridHandle> + 'a
    where
        Q: Shape + Intersect<AABB> + 'a,
    {
        let bbox = shape.bbox();
        let storage = &self.storage;

        let (ll_id, ur_id) = if bbox.is_finite() {
            (storage.cell_id(bbox.min), storage.cell_id(bbox.max))
        } else {
            // inverted range, visits no cell
            ((0, 0), (-1, -1))
        };

        let ids: Box<dyn Iterator<Item = CellIdx> + 'a> =
            if cell_count(ll_id, ur_id) > storage.cells().len() as u64 {
                Box::new(storage.cells().keys().copied().filter(move |&(x, y)| {
                    ll_id.0 <= x && x <= ur_id.0 && ll_id.1 <= y && y <= ur_id.1
                }))
            } else {
                Box::new(storage.cell_range(ll_id, ur_id))
            };

        let iter = ids
            .filter(move |&id| <Q as Intersect<AABB>>::intersects(&shape, &storage.cell_aabb(id)))
            .flat_map(move |id| storage.cell(id))
            .flat_map(|x| x.objs.iter().copied());

        if ll_id == ur_id {
            QueryIter::Simple(iter)
        } else {
            QueryIter::Dedup(FnvHashSet::default(), iter)
        }
    }

    /// Returns the number of objects currently available
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks if the grid contains objects or not
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

enum QueryIter<T: Iterator<Item = (ShapeGridHandle, bool)>> {
    Simple(T),
    Dedup(FnvHashSet<ShapeGridHandle>, T),
}

impl<T: Iterator<Item = (ShapeGridHandle, bool)>> Iterator for QueryIter<T> {
    type Item = ShapeGridHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            QueryIter::Simple(x) => x.next().map(|(x, _)| x),
            QueryIter::Dedup(seen, x) => loop {
                let (v, sing_cell) = x.next()?;
                if sing_cell {
                    return Some(v);
                }
                if seen.insert(v) {
                    return Some(v);
                }
            },
        }
    }
}
