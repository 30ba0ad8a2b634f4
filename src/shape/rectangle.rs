use super::*;

/// Axis-aligned rectangle with integer position and extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Axis-aligned rectangle with float position and extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangleF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }
}

impl RectangleF {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }
}

impl Shape for Rectangle {
    fn bbox(&self) -> AABB {
        RectangleF::from(*self).bbox()
    }
}

impl Shape for RectangleF {
    fn bbox(&self) -> AABB {
        AABB::new([self.x, self.y], [self.x + self.w, self.y + self.h])
    }
}

impl From<Rectangle> for RectangleF {
    fn from(r: Rectangle) -> Self {
        RectangleF::new(r.x as f32, r.y as f32, r.w as f32, r.h as f32)
    }
}

impl From<RectangleF> for AABB {
    fn from(r: RectangleF) -> Self {
        r.bbox()
    }
}

impl From<Rectangle> for AABB {
    fn from(r: Rectangle) -> Self {
        r.bbox()
    }
}

impl From<AABB> for RectangleF {
    fn from(aabb: AABB) -> Self {
        aabb.rectangle()
    }
}

// Rectangles own no geometry, every test goes through the equivalent AABB.
macro_rules! intersect_through_bbox {
    ($rect:ty: $($other:ty),*) => {
        $(
            impl Intersect<$other> for $rect {
                fn intersects(&self, shape: &$other) -> bool {
                    self.bbox().intersects(shape)
                }
            }
        )*
    };
}

intersect_through_bbox!(Rectangle: AABB, Vec2, Line, Mesh, Circle, Ellipse, Polygon, Triangle, TriangleF, Rectangle, RectangleF);
intersect_through_bbox!(RectangleF: AABB, Vec2, Line, Mesh, Circle, Ellipse, Polygon, Triangle, TriangleF, Rectangle, RectangleF);
