//! Collision shapes and the pairwise intersection matrix between them.
//!
//! Every shape implements [`Intersect`] for every other shape kind and for bare points.
//! For each pair of kinds one side owns the geometry and the other side forwards to it,
//! so both directions of a test always agree.

use euclid::default::{Vector2D, Vector3D};

mod aabb;
mod circle;
mod ellipse;
mod line;
mod mesh;
mod polygon;
mod rectangle;
mod shape2d;
mod triangle;

pub use aabb::*;
pub use circle::*;
pub use ellipse::*;
pub use line::*;
pub use mesh::*;
pub use polygon::*;
pub use rectangle::*;
pub use shape2d::*;
pub use triangle::*;

/// 2D point or vector with float coordinates.
pub type Vec2 = Vector2D<f32>;
/// 2D point or vector with integer coordinates.
pub type IVec2 = Vector2D<i32>;
/// Used for barycentric coordinates.
pub type Vec3 = Vector3D<f32>;

/// A boolean collision predicate against a shape of kind `T`.
pub trait Intersect<T: ?Sized> {
    fn intersects(&self, shape: &T) -> bool;
}

pub trait Shape {
    fn bbox(&self) -> AABB;
}

/// A shape that answers collision queries against every shape kind and against points.
///
/// It is implemented automatically for anything that implements all the predicates.
pub trait CollisionShape:
    Shape
    + Intersect<AABB>
    + Intersect<Vec2>
    + Intersect<Line>
    + Intersect<Mesh>
    + Intersect<Circle>
    + Intersect<Ellipse>
    + Intersect<Polygon>
    + Intersect<Triangle>
    + Intersect<TriangleF>
    + Intersect<Rectangle>
    + Intersect<RectangleF>
{
}

impl<S> CollisionShape for S where
    S: Shape
        + Intersect<AABB>
        + Intersect<Vec2>
        + Intersect<Line>
        + Intersect<Mesh>
        + Intersect<Circle>
        + Intersect<Ellipse>
        + Intersect<Polygon>
        + Intersect<Triangle>
        + Intersect<TriangleF>
        + Intersect<Rectangle>
        + Intersect<RectangleF>
{
}

impl Shape for Vec2 {
    fn bbox(&self) -> AABB {
        AABB {
            min: *self,
            max: *self,
        }
    }
}

fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
