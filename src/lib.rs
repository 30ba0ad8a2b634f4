//!
//! nexus_shape2d provides the 2D collision shapes of a game engine: axis-aligned boxes,
//! rectangles, circles, ellipses, segments, polygons, triangles and triangle meshes.
//!
//! Every shape answers a boolean collision query against every other shape kind and against
//! bare points through the [`Intersect`] trait. [`Shape2D`] wraps any of them for scenes that
//! mix kinds at runtime, and [`ShapeGrid`] is a sparse grid broad phase over such shapes.
//!
//! ```
//! use nexus_shape2d::{Circle, Ellipse, Intersect, Polygon, Triangle, Vec2};
//!
//! let square = Polygon::new_rectangle(0.0, 0.0, 10.0, 10.0);
//! assert!((square.area() - 100.0).abs() < 1e-4);
//!
//! assert!(Circle::new([0.0, 0.0], 5.0).intersects(&Circle::new([8.0, 0.0], 4.0)));
//! assert!(Ellipse::new([0.0, 0.0], [4.0, 2.0]).intersects(&Vec2::new(3.0, 0.0)));
//! assert!(Triangle::new([0, 0], [10, 0], [0, 10]).intersects(&Vec2::new(3.0, 3.0)));
//! ```
//!

pub mod cell;
mod error;
pub mod shape;
pub mod shapegrid;
pub mod storage;

pub use error::ShapeError;
pub use shape::*;
pub use shapegrid::{ShapeGrid, ShapeGridHandle};
