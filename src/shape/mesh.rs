use super::*;
use crate::ShapeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// A mesh vertex. Only the position takes part in collisions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub position: Vec2,
    pub color: Color,
    pub texcoord: Vec2,
}

impl Vertex {
    pub fn new(position: impl Into<Vec2>) -> Self {
        Self {
            position: position.into(),
            ..Default::default()
        }
    }
}

impl From<Vec2> for Vertex {
    fn from(position: Vec2) -> Self {
        Vertex::new(position)
    }
}

/// A triangle list: every three consecutive vertices form a triangle.
///
/// The indices are kept for rendering, collisions ignore them. A trailing incomplete
/// triangle is skipped.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Builds a mesh from a complete triangle list, with sequential indices.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Result<Self, ShapeError> {
        if vertices.len() % 3 != 0 {
            return Err(ShapeError::IncompleteTriangle {
                len: vertices.len(),
            });
        }
        let indices = (0..vertices.len() as u32).collect();
        Ok(Self::new(vertices, indices))
    }

    pub fn triangles(&self) -> impl Iterator<Item = TriangleF> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|t| TriangleF::new(t[0].position, t[1].position, t[2].position))
    }
}

impl FromIterator<TriangleF> for Mesh {
    fn from_iter<T: IntoIterator<Item = TriangleF>>(iter: T) -> Self {
        let vertices: Vec<Vertex> = iter
            .into_iter()
            .flat_map(|t| t.vertices())
            .map(Vertex::from)
            .collect();
        let indices = (0..vertices.len() as u32).collect();
        Self::new(vertices, indices)
    }
}

impl Shape for Mesh {
    fn bbox(&self) -> AABB {
        self.triangles()
            .flat_map(|t| t.vertices())
            .fold(AABB::empty(), |aabb, v| aabb.expand(v))
    }
}

macro_rules! intersect_any_triangle {
    ($($other:ty),*) => {
        $(
            impl Intersect<$other> for Mesh {
                fn intersects(&self, shape: &$other) -> bool {
                    self.triangles().any(|t| t.intersects(shape))
                }
            }
        )*
    };
}

intersect_any_triangle!(AABB, Vec2, Line, Mesh, Circle, Ellipse, Polygon, Triangle, TriangleF, Rectangle, RectangleF);
