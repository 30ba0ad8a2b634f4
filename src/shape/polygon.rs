use super::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Points closer than this to an edge are inside the polygon.
pub const POLYGON_EDGE_EPSILON: f32 = 1e-4;

/// A simple polygon. The vertex order sets the winding, counter-clockwise gives a positive
/// [`Polygon::signed_area`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

fn check_segments(segments: usize) -> usize {
    if segments < 3 {
        log::warn!("polygon needs at least 3 segments, got {}", segments);
        return 3;
    }
    segments
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Equilateral triangle pointing up, `position` is the top-left of its bounding box.
    pub fn new_triangle_equilateral(position: impl Into<Vec2>, side: f32) -> Self {
        let height = side * 3.0f32.sqrt() * 0.5;
        Self::new_triangle_isosceles(position, Vec2::new(side, height))
    }

    pub fn new_triangle_isosceles(position: impl Into<Vec2>, size: impl Into<Vec2>) -> Self {
        let (p, s) = (position.into(), size.into());
        Self::new(vec![
            Vec2::new(p.x, p.y + s.y),
            Vec2::new(p.x + s.x * 0.5, p.y),
            Vec2::new(p.x + s.x, p.y + s.y),
        ])
    }

    /// Right triangle with the right angle at the bottom-left corner.
    pub fn new_triangle_rectangle(position: impl Into<Vec2>, size: impl Into<Vec2>) -> Self {
        let (p, s) = (position.into(), size.into());
        Self::new(vec![p, p + s, Vec2::new(p.x, p.y + s.y)])
    }

    pub fn new_rectangle(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(vec![
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ])
    }

    pub fn new_ellipse(center: impl Into<Vec2>, radius: impl Into<Vec2>, segments: usize) -> Self {
        let (center, radius) = (center.into(), radius.into());
        let n = check_segments(segments);

        (0..n)
            .map(|i| {
                let (sin, cos) = (TAU * i as f32 / n as f32).sin_cos();
                center + Vec2::new(cos, sin).component_mul(radius)
            })
            .collect()
    }

    pub fn new_circle(center: impl Into<Vec2>, radius: f32, segments: usize) -> Self {
        Self::new_ellipse(center, Vec2::splat(radius), segments)
    }

    /// A ring, closed into a single outline by a zero-width cut along the positive x axis.
    ///
    /// The outer ring is counter-clockwise and the inner ring clockwise, so the area is the
    /// difference of the two.
    pub fn new_donut(
        center: impl Into<Vec2>,
        inner_radius: f32,
        outer_radius: f32,
        segments: usize,
    ) -> Self {
        let center = center.into();
        let n = check_segments(segments);
        let ring = move |radius: f32, i: usize| {
            let (sin, cos) = (TAU * i as f32 / n as f32).sin_cos();
            center + Vec2::new(cos, sin) * radius
        };

        (0..=n)
            .map(|i| ring(outer_radius, i))
            .chain((0..=n).rev().map(|i| ring(inner_radius, i)))
            .collect()
    }

    /// Star-shaped polygon with `count` vertices at random angles around `center`, each at a
    /// random distance between `min_radius` and `max_radius`.
    pub fn new_random<R: Rng>(
        rng: &mut R,
        center: impl Into<Vec2>,
        min_radius: f32,
        max_radius: f32,
        count: usize,
    ) -> Self {
        let center = center.into();
        if !min_radius.is_finite() || !max_radius.is_finite() {
            log::warn!(
                "random polygon radii must be finite, got {}..{}",
                min_radius,
                max_radius
            );
            return Self::default();
        }
        let (lo, hi) = if min_radius <= max_radius {
            (min_radius, max_radius)
        } else {
            (max_radius, min_radius)
        };
        let n = check_segments(count);

        let mut angles: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0..TAU)).collect();
        angles.sort_by(f32::total_cmp);

        angles
            .into_iter()
            .map(|angle| {
                let (sin, cos) = angle.sin_cos();
                center + Vec2::new(cos, sin) * rng.gen_range(lo..=hi)
            })
            .collect()
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex at `index`, wrapping around in both directions.
    pub fn vertex(&self, index: isize) -> Option<Vec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let i = index.rem_euclid(self.vertices.len() as isize) as usize;
        Some(self.vertices[i])
    }

    /// Edge from vertex `index` to the next one, wrapping like [`Polygon::vertex`].
    pub fn edge(&self, index: isize) -> Option<Line> {
        Some(Line::new(self.vertex(index)?, self.vertex(index + 1)?))
    }

    /// Every edge, including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| Line::new(a, b))
    }

    pub fn translate(&mut self, delta: impl Into<Vec2>) {
        let delta = delta.into();
        for v in &mut self.vertices {
            *v += delta;
        }
    }

    /// Moves the polygon so that `from` ends up on `target`.
    pub fn set_position(&mut self, target: impl Into<Vec2>, from: impl Into<Vec2>) {
        self.translate(target.into() - from.into());
    }

    pub fn rotate(&mut self, angle_degrees: f32, origin: impl Into<Vec2>) {
        let origin = origin.into();
        let (sin, cos) = angle_degrees.to_radians().sin_cos();

        for v in &mut self.vertices {
            let d = *v - origin;
            *v = origin + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
        }
    }

    /// Scales about [`Polygon::center`].
    pub fn scale(&mut self, factor: impl Into<Vec2>) {
        let factor = factor.into();
        let center = self.center();

        for v in &mut self.vertices {
            *v = center + (*v - center).component_mul(factor);
        }
    }

    /// Reverses the winding.
    pub fn revert(&mut self) {
        self.vertices.reverse();
    }

    pub fn signed_area(&self) -> f32 {
        0.5 * self.edges().map(|e| e.start.cross(e.end)).sum::<f32>()
    }

    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    pub fn perimeter(&self) -> f32 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Mean of the vertices.
    pub fn center(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return Vec2::zero();
        }
        let sum = self.vertices.iter().fold(Vec2::zero(), |acc, &v| acc + v);
        sum / self.vertices.len() as f32
    }

    /// Center of mass of the enclosed area, [`Polygon::center`] for degenerate polygons.
    pub fn centroid(&self) -> Vec2 {
        let area = self.signed_area();
        if area.abs() <= f32::EPSILON {
            return self.center();
        }

        let sum = self.edges().fold(Vec2::zero(), |acc, e| {
            acc + (e.start + e.end) * e.start.cross(e.end)
        });
        sum / (6.0 * area)
    }

    /// Index and position of the vertex nearest to `point`.
    pub fn closest_vertex(&self, point: impl Into<Vec2>) -> Option<(usize, Vec2)> {
        let point = point.into();
        self.vertices
            .iter()
            .copied()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - point)
                    .square_length()
                    .total_cmp(&(*b - point).square_length())
            })
    }

    pub fn is_convex(&self) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let mut sign = 0.0f32;
        for i in 0..self.vertices.len() as isize {
            let (a, b, c) = match (self.vertex(i), self.vertex(i + 1), self.vertex(i + 2)) {
                (Some(a), Some(b), Some(c)) => (a, b, c),
                _ => return false,
            };
            let turn = (b - a).cross(c - b);
            if turn == 0.0 {
                continue;
            }
            if sign != 0.0 && turn.signum() != sign {
                return false;
            }
            sign = turn.signum();
        }
        sign != 0.0
    }
}

impl FromIterator<Vec2> for Polygon {
    fn from_iter<T: IntoIterator<Item = Vec2>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Shape for Polygon {
    fn bbox(&self) -> AABB {
        self.vertices
            .iter()
            .fold(AABB::empty(), |aabb, &v| aabb.expand(v))
    }
}

/// Even-odd rule, with points on the outline counted as inside.
impl Intersect<Vec2> for Polygon {
    fn intersects(&self, p: &Vec2) -> bool {
        let mut inside = false;
        for Line { start: a, end: b } in self.edges() {
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }

        inside
            || self
                .edges()
                .any(|e| distance(e.closest_point(*p), *p) <= POLYGON_EDGE_EPSILON)
    }
}

impl Intersect<AABB> for Polygon {
    fn intersects(&self, aabb: &AABB) -> bool {
        self.intersects(&aabb.center())
            || self.edges().any(|e| aabb.intersects(&e))
            || self.vertices.first().map_or(false, |&v| aabb.contains(v))
    }
}

impl Intersect<Rectangle> for Polygon {
    fn intersects(&self, rect: &Rectangle) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<RectangleF> for Polygon {
    fn intersects(&self, rect: &RectangleF) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<Circle> for Polygon {
    fn intersects(&self, circle: &Circle) -> bool {
        self.intersects(&circle.center) || self.edges().any(|e| circle.intersects(&e))
    }
}

impl Intersect<Ellipse> for Polygon {
    fn intersects(&self, ellipse: &Ellipse) -> bool {
        self.intersects(&ellipse.center) || self.edges().any(|e| ellipse.intersects(&e))
    }
}

impl Intersect<Line> for Polygon {
    fn intersects(&self, line: &Line) -> bool {
        self.edges().any(|e| e.intersects(line)) || self.intersects(&line.start)
    }
}

impl Intersect<Polygon> for Polygon {
    fn intersects(&self, other: &Polygon) -> bool {
        self.edges()
            .any(|e| other.edges().any(|f| e.intersects(&f)))
            || other.vertices.iter().any(|v| self.intersects(v))
            || self.vertices.iter().any(|v| other.intersects(v))
    }
}

impl Intersect<Triangle> for Polygon {
    fn intersects(&self, triangle: &Triangle) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<TriangleF> for Polygon {
    fn intersects(&self, triangle: &TriangleF) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<Mesh> for Polygon {
    fn intersects(&self, mesh: &Mesh) -> bool {
        mesh.intersects(self)
    }
}
