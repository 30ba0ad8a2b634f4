use super::*;
use std::ops::{Index, IndexMut};

/// Relative tolerance of [`TriangleF`]'s area-sum point test.
pub const TRIANGLE_AREA_EPSILON: f32 = 1e-5;

/// Triangle with integer vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    pub a: IVec2,
    pub b: IVec2,
    pub c: IVec2,
}

/// Triangle with float vertices.
///
/// It owns the triangle algorithms, [`Triangle`] converts to it losslessly for everything
/// except its exact point test.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleF {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: impl Into<IVec2>, b: impl Into<IVec2>, c: impl Into<IVec2>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    pub fn vertices(&self) -> [IVec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Positive for counter-clockwise vertices.
    pub fn signed_area(&self) -> f32 {
        let [a, b, c] = self.vertices().map(|v| (v.x as i64, v.y as i64));
        let cross = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
        cross as f32 * 0.5
    }

    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    pub fn barycentric_coordinates(&self, p: Vec2) -> Vec3 {
        TriangleF::from(*self).barycentric_coordinates(p)
    }

    pub fn edges(&self) -> [Line; 3] {
        TriangleF::from(*self).edges()
    }
}

impl TriangleF {
    pub fn new(a: impl Into<Vec2>, b: impl Into<Vec2>, c: impl Into<Vec2>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    pub fn edges(&self) -> [Line; 3] {
        edges_of(self.vertices())
    }

    /// Positive for counter-clockwise vertices.
    pub fn signed_area(&self) -> f32 {
        0.5 * (self.b - self.a).cross(self.c - self.a)
    }

    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Weights `(u, v, w)` of `a`, `b` and `c` such that `p = u * a + v * b + w * c`.
    pub fn barycentric_coordinates(&self, p: Vec2) -> Vec3 {
        let v0 = self.b - self.a;
        let v1 = self.c - self.a;
        let v2 = p - self.a;

        let d00 = v0.dot(v0);
        let d01 = v0.dot(v1);
        let d11 = v1.dot(v1);
        let d20 = v2.dot(v0);
        let d21 = v2.dot(v1);
        let denom = d00 * d11 - d01 * d01;

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Vec3::new(1.0 - v - w, v, w)
    }
}

impl From<Triangle> for TriangleF {
    fn from(t: Triangle) -> Self {
        TriangleF::new(t.a.to_f32(), t.b.to_f32(), t.c.to_f32())
    }
}

/// Rounds by adding one half and truncating.
impl From<TriangleF> for Triangle {
    fn from(t: TriangleF) -> Self {
        fn round(p: Vec2) -> IVec2 {
            IVec2::new((p.x + 0.5) as i32, (p.y + 0.5) as i32)
        }
        Triangle::new(round(t.a), round(t.b), round(t.c))
    }
}

impl Index<usize> for Triangle {
    type Output = IVec2;

    fn index(&self, i: usize) -> &IVec2 {
        match i {
            0 => &self.a,
            1 => &self.b,
            2 => &self.c,
            _ => panic!("triangle vertex index out of range: {}", i),
        }
    }
}

impl IndexMut<usize> for Triangle {
    fn index_mut(&mut self, i: usize) -> &mut IVec2 {
        match i {
            0 => &mut self.a,
            1 => &mut self.b,
            2 => &mut self.c,
            _ => panic!("triangle vertex index out of range: {}", i),
        }
    }
}

impl Index<usize> for TriangleF {
    type Output = Vec2;

    fn index(&self, i: usize) -> &Vec2 {
        match i {
            0 => &self.a,
            1 => &self.b,
            2 => &self.c,
            _ => panic!("triangle vertex index out of range: {}", i),
        }
    }
}

impl IndexMut<usize> for TriangleF {
    fn index_mut(&mut self, i: usize) -> &mut Vec2 {
        match i {
            0 => &mut self.a,
            1 => &mut self.b,
            2 => &mut self.c,
            _ => panic!("triangle vertex index out of range: {}", i),
        }
    }
}

fn edges_of([a, b, c]: [Vec2; 3]) -> [Line; 3] {
    [Line::new(a, b), Line::new(b, c), Line::new(c, a)]
}

/// Twice the unsigned area, in f64 so that integer vertices give exact results.
fn twice_area(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    ((b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)).abs()
}

/// Either triangle has a vertex inside the other, or two edges cross.
fn triangles_overlap<A, B>(a: &A, a_vertices: [Vec2; 3], b: &B, b_vertices: [Vec2; 3]) -> bool
where
    A: Intersect<Vec2>,
    B: Intersect<Vec2>,
{
    let b_edges = edges_of(b_vertices);

    b_vertices.iter().any(|v| a.intersects(v))
        || a_vertices.iter().any(|v| b.intersects(v))
        || edges_of(a_vertices)
            .iter()
            .any(|e| b_edges.iter().any(|f| e.intersects(f)))
}

impl Shape for Triangle {
    fn bbox(&self) -> AABB {
        TriangleF::from(*self).bbox()
    }
}

impl Shape for TriangleF {
    fn bbox(&self) -> AABB {
        AABB::from_corners(self.a, self.b).expand(self.c)
    }
}

/// Area-sum test with exact equality.
/// Collinear triangles fall back to their edges.
impl Intersect<Vec2> for Triangle {
    fn intersects(&self, p: &Vec2) -> bool {
        if !self.bbox().contains(*p) {
            return false;
        }

        let [a, b, c] = self.vertices().map(|v| (v.x as f64, v.y as f64));
        let total = twice_area(a, b, c);
        if total == 0.0 {
            return TriangleF::from(*self).edges().iter().any(|e| e.intersects(p));
        }

        let q = (p.x as f64, p.y as f64);
        twice_area(q, b, c) + twice_area(a, q, c) + twice_area(a, b, q) == total
    }
}

impl Intersect<Triangle> for Triangle {
    fn intersects(&self, t: &Triangle) -> bool {
        triangles_overlap(
            self,
            TriangleF::from(*self).vertices(),
            t,
            TriangleF::from(*t).vertices(),
        )
    }
}

macro_rules! intersect_as_float {
    ($($other:ty),*) => {
        $(
            impl Intersect<$other> for Triangle {
                fn intersects(&self, shape: &$other) -> bool {
                    TriangleF::from(*self).intersects(shape)
                }
            }
        )*
    };
}

intersect_as_float!(AABB, Line, Mesh, Circle, Ellipse, Polygon, TriangleF, Rectangle, RectangleF);

/// Area-sum test with a relative tolerance of [`TRIANGLE_AREA_EPSILON`].
/// Collinear triangles fall back to their edges.
impl Intersect<Vec2> for TriangleF {
    fn intersects(&self, p: &Vec2) -> bool {
        if !self.bbox().contains(*p) {
            return false;
        }

        let total = self.area();
        if total <= f32::EPSILON {
            return self.edges().iter().any(|e| e.intersects(p));
        }

        let sum = TriangleF::new(*p, self.b, self.c).area()
            + TriangleF::new(self.a, *p, self.c).area()
            + TriangleF::new(self.a, self.b, *p).area();

        (sum - total).abs() <= TRIANGLE_AREA_EPSILON * total
    }
}

impl Intersect<Line> for TriangleF {
    fn intersects(&self, line: &Line) -> bool {
        self.intersects(&line.start)
            || self.intersects(&line.end)
            || self.edges().iter().any(|e| e.intersects(line))
    }
}

impl Intersect<TriangleF> for TriangleF {
    fn intersects(&self, t: &TriangleF) -> bool {
        triangles_overlap(self, self.vertices(), t, t.vertices())
    }
}

impl Intersect<Triangle> for TriangleF {
    fn intersects(&self, t: &Triangle) -> bool {
        self.intersects(&TriangleF::from(*t))
    }
}

impl Intersect<AABB> for TriangleF {
    fn intersects(&self, aabb: &AABB) -> bool {
        if !self.bbox().intersects(aabb) {
            return false;
        }

        self.vertices().iter().any(|v| aabb.contains(*v))
            || aabb.corners().iter().any(|c| self.intersects(c))
            || self
                .edges()
                .iter()
                .any(|e| aabb.edges().any(|side| side.intersects(e)))
    }
}

impl Intersect<Rectangle> for TriangleF {
    fn intersects(&self, rect: &Rectangle) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<RectangleF> for TriangleF {
    fn intersects(&self, rect: &RectangleF) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<Circle> for TriangleF {
    fn intersects(&self, circle: &Circle) -> bool {
        self.intersects(&circle.center) || self.edges().iter().any(|e| circle.intersects(e))
    }
}

impl Intersect<Ellipse> for TriangleF {
    fn intersects(&self, ellipse: &Ellipse) -> bool {
        self.intersects(&ellipse.center) || self.edges().iter().any(|e| ellipse.intersects(e))
    }
}

impl Intersect<Polygon> for TriangleF {
    fn intersects(&self, polygon: &Polygon) -> bool {
        polygon.vertices.iter().any(|v| self.intersects(v))
            || self.vertices().iter().any(|v| polygon.intersects(v))
            || self
                .edges()
                .iter()
                .any(|e| polygon.edges().any(|pe| pe.intersects(e)))
    }
}

impl Intersect<Mesh> for TriangleF {
    fn intersects(&self, mesh: &Mesh) -> bool {
        mesh.intersects(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right() -> Triangle {
        Triangle::new([0, 0], [10, 0], [0, 10])
    }

    #[test]
    fn test_contains_point() {
        let t = right();
        assert!(t.intersects(&Vec2::new(3.0, 3.0)));
        assert!(!t.intersects(&Vec2::new(20.0, 20.0)));
        assert!(t.intersects(&Vec2::new(5.0, 5.0)));
        assert!(!t.intersects(&Vec2::new(5.0, 5.5)));

        let f = TriangleF::from(t);
        assert!(f.intersects(&Vec2::new(3.0, 3.0)));
        assert!(!f.intersects(&Vec2::new(20.0, 20.0)));
        assert!(!f.intersects(&Vec2::new(5.0, 5.5)));
    }

    #[test]
    fn test_vertices_are_inside() {
        let t = right();
        let f = TriangleF::new([0.5, 0.25], [13.1, 2.7], [-4.3, 9.9]);
        for v in t.vertices() {
            assert!(t.intersects(&v.to_f32()));
        }
        for v in f.vertices() {
            assert!(f.intersects(&v));
        }
    }

    #[test]
    fn test_fractional_point_exact() {
        let t = Triangle::new([-3, -2], [7, 1], [2, 9]);
        let f = TriangleF::from(t);
        fastrand::seed(4);
        for _ in 0..2000 {
            let p = Vec2::new(fastrand::f32() * 14.0 - 4.0, fastrand::f32() * 14.0 - 3.0);
            let uvw = f.barycentric_coordinates(p);
            let margin = uvw.x.min(uvw.y).min(uvw.z);
            if margin.abs() < 1e-3 {
                continue;
            }
            assert_eq!(t.intersects(&p), margin > 0.0, "{:?}", p);
            assert_eq!(f.intersects(&p), margin > 0.0, "{:?}", p);
        }
    }

    #[test]
    fn test_signed_area() {
        let t = right();
        assert_eq!(t.signed_area(), 50.0);
        let cw = Triangle::new([0, 0], [0, 10], [10, 0]);
        assert_eq!(cw.signed_area(), -50.0);
        assert_eq!(cw.area(), 50.0);
        assert_eq!(TriangleF::from(cw).signed_area(), -50.0);
    }

    #[test]
    fn test_barycentric() {
        let t = TriangleF::new([0.0, 0.0], [10.0, 0.0], [0.0, 10.0]);
        let uvw = t.barycentric_coordinates(Vec2::new(2.0, 3.0));
        assert!((uvw.x - 0.5).abs() < 1e-6);
        assert!((uvw.y - 0.2).abs() < 1e-6);
        assert!((uvw.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_index() {
        let mut t = TriangleF::new([0.0, 1.0], [2.0, 3.0], [4.0, 5.0]);
        assert_eq!(t[1], Vec2::new(2.0, 3.0));
        t[2] = Vec2::new(-1.0, -1.0);
        assert_eq!(t.c, Vec2::new(-1.0, -1.0));

        let mut i = right();
        i[0] = IVec2::new(1, 1);
        assert_eq!(i.a, IVec2::new(1, 1));
        assert_eq!(i[2], IVec2::new(0, 10));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range() {
        let t = right();
        let _v = t[3];
    }

    #[test]
    fn test_rounding_conversion() {
        let f = TriangleF::new([1.4, 1.5], [-0.7, 2.49], [3.0, -3.0]);
        let t = Triangle::from(f);
        assert_eq!(t.a, IVec2::new(1, 2));
        assert_eq!(t.b, IVec2::new(0, 2));
        // truncation moves negative values towards zero
        assert_eq!(t.c, IVec2::new(3, -2));
    }

    #[test]
    fn test_triangle_triangle() {
        let big = right();
        let inside = Triangle::new([1, 1], [2, 1], [1, 2]);
        assert!(big.intersects(&inside));
        assert!(inside.intersects(&big));

        // only the edges cross, no vertex inside the other
        let a = TriangleF::new([0.0, 0.0], [6.0, 0.0], [3.0, 6.0]);
        let b = TriangleF::new([0.0, 4.0], [6.0, 4.0], [3.0, -2.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let far = Triangle::new([20, 20], [30, 20], [20, 30]);
        assert!(!big.intersects(&far));
        assert!(!far.intersects(&big));
        assert!(!TriangleF::from(far).intersects(&big));
        assert_eq!(big.intersects(&TriangleF::from(far)), TriangleF::from(far).intersects(&big));
    }

    #[test]
    fn test_triangle_aabb_is_exact() {
        let t = right();
        // bounding boxes overlap but the box is past the hypotenuse
        let beyond = AABB::new([7.0, 7.0], [9.0, 9.0]);
        assert!(t.bbox().intersects(&beyond));
        assert!(!t.intersects(&beyond));
        assert!(!beyond.intersects(&t));

        let across = AABB::new([4.0, 4.0], [9.0, 9.0]);
        assert!(t.intersects(&across));
        // box inside the triangle
        assert!(t.intersects(&AABB::new([1.0, 1.0], [2.0, 2.0])));
        // triangle inside the box
        assert!(t.intersects(&AABB::new([-1.0, -1.0], [20.0, 20.0])));
        assert!(t.intersects(&Rectangle::new(-1, -1, 2, 2)));
    }

    #[test]
    fn test_triangle_line() {
        let t = TriangleF::new([0.0, 0.0], [10.0, 0.0], [0.0, 10.0]);
        assert!(t.intersects(&Line::new([-5.0, 2.0], [15.0, 2.0])));
        assert!(t.intersects(&Line::new([1.0, 1.0], [2.0, 2.0])));
        assert!(!t.intersects(&Line::new([6.0, 6.0], [12.0, 2.0])));
        assert_eq!(
            Line::new([1.0, 1.0], [2.0, 2.0]).intersects(&right()),
            right().intersects(&Line::new([1.0, 1.0], [2.0, 2.0]))
        );
    }

    #[test]
    fn test_triangle_circle_and_ellipse() {
        let t = right();
        assert!(t.intersects(&Circle::new([2.0, 2.0], 0.5)));
        assert!(t.intersects(&Circle::new([-1.0, 5.0], 1.5)));
        assert!(!t.intersects(&Circle::new([8.0, 8.0], 2.0)));
        assert!(t.intersects(&Circle::new([8.0, 8.0], 5.0)));
        assert!(t.intersects(&Ellipse::new([-3.0, 5.0], [3.5, 1.0])));
        assert!(!t.intersects(&Ellipse::new([-3.0, 5.0], [2.5, 1.0])));
    }

    #[test]
    fn test_triangle_polygon() {
        let t = right();
        let square = Polygon::new_rectangle(-1.0, -1.0, 2.0, 2.0);
        assert!(t.intersects(&square));
        assert!(square.intersects(&t));

        let around = Polygon::new_rectangle(-5.0, -5.0, 30.0, 30.0);
        assert!(t.intersects(&around));
        assert!(around.intersects(&t));

        let away = Polygon::new_rectangle(8.0, 8.0, 5.0, 5.0);
        assert!(!t.intersects(&away));
        assert!(!away.intersects(&t));
    }

    #[test]
    fn test_collinear_triangle() {
        let t = Triangle::new([0, 0], [1, 1], [2, 2]);
        let tf = TriangleF::from(t);

        assert!(t.intersects(&Vec2::new(1.0, 1.0)));
        assert!(tf.intersects(&Vec2::new(0.5, 0.5)));
        assert!(!t.intersects(&Vec2::new(2.0, 0.0)));
        assert!(!tf.intersects(&Vec2::new(2.0, 0.0)));

        let far = Vec2::new(10.0, 10.0);
        assert!(!t.intersects(&far));
        assert!(!tf.intersects(&far));

        let square = Polygon::new_rectangle(10.0, 10.0, 1.0, 1.0);
        assert!(!t.bbox().intersects(&square.bbox()));
        assert!(!t.intersects(&square));
        assert!(!tf.intersects(&square));

        let circle = Circle::new([10.0, 10.0], 0.1);
        assert!(!t.intersects(&circle));
        assert!(!tf.intersects(&circle));
        assert!(t.intersects(&Circle::new([1.0, 1.0], 0.1)));

        let mesh: Mesh = std::iter::once(tf).collect();
        assert!(!mesh.intersects(&circle));
        assert!(!t.intersects(&Triangle::new([9, 9], [12, 9], [9, 12])));
    }
}
