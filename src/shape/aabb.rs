use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    /// Lower corner of the AABB
    pub min: Vec2,
    /// Upper corner of the AABB
    pub max: Vec2,
}

impl AABB {
    /// Corners are taken as given, use [`AABB::from_corners`] when their order is unknown.
    pub fn new(min: impl Into<Vec2>, max: impl Into<Vec2>) -> Self {
        AABB {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn from_corners(p1: impl Into<Vec2>, p2: impl Into<Vec2>) -> Self {
        let (p1, p2) = (p1.into(), p2.into());
        AABB {
            min: p1.min(p2),
            max: p1.max(p2),
        }
    }

    /// An inverted box that intersects nothing, the identity for [`AABB::expand`].
    pub fn empty() -> Self {
        AABB {
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
        }
    }

    /// Grows the box so that it contains `p`.
    pub fn expand(self, p: Vec2) -> Self {
        AABB {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn is_finite(&self) -> bool {
        self.min.x.is_finite()
            && self.min.y.is_finite()
            && self.max.x.is_finite()
            && self.max.y.is_finite()
    }

    pub fn rectangle(&self) -> RectangleF {
        RectangleF::new(
            self.min.x,
            self.min.y,
            self.max.x - self.min.x,
            self.max.y - self.min.y,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    /// Closest point of the box to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.max(self.min).min(self.max)
    }

    /// Corners in counter-clockwise order, starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    pub fn edges(&self) -> impl Iterator<Item = Line> {
        let [ll, lr, ur, ul] = self.corners();

        std::iter::once(Line::new(ll, lr))
            .chain(std::iter::once(Line::new(lr, ur)))
            .chain(std::iter::once(Line::new(ur, ul)))
            .chain(std::iter::once(Line::new(ul, ll)))
    }
}

impl Shape for AABB {
    fn bbox(&self) -> AABB {
        *self
    }
}

impl Intersect<AABB> for AABB {
    fn intersects(&self, b: &AABB) -> bool {
        let a = self;
        let x = a.max.x >= b.min.x && a.min.x <= b.max.x;
        let y = a.max.y >= b.min.y && a.min.y <= b.max.y;

        x && y
    }
}

impl Intersect<Vec2> for AABB {
    fn intersects(&self, p: &Vec2) -> bool {
        self.contains(*p)
    }
}

impl Intersect<Line> for AABB {
    fn intersects(&self, line: &Line) -> bool {
        self.contains(line.start)
            || self.contains(line.end)
            || self.edges().any(|edge| edge.intersects(line))
    }
}

impl Intersect<Circle> for AABB {
    fn intersects(&self, circle: &Circle) -> bool {
        let closest = self.closest_point(circle.center);
        (closest - circle.center).square_length() <= circle.radius * circle.radius
    }
}

impl Intersect<Rectangle> for AABB {
    fn intersects(&self, rect: &Rectangle) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<RectangleF> for AABB {
    fn intersects(&self, rect: &RectangleF) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<Ellipse> for AABB {
    fn intersects(&self, ellipse: &Ellipse) -> bool {
        ellipse.intersects(self)
    }
}

impl Intersect<Polygon> for AABB {
    fn intersects(&self, polygon: &Polygon) -> bool {
        polygon.intersects(self)
    }
}

impl Intersect<Triangle> for AABB {
    fn intersects(&self, triangle: &Triangle) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<TriangleF> for AABB {
    fn intersects(&self, triangle: &TriangleF) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<Mesh> for AABB {
    fn intersects(&self, mesh: &Mesh) -> bool {
        mesh.intersects(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        AABB::new([0.0, 0.0], [10.0, 10.0])
    }

    #[test]
    fn test_contains_point() {
        let b = unit_box();
        assert!(b.intersects(&Vec2::new(5.0, 5.0)));
        assert!(!b.intersects(&Vec2::new(11.0, 5.0)));
        // closed intervals
        assert!(b.intersects(&Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_from_corners_orders() {
        let b = AABB::from_corners([10.0, -1.0], [2.0, 5.0]);
        assert_eq!(b, AABB::new([2.0, -1.0], [10.0, 5.0]));
    }

    #[test]
    fn test_aabb_touching_edges_collide() {
        let a = unit_box();
        let b = AABB::new([10.0, 3.0], [20.0, 4.0]);
        let c = AABB::new([10.1, 3.0], [20.0, 4.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rectangle() {
        let r = AABB::new([1.0, 2.0], [4.0, 8.0]).rectangle();
        assert_eq!(r, RectangleF::new(1.0, 2.0, 3.0, 6.0));
    }

    #[test]
    fn test_line_inside_box() {
        let b = unit_box();
        assert!(b.intersects(&Line::new([2.0, 2.0], [3.0, 3.0])));
        assert!(b.intersects(&Line::new([-5.0, 5.0], [15.0, 5.0])));
        assert!(!b.intersects(&Line::new([-5.0, 11.0], [15.0, 11.0])));
    }

    #[test]
    fn test_circle_closest_point() {
        let b = unit_box();
        assert!(b.intersects(&Circle::new([13.0, 5.0], 3.0)));
        assert!(!b.intersects(&Circle::new([13.0, 5.0], 2.9)));
        // near a corner the distance is diagonal
        assert!(!b.intersects(&Circle::new([12.0, 12.0], 2.5)));
        assert!(b.intersects(&Circle::new([12.0, 12.0], 3.0)));
        assert!(b.intersects(&Circle::new([5.0, 5.0], 1.0)));
    }

    #[test]
    fn test_empty_intersects_nothing() {
        let e = AABB::empty();
        assert!(!e.intersects(&unit_box()));
        assert!(!e.intersects(&Vec2::zero()));
        assert_eq!(e.expand(Vec2::new(1.0, 2.0)), AABB::new([1.0, 2.0], [1.0, 2.0]));
    }

    #[test]
    fn test_edges_form_a_loop() {
        let edges: Vec<_> = unit_box().edges().collect();
        assert_eq!(edges.len(), 4);
        for i in 0..4 {
            assert_eq!(edges[i].end, edges[(i + 1) % 4].start);
        }
    }
}
