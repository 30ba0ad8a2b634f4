use super::*;

/// Slack allowed on the distance sum of the point-on-segment test.
pub const LINE_POINT_TOLERANCE: f32 = 0.1;

/// A line segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line {
    pub fn new(start: impl Into<Vec2>, end: impl Into<Vec2>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Projects `p` on the segment, clamped to its endpoints.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let diff = self.end - self.start;

        let proj1 = (p - self.start).dot(diff);
        let proj2 = -(p - self.end).dot(diff);

        if proj1 <= 0.0 {
            self.start
        } else if proj2 <= 0.0 {
            self.end
        } else {
            self.start + diff * (proj1 / diff.square_length())
        }
    }
}

impl Shape for Line {
    fn bbox(&self) -> AABB {
        AABB::from_corners(self.start, self.end)
    }
}

impl Intersect<Vec2> for Line {
    fn intersects(&self, p: &Vec2) -> bool {
        let d = distance(*p, self.start) + distance(*p, self.end);
        (d - self.length()).abs() <= LINE_POINT_TOLERANCE
    }
}

/// Parallel segments never intersect, even when collinear and overlapping.
impl Intersect<Line> for Line {
    fn intersects(&self, s: &Line) -> bool {
        let r = self.direction();
        let q = s.direction();

        let denom = r.cross(q);
        if denom == 0.0 {
            return false;
        }

        let diff = s.start - self.start;
        let t = diff.cross(q) / denom;
        let u = diff.cross(r) / denom;

        (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
    }
}

impl Intersect<AABB> for Line {
    fn intersects(&self, aabb: &AABB) -> bool {
        aabb.intersects(self)
    }
}

impl Intersect<Rectangle> for Line {
    fn intersects(&self, rect: &Rectangle) -> bool {
        rect.intersects(self)
    }
}

impl Intersect<RectangleF> for Line {
    fn intersects(&self, rect: &RectangleF) -> bool {
        rect.intersects(self)
    }
}

impl Intersect<Circle> for Line {
    fn intersects(&self, c: &Circle) -> bool {
        c.intersects(self)
    }
}

impl Intersect<Ellipse> for Line {
    fn intersects(&self, e: &Ellipse) -> bool {
        e.intersects(self)
    }
}

impl Intersect<Polygon> for Line {
    fn intersects(&self, polygon: &Polygon) -> bool {
        polygon.intersects(self)
    }
}

impl Intersect<Triangle> for Line {
    fn intersects(&self, triangle: &Triangle) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<TriangleF> for Line {
    fn intersects(&self, triangle: &TriangleF) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<Mesh> for Line {
    fn intersects(&self, mesh: &Mesh) -> bool {
        mesh.intersects(self)
    }
}
