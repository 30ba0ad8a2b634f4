use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: impl Into<Vec2>, radius: f32) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    pub fn perimeter(&self) -> f32 {
        std::f32::consts::TAU * self.radius
    }
}

impl Shape for Circle {
    fn bbox(&self) -> AABB {
        AABB {
            min: self.center - Vec2::splat(self.radius),
            max: self.center + Vec2::splat(self.radius),
        }
    }
}

impl Intersect<Vec2> for Circle {
    fn intersects(&self, p: &Vec2) -> bool {
        distance(*p, self.center) <= self.radius
    }
}

impl Intersect<Line> for Circle {
    fn intersects(&self, line: &Line) -> bool {
        let closest = line.closest_point(self.center);
        distance(closest, self.center) <= self.radius
    }
}

/// Tangent circles do not collide.
impl Intersect<Circle> for Circle {
    fn intersects(&self, c: &Circle) -> bool {
        let v = self.center - c.center;

        v.square_length() < (self.radius + c.radius).powi(2)
    }
}

impl Intersect<AABB> for Circle {
    fn intersects(&self, aabb: &AABB) -> bool {
        aabb.intersects(self)
    }
}

impl Intersect<Rectangle> for Circle {
    fn intersects(&self, rect: &Rectangle) -> bool {
        rect.intersects(self)
    }
}

impl Intersect<RectangleF> for Circle {
    fn intersects(&self, rect: &RectangleF) -> bool {
        rect.intersects(self)
    }
}

impl Intersect<Ellipse> for Circle {
    fn intersects(&self, e: &Ellipse) -> bool {
        e.intersects(self)
    }
}

impl Intersect<Polygon> for Circle {
    fn intersects(&self, polygon: &Polygon) -> bool {
        polygon.intersects(self)
    }
}

impl Intersect<Triangle> for Circle {
    fn intersects(&self, triangle: &Triangle) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<TriangleF> for Circle {
    fn intersects(&self, triangle: &TriangleF) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<Mesh> for Circle {
    fn intersects(&self, mesh: &Mesh) -> bool {
        mesh.intersects(self)
    }
}
