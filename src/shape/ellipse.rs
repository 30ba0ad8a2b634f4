use super::*;
use std::sync::OnceLock;

/// Refinement levels spent on ellipse/ellipse and ellipse/circle tests before giving up.
pub const ELLIPSE_MAX_ITERATIONS: usize = 4;

/// Axis-aligned ellipse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    pub center: Vec2,
    /// Horizontal and vertical radii
    pub radius: Vec2,
}

impl Ellipse {
    pub fn new(center: impl Into<Vec2>, radius: impl Into<Vec2>) -> Self {
        Self {
            center: center.into(),
            radius: radius.into(),
        }
    }

    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius.x * self.radius.y
    }

    /// Ramanujan's approximation.
    pub fn perimeter(&self) -> f32 {
        let (a, b) = (self.radius.x, self.radius.y);
        std::f32::consts::PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
    }
}

impl Shape for Ellipse {
    fn bbox(&self) -> AABB {
        AABB {
            min: self.center - self.radius,
            max: self.center + self.radius,
        }
    }
}

impl Intersect<Vec2> for Ellipse {
    fn intersects(&self, p: &Vec2) -> bool {
        (*p - self.center).component_div(self.radius).length() <= 1.0
    }
}

/// Solid test: a segment lying entirely inside the ellipse collides.
impl Intersect<Line> for Ellipse {
    fn intersects(&self, line: &Line) -> bool {
        if line.direction().square_length() == 0.0 {
            return self.intersects(&line.start);
        }

        // Work in the space where the ellipse is the unit circle.
        let d = line.direction().component_div(self.radius);
        let f = (line.start - self.center).component_div(self.radius);

        let a = d.dot(d);
        let b = 2.0 * f.dot(d);
        let c = f.dot(f) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant.is_nan() || discriminant < 0.0 {
            return false;
        }

        let root = discriminant.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);

        t1 <= 1.0 && t2 >= 0.0
    }
}

impl Intersect<Ellipse> for Ellipse {
    fn intersects(&self, e: &Ellipse) -> bool {
        RefinementTable::get().ellipse_ellipse(self, e)
    }
}

impl Intersect<Circle> for Ellipse {
    fn intersects(&self, c: &Circle) -> bool {
        RefinementTable::get().ellipse_circle(self, c)
    }
}

impl Intersect<AABB> for Ellipse {
    fn intersects(&self, aabb: &AABB) -> bool {
        self.intersects(&aabb.closest_point(self.center))
    }
}

impl Intersect<Rectangle> for Ellipse {
    fn intersects(&self, rect: &Rectangle) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<RectangleF> for Ellipse {
    fn intersects(&self, rect: &RectangleF) -> bool {
        self.intersects(&rect.bbox())
    }
}

impl Intersect<Polygon> for Ellipse {
    fn intersects(&self, polygon: &Polygon) -> bool {
        polygon.intersects(self)
    }
}

impl Intersect<Triangle> for Ellipse {
    fn intersects(&self, triangle: &Triangle) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<TriangleF> for Ellipse {
    fn intersects(&self, triangle: &TriangleF) -> bool {
        triangle.intersects(self)
    }
}

impl Intersect<Mesh> for Ellipse {
    fn intersects(&self, mesh: &Mesh) -> bool {
        mesh.intersects(self)
    }
}

/// Coefficients of the polygons bounding a quarter ellipse from the inside and the outside.
///
/// At level `t` the ellipse is approximated with `4 << t` vertices. The midpoint of an arc
/// on the ellipse is `(c0 + c2) * inner[t]` and the corner of the outer polygon between two
/// neighbouring vertices is `(c0 + c1) * outer[t]`. Both stay exact under the axis scaling
/// that maps the ellipse to a circle, which is what lets the test work on ellipses directly.
struct RefinementTable {
    inner: [f32; ELLIPSE_MAX_ITERATIONS + 1],
    outer: [f32; ELLIPSE_MAX_ITERATIONS + 1],
}

static REFINEMENT_TABLE: OnceLock<RefinementTable> = OnceLock::new();

impl RefinementTable {
    fn get() -> &'static Self {
        REFINEMENT_TABLE.get_or_init(Self::new)
    }

    fn new() -> Self {
        let mut inner = [0.0; ELLIPSE_MAX_ITERATIONS + 1];
        let mut outer = [0.0; ELLIPSE_MAX_ITERATIONS + 1];

        for (t, (inner, outer)) in inner.iter_mut().zip(outer.iter_mut()).enumerate() {
            let nodes = (4u32 << t) as f32;
            *inner = 0.5 / (std::f32::consts::TAU / nodes).cos();
            let half = (std::f32::consts::PI / nodes).cos();
            *outer = 0.5 / (half * half);
        }

        Self { inner, outer }
    }

    fn ellipse_ellipse(&self, a: &Ellipse, b: &Ellipse) -> bool {
        // Scale the axes so that `b` becomes a circle.
        let (w1, h1) = (b.radius.x, b.radius.y);
        let x = (b.center.x - a.center.x).abs() * h1;
        let y = (b.center.y - a.center.y).abs() * w1;
        let w = a.radius.x * h1;
        let h = a.radius.y * w1;

        self.collide(x, y, w, h, w1 * h1)
    }

    fn ellipse_circle(&self, e: &Ellipse, c: &Circle) -> bool {
        let x = (c.center.x - e.center.x).abs();
        let y = (c.center.y - e.center.y).abs();

        self.collide(x, y, e.radius.x, e.radius.y, c.radius)
    }

    /// Circle of radius `r` centered at `(x, y)` (first quadrant) against the axis-aligned
    /// ellipse of radii `(w, h)` centered at the origin.
    fn collide(&self, x: f32, y: f32, w: f32, h: f32, r: f32) -> bool {
        let rr = r * r;

        // Rhombus with vertices on the axes, inside the ellipse.
        let edge = x * h + y * w - w * h;
        let along = x * w - y * h;
        if x * x + (h - y) * (h - y) <= rr
            || (w - x) * (w - x) + y * y <= rr
            || edge <= 0.0
            || (edge * edge <= rr * (w * w + h * h) && along >= -h * h && along <= w * w)
        {
            return true;
        }

        // Can the circle reach the quarter's bounding box at all?
        if (x - w) * (x - w) + (y - h) * (y - h) <= rr
            || (x <= w && y - r <= h)
            || (y <= h && x - r <= w)
        {
            return self.iterate(x, y, Vec2::new(w, 0.0), Vec2::new(0.0, h), rr);
        }

        false
    }

    /// Bisects the arc `c0..c2` until the circle is known to overlap the inner polygon, or
    /// to stay outside the outer polygon. Running out of levels counts as a miss.
    fn iterate(&self, x: f32, y: f32, mut c0: Vec2, mut c2: Vec2, rr: f32) -> bool {
        let p = Vec2::new(x, y);

        for t in 1..=ELLIPSE_MAX_ITERATIONS {
            let c1 = (c0 + c2) * self.inner[t];
            let tp = p - c1;
            if tp.square_length() <= rr {
                return true;
            }

            // Inner edge c1 -> c2, the inside is on the left.
            let t2 = c2 - c1;
            let along = tp.dot(t2);
            let side = t2.cross(tp);
            if along >= 0.0
                && along <= t2.square_length()
                && (side >= 0.0 || rr * t2.square_length() >= side * side)
            {
                return true;
            }

            // Inner edge c1 -> c0, the inside is on the right.
            let t0 = c0 - c1;
            let along = tp.dot(t0);
            let side = t0.cross(tp);
            if along >= 0.0
                && along <= t0.square_length()
                && (side <= 0.0 || rr * t0.square_length() >= side * side)
            {
                return true;
            }

            // Outer polygon corners on both sides of c1.
            let c3 = (c0 + c1) * self.outer[t];
            if (c3 - p).square_length() < rr {
                c2 = c1;
                continue;
            }
            let c4 = c1 - c3 + c1;
            if (c4 - p).square_length() < rr {
                c0 = c1;
                continue;
            }

            // Tangent at c1.
            let t3 = c3 - c1;
            let along = tp.dot(t3);
            let side = t3.cross(tp);
            if side <= 0.0 || rr * t3.square_length() > side * side {
                if along > 0.0 {
                    if along.abs() <= t3.square_length() || (p - c3).dot(c0 - c3) >= 0.0 {
                        c2 = c1;
                        continue;
                    }
                } else if -along <= t3.square_length() || (p - c4).dot(c2 - c4) >= 0.0 {
                    c0 = c1;
                    continue;
                }
            }

            return false;
        }

        false
    }
}
