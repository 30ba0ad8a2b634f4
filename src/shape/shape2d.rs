use super::*;
use crate::ShapeError;
use std::fmt;

macro_rules! shape_kinds {
    ($($kind:ident),*) => {
        /// Tag of a [`Shape2D`] variant.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum ShapeKind {
            $($kind),*
        }

        /// Any collision shape, for scenes that mix kinds at runtime.
        ///
        /// Both operands of [`Intersect<Shape2D>`] are resolved with a `match`, then the
        /// concrete predicate runs, so the answer is the same as with the unwrapped shapes.
        ///
        /// ```
        /// use nexus_shape2d::{Circle, Intersect, Polygon, Shape2D};
        ///
        /// let a = Shape2D::from(Circle::new([0.0, 0.0], 5.0));
        /// let b = Shape2D::from(Polygon::new_rectangle(4.0, -1.0, 2.0, 2.0));
        /// assert!(a.intersects(&b));
        /// assert!(b.intersects(&a));
        /// ```
        #[derive(Clone, Debug, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Shape2D {
            $($kind($kind)),*
        }

        impl Shape2D {
            pub fn kind(&self) -> ShapeKind {
                match self {
                    $(Shape2D::$kind(_) => ShapeKind::$kind),*
                }
            }
        }

        impl Shape for Shape2D {
            fn bbox(&self) -> AABB {
                match self {
                    $(Shape2D::$kind(s) => s.bbox()),*
                }
            }
        }

        impl<T: ?Sized> Intersect<T> for Shape2D
        where
            $($kind: Intersect<T>),*
        {
            fn intersects(&self, shape: &T) -> bool {
                match self {
                    $(Shape2D::$kind(s) => <$kind as Intersect<T>>::intersects(s, shape)),*
                }
            }
        }

        fn intersects_with<S: CollisionShape>(s: &S, other: &Shape2D) -> bool {
            match other {
                $(Shape2D::$kind(o) => <S as Intersect<$kind>>::intersects(s, o)),*
            }
        }

        $(
            impl Intersect<Shape2D> for $kind {
                fn intersects(&self, shape: &Shape2D) -> bool {
                    intersects_with(self, shape)
                }
            }

            impl From<$kind> for Shape2D {
                fn from(s: $kind) -> Self {
                    Shape2D::$kind(s)
                }
            }

            impl TryFrom<Shape2D> for $kind {
                type Error = ShapeError;

                fn try_from(shape: Shape2D) -> Result<Self, ShapeError> {
                    match shape {
                        Shape2D::$kind(s) => Ok(s),
                        other => Err(ShapeError::KindMismatch {
                            expected: ShapeKind::$kind,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

shape_kinds!(AABB, Rectangle, RectangleF, Circle, Ellipse, Line, Triangle, TriangleF, Polygon, Mesh);

impl Shape2D {
    pub fn contains_point(&self, p: impl Into<Vec2>) -> bool {
        let p: Vec2 = p.into();
        self.intersects(&p)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
