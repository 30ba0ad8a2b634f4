use crate::shape::ShapeKind;

/// Errors returned by shape conversions and constructors. Collision predicates never fail.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// A [`Shape2D`](crate::Shape2D) was converted into a concrete shape of another kind.
    #[error("expected a {expected} shape, found a {found}")]
    KindMismatch { expected: ShapeKind, found: ShapeKind },

    /// A triangle list whose length is not a multiple of three.
    #[error("mesh vertex count {len} is not a multiple of 3")]
    IncompleteTriangle { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ShapeError::KindMismatch {
            expected: ShapeKind::Circle,
            found: ShapeKind::Polygon,
        };
        assert_eq!(e.to_string(), "expected a Circle shape, found a Polygon");
        assert_eq!(
            ShapeError::IncompleteTriangle { len: 4 }.to_string(),
            "mesh vertex count 4 is not a multiple of 3"
        );
    }
}
