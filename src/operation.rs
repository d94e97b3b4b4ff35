//! The URL-embedded operation grammar: `/op1/op2/.../opN`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::consts::{ROTATE_ANGLE_MAX, ROTATE_ANGLE_MIN, SCALE_DIM_MAX, SCALE_DIM_MIN};

/// One image transformation named in a request's URL.
///
/// A tagged union rather than one struct with four loosely-coupled fields:
/// a `Flip` simply cannot carry a stray numeric payload, and a `Rotate`
/// cannot be missing its angle, which a flatter representation would have
/// to enforce by convention instead of by the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Rotate { angle: i32 },
    Flip { direction: FlipDirection },
    Scale { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Rotate { angle } => write!(f, "rotate,{angle}"),
            Self::Flip { direction: FlipDirection::Horizontal } => write!(f, "flip,h"),
            Self::Flip { direction: FlipDirection::Vertical } => write!(f, "flip,v"),
            Self::Scale { width, height } => write!(f, "scale,{width},{height}"),
        }
    }
}

impl Operation {
    /// Parses one `/`-delimited URL segment (without its leading slash)
    /// into a single `Operation`, e.g. `"rotate,90"` or `"scale,200,50"`.
    fn try_parse(segment: &str) -> Option<Self> {
        let mut fields = segment.split(',');

        match fields.next()? {
            "rotate" => {
                let angle = fields.next()?.parse::<i32>().ok()?;
                if fields.next().is_some() {
                    return None;
                }
                if !(ROTATE_ANGLE_MIN..=ROTATE_ANGLE_MAX).contains(&angle) {
                    return None;
                }
                Some(Self::Rotate { angle })
            },
            "flip" => {
                let direction = match fields.next()? {
                    "h" => FlipDirection::Horizontal,
                    "v" => FlipDirection::Vertical,
                    _ => return None,
                };
                if fields.next().is_some() {
                    return None;
                }
                Some(Self::Flip { direction })
            },
            "scale" => {
                let width = fields.next()?.parse::<u32>().ok()?;
                let height = fields.next()?.parse::<u32>().ok()?;
                if fields.next().is_some() {
                    return None;
                }
                if !(SCALE_DIM_MIN..=SCALE_DIM_MAX).contains(&width)
                    || !(SCALE_DIM_MIN..=SCALE_DIM_MAX).contains(&height)
                {
                    return None;
                }
                Some(Self::Scale { width, height })
            },
            _ => None,
        }
    }
}

/// An ordered, validated sequence of `Operation`s parsed from one POST
/// request target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan(pub Vec<Operation>);

impl Plan {
    /// Parses a POST target of the form `/op1/op2/.../opN` (`N >= 1`) into
    /// a `Plan`. Returns `None` on any grammar violation: an unknown
    /// operation name, a missing or extra comma-field, a non-integer
    /// numeric field, or a field outside its range — the caller collapses
    /// all of these into one `400 Bad Request`.
    #[must_use]
    pub fn try_parse(target: &str) -> Option<Self> {
        let rest = target.strip_prefix('/')?;

        if rest.is_empty() {
            return None;
        }

        let operations = rest
            .split('/')
            .map(Operation::try_parse)
            .collect::<Option<Vec<_>>>()?;

        if operations.is_empty() {
            return None;
        }

        Some(Self(operations))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_rotate() {
        let plan = Plan::try_parse("/rotate,90").unwrap();
        assert_eq!(plan.0, vec![Operation::Rotate { angle: 90 }]);
    }

    #[test]
    fn parses_a_chained_plan_in_order() {
        let plan = Plan::try_parse("/scale,1,1/flip,v/rotate,90").unwrap();
        assert_eq!(
            plan.0,
            vec![
                Operation::Scale { width: 1, height: 1 },
                Operation::Flip { direction: FlipDirection::Vertical },
                Operation::Rotate { angle: 90 },
            ]
        );
    }

    #[test]
    fn accepts_the_boundary_angles() {
        assert!(Plan::try_parse("/rotate,-359").is_some());
        assert!(Plan::try_parse("/rotate,359").is_some());
    }

    #[test]
    fn rejects_angles_outside_the_range() {
        assert!(Plan::try_parse("/rotate,360").is_none());
        assert!(Plan::try_parse("/rotate,-360").is_none());
    }

    #[test]
    fn rejects_scale_dimensions_outside_the_range() {
        assert!(Plan::try_parse("/scale,0,1").is_none());
        assert!(Plan::try_parse("/scale,10001,1").is_none());
        assert!(Plan::try_parse("/scale,1,1").is_some());
        assert!(Plan::try_parse("/scale,10000,10000").is_some());
    }

    #[test]
    fn rejects_unknown_operation_names() {
        assert!(Plan::try_parse("/spin,1").is_none());
    }

    #[test]
    fn rejects_wrong_field_counts() {
        assert!(Plan::try_parse("/rotate,1,2").is_none());
        assert!(Plan::try_parse("/rotate").is_none());
        assert!(Plan::try_parse("/scale,1").is_none());
        assert!(Plan::try_parse("/flip,h,extra").is_none());
    }

    #[test]
    fn rejects_an_empty_target() {
        assert!(Plan::try_parse("/").is_none());
        assert!(Plan::try_parse("").is_none());
    }
}
