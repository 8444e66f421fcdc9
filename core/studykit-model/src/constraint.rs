//! Declarative field constraints, evaluated after type coercion.

use std::fmt;
use std::sync::Arc;

use regex_lite::Regex;

use crate::value::FieldValue;

/// One end of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Strict: `gt` / `lt`.
    Exclusive(f64),
    /// Non-strict: `ge` / `le`.
    Inclusive(f64),
}

impl Bound {
    pub fn value(&self) -> f64 {
        match self {
            Self::Exclusive(v) | Self::Inclusive(v) => *v,
        }
    }
}

type Predicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// A check applied to a coerced, non-null field value.
///
/// A constraint that does not apply to the value's type (e.g. `Range` on a
/// string) is a no-op.
#[derive(Clone)]
pub enum Constraint {
    /// Numeric bounds on `Integer` and `Float` values.
    Range {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
    /// Character count bounds on string values (both inclusive).
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// String values must match the regex somewhere; anchor it for a full match.
    Pattern(Regex),
    /// Arbitrary predicate with a human-readable description.
    Custom {
        description: String,
        predicate: Predicate,
    },
}

impl Constraint {
    /// Builds a `Custom` constraint from a closure.
    pub fn custom<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self::Custom {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Returns `None` if the value satisfies the constraint, otherwise a
    /// description of the first unmet condition.
    pub(crate) fn check(&self, value: &FieldValue) -> Option<String> {
        match self {
            Self::Range { lower, upper } => {
                let n = value.as_f64()?;
                let low = lower.and_then(|b| match b {
                    Bound::Exclusive(v) if n <= v => Some(format!("must be greater than {v}")),
                    Bound::Inclusive(v) if n < v => {
                        Some(format!("must be greater than or equal to {v}"))
                    }
                    _ => None,
                });
                low.or_else(|| {
                    upper.and_then(|b| match b {
                        Bound::Exclusive(v) if n >= v => Some(format!("must be less than {v}")),
                        Bound::Inclusive(v) if n > v => {
                            Some(format!("must be less than or equal to {v}"))
                        }
                        _ => None,
                    })
                })
            }
            Self::Length { min, max } => {
                let len = value.as_str()?.chars().count();
                match (min, max) {
                    (Some(m), _) if len < *m => Some(format!("must have at least {m} characters")),
                    (_, Some(m)) if len > *m => Some(format!("must have at most {m} characters")),
                    _ => None,
                }
            }
            Self::Pattern(re) => {
                let s = value.as_str()?;
                (!re.is_match(s)).then(|| format!("must match pattern '{}'", re.as_str()))
            }
            Self::Custom {
                description,
                predicate,
            } => (!predicate(value)).then(|| format!("must satisfy {description}")),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { lower, upper } => f
                .debug_struct("Range")
                .field("lower", lower)
                .field("upper", upper)
                .finish(),
            Self::Length { min, max } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Custom { description, .. } => f
                .debug_struct("Custom")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}
