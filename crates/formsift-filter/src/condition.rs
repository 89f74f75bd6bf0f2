//! Comparison conditions for filter clauses.
//!
//! The [`Condition`] enum is the closed set of operators the engine knows how
//! to evaluate, plus an [`Condition::Unrecognized`] arm that keeps whatever
//! name the caller supplied. Clauses carrying an unrecognized condition never
//! exclude a submission.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Comparison condition of a filter clause.
///
/// Conditions are grouped by how they are evaluated:
/// - **Equality**: `Equals`, `DoesNotEqual` - date instants or strict typed equality
/// - **Ordering**: `GreaterThan`, `LessThan` - dates, then numbers, then text
/// - **Fallback**: `Unrecognized` - any other name, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    /// Field value equals the clause value.
    Equals,
    /// Field value does not equal the clause value.
    DoesNotEqual,
    /// Field value is strictly greater than the clause value.
    GreaterThan,
    /// Field value is strictly less than the clause value.
    LessThan,
    /// A condition name the engine does not evaluate.
    Unrecognized(String),
}

impl Condition {
    /// Maps a wire name to a condition.
    ///
    /// Names are matched exactly; anything else becomes
    /// [`Condition::Unrecognized`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "equals" => Condition::Equals,
            "does_not_equal" => Condition::DoesNotEqual,
            "greater_than" => Condition::GreaterThan,
            "less_than" => Condition::LessThan,
            other => Condition::Unrecognized(other.to_string()),
        }
    }

    /// Returns `true` unless this is the fallback arm.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Condition::Unrecognized(_))
    }

    /// Evaluates this condition given the ordering of field value against
    /// clause value.
    ///
    /// Returns `false` for the unrecognized arm, which has no ordering
    /// semantics.
    pub fn eval_ordering(&self, ordering: Ordering) -> bool {
        match self {
            Condition::Equals => ordering == Ordering::Equal,
            Condition::DoesNotEqual => ordering != Ordering::Equal,
            Condition::GreaterThan => ordering == Ordering::Greater,
            Condition::LessThan => ordering == Ordering::Less,
            Condition::Unrecognized(_) => false,
        }
    }

    /// Returns the wire name of this condition.
    pub fn as_str(&self) -> &str {
        match self {
            Condition::Equals => "equals",
            Condition::DoesNotEqual => "does_not_equal",
            Condition::GreaterThan => "greater_than",
            Condition::LessThan => "less_than",
            Condition::Unrecognized(name) => name,
        }
    }
}

impl From<String> for Condition {
    fn from(name: String) -> Self {
        match Condition::from_name(&name) {
            Condition::Unrecognized(_) => Condition::Unrecognized(name),
            known => known,
        }
    }
}

impl From<&str> for Condition {
    fn from(name: &str) -> Self {
        Condition::from_name(name)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Unrecognized(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_from_name() {
        assert_eq!(Condition::from_name("equals"), Condition::Equals);
        assert_eq!(
            Condition::from_name("does_not_equal"),
            Condition::DoesNotEqual
        );
        assert_eq!(Condition::from_name("greater_than"), Condition::GreaterThan);
        assert_eq!(Condition::from_name("less_than"), Condition::LessThan);

        // Exact match only
        assert_eq!(
            Condition::from_name("Equals"),
            Condition::Unrecognized("Equals".to_string())
        );
        assert_eq!(
            Condition::from_name("unknown_condition"),
            Condition::Unrecognized("unknown_condition".to_string())
        );
    }

    #[test]
    fn condition_recognition() {
        assert!(Condition::LessThan.is_recognized());
        assert!(!Condition::from_name("contains").is_recognized());
    }

    #[test]
    fn condition_eval_ordering() {
        assert!(Condition::Equals.eval_ordering(Ordering::Equal));
        assert!(!Condition::Equals.eval_ordering(Ordering::Less));

        assert!(!Condition::DoesNotEqual.eval_ordering(Ordering::Equal));
        assert!(Condition::DoesNotEqual.eval_ordering(Ordering::Greater));

        assert!(Condition::GreaterThan.eval_ordering(Ordering::Greater));
        assert!(!Condition::GreaterThan.eval_ordering(Ordering::Equal));
        assert!(!Condition::GreaterThan.eval_ordering(Ordering::Less));

        assert!(Condition::LessThan.eval_ordering(Ordering::Less));
        assert!(!Condition::LessThan.eval_ordering(Ordering::Equal));
        assert!(!Condition::LessThan.eval_ordering(Ordering::Greater));

        let unknown = Condition::from_name("between");
        assert!(!unknown.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn condition_wire_round_trip() {
        let parsed: Condition = serde_json::from_str("\"greater_than\"").unwrap();
        assert_eq!(parsed, Condition::GreaterThan);

        let parsed: Condition = serde_json::from_str("\"starts_with\"").unwrap();
        assert_eq!(parsed, Condition::Unrecognized("starts_with".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"starts_with\"");
    }

    #[test]
    fn condition_display() {
        assert_eq!(Condition::Equals.to_string(), "equals");
        assert_eq!(Condition::DoesNotEqual.to_string(), "does_not_equal");
        assert_eq!(Condition::from_name("custom").to_string(), "custom");
    }
}
