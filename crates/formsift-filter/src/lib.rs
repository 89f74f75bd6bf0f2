//! Formsift filter - typed filter evaluation for form submissions.
//!
//! Given a list of submissions and a list of filter clauses, the engine
//! returns the submissions that at least one clause votes to keep. It
//! supports:
//!
//! - Question types grouped into text, number and date comparison families
//! - Conditions: `equals`, `does_not_equal`, `greater_than`, `less_than`
//! - Permissive fallbacks: unknown question types and unknown conditions
//!   never exclude a submission
//! - Pluggable diagnostics, logged through `tracing` by default
//!
//! # Quick Start
//!
//! ```rust
//! use formsift_filter::{evaluate, FilterClause, Question, QuestionType, Submission};
//!
//! let submissions = vec![
//!     Submission::new("1", vec![
//!         Question::new("textQuestion", QuestionType::ShortAnswer, "Response A"),
//!         Question::new("numberQuestion", QuestionType::NumberInput, "10"),
//!     ]),
//!     Submission::new("2", vec![
//!         Question::new("textQuestion", QuestionType::ShortAnswer, "Response B"),
//!         Question::new("numberQuestion", QuestionType::NumberInput, "20"),
//!     ]),
//! ];
//!
//! let clauses = vec![FilterClause::new("textQuestion", "equals", "Response A")];
//!
//! let kept = evaluate(&submissions, &clauses);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].submission_id, "1");
//! ```
//!
//! # Evaluation Semantics
//!
//! ```text
//! keep = no clauses
//!      ∨ some question has an unrecognized type
//!      ∨ some clause targeting some question has an unrecognized condition
//!      ∨ some clause targeting some question is satisfied
//! ```
//!
//! The result is a sublist of the input: same records, same order, nothing
//! copied or changed.
//!
//! # Comparison by Question Type
//!
//! | Kind | Types | `equals` | `greater_than` / `less_than` |
//! |------|-------|----------|------------------------------|
//! | Text | `ShortAnswer`, `LongAnswer`, `EmailInput`, `MultipleChoice`, ... | strict typed | numeric if both parse, else ordinal text |
//! | Number | `NumberInput` | strict typed | numeric if both parse, else ordinal text |
//! | Date | `DatePicker`, `DateTimePicker` | UTC instant | UTC instant |
//!
//! Dates are normalized as described on [`Timestamp::parse`]: date-only
//! values are midnight UTC and date-times without an offset are read as UTC.

mod condition;
mod diagnostic;
mod error;
mod filter;
mod model;
mod predicate;
mod value;
mod wire;

// Re-export public API
pub use condition::Condition;
pub use diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{FilterError, Result};
pub use filter::{evaluate, evaluate_with, Filter};
pub use model::{
    Answered, ClauseValue, FieldKind, FilterClause, FormResponses, Question, QuestionType,
    Submission,
};
pub use predicate::{does_not_equal, equals, greater_than, less_than, predicate_for, Predicate};
pub use value::{Answer, Number, Timestamp};
pub use wire::{parse_filters, parse_responses};
