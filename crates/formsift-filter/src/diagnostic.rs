//! Diagnostics reported while evaluating filters.
//!
//! The evaluator never fails on the content of the data it filters. When it
//! meets a question type or condition it does not know, or values it cannot
//! compare, it reports a [`Diagnostic`] to a [`DiagnosticSink`] and carries
//! on with the documented fallback.
//!
//! Two sinks ship with the crate:
//!
//! - [`TracingSink`] turns each diagnostic into a `tracing` warning event.
//! - `Vec<Diagnostic>` collects them, which is what tests assert on.

use crate::condition::Condition;
use crate::model::QuestionType;

/// A content anomaly found during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A question's declared type is not recognized; its submission is kept.
    UnknownQuestionType {
        question_id: String,
        question_type: QuestionType,
    },

    /// A clause names a condition the engine does not evaluate; the clause
    /// votes to keep the submission.
    UnknownCondition {
        question_id: String,
        condition: String,
    },

    /// An ordering condition found no date, numeric or text comparison that
    /// applies; the clause votes to exclude.
    NotComparable {
        question_id: String,
        question_type: QuestionType,
        condition: Condition,
    },

    /// A date comparison was attempted on a value that is not a valid date;
    /// the clause votes to exclude.
    MalformedDate {
        question_id: String,
        condition: Condition,
        input: String,
    },
}

impl Diagnostic {
    /// Returns the id of the question the diagnostic refers to.
    pub fn question_id(&self) -> &str {
        match self {
            Diagnostic::UnknownQuestionType { question_id, .. }
            | Diagnostic::UnknownCondition { question_id, .. }
            | Diagnostic::NotComparable { question_id, .. }
            | Diagnostic::MalformedDate { question_id, .. } => question_id,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownQuestionType { question_type, .. } => write!(
                f,
                "Unrecognized question type: {} - response will not be filtered out.",
                question_type
            ),
            Diagnostic::UnknownCondition { condition, .. } => write!(
                f,
                "Unrecognized filter condition: {} - question will not be filtered out.",
                condition
            ),
            Diagnostic::NotComparable {
                question_id,
                question_type,
                condition,
            } => write!(
                f,
                "Cannot compare values for {} condition. Question ID: {}, Type: {}",
                condition, question_id, question_type
            ),
            Diagnostic::MalformedDate {
                question_id,
                condition,
                input,
            } => write!(
                f,
                "Invalid date '{}' for {} condition. Question ID: {}",
                input, condition, question_id
            ),
        }
    }
}

/// Receiver for evaluation diagnostics.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that logs every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownQuestionType {
                question_id,
                question_type,
            } => tracing::warn!(
                question_id = %question_id,
                question_type = %question_type,
                "{}",
                diagnostic
            ),
            Diagnostic::UnknownCondition {
                question_id,
                condition,
            } => tracing::warn!(
                question_id = %question_id,
                condition = %condition,
                "{}",
                diagnostic
            ),
            Diagnostic::NotComparable {
                question_id,
                question_type,
                condition,
            } => tracing::warn!(
                question_id = %question_id,
                question_type = %question_type,
                condition = %condition,
                "{}",
                diagnostic
            ),
            Diagnostic::MalformedDate {
                question_id,
                condition,
                input,
            } => tracing::warn!(
                question_id = %question_id,
                condition = %condition,
                input = %input,
                "{}",
                diagnostic
            ),
        }
    }
}
