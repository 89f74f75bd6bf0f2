//! Filter builder and evaluator.
//!
//! [`Filter`] holds an ordered list of [`FilterClause`]s and applies them to
//! collections of submissions. [`evaluate`] and [`evaluate_with`] do the same
//! for a borrowed clause slice.
//!
//! A submission is kept when any one of its questions votes to keep it:
//!
//! ```text
//! keep(record) = clauses is empty
//!              ∨ ∃ question ∈ record:
//!                    type(question) unrecognized
//!                  ∨ ∃ clause with clause.id == question.id:
//!                        condition unrecognized ∨ predicate(question, clause.value)
//! ```
//!
//! Unknown question types and unknown conditions never exclude anything; both
//! are reported as diagnostics. Every applicable question/clause pair is
//! evaluated once, so each anomaly is reported once per occurrence.

use crate::condition::Condition;
use crate::diagnostic::{Diagnostic, DiagnosticSink, TracingSink};
use crate::model::{Answered, ClauseValue, FilterClause, Question};
use crate::predicate::predicate_for;

/// An ordered set of filter clauses.
///
/// # Example
///
/// ```
/// use formsift_filter::{Filter, Question, Submission};
///
/// let submissions = vec![
///     Submission::new("1", vec![Question::new("name", "ShortAnswer", "Ada")]),
///     Submission::new("2", vec![Question::new("name", "ShortAnswer", "Grace")]),
/// ];
///
/// let filter = Filter::new().equals("name", "Ada").build();
///
/// let kept = filter.apply(&submissions);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].submission_id, "1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<FilterClause>,
}

impl Filter {
    /// Creates a new empty filter.
    ///
    /// An empty filter keeps every submission.
    pub fn new() -> Self {
        Filter::default()
    }

    /// Creates a filter from an already parsed clause list.
    pub fn from_clauses(clauses: Vec<FilterClause>) -> Self {
        Filter { clauses }
    }

    // ========================================================================
    // Clause builders
    // ========================================================================

    /// Adds a clause.
    pub fn clause(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Adds a clause from its parts.
    pub fn with(
        self,
        id: &str,
        condition: impl Into<Condition>,
        value: impl Into<ClauseValue>,
    ) -> Self {
        self.clause(FilterClause::new(id, condition, value))
    }

    /// Adds an `equals` clause.
    pub fn equals(self, id: &str, value: impl Into<ClauseValue>) -> Self {
        self.with(id, Condition::Equals, value)
    }

    /// Adds a `does_not_equal` clause.
    pub fn does_not_equal(self, id: &str, value: impl Into<ClauseValue>) -> Self {
        self.with(id, Condition::DoesNotEqual, value)
    }

    /// Adds a `greater_than` clause.
    pub fn greater_than(self, id: &str, value: impl Into<ClauseValue>) -> Self {
        self.with(id, Condition::GreaterThan, value)
    }

    /// Adds a `less_than` clause.
    pub fn less_than(self, id: &str, value: impl Into<ClauseValue>) -> Self {
        self.with(id, Condition::LessThan, value)
    }

    /// Finalizes the filter.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the clauses in insertion order.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Returns `true` if this filter has no clauses (keeps everything).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the clauses whose condition the engine does not evaluate.
    pub fn unrecognized(&self) -> impl Iterator<Item = &FilterClause> {
        self.clauses
            .iter()
            .filter(|clause| !clause.condition.is_recognized())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests whether a single record is kept, reporting to `sink`.
    pub fn retains<R: Answered>(&self, record: &R, sink: &mut dyn DiagnosticSink) -> bool {
        self.is_empty() || retains(record, &self.clauses, sink)
    }

    /// Returns the kept records in input order, logging diagnostics through
    /// `tracing`.
    pub fn apply<'a, R: Answered>(&self, records: &'a [R]) -> Vec<&'a R> {
        evaluate(records, &self.clauses)
    }

    /// Returns the kept records in input order, reporting to `sink`.
    pub fn apply_with<'a, R: Answered>(
        &self,
        records: &'a [R],
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<&'a R> {
        evaluate_with(records, &self.clauses, sink)
    }

    /// Returns clones of the kept records in input order.
    pub fn apply_cloned<R: Answered + Clone>(&self, records: &[R]) -> Vec<R> {
        self.apply(records).into_iter().cloned().collect()
    }

    /// Counts the kept records.
    pub fn count<R: Answered>(&self, records: &[R]) -> usize {
        self.apply(records).len()
    }
}

impl FromIterator<FilterClause> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterClause>>(iter: I) -> Self {
        Filter::from_clauses(iter.into_iter().collect())
    }
}

/// Filters `records` by `clauses`, logging diagnostics through `tracing`.
///
/// An empty clause list returns every record. Otherwise the result is the
/// sublist of records kept by the rules in the [module docs](self), in
/// input order.
pub fn evaluate<'a, R: Answered>(records: &'a [R], clauses: &[FilterClause]) -> Vec<&'a R> {
    evaluate_with(records, clauses, &mut TracingSink)
}

/// Filters `records` by `clauses`, reporting diagnostics to `sink`.
///
/// ```
/// use formsift_filter::{evaluate_with, Diagnostic, FilterClause, Question, Submission};
///
/// let submissions = vec![Submission::new(
///     "1",
///     vec![Question::new("sig", "Signature", "data:image/png;base64,...")],
/// )];
/// let clauses = vec![FilterClause::new("sig", "equals", "x")];
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let kept = evaluate_with(&submissions, &clauses, &mut diagnostics);
///
/// assert_eq!(kept.len(), 1);
/// assert!(matches!(diagnostics[0], Diagnostic::UnknownQuestionType { .. }));
/// ```
pub fn evaluate_with<'a, R: Answered>(
    records: &'a [R],
    clauses: &[FilterClause],
    sink: &mut dyn DiagnosticSink,
) -> Vec<&'a R> {
    if clauses.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| retains(*record, clauses, sink))
        .collect()
}

/// OR-reduction over every question of the record.
fn retains<R: Answered>(record: &R, clauses: &[FilterClause], sink: &mut dyn DiagnosticSink) -> bool {
    let mut keep = false;
    for question in record.questions() {
        keep |= question_votes_keep(question, clauses, sink);
    }
    keep
}

/// OR-reduction over every clause that targets the question.
fn question_votes_keep(
    question: &Question,
    clauses: &[FilterClause],
    sink: &mut dyn DiagnosticSink,
) -> bool {
    if question.kind.kind().is_none() {
        sink.report(Diagnostic::UnknownQuestionType {
            question_id: question.id.clone(),
            question_type: question.kind.clone(),
        });
        return true;
    }

    let mut keep = false;
    for clause in clauses.iter().filter(|clause| clause.applies_to(question)) {
        keep |= clause_votes_keep(question, clause, sink);
    }
    keep
}

fn clause_votes_keep(
    question: &Question,
    clause: &FilterClause,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    match predicate_for(&clause.condition) {
        Some(predicate) => predicate(question, &clause.value, sink),
        None => {
            sink.report(Diagnostic::UnknownCondition {
                question_id: question.id.clone(),
                condition: clause.condition.as_str().to_string(),
            });
            true
        }
    }
}
