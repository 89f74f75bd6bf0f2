//! Submission records, questions, and filter clauses.
//!
//! These types mirror the submissions API document shape so they can be
//! deserialized directly and written back without loss. The engine reads
//! them and never edits them.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::value::{Answer, Number};

/// Comparison family of a recognized question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text or a chosen option; ordered lexicographically.
    Text,
    /// Numeric input.
    Number,
    /// Date or date-time; compared as UTC instants.
    Date,
}

impl FieldKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared type of a question.
///
/// Recognized tags map to a [`FieldKind`]. Any other tag is kept verbatim in
/// [`QuestionType::Other`], and questions of that type never cause their
/// submission to be filtered out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    ShortAnswer,
    LongAnswer,
    EmailInput,
    MultipleChoice,
    Dropdown,
    PhoneNumber,
    UrlInput,
    NumberInput,
    DatePicker,
    DateTimePicker,
    /// A type tag the engine does not know how to compare.
    Other(String),
}

impl QuestionType {
    /// Maps a wire tag to a question type. Tags are case sensitive.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ShortAnswer" => QuestionType::ShortAnswer,
            "LongAnswer" => QuestionType::LongAnswer,
            "EmailInput" => QuestionType::EmailInput,
            "MultipleChoice" => QuestionType::MultipleChoice,
            "Dropdown" => QuestionType::Dropdown,
            "PhoneNumber" => QuestionType::PhoneNumber,
            "URLInput" => QuestionType::UrlInput,
            "NumberInput" => QuestionType::NumberInput,
            "DatePicker" => QuestionType::DatePicker,
            "DateTimePicker" => QuestionType::DateTimePicker,
            other => QuestionType::Other(other.to_string()),
        }
    }

    /// Returns the comparison family, or `None` for unrecognized types.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            QuestionType::ShortAnswer
            | QuestionType::LongAnswer
            | QuestionType::EmailInput
            | QuestionType::MultipleChoice
            | QuestionType::Dropdown
            | QuestionType::PhoneNumber
            | QuestionType::UrlInput => Some(FieldKind::Text),
            QuestionType::NumberInput => Some(FieldKind::Number),
            QuestionType::DatePicker | QuestionType::DateTimePicker => Some(FieldKind::Date),
            QuestionType::Other(_) => None,
        }
    }

    /// Returns the wire tag of this type.
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::ShortAnswer => "ShortAnswer",
            QuestionType::LongAnswer => "LongAnswer",
            QuestionType::EmailInput => "EmailInput",
            QuestionType::MultipleChoice => "MultipleChoice",
            QuestionType::Dropdown => "Dropdown",
            QuestionType::PhoneNumber => "PhoneNumber",
            QuestionType::UrlInput => "URLInput",
            QuestionType::NumberInput => "NumberInput",
            QuestionType::DatePicker => "DatePicker",
            QuestionType::DateTimePicker => "DateTimePicker",
            QuestionType::Other(tag) => tag,
        }
    }
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        match QuestionType::from_tag(&tag) {
            QuestionType::Other(_) => QuestionType::Other(tag),
            known => known,
        }
    }
}

impl From<&str> for QuestionType {
    fn from(tag: &str) -> Self {
        QuestionType::from_tag(tag)
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single answered question within a submission.
///
/// # Example
///
/// ```
/// use formsift_filter::{FieldKind, Question, QuestionType};
///
/// let q = Question::new("age", QuestionType::NumberInput, 30i64).named("Age");
/// assert_eq!(q.kind.kind(), Some(FieldKind::Number));
/// assert_eq!(q.name, "Age");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within a submission.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Declared question type.
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// The answer, or `None` when left blank.
    #[serde(default)]
    pub value: Option<Answer>,
}

impl Question {
    /// Creates an answered question with an empty display name.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<QuestionType>,
        value: impl Into<Answer>,
    ) -> Self {
        Question {
            id: id.into(),
            name: String::new(),
            kind: kind.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a question that was left blank.
    pub fn unanswered(id: impl Into<String>, kind: impl Into<QuestionType>) -> Self {
        Question {
            id: id.into(),
            name: String::new(),
            kind: kind.into(),
            value: None,
        }
    }

    /// Sets the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Trait for records the evaluator can filter.
///
/// A record is an ordered list of questions plus whatever metadata the
/// implementor carries; the evaluator only ever looks at the questions.
///
/// ```
/// use formsift_filter::{Answered, Question};
///
/// struct Entry {
///     answers: Vec<Question>,
/// }
///
/// impl Answered for Entry {
///     fn questions(&self) -> &[Question] {
///         &self.answers
///     }
/// }
/// ```
pub trait Answered {
    /// Returns the record's questions in form order.
    fn questions(&self) -> &[Question];
}

/// One respondent's submission to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<String>,
    pub questions: Vec<Question>,
    /// Remaining top-level keys (`calculations`, `urlParameters`, `quiz`,
    /// `documents`, ...), carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Submission {
    /// Creates a submission with no metadata beyond its identifier.
    pub fn new(submission_id: impl Into<String>, questions: Vec<Question>) -> Self {
        Submission {
            submission_id: submission_id.into(),
            submission_time: None,
            last_updated_at: None,
            questions,
            extra: serde_json::Map::new(),
        }
    }

    /// Looks up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl Answered for Submission {
    fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// A page (or a whole export) of form submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponses {
    pub responses: Vec<Submission>,
    #[serde(default)]
    pub total_responses: u64,
    #[serde(default)]
    pub page_count: u64,
}

impl FormResponses {
    /// Wraps a complete, already-filtered list as a single page.
    pub fn single_page(responses: Vec<Submission>) -> Self {
        FormResponses {
            total_responses: responses.len() as u64,
            page_count: 1,
            responses,
        }
    }
}

/// Owned comparison value of a filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseValue {
    /// Numeric value.
    Number(Number),
    /// Text value (also used for dates).
    Text(String),
}

impl ClauseValue {
    /// Extracts the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClauseValue::Text(s) => Some(s),
            ClauseValue::Number(_) => None,
        }
    }

    /// Interprets the value as a number: numbers as-is, text through
    /// [`Number::parse`].
    pub fn to_number(&self) -> Option<Number> {
        match self {
            ClauseValue::Number(n) => Some(*n),
            ClauseValue::Text(s) => Number::parse(s),
        }
    }
}

impl std::fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClauseValue::Number(n) => write!(f, "{}", n),
            ClauseValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::Text(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::Text(s.to_string())
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<i32> for ClauseValue {
    fn from(n: i32) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<i64> for ClauseValue {
    fn from(n: i64) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<u64> for ClauseValue {
    fn from(n: u64) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<f64> for ClauseValue {
    fn from(n: f64) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

/// A single retention rule: question id, condition, comparison value.
///
/// # Example
///
/// ```
/// use formsift_filter::{Condition, FilterClause};
///
/// let clause: FilterClause = serde_json::from_str(
///     r#"{"id": "age", "condition": "greater_than", "value": 30}"#,
/// ).unwrap();
/// assert_eq!(clause.condition, Condition::GreaterThan);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Id of the question this clause applies to.
    pub id: String,
    /// How to compare.
    pub condition: Condition,
    /// What to compare against.
    pub value: ClauseValue,
}

impl FilterClause {
    /// Creates a new clause.
    pub fn new(
        id: impl Into<String>,
        condition: impl Into<Condition>,
        value: impl Into<ClauseValue>,
    ) -> Self {
        FilterClause {
            id: id.into(),
            condition: condition.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this clause targets the given question.
    pub fn applies_to(&self, question: &Question) -> bool {
        self.id == question.id
    }
}
