//! Condition predicates.
//!
//! One function per recognized [`Condition`]. Each takes a question, the
//! clause value, and a diagnostic sink, and answers whether the question's
//! answer satisfies the condition. The question's declared type picks the
//! comparison:
//!
//! | Kind | `equals` / `does_not_equal` | `greater_than` / `less_than` |
//! |------|-----------------------------|------------------------------|
//! | Date | UTC instants | UTC instants |
//! | other | strict typed equality | numeric, then ordinal text |
//!
//! Predicates never fail. When a comparison is undefined (a malformed date,
//! values with no common ordering) they report a [`Diagnostic`] and return
//! `false`.

use std::cmp::Ordering;

use crate::condition::Condition;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::model::{ClauseValue, FieldKind, Question};
use crate::value::{Answer, Timestamp};

/// Signature shared by every condition predicate.
pub type Predicate = fn(&Question, &ClauseValue, &mut dyn DiagnosticSink) -> bool;

/// Returns the predicate for a recognized condition, or `None` for
/// [`Condition::Unrecognized`].
pub fn predicate_for(condition: &Condition) -> Option<Predicate> {
    match condition {
        Condition::Equals => Some(equals),
        Condition::DoesNotEqual => Some(does_not_equal),
        Condition::GreaterThan => Some(greater_than),
        Condition::LessThan => Some(less_than),
        Condition::Unrecognized(_) => None,
    }
}

/// Answer equals the clause value.
///
/// Date questions compare instants, so `"2024-01-01"` equals
/// `"2024-01-01T00:00:00Z"`. Everything else uses strict typed equality:
/// the text `"30"` does not equal the number `30`.
///
/// ```
/// use formsift_filter::{equals, ClauseValue, Diagnostic, Question};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let q = Question::new("age", "NumberInput", 30i64);
/// assert!(equals(&q, &ClauseValue::from(30i64), &mut diagnostics));
/// assert!(!equals(&q, &ClauseValue::from("30"), &mut diagnostics));
/// ```
pub fn equals(question: &Question, value: &ClauseValue, sink: &mut dyn DiagnosticSink) -> bool {
    equality(question, value, &Condition::Equals, sink).unwrap_or(false)
}

/// Answer does not equal the clause value.
///
/// The negation of [`equals`]. When equality is undefined (a malformed date)
/// this is `false` as well.
pub fn does_not_equal(
    question: &Question,
    value: &ClauseValue,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    equality(question, value, &Condition::DoesNotEqual, sink)
        .map(|equal| !equal)
        .unwrap_or(false)
}

/// Answer is strictly greater than the clause value.
///
/// ```
/// use formsift_filter::{greater_than, ClauseValue, Diagnostic, Question};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let q = Question::new("age", "NumberInput", "31");
/// assert!(greater_than(&q, &ClauseValue::from("30"), &mut diagnostics));
/// ```
pub fn greater_than(
    question: &Question,
    value: &ClauseValue,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    let condition = Condition::GreaterThan;
    ordering(question, value, &condition, sink)
        .is_some_and(|ordering| condition.eval_ordering(ordering))
}

/// Answer is strictly less than the clause value.
pub fn less_than(question: &Question, value: &ClauseValue, sink: &mut dyn DiagnosticSink) -> bool {
    let condition = Condition::LessThan;
    ordering(question, value, &condition, sink)
        .is_some_and(|ordering| condition.eval_ordering(ordering))
}

/// Shared equality rule. `None` means equality is undefined.
fn equality(
    question: &Question,
    value: &ClauseValue,
    condition: &Condition,
    sink: &mut dyn DiagnosticSink,
) -> Option<bool> {
    // A blank answer equals nothing.
    let Some(answer) = answer_of(question) else {
        return Some(false);
    };

    if is_date(question) {
        let (answered, wanted) = instants(question, answer, value, condition, sink)?;
        return Some(answered == wanted);
    }

    let equal = match (answer, value) {
        (Answer::Text(a), ClauseValue::Text(b)) => a == b,
        (Answer::Number(a), ClauseValue::Number(b)) => a == b,
        _ => false,
    };
    Some(equal)
}

/// Shared ordering rule: dates, then numbers, then ordinal text.
/// `None` means the values cannot be ordered; a diagnostic has been reported.
fn ordering(
    question: &Question,
    value: &ClauseValue,
    condition: &Condition,
    sink: &mut dyn DiagnosticSink,
) -> Option<Ordering> {
    if let Some(answer) = answer_of(question) {
        if is_date(question) {
            let (answered, wanted) = instants(question, answer, value, condition, sink)?;
            return Some(answered.cmp(&wanted));
        }

        if let (Some(a), Some(b)) = (answer.to_number(), value.to_number()) {
            if let Some(ordering) = a.compare(b) {
                return Some(ordering);
            }
        }

        if let Answer::Text(a) = answer {
            return Some(match value {
                ClauseValue::Text(b) => a.as_str().cmp(b.as_str()),
                ClauseValue::Number(b) => a.as_str().cmp(b.to_string().as_str()),
            });
        }
    }

    sink.report(Diagnostic::NotComparable {
        question_id: question.id.clone(),
        question_type: question.kind.clone(),
        condition: condition.clone(),
    });
    None
}

fn is_date(question: &Question) -> bool {
    question.kind.kind() == Some(FieldKind::Date)
}

/// The answer to compare. Empty text under a date question counts as
/// unanswered, like `null`.
fn answer_of(question: &Question) -> Option<&Answer> {
    match &question.value {
        Some(Answer::Text(text)) if is_date(question) && text.trim().is_empty() => None,
        value => value.as_ref(),
    }
}

/// Parses both sides of a date comparison, reporting the first side that is
/// not a valid date.
fn instants(
    question: &Question,
    answer: &Answer,
    value: &ClauseValue,
    condition: &Condition,
    sink: &mut dyn DiagnosticSink,
) -> Option<(Timestamp, Timestamp)> {
    let answered = answer.as_str().and_then(Timestamp::parse);
    let Some(answered) = answered else {
        report_malformed(question, condition, answer.to_string(), sink);
        return None;
    };

    let wanted = value.as_str().and_then(Timestamp::parse);
    let Some(wanted) = wanted else {
        report_malformed(question, condition, value.to_string(), sink);
        return None;
    };

    Some((answered, wanted))
}

fn report_malformed(
    question: &Question,
    condition: &Condition,
    input: String,
    sink: &mut dyn DiagnosticSink,
) {
    sink.report(Diagnostic::MalformedDate {
        question_id: question.id.clone(),
        condition: condition.clone(),
        input,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;

    fn check(predicate: Predicate, question: &Question, value: impl Into<ClauseValue>) -> bool {
        let mut sink: Vec<Diagnostic> = Vec::new();
        predicate(question, &value.into(), &mut sink)
    }

    fn date(value: &str) -> Question {
        Question::new("dateQuestion", QuestionType::DatePicker, value).named("Event Date")
    }

    fn text(value: &str) -> Question {
        Question::new("stringQuestion", QuestionType::ShortAnswer, value)
    }

    fn number(value: impl Into<Answer>) -> Question {
        Question::new("numberQuestion", QuestionType::NumberInput, value)
    }

    #[test]
    fn predicate_lookup() {
        assert!(predicate_for(&Condition::Equals).is_some());
        assert!(predicate_for(&Condition::LessThan).is_some());
        assert!(predicate_for(&Condition::from_name("contains")).is_none());
    }

    // equals / does_not_equal

    #[test]
    fn equals_dates() {
        assert!(check(equals, &date("2024-01-01"), "2024-01-01"));
        assert!(!check(equals, &date("2024-01-01"), "2024-01-02"));
        assert!(!check(equals, &date("2024-01-01"), "2024-02-01"));
    }

    #[test]
    fn equals_dates_by_instant() {
        assert!(check(equals, &date("2024-01-01"), "2024-01-01T00:00:00Z"));
        assert!(check(
            equals,
            &date("2024-01-01T10:00:00+02:00"),
            "2024-01-01T08:00:00.000Z"
        ));
        assert!(!check(equals, &date("2024-01-01"), "2024-01-01T00:00:01Z"));
    }

    #[test]
    fn equals_strings() {
        let q = Question::new("2", QuestionType::EmailInput, "test@example.com");
        assert!(check(equals, &q, "test@example.com"));
        assert!(!check(equals, &q, "other@example.com"));
        assert!(!check(equals, &q, "Test@example.com"));
    }

    #[test]
    fn equals_numbers() {
        assert!(check(equals, &number(30i64), 30i64));
        assert!(!check(equals, &number(30i64), 31i64));
        assert!(check(equals, &number(30i64), 30.0f64));
    }

    #[test]
    fn equals_is_type_sensitive() {
        assert!(!check(equals, &number("30"), 30i64));
        assert!(!check(equals, &number(30i64), "30"));
        assert!(check(equals, &number("30"), "30"));
    }

    #[test]
    fn equals_blank_answer() {
        let blank = Question::unanswered("q", QuestionType::ShortAnswer);
        assert!(!check(equals, &blank, "x"));
        assert!(check(does_not_equal, &blank, "x"));

        let blank_date = Question::unanswered("d", QuestionType::DatePicker);
        assert!(!check(equals, &blank_date, "2024-01-01"));
        assert!(check(does_not_equal, &blank_date, "2024-01-01"));
    }

    #[test]
    fn does_not_equal_dates() {
        assert!(!check(does_not_equal, &date("2024-01-01"), "2024-01-01"));
        assert!(check(does_not_equal, &date("2024-01-01"), "2024-02-01"));
    }

    #[test]
    fn does_not_equal_strings_and_numbers() {
        let q = Question::new("2", QuestionType::EmailInput, "test@example.com");
        assert!(!check(does_not_equal, &q, "test@example.com"));
        assert!(check(does_not_equal, &q, "another@example.com"));

        assert!(!check(does_not_equal, &number(30i64), 30i64));
        assert!(check(does_not_equal, &number(30i64), 31i64));
        assert!(check(does_not_equal, &number(30i64), "30"));
    }

    #[test]
    fn malformed_date_is_undefined_for_equality() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let q = date("next tuesday");
        let value = ClauseValue::from("2024-01-01");

        assert!(!equals(&q, &value, &mut sink));
        assert!(!does_not_equal(&q, &value, &mut sink));
        assert_eq!(sink.len(), 2);
        assert!(matches!(
            &sink[0],
            Diagnostic::MalformedDate { input, condition: Condition::Equals, .. } if input == "next tuesday"
        ));
        assert!(matches!(
            &sink[1],
            Diagnostic::MalformedDate { condition: Condition::DoesNotEqual, .. }
        ));
    }

    #[test]
    fn malformed_filter_date_is_reported() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(!equals(&date("2024-01-01"), &ClauseValue::from("01/01/2024"), &mut sink));
        assert!(!greater_than(&date("2024-01-01"), &ClauseValue::from(20240101i64), &mut sink));
        assert_eq!(sink.len(), 2);
        assert!(matches!(&sink[0], Diagnostic::MalformedDate { input, .. } if input == "01/01/2024"));
        assert!(matches!(&sink[1], Diagnostic::MalformedDate { input, .. } if input == "20240101"));
    }

    // greater_than / less_than

    #[test]
    fn greater_than_dates() {
        assert!(check(greater_than, &date("2024-02-02"), "2024-01-01"));
        assert!(!check(greater_than, &date("2024-01-01"), "2024-02-02"));
        assert!(!check(greater_than, &date("2024-01-01"), "2024-01-01"));
    }

    #[test]
    fn less_than_dates() {
        assert!(check(less_than, &date("2024-01-01"), "2024-02-02"));
        assert!(!check(less_than, &date("2024-02-02"), "2024-01-01"));
        assert!(check(less_than, &date("2024-01-01"), "2024-01-01T00:00:00.001Z"));
    }

    #[test]
    fn date_questions_never_compare_as_text() {
        // Lexicographic order would say "tomorrow" > "2024-01-10"
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(!greater_than(&date("tomorrow"), &ClauseValue::from("2024-01-10"), &mut sink));
        assert_eq!(sink.len(), 1);
        assert!(matches!(&sink[0], Diagnostic::MalformedDate { .. }));
    }

    #[test]
    fn greater_than_numbers() {
        assert!(check(greater_than, &number("31"), 30i64));
        assert!(!check(greater_than, &number("29"), "30"));
        assert!(check(greater_than, &number("31"), "30"));
        assert!(!check(greater_than, &number(30i64), 30i64));
        assert!(check(greater_than, &number(2.5f64), "2.25"));
    }

    #[test]
    fn less_than_numbers() {
        assert!(check(less_than, &number("29"), 30i64));
        assert!(!check(less_than, &number("31"), "30"));
        // Numeric, not lexicographic: "9" < "10"
        assert!(check(less_than, &number("9"), "10"));
    }

    #[test]
    fn numeric_text_compares_numerically_in_text_questions() {
        assert!(check(greater_than, &text("10"), "9"));
    }

    #[test]
    fn greater_than_strings() {
        assert!(check(greater_than, &text("b"), "a"));
        assert!(!check(greater_than, &text("a"), "b"));
        assert!(!check(greater_than, &text("a"), "a"));
    }

    #[test]
    fn less_than_strings() {
        assert!(check(less_than, &text("a"), "b"));
        assert!(!check(less_than, &text("b"), "a"));
        // Ordinal: uppercase sorts before lowercase
        assert!(check(less_than, &text("Zebra"), "apple"));
    }

    #[test]
    fn empty_date_answer_is_unanswered() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let empty = Question::new("dateQuestion", QuestionType::DatePicker, "");
        let missing = Question::unanswered("dateQuestion", QuestionType::DatePicker);
        let wanted = ClauseValue::from("2024-01-01");

        for q in [&empty, &missing] {
            assert!(!equals(q, &wanted, &mut sink));
            assert!(does_not_equal(q, &wanted, &mut sink));
        }
        assert!(sink.is_empty());

        assert!(!greater_than(&empty, &wanted, &mut sink));
        assert_eq!(sink.len(), 1);
        assert!(matches!(sink[0], Diagnostic::NotComparable { .. }));
    }

    #[test]
    fn large_integers_order_exactly() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let q = Question::new("big", QuestionType::NumberInput, i64::MAX);
        let past_max = ClauseValue::from(i64::MAX as u64 + 1);

        assert!(!equals(&q, &past_max, &mut sink));
        assert!(does_not_equal(&q, &past_max, &mut sink));
        assert!(less_than(&q, &past_max, &mut sink));
        assert!(!greater_than(&q, &past_max, &mut sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn unhandled_values_report_and_fail() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let q = Question::unanswered("complexQuestion", "Complex").named("Unhandled Type");

        assert!(!greater_than(&q, &ClauseValue::from("data"), &mut sink));
        assert!(!less_than(&q, &ClauseValue::from("data"), &mut sink));
        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink[0],
            Diagnostic::NotComparable {
                question_id: "complexQuestion".to_string(),
                question_type: QuestionType::from("Complex"),
                condition: Condition::GreaterThan,
            }
        );
    }

    #[test]
    fn text_against_number_compares_as_text() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(greater_than(&text("abc"), &ClauseValue::from(3i64), &mut sink));
        assert!(!less_than(&text("abc"), &ClauseValue::from(3i64), &mut sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn other_answer_shapes_are_not_comparable() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let q = Question::new(
            "choices",
            QuestionType::MultipleChoice,
            Answer::Other(serde_json::json!(["a", "b"])),
        );
        assert!(!less_than(&q, &ClauseValue::from("z"), &mut sink));
        assert!(!equals(&q, &ClauseValue::from("a"), &mut sink));
        // Only the ordering reports; equality is simply false.
        assert_eq!(sink.len(), 1);
    }
}
