//! Decoding of serialized filters and submission documents.
//!
//! This is the outer boundary: malformed input is rejected here, before it
//! reaches the evaluator, which only ever sees typed values.

use crate::error::{FilterError, Result};
use crate::model::{FilterClause, FormResponses, Submission};

/// Parses a JSON array of `{id, condition, value}` clauses.
///
/// Unknown condition names are accepted (they never exclude); anything that
/// is not a list of clauses with a text or numeric value is an error. Blank
/// input means no filters.
///
/// ```
/// use formsift_filter::{parse_filters, Condition};
///
/// let clauses = parse_filters(r#"[{"id": "age", "condition": "less_than", "value": 40}]"#).unwrap();
/// assert_eq!(clauses[0].condition, Condition::LessThan);
///
/// assert!(parse_filters("[{\"id\": \"age\"}]").is_err());
/// assert!(parse_filters("").unwrap().is_empty());
/// ```
pub fn parse_filters(input: &str) -> Result<Vec<FilterClause>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(input).map_err(FilterError::InvalidFilters)
}

/// Parses a submissions document.
///
/// Accepts either the API envelope (`{"responses": [...], "totalResponses":
/// n, "pageCount": n}`) or a bare array of submissions, which is wrapped as a
/// single page. The first non-whitespace byte picks the shape, so errors
/// point at the offending field.
pub fn parse_responses(input: &str) -> Result<FormResponses> {
    let page = match input.trim_start().as_bytes().first() {
        Some(b'[') => {
            serde_json::from_str::<Vec<Submission>>(input).map(FormResponses::single_page)
        }
        _ => serde_json::from_str::<FormResponses>(input),
    };
    page.map_err(FilterError::InvalidResponses)
}
