use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::CourseCategory;

/// Row does not match the declared layout. Not recoverable for that row.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("row has {found} fields, layout {version} expects {expected}")]
    FieldCount {
        version: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("field {index} ({name}) is blank")]
    BlankField { index: usize, name: &'static str },
    #[error("award slot {slot}: unknown award type code \"{code}\"")]
    UnknownAwardCode { slot: usize, code: String },
    #[error("award slot {slot}: malformed {field} \"{value}\"")]
    MalformedAwardField {
        slot: usize,
        field: &'static str,
        value: String,
    },
    #[error("exam block {block}: unknown exam subject code \"{code}\"")]
    UnknownExamCode { block: usize, code: String },
    #[error("exam block {block}: malformed {field} \"{value}\"")]
    MalformedExamField {
        block: usize,
        field: &'static str,
        value: String,
    },
}

/// Structurally parseable but semantically invalid data, attributed to the
/// specific course or exam so batch callers can report per-entity failures.
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    #[error("course {course_id}: credit hours {credit_hours} must be positive for a GPA-counted grade")]
    NonPositiveCredits {
        course_id: String,
        credit_hours: Decimal,
    },
    #[error("course {course_id}: unrecognized grade \"{grade}\"")]
    MalformedGrade { course_id: String, grade: String },
    #[error("student {student_id}, {subject} ({admin_year}): score {score} is outside 1-5")]
    ScoreOutOfRange {
        student_id: String,
        subject: String,
        admin_year: u16,
        score: i64,
    },
}

/// Configuration fault. Always fatal to the current computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputationError {
    #[error("weighting policy has no adjustment for category {category}")]
    MissingCategory { category: CourseCategory },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}
