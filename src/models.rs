use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentName {
    pub last: String,
    pub first: String,
}

/// One student's full academic snapshot. Owned by the pipeline invocation
/// that created it; every downstream output is an independent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: StudentName,
    pub courses: Vec<CourseGrade>,
    pub awards: Vec<Award>,
    pub exams: Vec<ExamScore>,
}

impl StudentRecord {
    pub fn new(student_id: String, name: StudentName) -> Self {
        StudentRecord {
            student_id,
            name,
            courses: Vec::new(),
            awards: Vec::new(),
            exams: Vec::new(),
        }
    }

    /// Duplicate (type, year) awards collapse to a single entry.
    pub fn push_award(&mut self, award: Award) {
        let duplicate = self
            .awards
            .iter()
            .any(|a| a.type_code == award.type_code && a.year == award.year);
        if !duplicate {
            self.awards.push(award);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    F,
    #[serde(rename = "P")]
    Pass,
    #[serde(rename = "NP")]
    NoPass,
    #[serde(rename = "I")]
    Incomplete,
    #[serde(rename = "W")]
    Withdrawn,
}

impl LetterGrade {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let grade = match symbol.trim() {
            "A+" => LetterGrade::APlus,
            "A" => LetterGrade::A,
            "A-" => LetterGrade::AMinus,
            "B+" => LetterGrade::BPlus,
            "B" => LetterGrade::B,
            "B-" => LetterGrade::BMinus,
            "C+" => LetterGrade::CPlus,
            "C" => LetterGrade::C,
            "C-" => LetterGrade::CMinus,
            "D+" => LetterGrade::DPlus,
            "D" => LetterGrade::D,
            "D-" => LetterGrade::DMinus,
            "F" => LetterGrade::F,
            "P" => LetterGrade::Pass,
            "NP" => LetterGrade::NoPass,
            "I" => LetterGrade::Incomplete,
            "W" => LetterGrade::Withdrawn,
            _ => return None,
        };
        Some(grade)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
            LetterGrade::Pass => "P",
            LetterGrade::NoPass => "NP",
            LetterGrade::Incomplete => "I",
            LetterGrade::Withdrawn => "W",
        }
    }

    /// Whether the grade earns its credit hours toward the earned total.
    pub fn earns_credit(self) -> bool {
        !matches!(
            self,
            LetterGrade::F
                | LetterGrade::NoPass
                | LetterGrade::Incomplete
                | LetterGrade::Withdrawn
        )
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Course category drives the weighted-GPA adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseCategory {
    Standard,
    Honors,
    #[serde(rename = "AP")]
    Ap,
    #[serde(rename = "IB")]
    Ib,
    Other,
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CourseCategory::Standard => "Standard",
            CourseCategory::Honors => "Honors",
            CourseCategory::Ap => "AP",
            CourseCategory::Ib => "IB",
            CourseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// School year plus semester, e.g. "2024 - 2025" semester 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Term {
    pub school_year: String,
    pub semester: u8,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} S{}", self.school_year, self.semester)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseGrade {
    pub course_id: String,
    pub term: Term,
    pub letter_grade: LetterGrade,
    pub credit_hours: Decimal,
    pub category: CourseCategory,
}

/// One recognition event. The year is the two-digit datafile value expanded
/// through the caller-supplied century.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award {
    pub type_code: u8,
    pub award_name: String,
    pub year: Option<u16>,
}

/// One standardized-exam result block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamScore {
    pub admin_year: u16,
    pub subject_code: u8,
    pub subject_name: String,
    pub score: u8,
    /// Positional: slot 2 can be populated while slot 1 is blank, and the
    /// slots keep their positions through a decode/encode round trip.
    pub irregularity_codes: [Option<String>; 2],
    /// Trailing block field. Unused by scoring, carried so a decoded row
    /// re-encodes without loss.
    pub section_code: Option<String>,
    pub is_subscore: bool,
}

/// Cumulative or per-term unweighted/weighted GPA, rounded to two digits at
/// construction and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GpaPair {
    pub unweighted: Decimal,
    pub weighted: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermGpa {
    pub term: Term,
    /// `None` means no GPA-eligible credit this term, not 0.00.
    pub gpa: Option<GpaPair>,
    pub credit_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaResult {
    pub student_id: String,
    /// `None` means the GPA is undefined (no eligible courses), not 0.00.
    pub cumulative: Option<GpaPair>,
    pub total_credit_hours: Decimal,
    pub gpa_credit_hours: Decimal,
    pub credits_earned: Decimal,
    pub term_breakdown: Vec<TermGpa>,
    /// Set in best-effort mode when one or more courses were skipped.
    pub incomplete: bool,
    pub issues: Vec<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamYearGroup {
    pub admin_year: u16,
    pub exams: Vec<ExamScore>,
    pub subscores: Vec<ExamScore>,
}

/// De-duplicated, chronologically sorted award and exam lists for one
/// student, consumed by the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardSummary {
    pub student_id: String,
    pub awards: Vec<Award>,
    pub exam_years: Vec<ExamYearGroup>,
}
