//! CSV ingestion glue. Files are opened and tokenized here; the parser and
//! engine only ever see clean field arrays and typed rows.

use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::layout::Layout;
use crate::models::{CourseCategory, CourseGrade, LetterGrade, StudentName, StudentRecord, Term};
use crate::parser;

#[derive(Debug, Deserialize)]
struct GradeRow {
    student_id: String,
    last_name: String,
    first_name: String,
    school_year: String,
    semester: u8,
    course_id: String,
    grade: String,
    credit_hours: Decimal,
    category: CourseCategory,
}

/// Reads an AP datafile CSV and decodes every row under the layout. The
/// header row is skipped; each data row must match the layout's field count.
pub fn load_ap_datafile(
    path: &Path,
    layout: &Layout,
    century: u16,
) -> anyhow::Result<Vec<StudentRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result?;
        let fields: Vec<String> = row.iter().map(str::to_string).collect();
        let record = parser::parse_row(layout, &fields, century)
            .with_context(|| format!("row {} of {}", index + 2, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Reads the merged-grades CSV and attaches each course to its student's
/// record, creating records for students the datafile did not cover.
/// Returns the number of grade rows attached.
pub fn merge_grades(path: &Path, records: &mut Vec<StudentRecord>) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut attached = 0usize;
    for result in reader.deserialize::<GradeRow>() {
        let row = result?;
        let letter_grade =
            LetterGrade::from_symbol(&row.grade).ok_or_else(|| ValidationError::MalformedGrade {
                course_id: row.course_id.clone(),
                grade: row.grade.clone(),
            })?;
        let course = CourseGrade {
            course_id: row.course_id,
            term: Term {
                school_year: row.school_year,
                semester: row.semester,
            },
            letter_grade,
            credit_hours: row.credit_hours,
            category: row.category,
        };

        let index = match records.iter().position(|r| r.student_id == row.student_id) {
            Some(index) => index,
            None => {
                records.push(StudentRecord::new(
                    row.student_id,
                    StudentName {
                        last: row.last_name,
                        first: row.first_name,
                    },
                ));
                records.len() - 1
            }
        };
        records[index].courses.push(course);
        attached += 1;
    }
    Ok(attached)
}
