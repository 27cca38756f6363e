//! Award/Exam Aggregator: pure transformation of a record's decoded award
//! and exam blocks into a render-ready summary.

use crate::error::ValidationError;
use crate::models::{AwardSummary, ExamYearGroup, StudentRecord};

/// Awards are de-duplicated by (type, year) and sorted by year ascending,
/// then award type. Exams are grouped by administration year, subscores
/// listed separately from full exams within each year.
pub fn summarize(record: &StudentRecord) -> Result<AwardSummary, ValidationError> {
    for exam in &record.exams {
        if !(1..=5).contains(&exam.score) {
            return Err(ValidationError::ScoreOutOfRange {
                student_id: record.student_id.clone(),
                subject: exam.subject_name.clone(),
                admin_year: exam.admin_year,
                score: i64::from(exam.score),
            });
        }
    }

    let mut awards = record.awards.clone();
    awards.sort_by(|a, b| a.year.cmp(&b.year).then(a.type_code.cmp(&b.type_code)));
    awards.dedup_by(|a, b| a.type_code == b.type_code && a.year == b.year);

    let mut exam_years: Vec<ExamYearGroup> = Vec::new();
    for exam in &record.exams {
        let group = match exam_years
            .iter()
            .position(|g| g.admin_year == exam.admin_year)
        {
            Some(index) => &mut exam_years[index],
            None => {
                exam_years.push(ExamYearGroup {
                    admin_year: exam.admin_year,
                    exams: Vec::new(),
                    subscores: Vec::new(),
                });
                let last = exam_years.len() - 1;
                &mut exam_years[last]
            }
        };
        if exam.is_subscore {
            group.subscores.push(exam.clone());
        } else {
            group.exams.push(exam.clone());
        }
    }
    exam_years.sort_by_key(|group| group.admin_year);
    for group in exam_years.iter_mut() {
        group.exams.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));
        group
            .subscores
            .sort_by(|a, b| a.subject_name.cmp(&b.subject_name));
    }

    Ok(AwardSummary {
        student_id: record.student_id.clone(),
        awards,
        exam_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Award, ExamScore, StudentName};

    fn record() -> StudentRecord {
        StudentRecord::new(
            "7048596".to_string(),
            StudentName {
                last: "Mabrey".to_string(),
                first: "Jacob".to_string(),
            },
        )
    }

    fn award(type_code: u8, name: &str, year: Option<u16>) -> Award {
        Award {
            type_code,
            award_name: name.to_string(),
            year,
        }
    }

    fn exam(admin_year: u16, subject_code: u8, subject_name: &str, score: u8) -> ExamScore {
        ExamScore {
            admin_year,
            subject_code,
            subject_name: subject_name.to_string(),
            score,
            irregularity_codes: [None, None],
            section_code: None,
            is_subscore: matches!(subject_code, 69 | 76 | 77),
        }
    }

    #[test]
    fn awards_sort_by_year_then_type() {
        let mut rec = record();
        rec.awards = vec![
            award(3, "AP Scholar with Distinction", Some(2024)),
            award(1, "AP Scholar", Some(2023)),
            award(2, "AP Scholar with Honor", Some(2024)),
        ];
        let summary = summarize(&rec).unwrap();
        let order: Vec<u8> = summary.awards.iter().map(|a| a.type_code).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_awards_collapse() {
        let mut rec = record();
        rec.awards = vec![
            award(1, "AP Scholar", Some(2023)),
            award(1, "AP Scholar", Some(2023)),
            award(1, "AP Scholar", Some(2024)),
        ];
        let summary = summarize(&rec).unwrap();
        assert_eq!(summary.awards.len(), 2);
    }

    #[test]
    fn exams_group_by_year_with_subscores_listed_separately() {
        let mut rec = record();
        rec.exams = vec![
            exam(2024, 90, "Statistics", 4),
            exam(2023, 68, "Calculus BC", 5),
            exam(2023, 69, "Calculus BC: AB Subscore", 5),
            exam(2024, 20, "Biology", 3),
        ];
        let summary = summarize(&rec).unwrap();
        assert_eq!(summary.exam_years.len(), 2);

        let first = &summary.exam_years[0];
        assert_eq!(first.admin_year, 2023);
        assert_eq!(first.exams.len(), 1);
        assert_eq!(first.subscores.len(), 1);
        assert_eq!(first.subscores[0].subject_name, "Calculus BC: AB Subscore");

        let second = &summary.exam_years[1];
        assert_eq!(second.admin_year, 2024);
        let subjects: Vec<&str> = second.exams.iter().map(|e| e.subject_name.as_str()).collect();
        assert_eq!(subjects, vec!["Biology", "Statistics"]);
    }

    #[test]
    fn out_of_range_score_names_the_exam() {
        let mut rec = record();
        rec.exams = vec![exam(2024, 66, "Calculus AB", 7)];
        let err = summarize(&rec).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ScoreOutOfRange {
                student_id: "7048596".to_string(),
                subject: "Calculus AB".to_string(),
                admin_year: 2024,
                score: 7,
            }
        );
    }

    #[test]
    fn summarize_does_not_mutate_the_record() {
        let mut rec = record();
        rec.awards = vec![award(1, "AP Scholar", Some(2023))];
        rec.exams = vec![exam(2023, 66, "Calculus AB", 5)];
        let before = rec.clone();
        summarize(&rec).unwrap();
        assert_eq!(rec, before);
    }
}
