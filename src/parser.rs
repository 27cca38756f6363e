//! Record Parser: one tokenized row in, one `StudentRecord` out. Stateless
//! across rows; nothing carries over from a previous row.

use crate::error::{EngineError, ParseError, ValidationError};
use crate::layout::Layout;
use crate::models::{Award, ExamScore, StudentName, StudentRecord};
use crate::tables;

/// Decodes one raw row under the given layout. Two-digit years expand
/// through `century` (e.g. century 2000 turns "24" into 2024).
///
/// Blank award slots and all-blank exam blocks are skipped; a populated slot
/// with an unresolvable code fails the row.
pub fn parse_row(
    layout: &Layout,
    fields: &[String],
    century: u16,
) -> Result<StudentRecord, EngineError> {
    if fields.len() != layout.field_count {
        return Err(ParseError::FieldCount {
            version: layout.version,
            expected: layout.field_count,
            found: fields.len(),
        }
        .into());
    }

    let student_id = fields[layout.student_id].trim();
    if student_id.is_empty() {
        return Err(ParseError::BlankField {
            index: layout.student_id,
            name: "student id",
        }
        .into());
    }

    let name = StudentName {
        last: fields[layout.last_name].trim().to_string(),
        first: fields[layout.first_name].trim().to_string(),
    };
    let mut record = StudentRecord::new(student_id.to_string(), name);

    for (slot, &(type_idx, year_idx)) in layout.award_slots.iter().enumerate() {
        let type_raw = fields[type_idx].trim();
        let year_raw = fields[year_idx].trim();
        if type_raw.is_empty() && year_raw.is_empty() {
            continue;
        }
        if type_raw.is_empty() {
            return Err(ParseError::MalformedAwardField {
                slot,
                field: "type code",
                value: String::new(),
            }
            .into());
        }
        let code: u8 = type_raw.parse().map_err(|_| ParseError::MalformedAwardField {
            slot,
            field: "type code",
            value: type_raw.to_string(),
        })?;
        let award_name = tables::award_name(code).ok_or_else(|| ParseError::UnknownAwardCode {
            slot,
            code: type_raw.to_string(),
        })?;
        let year = if year_raw.is_empty() {
            None
        } else {
            let value: u16 = year_raw.parse().map_err(|_| ParseError::MalformedAwardField {
                slot,
                field: "year",
                value: year_raw.to_string(),
            })?;
            Some(expand_year(value, century))
        };
        record.push_award(Award {
            type_code: code,
            award_name: award_name.to_string(),
            year,
        });
    }

    for block in 0..layout.exam_blocks {
        let base = layout.exam_base + block * layout.exam_block_len;
        if base + layout.exam_block_len > fields.len() {
            break;
        }
        let window = &fields[base..base + layout.exam_block_len];
        if window.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let year_raw = window[0].trim();
        let code_raw = window[1].trim();
        let score_raw = window[2].trim();
        for (field, raw) in [
            ("admin year", year_raw),
            ("subject code", code_raw),
            ("score", score_raw),
        ] {
            if raw.is_empty() {
                return Err(ParseError::MalformedExamField {
                    block,
                    field,
                    value: String::new(),
                }
                .into());
            }
        }

        let code: u8 = code_raw.parse().map_err(|_| ParseError::MalformedExamField {
            block,
            field: "subject code",
            value: code_raw.to_string(),
        })?;
        let subject = tables::exam_subject(code).ok_or_else(|| ParseError::UnknownExamCode {
            block,
            code: code_raw.to_string(),
        })?;
        let admin_year: u16 = year_raw.parse().map_err(|_| ParseError::MalformedExamField {
            block,
            field: "admin year",
            value: year_raw.to_string(),
        })?;
        let admin_year = expand_year(admin_year, century);
        let score: i64 = score_raw.parse().map_err(|_| ParseError::MalformedExamField {
            block,
            field: "score",
            value: score_raw.to_string(),
        })?;
        if !(1..=5).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange {
                student_id: record.student_id.clone(),
                subject: subject.to_string(),
                admin_year,
                score,
            }
            .into());
        }

        record.exams.push(ExamScore {
            admin_year,
            subject_code: code,
            subject_name: subject.to_string(),
            score: score as u8,
            irregularity_codes: [non_blank(&window[3]), non_blank(&window[4])],
            section_code: non_blank(&window[5]),
            is_subscore: tables::is_subscore(code),
        });
    }

    Ok(record)
}

/// Datafile years are two digits; values of 100 or more are taken as
/// already-absolute years.
fn expand_year(value: u16, century: u16) -> u16 {
    if value < 100 {
        century + value
    } else {
        value
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::encode_row;

    const CENTURY: u16 = 2000;

    fn blank_row(layout: &Layout) -> Vec<String> {
        let mut fields = vec![String::new(); layout.field_count];
        fields[layout.student_id] = "7048596".to_string();
        fields[layout.last_name] = "Mabrey".to_string();
        fields[layout.first_name] = "Jacob".to_string();
        fields
    }

    fn set_exam_block(layout: &Layout, fields: &mut [String], block: usize, values: [&str; 6]) {
        let base = layout.exam_base + block * layout.exam_block_len;
        for (i, value) in values.iter().enumerate() {
            fields[base + i] = value.to_string();
        }
    }

    #[test]
    fn rejects_wrong_field_count() {
        let layout = Layout::ap_datafile();
        let fields = vec![String::new(); 10];
        let err = parse_row(&layout, &fields, CENTURY).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse(ParseError::FieldCount { expected: 244, found: 10, .. })
        ));
    }

    #[test]
    fn rejects_blank_student_id() {
        let layout = Layout::ap_datafile();
        let fields = vec![String::new(); layout.field_count];
        let err = parse_row(&layout, &fields, CENTURY).unwrap_err();
        assert!(matches!(err, EngineError::Parse(ParseError::BlankField { .. })));
    }

    #[test]
    fn decodes_award_slot() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        fields[25] = "02".to_string();
        fields[26] = "24".to_string();

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert_eq!(record.awards.len(), 1);
        assert_eq!(record.awards[0].type_code, 2);
        assert_eq!(record.awards[0].award_name, "AP Scholar with Honor");
        assert_eq!(record.awards[0].year, Some(2024));
    }

    #[test]
    fn unmapped_award_code_fails_the_row() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        fields[25] = "99".to_string();
        fields[26] = "24".to_string();

        let err = parse_row(&layout, &fields, CENTURY).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse(ParseError::UnknownAwardCode { slot: 0, .. })
        ));
    }

    #[test]
    fn duplicate_award_slots_collapse() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        fields[25] = "01".to_string();
        fields[26] = "24".to_string();
        fields[27] = "01".to_string();
        fields[28] = "24".to_string();

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert_eq!(record.awards.len(), 1);
    }

    #[test]
    fn decodes_exam_block() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        set_exam_block(&layout, &mut fields, 0, ["24", "66", "5", "", "", ""]);

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert_eq!(record.exams.len(), 1);
        let exam = &record.exams[0];
        assert_eq!(exam.subject_name, "Calculus AB");
        assert_eq!(exam.score, 5);
        assert_eq!(exam.admin_year, 2024);
        assert_eq!(exam.irregularity_codes, [None, None]);
        assert_eq!(exam.section_code, None);
        assert!(!exam.is_subscore);
    }

    #[test]
    fn subscore_codes_are_flagged_on_decode() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        set_exam_block(&layout, &mut fields, 0, ["24", "69", "4", "", "", ""]);

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert!(record.exams[0].is_subscore);
    }

    #[test]
    fn score_outside_range_is_a_validation_error() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        set_exam_block(&layout, &mut fields, 0, ["24", "66", "7", "", "", ""]);

        let err = parse_row(&layout, &fields, CENTURY).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::ScoreOutOfRange { score: 7, .. })
        ));
    }

    #[test]
    fn unknown_exam_code_fails_the_row() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        set_exam_block(&layout, &mut fields, 2, ["24", "67", "3", "", "", ""]);

        let err = parse_row(&layout, &fields, CENTURY).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse(ParseError::UnknownExamCode { block: 2, .. })
        ));
    }

    #[test]
    fn blank_exam_blocks_are_skipped() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        // Block 0 is left blank; block 1 carries the only exam.
        set_exam_block(&layout, &mut fields, 1, ["23", "90", "4", "", "", ""]);

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert_eq!(record.exams.len(), 1);
        assert_eq!(record.exams[0].subject_name, "Statistics");
    }

    #[test]
    fn decode_then_encode_reproduces_populated_fields() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        fields[25] = "01".to_string();
        fields[26] = "23".to_string();
        fields[27] = "03".to_string();
        fields[28] = "24".to_string();
        set_exam_block(&layout, &mut fields, 0, ["23", "66", "5", "", "", ""]);
        set_exam_block(&layout, &mut fields, 1, ["24", "90", "4", "55", "", ""]);

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        let encoded = encode_row(&layout, &record, CENTURY);
        assert_eq!(encoded, fields);
    }

    #[test]
    fn roundtrip_keeps_second_irregularity_slot_in_place() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        // Slot 1 blank, slot 2 populated: the code must not shift left.
        set_exam_block(&layout, &mut fields, 0, ["24", "85", "3", "", "55", ""]);

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert_eq!(
            record.exams[0].irregularity_codes,
            [None, Some("55".to_string())]
        );
        let encoded = encode_row(&layout, &record, CENTURY);
        assert_eq!(encoded, fields);
    }

    #[test]
    fn roundtrip_keeps_the_section_code() {
        let layout = Layout::ap_datafile();
        let mut fields = blank_row(&layout);
        set_exam_block(&layout, &mut fields, 0, ["24", "20", "4", "", "", "01"]);

        let record = parse_row(&layout, &fields, CENTURY).unwrap();
        assert_eq!(record.exams[0].section_code, Some("01".to_string()));
        let encoded = encode_row(&layout, &record, CENTURY);
        assert_eq!(encoded, fields);
    }

    #[test]
    fn parser_is_stateless_across_rows() {
        let layout = Layout::ap_datafile();
        let mut first = blank_row(&layout);
        fields_with_award(&mut first);
        let second = blank_row(&layout);

        parse_row(&layout, &first, CENTURY).unwrap();
        let record = parse_row(&layout, &second, CENTURY).unwrap();
        assert!(record.awards.is_empty());
        assert!(record.exams.is_empty());
    }

    fn fields_with_award(fields: &mut [String]) {
        fields[25] = "05".to_string();
        fields[26] = "22".to_string();
    }
}
