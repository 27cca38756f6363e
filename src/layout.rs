//! Declared row layouts. A layout fixes the field count and the column
//! offsets the parser reads; rows that do not match are rejected outright.

use crate::models::StudentRecord;

pub const AWARD_SLOTS: usize = 6;

#[derive(Debug, Clone)]
pub struct Layout {
    pub version: &'static str,
    pub field_count: usize,
    pub student_id: usize,
    pub last_name: usize,
    pub first_name: usize,
    /// Six (type code, year) pairs.
    pub award_slots: [(usize, usize); AWARD_SLOTS],
    /// First field of the first exam block.
    pub exam_base: usize,
    /// Fields per block: admin year, subject code, score, irregularity 1,
    /// irregularity 2, section code (unused).
    pub exam_block_len: usize,
    pub exam_blocks: usize,
}

impl Layout {
    /// College Board AP Student Datafile layout: 244 double-quoted fields,
    /// award pairs at columns 26-37, exam blocks of six starting at column 59.
    pub fn ap_datafile() -> Self {
        let mut award_slots = [(0, 0); AWARD_SLOTS];
        for (i, slot) in award_slots.iter_mut().enumerate() {
            *slot = (25 + i * 2, 26 + i * 2);
        }
        Layout {
            version: "ap-2025",
            field_count: 244,
            student_id: 0,
            last_name: 1,
            first_name: 2,
            award_slots,
            exam_base: 58,
            exam_block_len: 6,
            exam_blocks: 30,
        }
    }

    pub fn for_version(version: &str) -> Option<Self> {
        match version {
            "ap-2025" => Some(Self::ap_datafile()),
            _ => None,
        }
    }
}

/// Writes a record back into a field vector of this layout's shape. Decoding
/// a row and encoding the result reproduces every populated field.
pub fn encode_row(layout: &Layout, record: &StudentRecord, century: u16) -> Vec<String> {
    let mut fields = vec![String::new(); layout.field_count];
    fields[layout.student_id] = record.student_id.clone();
    fields[layout.last_name] = record.name.last.clone();
    fields[layout.first_name] = record.name.first.clone();

    for (award, &(type_idx, year_idx)) in record.awards.iter().zip(layout.award_slots.iter()) {
        fields[type_idx] = format!("{:02}", award.type_code);
        if let Some(year) = award.year {
            fields[year_idx] = format!("{:02}", year.saturating_sub(century));
        }
    }

    for (i, exam) in record.exams.iter().take(layout.exam_blocks).enumerate() {
        let base = layout.exam_base + i * layout.exam_block_len;
        fields[base] = format!("{:02}", exam.admin_year.saturating_sub(century));
        fields[base + 1] = format!("{:02}", exam.subject_code);
        fields[base + 2] = exam.score.to_string();
        // Irregularity slots are positional: slot 2 may be set alone.
        for (j, code) in exam.irregularity_codes.iter().enumerate() {
            if let Some(code) = code {
                fields[base + 3 + j] = code.clone();
            }
        }
        if let Some(code) = &exam.section_code {
            fields[base + 5] = code.clone();
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ap_datafile_offsets_match_published_layout() {
        let layout = Layout::ap_datafile();
        assert_eq!(layout.field_count, 244);
        assert_eq!(layout.award_slots[0], (25, 26));
        assert_eq!(layout.award_slots[5], (35, 36));
        assert_eq!(layout.exam_base, 58);
        assert_eq!(layout.exam_blocks, 30);
    }

    #[test]
    fn version_selector_rejects_unknown_layouts() {
        assert!(Layout::for_version("ap-2025").is_some());
        assert!(Layout::for_version("ap-1999").is_none());
    }
}
