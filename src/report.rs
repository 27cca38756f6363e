use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{AwardSummary, GpaPair, GpaResult, StudentRecord};

fn gpa_line(pair: &GpaPair) -> String {
    format!("unweighted {} / weighted {}", pair.unweighted, pair.weighted)
}

pub fn build_report(
    generated_on: NaiveDate,
    entries: &[(StudentRecord, GpaResult, AwardSummary)],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Transcript Summary Report");
    let _ = writeln!(
        output,
        "Generated on {} for {} students",
        generated_on,
        entries.len()
    );

    for (record, gpa, summary) in entries {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "## {}, {} ({})",
            record.name.last, record.name.first, record.student_id
        );

        let _ = writeln!(output);
        let _ = writeln!(output, "### GPA");
        match &gpa.cumulative {
            Some(pair) => {
                let _ = writeln!(
                    output,
                    "- Cumulative: {} across {} GPA credit hours",
                    gpa_line(pair),
                    gpa.gpa_credit_hours
                );
            }
            None => {
                let _ = writeln!(output, "- Cumulative: undefined (no GPA-eligible courses)");
            }
        }
        let _ = writeln!(
            output,
            "- Credits: {} attempted, {} earned",
            gpa.total_credit_hours, gpa.credits_earned
        );
        for term in &gpa.term_breakdown {
            match &term.gpa {
                Some(pair) => {
                    let _ = writeln!(
                        output,
                        "- {}: {} ({} credit hours)",
                        term.term,
                        gpa_line(pair),
                        term.credit_hours
                    );
                }
                None => {
                    let _ = writeln!(output, "- {}: undefined", term.term);
                }
            }
        }
        if gpa.incomplete {
            let _ = writeln!(output);
            let _ = writeln!(output, "### Skipped Courses");
            for issue in &gpa.issues {
                let _ = writeln!(output, "- {issue}");
            }
        }

        if !summary.awards.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "### Awards");
            for award in &summary.awards {
                match award.year {
                    Some(year) => {
                        let _ = writeln!(output, "- {} ({})", award.award_name, year);
                    }
                    None => {
                        let _ = writeln!(output, "- {}", award.award_name);
                    }
                }
            }
        }

        if !summary.exam_years.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "### AP Exams");
            for group in &summary.exam_years {
                let _ = writeln!(output, "- {}:", group.admin_year);
                for exam in &group.exams {
                    let _ = writeln!(output, "  - {}: {}", exam.subject_name, exam.score);
                }
                for exam in &group.subscores {
                    let _ = writeln!(
                        output,
                        "  - {}: {} (subscore)",
                        exam.subject_name, exam.score
                    );
                }
            }
        }
    }

    output
}
