//! GPA Engine. All accumulation is exact decimal arithmetic; rounding
//! happens once, when the result is produced.

use rust_decimal::Decimal;

use crate::error::{EngineError, ValidationError};
use crate::models::{CourseGrade, GpaPair, GpaResult, StudentRecord, Term, TermGpa};
use crate::weights::WeightPolicy;

/// Strict mode propagates the first per-course failure and produces no
/// result. Best-effort skips the failing course and flags the result
/// incomplete, carrying the per-course issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpaMode {
    #[default]
    Strict,
    BestEffort,
}

#[derive(Debug, Default)]
struct Accumulator {
    points: Decimal,
    points_weighted: Decimal,
    credit_hours: Decimal,
}

impl Accumulator {
    fn add(&mut self, unweighted: Decimal, weighted: Decimal, credit_hours: Decimal) {
        self.points += unweighted * credit_hours;
        self.points_weighted += weighted * credit_hours;
        self.credit_hours += credit_hours;
    }

    /// Zero eligible credit means the GPA is undefined, never 0.00.
    fn gpa(&self, policy: &WeightPolicy) -> Option<GpaPair> {
        if self.credit_hours.is_zero() {
            return None;
        }
        let strategy = policy.rounding.strategy();
        Some(GpaPair {
            unweighted: round_gpa(self.points / self.credit_hours, strategy),
            weighted: round_gpa(self.points_weighted / self.credit_hours, strategy),
        })
    }
}

/// Two fractional digits at the output boundary, padded so 4 prints as 4.00.
fn round_gpa(value: Decimal, strategy: rust_decimal::RoundingStrategy) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, strategy);
    rounded.rescale(2);
    rounded
}

pub fn compute(
    record: &StudentRecord,
    policy: &WeightPolicy,
    mode: GpaMode,
) -> Result<GpaResult, EngineError> {
    let mut cumulative = Accumulator::default();
    // Insertion order of terms is the enrollment order in the record.
    let mut terms: Vec<(Term, Accumulator)> = Vec::new();
    let mut total_credit_hours = Decimal::ZERO;
    let mut credits_earned = Decimal::ZERO;
    let mut issues = Vec::new();

    for course in &record.courses {
        let resolved = policy.resolve(course.category, course.letter_grade)?;

        if !resolved.counts_toward_gpa {
            total_credit_hours += course.credit_hours;
            if course.letter_grade.earns_credit() {
                credits_earned += course.credit_hours;
            }
            continue;
        }

        if course.credit_hours <= Decimal::ZERO {
            let issue = ValidationError::NonPositiveCredits {
                course_id: course.course_id.clone(),
                credit_hours: course.credit_hours,
            };
            match mode {
                GpaMode::Strict => return Err(issue.into()),
                GpaMode::BestEffort => {
                    issues.push(issue);
                    continue;
                }
            }
        }

        total_credit_hours += course.credit_hours;
        if course.letter_grade.earns_credit() {
            credits_earned += course.credit_hours;
        }

        let unweighted = resolved.base_points.min(policy.scale_max);
        let weighted =
            (resolved.base_points + resolved.weight_adjustment).min(policy.weighted_ceiling);

        term_accumulator(&mut terms, course).add(unweighted, weighted, course.credit_hours);
        cumulative.add(unweighted, weighted, course.credit_hours);
    }

    let term_breakdown = terms
        .iter()
        .map(|(term, accum)| TermGpa {
            term: term.clone(),
            gpa: accum.gpa(policy),
            credit_hours: accum.credit_hours,
        })
        .collect();

    Ok(GpaResult {
        student_id: record.student_id.clone(),
        cumulative: cumulative.gpa(policy),
        total_credit_hours,
        gpa_credit_hours: cumulative.credit_hours,
        credits_earned,
        term_breakdown,
        incomplete: !issues.is_empty(),
        issues,
    })
}

fn term_accumulator<'a>(
    terms: &'a mut Vec<(Term, Accumulator)>,
    course: &CourseGrade,
) -> &'a mut Accumulator {
    let index = match terms.iter().position(|(term, _)| *term == course.term) {
        Some(index) => index,
        None => {
            terms.push((course.term.clone(), Accumulator::default()));
            terms.len() - 1
        }
    };
    &mut terms[index].1
}
