//! Class rank over a cohort's computed GPA results. Ranking uses the
//! cumulative weighted GPA; students with an identical GPA share a rank and
//! the next rank skips past them (two #1s, then #3).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::models::GpaResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRank {
    pub student_id: String,
    pub rank: usize,
    pub total_students: usize,
    pub weighted_gpa: Decimal,
    /// rank / total, as a percentage rounded to one digit.
    pub percentile: Decimal,
    pub decile: String,
}

/// Students with an undefined GPA cannot be ranked and are left out of both
/// the ranking and the total; callers report them separately.
pub fn class_ranks(results: &[GpaResult]) -> Vec<ClassRank> {
    let mut eligible: Vec<(&str, Decimal)> = results
        .iter()
        .filter_map(|result| {
            result
                .cumulative
                .as_ref()
                .map(|pair| (result.student_id.as_str(), pair.weighted))
        })
        .collect();
    eligible.sort_by(|a, b| b.1.cmp(&a.1));

    let total = eligible.len();
    let mut ranks = Vec::with_capacity(total);
    let mut current_rank = 1usize;
    for (index, &(student_id, gpa)) in eligible.iter().enumerate() {
        if index > 0 && gpa < eligible[index - 1].1 {
            current_rank = index + 1;
        }
        let percentile = (Decimal::from(current_rank as u64) / Decimal::from(total as u64)
            * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        ranks.push(ClassRank {
            student_id: student_id.to_string(),
            rank: current_rank,
            total_students: total,
            weighted_gpa: gpa,
            percentile,
            decile: decile_name((current_rank - 1) * 10 / total + 1),
        });
    }
    ranks
}

fn decile_name(decile: usize) -> String {
    let suffix = match decile {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{decile}{suffix} Decile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::models::GpaPair;

    fn result(student_id: &str, weighted: Option<Decimal>) -> GpaResult {
        GpaResult {
            student_id: student_id.to_string(),
            cumulative: weighted.map(|weighted| GpaPair {
                unweighted: weighted.min(dec!(4.00)),
                weighted,
            }),
            total_credit_hours: dec!(6),
            gpa_credit_hours: dec!(6),
            credits_earned: dec!(6),
            term_breakdown: Vec::new(),
            incomplete: false,
            issues: Vec::new(),
        }
    }

    #[test]
    fn ranks_descend_by_weighted_gpa() {
        let results = vec![
            result("s1", Some(dec!(3.20))),
            result("s2", Some(dec!(4.50))),
            result("s3", Some(dec!(3.80))),
        ];
        let ranks = class_ranks(&results);
        let order: Vec<(&str, usize)> = ranks
            .iter()
            .map(|r| (r.student_id.as_str(), r.rank))
            .collect();
        assert_eq!(order, vec![("s2", 1), ("s3", 2), ("s1", 3)]);
        assert_eq!(ranks[0].total_students, 3);
    }

    #[test]
    fn tied_gpas_share_a_rank_and_the_next_rank_skips() {
        let results = vec![
            result("s1", Some(dec!(4.00))),
            result("s2", Some(dec!(4.00))),
            result("s3", Some(dec!(3.50))),
        ];
        let ranks = class_ranks(&results);
        assert_eq!(ranks[0].rank, 1);
        assert_eq!(ranks[1].rank, 1);
        assert_eq!(ranks[2].rank, 3);
    }

    #[test]
    fn undefined_gpas_are_left_out_of_the_ranking() {
        let results = vec![
            result("s1", Some(dec!(3.00))),
            result("s2", None),
            result("s3", Some(dec!(2.00))),
        ];
        let ranks = class_ranks(&results);
        assert_eq!(ranks.len(), 2);
        assert!(ranks.iter().all(|r| r.student_id != "s2"));
        assert_eq!(ranks[0].total_students, 2);
    }

    #[test]
    fn percentile_and_decile_follow_the_rank() {
        let results: Vec<GpaResult> = (1..=10)
            .map(|i| result(&format!("s{i}"), Some(Decimal::from(i) / dec!(10) + dec!(3))))
            .collect();
        let ranks = class_ranks(&results);
        assert_eq!(ranks[0].percentile, dec!(10.0));
        assert_eq!(ranks[0].decile, "1st Decile");
        assert_eq!(ranks[9].percentile, dec!(100.0));
        assert_eq!(ranks[9].decile, "10th Decile");
        assert_eq!(ranks[2].decile, "3rd Decile");
    }

    #[test]
    fn single_student_cohort_is_rank_one_of_one() {
        let ranks = class_ranks(&[result("s1", Some(dec!(3.33)))]);
        assert_eq!(ranks[0].rank, 1);
        assert_eq!(ranks[0].total_students, 1);
        assert_eq!(ranks[0].percentile, dec!(100.0));
        assert_eq!(ranks[0].decile, "1st Decile");
    }
}
