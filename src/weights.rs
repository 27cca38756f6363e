//! Weight Resolver: maps a course category and letter grade to base points,
//! a category adjustment, and a counts-toward-GPA flag under a configurable
//! policy. Institutions supply their own policy as JSON; the defaults match
//! the common +0.5 Honors / +1.0 AP-IB scheme on a 4.0 base scale.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::ComputationError;
use crate::models::{CourseCategory, LetterGrade};
use crate::tables;

/// Rounding applied when a GPA leaves the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    HalfUp,
    HalfEven,
}

impl RoundingMode {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeightPolicy {
    /// Base grade scale maximum.
    pub scale_max: Decimal,
    /// Per-course weighted points are clamped here, so a +1.0 adjustment
    /// never pushes a course past 5.0 on the default scale.
    pub weighted_ceiling: Decimal,
    pub rounding: RoundingMode,
    pub adjustments: HashMap<CourseCategory, Decimal>,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        let adjustments = HashMap::from([
            (CourseCategory::Standard, Decimal::ZERO),
            (CourseCategory::Honors, dec!(0.5)),
            (CourseCategory::Ap, dec!(1.0)),
            (CourseCategory::Ib, dec!(1.0)),
            (CourseCategory::Other, Decimal::ZERO),
        ]);
        WeightPolicy {
            scale_max: dec!(4.0),
            weighted_ceiling: dec!(5.0),
            rounding: RoundingMode::HalfUp,
            adjustments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWeight {
    pub base_points: Decimal,
    pub weight_adjustment: Decimal,
    pub counts_toward_gpa: bool,
}

impl WeightPolicy {
    /// The adjustment applies to the weighted GPA only, never to unweighted.
    /// A category missing from the policy table is a configuration fault and
    /// is never silently defaulted to zero.
    pub fn resolve(
        &self,
        category: CourseCategory,
        grade: LetterGrade,
    ) -> Result<ResolvedWeight, ComputationError> {
        let adjustment = *self
            .adjustments
            .get(&category)
            .ok_or(ComputationError::MissingCategory { category })?;
        Ok(match tables::base_points(grade) {
            Some(base) => ResolvedWeight {
                base_points: base,
                weight_adjustment: adjustment,
                counts_toward_gpa: true,
            },
            // P/NP, Incomplete, and Withdrawn keep their credit hours on the
            // transcript but stay out of both GPA numerator and denominator.
            None => ResolvedWeight {
                base_points: Decimal::ZERO,
                weight_adjustment: adjustment,
                counts_toward_gpa: false,
            },
        })
    }
}
