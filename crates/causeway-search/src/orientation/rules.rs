//! Pure per-pair decision rules.

use causeway_core::constants::{CANDIDATE_RATIO_CEILING, CANDIDATE_RATIO_GAP, STRONG_ASYMMETRY_RATIO};
use causeway_core::models::FixedOrientation;
use causeway_core::FeedbackTag;

use crate::moments::{OneSidedMoments, PairMoments};

/// What to write into the output graph for an ordered pair `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// `x -> y`
    Forward,
    /// `y -> x`
    Backward,
    Undirected,
    TwoCycle(FeedbackTag),
    /// No edge.
    Absent,
}

/// Which rule produced a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Knowledge,
    SignDisagreement,
    StrongAsymmetry,
    SkewDirection,
    Tie,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::SignDisagreement => "sign_disagreement",
            Self::StrongAsymmetry => "strong_asymmetry",
            Self::SkewDirection => "skew_direction",
            Self::Tie => "tie",
        }
    }
}

/// A pair reaches the orientation rules if it is adjacent, or if one of its
/// slope ratios is small while the two ratios differ markedly.
pub fn is_candidate(adjacent: bool, m: &OneSidedMoments) -> bool {
    let (q1, q2) = (m.q1.abs(), m.q2.abs());
    adjacent
        || ((q1 < CANDIDATE_RATIO_CEILING || q2 < CANDIDATE_RATIO_CEILING)
            && (q1 - q2).abs() > CANDIDATE_RATIO_GAP)
}

/// The edge knowledge alone imposes.
pub fn knowledge_decision(fixed: FixedOrientation) -> Decision {
    match fixed {
        FixedOrientation::Forward => Decision::Forward,
        FixedOrientation::Backward => Decision::Backward,
        FixedOrientation::Both => Decision::TwoCycle(FeedbackTag::Required),
        FixedOrientation::Excluded => Decision::Absent,
    }
}

/// Decide the edge for a candidate pair. Knowledge wins over every
/// statistical rule; the statistical rules apply in order.
pub fn decide(fixed: Option<FixedOrientation>, m: &PairMoments) -> (Decision, Rule) {
    if let Some(fixed) = fixed {
        return (knowledge_decision(fixed), Rule::Knowledge);
    }

    if m.sign_disagreement() {
        return (
            Decision::TwoCycle(FeedbackTag::SignDisagreement),
            Rule::SignDisagreement,
        );
    }

    let (q1, q2) = (m.one_sided.q1, m.one_sided.q2);
    if q1.abs() > STRONG_ASYMMETRY_RATIO && q2.abs() > STRONG_ASYMMETRY_RATIO {
        return (
            Decision::TwoCycle(FeedbackTag::StrongAsymmetry),
            Rule::StrongAsymmetry,
        );
    }

    let score = m.skew_score();
    if score > 0.0 {
        (Decision::Forward, Rule::SkewDirection)
    } else if score < 0.0 {
        (Decision::Backward, Rule::SkewDirection)
    } else {
        (Decision::Undirected, Rule::Tie)
    }
}
