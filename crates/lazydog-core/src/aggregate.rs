//! Derived rating statistics on a resource.
//!
//! The summary is always recomputed from the full current set of scores,
//! never adjusted incrementally, so re-running it is harmless and it stays
//! correct across concurrent edits and deletes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, feedback::Score, store::Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
  /// Mean score rounded to one decimal place; `0.0` when unrated.
  pub average_score: f64,
  pub score_count:   u32,
}

impl ScoreSummary {
  pub const EMPTY: Self = Self { average_score: 0.0, score_count: 0 };

  pub fn from_scores(scores: &[Score]) -> Self {
    let count = scores.len() as u64;
    if count == 0 {
      return Self::EMPTY;
    }
    let sum: u64 = scores.iter().map(|s| u64::from(s.get())).sum();

    Self {
      average_score: round_mean_to_tenths(sum, count),
      score_count:   count as u32,
    }
  }
}

/// `sum / count` as an `f64`, rounded to one decimal exactly as the decimal
/// expansion of that `f64` would round with ties going to the even digit.
///
/// A tie is only possible when the mean is a quarter (`x.25`, `x.75`). Other
/// means that are halfway in decimal (`x.15`) are not representable, so the
/// stored `f64` lies just above or below the midpoint and rounds that way.
fn round_mean_to_tenths(sum: u64, count: u64) -> f64 {
  let mean = sum as f64 / count as f64;
  let floor = 10 * sum / count;
  let twice_rem = 2 * (10 * sum % count);

  let tenths = if twice_rem < count {
    floor
  } else if twice_rem > count {
    floor + 1
  } else {
    // Sign of `mean - sum / count`, computed without intermediate rounding.
    let error = mean.mul_add(count as f64, -(sum as f64));
    if error < 0.0 || (error == 0.0 && floor % 2 == 0) {
      floor
    } else {
      floor + 1
    }
  };
  tenths as f64 / 10.0
}

/// Reload every score for `resource_id` and persist the derived summary.
///
/// Call this as the last step of any transaction that inserted, re-scored or
/// deleted a rating on the resource.
pub fn recompute(tx: &mut dyn Transaction, resource_id: Uuid) -> Result<ScoreSummary> {
  let scores = tx.scores_for_resource(resource_id)?;
  let summary = ScoreSummary::from_scores(&scores);
  tx.set_resource_aggregate(resource_id, summary)?;
  tracing::debug!(
    %resource_id,
    average_score = summary.average_score,
    score_count = summary.score_count,
    "aggregate recomputed"
  );
  Ok(summary)
}
