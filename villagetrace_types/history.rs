use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{buildings::Points, errors::AppError};

/// Village points recorded at a given time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub recorded_at: DateTime<Utc>,
    pub points: Points,
}

/// Recorded points history of one village.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VillageHistory {
    snapshots: Vec<HistorySnapshot>,
}

impl VillageHistory {
    pub fn new(mut snapshots: Vec<HistorySnapshot>) -> Self {
        snapshots.sort_by_key(|s| s.recorded_at);
        Self { snapshots }
    }

    pub fn snapshots(&self) -> &[HistorySnapshot] {
        &self.snapshots
    }

    /// Returns the positive point jumps between consecutive snapshots, oldest first.
    ///
    /// Snapshots without any change are skipped. A drop in points means a building
    /// was destroyed or downgraded, which an upgrade-only reconstruction can't explain.
    pub fn score_increases(&self) -> Result<Vec<Points>, AppError> {
        let mut increases = Vec::new();
        for pair in self.snapshots.windows(2) {
            push_increase(&mut increases, pair[0].points, &pair[1])?;
        }
        Ok(increases)
    }

    /// Like [`VillageHistory::score_increases`], but counting from a freshly founded
    /// village worth `founding_points`, so the first jump covers whatever was built
    /// before the first snapshot.
    pub fn score_increases_since_founding(
        &self,
        founding_points: Points,
    ) -> Result<Vec<Points>, AppError> {
        let Some(first) = self.snapshots.first() else {
            return Ok(Vec::new());
        };

        let mut increases = Vec::new();
        push_increase(&mut increases, founding_points, first)?;
        increases.extend(self.score_increases()?);
        Ok(increases)
    }
}

fn push_increase(
    increases: &mut Vec<Points>,
    previous: Points,
    next: &HistorySnapshot,
) -> Result<(), AppError> {
    if next.points < previous {
        return Err(AppError::ScoreDecrease {
            from: previous,
            to: next.points,
            at: next.recorded_at,
        });
    }
    if next.points > previous {
        increases.push(next.points - previous);
    }
    Ok(())
}
