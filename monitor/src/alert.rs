//! Lone-woman-at-night heuristic

/// Outcome of evaluating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertDecision {
    /// 1 when the alert fires, else 0
    pub lone_women: u8,
    /// Whether the frame should be saved as evidence
    pub snapshot: bool,
}

/// Stateless combination of tracked count, attribute counts and hour of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertEvaluator {
    night_start_hour: u32,
    night_end_hour: u32,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(18, 6)
    }
}

impl AlertEvaluator {
    /// Night runs from `night_start_hour` (inclusive) to `night_end_hour`
    /// (exclusive), wrapping past midnight when start > end.
    pub fn new(night_start_hour: u32, night_end_hour: u32) -> Self {
        Self {
            night_start_hour,
            night_end_hour,
        }
    }

    pub fn is_night(&self, hour: u32) -> bool {
        if self.night_start_hour > self.night_end_hour {
            hour >= self.night_start_hour || hour < self.night_end_hour
        } else {
            hour >= self.night_start_hour && hour < self.night_end_hour
        }
    }

    pub fn is_lone(&self, tracked_count: usize) -> bool {
        tracked_count == 1
    }

    /// `men` only feeds the record; the alert depends on women alone
    pub fn evaluate(
        &self,
        tracked_count: usize,
        _men: u32,
        women: u32,
        hour: u32,
    ) -> AlertDecision {
        let fires = self.is_night(hour) && self.is_lone(tracked_count) && women == 1;

        AlertDecision {
            lone_women: u8::from(fires),
            snapshot: fires,
        }
    }
}
