use crate::requests::video_reqs::{HistoryUpdate, VideoHistoryState};

pub const REPORT_MIN_DELTA_SECONDS: u32 = 5;
pub const REPORT_MIN_INTERVAL_MS: f64 = 8_000.0;

/// Decides which player time updates become history writes.
///
/// A report goes out when the position moved at least
/// [`REPORT_MIN_DELTA_SECONDS`] from the last reported second, or
/// [`REPORT_MIN_INTERVAL_MS`] passed since the last report. The very first
/// update always reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressThrottle {
    last_second: u32,
    last_report_ms: Option<f64>,
}

impl ProgressThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_report(&self, second: u32, now_ms: f64) -> bool {
        let Some(last_report_ms) = self.last_report_ms else {
            return true;
        };
        second.abs_diff(self.last_second) >= REPORT_MIN_DELTA_SECONDS
            || now_ms - last_report_ms >= REPORT_MIN_INTERVAL_MS
    }

    /// Returns the update to send, if any, and records it as reported.
    pub fn on_time_update(
        &mut self,
        second: u32,
        duration_seconds: Option<u32>,
        now_ms: f64,
    ) -> Option<HistoryUpdate> {
        if !self.should_report(second, now_ms) {
            return None;
        }
        self.last_second = second;
        self.last_report_ms = Some(now_ms);
        Some(HistoryUpdate::progress(second, duration_seconds))
    }

    /// Playback finished: always reported, and the baseline restarts at 0.
    pub fn on_ended(&mut self, duration_seconds: Option<u32>, now_ms: f64) -> HistoryUpdate {
        self.last_second = 0;
        self.last_report_ms = Some(now_ms);
        HistoryUpdate::completed(duration_seconds)
    }
}

/// Whole seconds from a media element's `currentTime`/`duration`.
pub fn whole_seconds(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 {
        Some(value.floor() as u32)
    } else {
        None
    }
}

/// Where to resume a video, if the viewer stopped partway through it.
pub fn resume_position(history: Option<&VideoHistoryState>) -> Option<f64> {
    history
        .filter(|history| !history.completed)
        .map(|history| history.progress_seconds)
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
}
