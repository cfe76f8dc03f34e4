use log::trace;

use super::AlignedSentence;

/// Gaps shorter than this are treated as flicker rather than a pause
pub const DEFAULT_MAX_GAP_SECS: f64 = 1.0;

/// Extend each cue's end to the next cue's start when the silence between
/// them lies strictly inside `(0, max_gap_secs)`.
///
/// Only end times move; start times are never touched. Touching or
/// overlapping cues pass through unchanged.
pub fn smooth_gaps(aligned: &[AlignedSentence], max_gap_secs: f64) -> Vec<AlignedSentence> {
    let mut smoothed = aligned.to_vec();

    for i in 0..smoothed.len().saturating_sub(1) {
        let next_start = smoothed[i + 1].start;
        let gap = next_start - smoothed[i].end;

        if gap > 0.0 && gap < max_gap_secs {
            trace!(
                "Closing {:.3}s gap after sentence {}",
                gap, smoothed[i].sentence_index
            );
            smoothed[i].end = next_start;
        }
    }

    smoothed
}
