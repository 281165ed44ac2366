//! Derived channel statistics.
//!
//! Every function is total: empty video or clip lists and zero followers
//! produce a defined zero or sentinel value rather than an error. Percentage
//! metrics are clamped to `[0, 100]` before rounding.

use chrono::{DateTime, TimeDelta, Utc};

use crate::channel::{Clip, Video};

/// Popular category reported when there are no videos to tally.
pub const NO_CATEGORY: &str = "N/A";

/// Length of the trailing window counted by [`recent_views`].
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Return rate reported when fewer than three videos are available.
pub const BASELINE_RETURN_RATE: u32 = 70;

/// Return rate reported when the bottom third of videos has no views.
pub const FLAT_TAIL_RETURN_RATE: u32 = 75;

/// Upbeat one-liner describing the follower count.
///
/// Counts of 1000 and above are shown in thousands with one decimal,
/// rounded half-up (`1250` → `1.3k`).
#[must_use]
pub fn follower_text(followers: u64) -> String {
    if followers < 100 {
        format!("You've built a dedicated starting community of {followers} supporters!")
    } else if followers < 1000 {
        format!("Your growing community of {followers} followers believes in your content!")
    } else {
        // Integer tenths of a thousand keep the half-up rounding exact.
        let tenths = followers.saturating_add(50) / 100;
        format!(
            "You've inspired an impressive {}.{}k people to join your journey!",
            tenths / 10,
            tenths % 10
        )
    }
}

/// Mean video views as a percentage of followers, one decimal place.
#[must_use]
pub fn engagement_rate(videos: &[Video], followers: u64) -> f64 {
    if videos.is_empty() || followers == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let rate = mean_views(videos) / followers as f64 * 100.0;
    round_to_tenth(rate.clamp(0.0, 100.0))
}

/// Consistency between the best and worst performing video, as a 0–100 score.
///
/// The spread `max / min` is weighted `0.7 * spread + 0.3`. A single video, or
/// a list where every video has zero views, counts as a spread of 1. Input
/// order does not matter.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn loyalty_score(videos: &[Video]) -> u32 {
    let views = videos.iter().map(|v| v.view_count);
    let (Some(max), Some(min)) = (views.clone().max(), views.min()) else {
        return 0;
    };

    let spread = if videos.len() == 1 || max == 0 {
        1.0
    } else if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };

    let score = ((spread * 0.7 + 0.3) * 100.0).clamp(0.0, 100.0);
    score.round() as u32
}

/// Mean view count per video, rounded to the nearest integer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn average_viewers(videos: &[Video]) -> u64 {
    if videos.is_empty() {
        return 0;
    }
    mean_views(videos).round() as u64
}

/// The category with the most videos.
///
/// Ties go to the category seen first in input order. Returns
/// [`NO_CATEGORY`] for an empty list.
#[must_use]
pub fn popular_category(videos: &[Video]) -> String {
    let mut tally = CategoryTally::default();
    for video in videos {
        tally.record(video.category());
    }
    tally
        .leader()
        .map_or_else(|| NO_CATEGORY.to_string(), str::to_string)
}

/// Total views of videos created within the last [`RECENT_WINDOW_DAYS`]
/// days before `now` (inclusive of the window start). Saturates at
/// `u64::MAX`.
#[must_use]
pub fn recent_views(videos: &[Video], now: DateTime<Utc>) -> u64 {
    let cutoff = now - TimeDelta::days(RECENT_WINDOW_DAYS);
    videos
        .iter()
        .filter(|v| v.created_at >= cutoff)
        .map(|v| v.view_count)
        .fold(0, u64::saturating_add)
}

/// Total views across all clips. Saturates at `u64::MAX`.
#[must_use]
pub fn total_clip_views(clips: &[Clip]) -> u64 {
    clips
        .iter()
        .map(|c| c.view_count)
        .fold(0, u64::saturating_add)
}

/// How much the best videos out-draw the weakest ones, mapped onto 65–95.
///
/// Views are sorted descending; the top `ceil(n/3)` and bottom `floor(n/3)`
/// are averaged and their ratio (capped at 3) is scaled linearly.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn return_rate(videos: &[Video]) -> u32 {
    let n = videos.len();
    if n < 3 {
        return BASELINE_RETURN_RATE;
    }

    let mut views: Vec<u64> = videos.iter().map(|v| v.view_count).collect();
    views.sort_unstable_by(|a, b| b.cmp(a));

    let top_len = n.div_ceil(3);
    let bottom_len = n / 3;
    let top_sum = wide_sum(views[..top_len].iter().copied());
    let bottom_sum = wide_sum(views[n - bottom_len..].iter().copied());

    if bottom_sum == 0 {
        return FLAT_TAIL_RETURN_RATE;
    }

    let top_mean = top_sum as f64 / top_len as f64;
    let bottom_mean = bottom_sum as f64 / bottom_len as f64;
    let ratio = (top_mean / bottom_mean).min(3.0);

    (65.0 + (ratio / 3.0) * 30.0).round() as u32
}

#[allow(clippy::cast_precision_loss)]
fn mean_views(videos: &[Video]) -> f64 {
    let total = wide_sum(videos.iter().map(|v| v.view_count));
    total as f64 / videos.len() as f64
}

/// Sum in `u128` so any realistic number of `u64` counts cannot overflow.
fn wide_sum(counts: impl Iterator<Item = u64>) -> u128 {
    counts.map(u128::from).sum()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Insertion-ordered category counts.
#[derive(Debug, Default)]
struct CategoryTally<'a> {
    entries: Vec<(&'a str, usize)>,
}

impl<'a> CategoryTally<'a> {
    fn record(&mut self, category: &'a str) {
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((category, 1)),
        }
    }

    /// Highest count; on a tie the earliest entry wins because only a
    /// strictly greater count replaces the current leader.
    fn leader(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &(name, count) in &self.entries {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name)
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
