//! Animated counters.
//!
//! A counter rises from 0 to its target along an ease-out-quart curve
//! (`1 - (1 - p)^4`, `p` = elapsed / duration clamped to `[0, 1]`) and shows
//! the floor of the eased value. The target comes from a display value: every
//! character other than digits, `.` and `-` is dropped and the leading integer
//! is read (`"$54,230"` -> `54230`, `"32.5"` -> `32`). A target that does not
//! parse produces no animation.
//!
//! The server computes the keyframes; `static/app.js` replays them.

use std::fmt::Display;
use std::time::Duration;

use nexus_core::format_grouped_int;

use crate::config::CountUpConfig;

/// Read a counter target from a display value.
#[must_use]
pub fn parse_target(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let leading: &str = digits
        .find(|c: char| !c.is_ascii_digit())
        .map_or(digits, |end| digits.get(..end).unwrap_or_default());
    if leading.is_empty() {
        return None;
    }

    let magnitude: i64 = leading.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// `1 - (1 - p)^4`.
#[must_use]
pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Displayed value `elapsed` into an animation towards `end`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn value_at(end: i64, elapsed: Duration, duration: Duration) -> i64 {
    let eased = ease_out_quart(progress(elapsed, duration));
    (eased * end as f64).floor() as i64
}

/// One counter being animated, driven by frame timestamps.
///
/// Call [`CountUpAnimation::on_frame`] from whatever schedules frames. The
/// first frame after construction or a target change starts the clock.
#[derive(Debug, Clone)]
pub struct CountUpAnimation {
    target: Option<i64>,
    duration: Duration,
    started_at: Option<Duration>,
    value: i64,
    finished: bool,
}

impl CountUpAnimation {
    #[must_use]
    pub const fn new(target: Option<i64>, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: None,
            value: 0,
            finished: false,
        }
    }

    /// Parse the target from a display value.
    #[must_use]
    pub fn from_display(end: impl Display, duration: Duration) -> Self {
        Self::new(parse_target(&end.to_string()), duration)
    }

    /// Change the target. A different target restarts the animation from 0.
    pub const fn retarget(&mut self, target: Option<i64>) {
        let same = match (self.target, target) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        };
        if !same {
            self.target = target;
            self.started_at = None;
            self.finished = false;
        }
    }

    /// Advance to timestamp `now` and return the value to display.
    ///
    /// Returns `None` when there is nothing to animate: the target did not
    /// parse, or the animation already reached its end.
    pub fn on_frame(&mut self, now: Duration) -> Option<i64> {
        let end = self.target?;
        if self.finished {
            return None;
        }

        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        self.value = value_at(end, elapsed, self.duration);
        self.finished = elapsed >= self.duration;

        Some(self.value)
    }

    /// Last displayed value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Values at evenly spaced frames, `fps` per second, first frame at 0 and
    /// last frame at the end of the animation.
    #[must_use]
    pub fn keyframes(&self, fps: u32) -> Vec<i64> {
        let Some(end) = self.target else {
            return Vec::new();
        };

        let fps = fps.max(1);
        let frame = Duration::from_secs(1) / fps;
        let mut frames = Vec::new();
        let mut elapsed = Duration::ZERO;
        while elapsed < self.duration {
            frames.push(value_at(end, elapsed, self.duration));
            elapsed += frame;
        }
        frames.push(end);
        frames
    }
}

/// A counter ready for the templates.
#[derive(Debug, Clone)]
pub struct CountUpView {
    pub prefix: String,
    pub suffix: String,
    /// Text shown without scripting, and after the animation.
    pub final_text: String,
    /// Comma-separated keyframe values, empty when not animated.
    pub frames: String,
    pub frame_ms: u64,
}

impl CountUpView {
    /// Build a counter for `end` (any displayable value).
    #[must_use]
    pub fn new(end: impl Display, prefix: &str, suffix: &str, config: CountUpConfig) -> Self {
        let raw = end.to_string();
        let animation = CountUpAnimation::from_display(&raw, config.duration);

        let shown = animation
            .target
            .map_or_else(|| raw.clone(), format_grouped_int);
        let frames = animation
            .keyframes(config.fps)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
            final_text: format!("{prefix}{shown}{suffix}"),
            frames,
            frame_ms: 1000 / u64::from(config.fps.max(1)),
        }
    }

    #[must_use]
    pub fn plain(end: impl Display, config: CountUpConfig) -> Self {
        Self::new(end, "", "", config)
    }
}
