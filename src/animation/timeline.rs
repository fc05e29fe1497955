//! Timeline Engine
//!
//! Sequences typed property segments on a single clock.
//!
//! # Start Resolution
//!
//! Each segment carries a [`Position`] token. When a timeline is built the
//! tokens are folded in declaration order into local start times:
//!
//! | Token                      | Start                          |
//! |----------------------------|--------------------------------|
//! | `Absolute(t)`              | `t`                            |
//! | `AfterPreviousStart(d)`    | `prev.start + d`               |
//! | `AfterPreviousEnd(d)`      | `prev.start + prev.duration + d` |
//! | `AfterStartOf { index, offset }` | `segments[index].start + offset` |
//!
//! The first segment sees a predecessor that starts and ends at 0. The
//! timeline `delay` then shifts everything, and scheduling adds an anchor on
//! the engine clock. Nothing here ever looks at wall-clock time.
//!
//! # Segment State Machine
//!
//! ```text
//! Pending ──(now ≥ start, target readable)──▶ Active ──(progress = 1)──▶ Completed
//!    │                                          │
//!    └──(target missing)──▶ Skipped ◀──(target vanished)
//! ```
//!
//! Hooks are tied to transitions: `on_start` on entering Active, `on_update`
//! on every tick spent Active (including the completing one), `on_complete`
//! on entering Completed. A segment therefore starts and completes at most
//! once.

use crate::animation::easing::Easing;
use crate::animation::tween::{Axes, SideEffect, TweenTarget, TweenValue, TweenWorld};
use crate::errors::{Result, StageError};

/// Anchoring rule of a segment relative to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Fixed local time.
    Absolute(f64),
    /// Offset from the start of the immediately preceding segment only; use
    /// [`Position::AfterStartOf`] to anchor further back.
    AfterPreviousStart(f64),
    /// Offset from the previous segment's end.
    AfterPreviousEnd(f64),
    /// Offset from the start of an earlier segment, by declaration index.
    AfterStartOf { index: usize, offset: f64 },
}

impl Default for Position {
    fn default() -> Self {
        Self::AfterPreviousEnd(0.0)
    }
}

/// One timed property animation. Immutable once its timeline is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub target: TweenTarget,
    pub to: TweenValue,
    pub axes: Axes,
    /// Seconds; zero-length segments jump straight to their end value.
    pub duration: f64,
    pub position: Position,
    pub easing: Easing,
    pub on_start: Option<SideEffect>,
    pub on_update: Option<SideEffect>,
    pub on_complete: Option<SideEffect>,
}

impl Segment {
    #[must_use]
    pub fn new(target: TweenTarget, to: impl Into<TweenValue>, duration: f64) -> Self {
        Self {
            target,
            to: to.into(),
            axes: Axes::XYZ,
            duration: duration.max(0.0),
            position: Position::default(),
            easing: Easing::default(),
            on_start: None,
            on_update: None,
            on_complete: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Restricts a vector segment to some components.
    #[must_use]
    pub fn axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    #[must_use]
    pub fn on_start(mut self, effect: SideEffect) -> Self {
        self.on_start = Some(effect);
        self
    }

    #[must_use]
    pub fn on_update(mut self, effect: SideEffect) -> Self {
        self.on_update = Some(effect);
        self
    }

    #[must_use]
    pub fn on_complete(mut self, effect: SideEffect) -> Self {
        self.on_complete = Some(effect);
        self
    }
}

/// Folds position tokens into local start times, in declaration order.
///
/// Takes `(position, duration)` pairs so it can be used on its own.
#[must_use]
pub fn resolve_starts(entries: &[(Position, f64)]) -> Vec<f64> {
    let mut starts = Vec::with_capacity(entries.len());
    let (mut prev_start, mut prev_end) = (0.0_f64, 0.0_f64);

    for &(position, duration) in entries {
        let start = match position {
            Position::Absolute(t) => t,
            Position::AfterPreviousStart(d) => prev_start + d,
            Position::AfterPreviousEnd(d) => prev_end + d,
            // Forward references are rejected by `TimelineBuilder::build`.
            Position::AfterStartOf { index, offset } => starts.get(index).copied().unwrap_or(0.0) + offset,
        };
        starts.push(start);
        prev_start = start;
        prev_end = start + duration;
    }
    starts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Pending,
    Active,
    Completed,
    /// Target was missing; no further hooks fire.
    Skipped,
}

impl SegmentState {
    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    segment: Segment,
    start: f64,
    state: SegmentState,
    initial: Option<TweenValue>,
}

/// Collects segments before start times are resolved.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    label: String,
    delay: f64,
    segments: Vec<Segment>,
    on_complete: Option<SideEffect>,
}

impl TimelineBuilder {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// Shifts the whole timeline later by `delay` seconds.
    #[must_use]
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    #[must_use]
    pub fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Fired once every segment has completed or been skipped.
    #[must_use]
    pub fn on_complete(mut self, effect: SideEffect) -> Self {
        self.on_complete = Some(effect);
        self
    }

    /// Checks target/value pairing and resolves start times.
    pub fn build(self) -> Result<Timeline> {
        for (i, segment) in self.segments.iter().enumerate() {
            if let Position::AfterStartOf { index, .. } = segment.position
                && index >= i
            {
                return Err(StageError::Config(format!(
                    "timeline '{}' segment {i}: anchors to segment {index}, which is not earlier",
                    self.label
                )));
            }
            let expected = segment.target.value_kind();
            if segment.to.kind() != expected {
                return Err(StageError::Config(format!(
                    "timeline '{}' segment {i}: {:?} expects {expected:?}, got {:?}",
                    self.label,
                    segment.target,
                    segment.to.kind()
                )));
            }
        }

        let tokens: Vec<(Position, f64)> = self.segments.iter().map(|s| (s.position, s.duration)).collect();
        let starts = resolve_starts(&tokens);

        let entries = self
            .segments
            .into_iter()
            .zip(starts)
            .map(|(segment, start)| Entry {
                segment,
                start,
                state: SegmentState::Pending,
                initial: None,
            })
            .collect();

        Ok(Timeline {
            label: self.label,
            delay: self.delay,
            entries,
            on_complete: self.on_complete,
            finished: false,
        })
    }
}

/// A resolved, schedulable sequence of segments.
#[derive(Debug, Clone)]
pub struct Timeline {
    label: String,
    delay: f64,
    entries: Vec<Entry>,
    on_complete: Option<SideEffect>,
    finished: bool,
}

impl Timeline {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn delay(&self) -> f64 {
        self.delay
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved start of each segment, relative to the end of the delay.
    #[must_use]
    pub fn local_starts(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.start).collect()
    }

    /// Earliest segment start including the delay.
    #[must_use]
    pub fn start_offset(&self) -> f64 {
        self.delay + self.entries.iter().map(|e| e.start).reduce(f64::min).unwrap_or(0.0)
    }

    /// Latest segment end including the delay.
    #[must_use]
    pub fn end_offset(&self) -> f64 {
        self.delay
            + self
                .entries
                .iter()
                .map(|e| e.start + e.segment.duration)
                .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<SegmentState> {
        self.entries.get(index).map(|e| e.state)
    }

    /// All segments settled (or the timeline was cleared).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drops every segment. Effects that already fired stay applied.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.on_complete = None;
        self.finished = true;
    }

    /// Evaluates the timeline at local time `now` (delay already removed).
    fn evaluate(&mut self, now: f64, world: &mut dyn TweenWorld) {
        if self.finished {
            return;
        }

        for entry in &mut self.entries {
            if entry.state == SegmentState::Pending {
                if now < entry.start {
                    continue;
                }
                let Some(initial) = world.read(entry.segment.target) else {
                    log::debug!(
                        "Timeline '{}': target {:?} missing at start, segment skipped",
                        self.label,
                        entry.segment.target
                    );
                    entry.state = SegmentState::Skipped;
                    continue;
                };
                entry.initial = Some(initial);
                entry.state = SegmentState::Active;
                if let Some(effect) = &entry.segment.on_start {
                    world.apply(effect);
                }
            }

            if entry.state != SegmentState::Active {
                continue;
            }

            let raw = if entry.segment.duration > 0.0 {
                ((now - entry.start) / entry.segment.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let progress = entry.segment.easing.apply(raw as f32);

            let Some(initial) = entry.initial else {
                entry.state = SegmentState::Skipped;
                continue;
            };
            let value = TweenValue::blend(initial, entry.segment.to, progress, entry.segment.axes)
                .unwrap_or(entry.segment.to);

            if !world.write(entry.segment.target, value) {
                log::debug!(
                    "Timeline '{}': target {:?} vanished mid-segment",
                    self.label,
                    entry.segment.target
                );
                entry.state = SegmentState::Skipped;
                continue;
            }

            if let Some(effect) = &entry.segment.on_update {
                world.apply(effect);
            }

            if raw >= 1.0 {
                debug_assert_eq!(entry.state, SegmentState::Active, "segment completed twice");
                entry.state = SegmentState::Completed;
                if let Some(effect) = &entry.segment.on_complete {
                    world.apply(effect);
                }
            }
        }

        if self.entries.iter().all(|e| e.state.is_settled()) {
            self.finished = true;
            if let Some(effect) = self.on_complete.take() {
                world.apply(&effect);
            }
        }
    }
}

/// Handle of a scheduled timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(usize);

#[derive(Debug)]
struct Scheduled {
    id: TimelineId,
    anchor: f64,
    timeline: Timeline,
}

/// Owns scheduled timelines and the clock that drives them.
#[derive(Debug, Default)]
pub struct TimelineEngine {
    clock: f64,
    scheduled: Vec<Scheduled>,
    next_id: usize,
}

impl TimelineEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine time in seconds.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Schedules `timeline` to begin now.
    pub fn schedule(&mut self, timeline: Timeline) -> TimelineId {
        self.schedule_at(timeline, self.clock)
    }

    /// Schedules `timeline` with its origin at engine time `anchor`.
    pub fn schedule_at(&mut self, timeline: Timeline, anchor: f64) -> TimelineId {
        let id = TimelineId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "Scheduled timeline '{}' ({} segments) at {:.3}s",
            timeline.label(),
            timeline.len(),
            anchor + timeline.start_offset()
        );
        self.scheduled.push(Scheduled { id, anchor, timeline });
        id
    }

    #[must_use]
    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.scheduled.iter().find(|s| s.id == id).map(|s| &s.timeline)
    }

    /// Engine time at which the first segment of `id` starts.
    #[must_use]
    pub fn absolute_start(&self, id: TimelineId) -> Option<f64> {
        self.scheduled
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.anchor + s.timeline.start_offset())
    }

    /// Engine time at which the last segment of `id` ends.
    #[must_use]
    pub fn absolute_end(&self, id: TimelineId) -> Option<f64> {
        self.scheduled
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.anchor + s.timeline.end_offset())
    }

    /// Clears the segment list of `id`. Returns `false` for unknown ids.
    pub fn cancel(&mut self, id: TimelineId) -> bool {
        match self.scheduled.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.timeline.clear();
                true
            }
            None => false,
        }
    }

    /// Every scheduled timeline has finished.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scheduled.iter().all(|s| s.timeline.is_finished())
    }

    /// Moves the clock by `dt` seconds and evaluates every timeline.
    ///
    /// Timelines are visited in scheduling order; segments inside a timeline
    /// in declaration order.
    pub fn advance(&mut self, dt: f64, world: &mut dyn TweenWorld) {
        self.clock += dt.max(0.0);
        let clock = self.clock;

        for s in &mut self.scheduled {
            let local = clock - s.anchor - s.timeline.delay;
            if local < 0.0 {
                continue;
            }
            s.timeline.evaluate(local, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_and_start_anchors() {
        let starts = resolve_starts(&[
            (Position::Absolute(0.0), 0.2),
            (Position::AfterPreviousEnd(0.0), 0.2),
            (Position::AfterPreviousStart(1.0), 5.0),
        ]);
        assert_eq!(starts, vec![0.0, 0.2, 1.2]);
    }

    #[test]
    fn named_anchor_reaches_past_the_previous_segment() {
        let starts = resolve_starts(&[
            (Position::Absolute(0.0), 0.2),
            (Position::AfterPreviousEnd(0.0), 0.2),
            (Position::AfterStartOf { index: 0, offset: 1.0 }, 5.0),
        ]);
        assert_eq!(starts, vec![0.0, 0.2, 1.0]);
    }

    #[test]
    fn forward_anchor_is_rejected() {
        let result = TimelineBuilder::new("bad")
            .push(Segment::new(TweenTarget::Exposure, 1.0, 1.0).at(Position::AfterStartOf { index: 0, offset: 0.0 }))
            .build();
        assert!(matches!(result, Err(StageError::Config(_))));
    }

    #[test]
    fn first_segment_chains_from_zero() {
        let starts = resolve_starts(&[(Position::AfterPreviousEnd(0.5), 1.0), (Position::default(), 1.0)]);
        assert_eq!(starts, vec![0.5, 1.5]);
    }

    #[test]
    fn empty_timeline_offsets() {
        let timeline = TimelineBuilder::new("empty").delay(2.0).build().unwrap();
        assert!(timeline.is_empty());
        assert_eq!(timeline.end_offset(), 2.0);
    }
}
