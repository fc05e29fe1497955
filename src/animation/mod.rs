//! Animation
//!
//! Two independent halves that meet at the [`Cursor`]:
//!
//! - **Clip playback** ([`AnimationClip`], [`AnimationAction`],
//!   [`AnimationMixer`]): samples keyframe tracks onto scene nodes.
//! - **Choreography** ([`TimelineEngine`], [`Timeline`], [`Segment`]): typed
//!   property segments with position tokens, easing and side-effect hooks.
//!
//! One choreography segment animates the cursor; every write to it seeks the
//! mixer to `cursor * clip_duration`.

pub mod action;
pub mod binder;
pub mod clip;
pub mod cursor;
pub mod easing;
pub mod mixer;
pub mod timeline;
pub mod tracks;
pub mod tween;
pub mod values;

pub use action::{AnimationAction, TrackValue};
pub use binder::{Binder, PropertyBinding};
pub use clip::{AnimationClip, TargetPath, Track, TrackData, TrackMeta};
pub use cursor::{CURSOR_MAX, Cursor};
pub use easing::Easing;
pub use mixer::AnimationMixer;
pub use timeline::{Position, Segment, SegmentState, Timeline, TimelineBuilder, TimelineEngine, TimelineId};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use tween::{Axes, NodeProperty, SideEffect, TweenTarget, TweenValue, TweenWorld, ValueKind};
