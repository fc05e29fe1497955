//! The fixed choreography.
//!
//! ```text
//! intro (after `intro_delay`)
//!   0.0  scale 1.1 ┐ exposure = 0          pulse
//!   0.0  tilt 0.05 ┘
//!   0.2  scale 1.0 ┐ overlay removed
//!   0.2  tilt 0    ┘
//!   1.4  exposure → flare (expo-in, 1s)
//!   3.4  cursor → 0.999 ┐ exposure = settle  (expo-out)
//!   3.4  camera lift    ┘ camera released
//! reveal (anchored at the intro end)
//!   camera settle
//!   member i: position → 0 (+spin), then scale → reveal_scale, each after i·stagger
//! ```

use glam::Vec3;

use crate::animation::cursor::CURSOR_MAX;
use crate::animation::easing::Easing;
use crate::animation::timeline::{Position, Segment, Timeline, TimelineBuilder};
use crate::animation::tween::{Axes, NodeProperty, SideEffect, TweenTarget};
use crate::errors::Result;
use crate::scene::NodeKey;
use crate::settings::ChoreographyConfig;

/// Length of each half of the opening pulse.
pub const PULSE_DURATION: f64 = 0.2;
/// Peak uniform scale of the pulse.
pub const PULSE_SCALE: f32 = 1.1;
/// Peak Euler tilt of the pulse (radians, every axis).
pub const PULSE_TILT: f32 = 0.05;
/// Pause between the intro phases.
pub const BEAT: f64 = 1.0;
pub const FLARE_DURATION: f64 = 1.0;
/// Camera height and distance reached during the scrub (x is untouched).
pub const CAMERA_LIFT: Vec3 = Vec3::new(0.0, 5.0, 6.0);

pub const INTRO_COMPLETE: &str = "intro complete";

/// Pulse, flare, then scrub while the camera lifts.
pub fn intro(config: &ChoreographyConfig, model: NodeKey, overlay: NodeKey) -> Result<Timeline> {
    let scale = TweenTarget::Node(model, NodeProperty::Scale);
    let tilt = TweenTarget::Node(model, NodeProperty::Rotation);

    TimelineBuilder::new("intro")
        .delay(config.intro_delay)
        .push(Segment::new(scale, Vec3::splat(PULSE_SCALE), PULSE_DURATION).on_start(SideEffect::SetExposure(0.0)))
        .push(Segment::new(tilt, Vec3::splat(PULSE_TILT), PULSE_DURATION).at(Position::AfterPreviousStart(0.0)))
        .push(Segment::new(scale, Vec3::ONE, PULSE_DURATION).on_start(SideEffect::RemoveNode(overlay)))
        .push(Segment::new(tilt, Vec3::ZERO, PULSE_DURATION).at(Position::AfterPreviousStart(0.0)))
        .push(
            Segment::new(TweenTarget::Exposure, config.flare_exposure, FLARE_DURATION)
                .at(Position::AfterPreviousEnd(BEAT))
                .ease(Easing::ExpoIn),
        )
        .push(
            Segment::new(TweenTarget::Cursor, CURSOR_MAX, config.scrub_duration)
                .at(Position::AfterPreviousEnd(BEAT))
                .ease(Easing::ExpoOut)
                .on_start(SideEffect::SetExposure(config.settle_exposure)),
        )
        .push(
            Segment::new(TweenTarget::CameraPosition, CAMERA_LIFT, config.scrub_duration)
                .axes(Axes::Y | Axes::Z)
                .at(Position::AfterPreviousStart(0.0))
                .ease(Easing::ExpoOut)
                .on_start(SideEffect::ReleaseCamera),
        )
        .on_complete(SideEffect::Milestone(INTRO_COMPLETE))
        .build()
}

/// Camera settle of the reveal.
pub fn reveal_camera(config: &ChoreographyConfig) -> Result<Timeline> {
    TimelineBuilder::new("reveal camera")
        .push(
            Segment::new(
                TweenTarget::CameraPosition,
                Vec3::from_array(config.reveal_camera),
                config.reveal_duration,
            )
            .ease(Easing::ExpoOut),
        )
        .build()
}

/// One two-segment chain per member, staggered by traversal index.
///
/// All chains are meant to be scheduled at the same anchor; chain `i` then
/// starts `i * stagger` after it.
pub fn reveal_cascade(config: &ChoreographyConfig, members: &[NodeKey]) -> Result<Vec<Timeline>> {
    let spin = Vec3::splat(config.reveal_spin);

    members
        .iter()
        .enumerate()
        .map(|(index, &node)| {
            let stagger = index as f64 * config.stagger;
            TimelineBuilder::new(&format!("reveal #{index}"))
                .push(
                    Segment::new(TweenTarget::Node(node, NodeProperty::Position), Vec3::ZERO, config.reveal_duration)
                        .at(Position::AfterPreviousEnd(stagger))
                        .ease(Easing::ExpoOut)
                        .on_update(SideEffect::Spin { node, delta: spin }),
                )
                .push(
                    Segment::new(
                        TweenTarget::Node(node, NodeProperty::Scale),
                        Vec3::splat(config.reveal_scale),
                        config.reveal_duration,
                    )
                    .at(Position::AfterPreviousEnd(stagger))
                    .ease(Easing::ExpoOut),
                )
                .build()
        })
        .collect()
}
