#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod frame_loop;
pub mod render;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod stage;
#[cfg(any(debug_assertions, feature = "tweaks"))]
pub mod tweaks;

pub use animation::{
    AnimationClip, AnimationMixer, Cursor, Easing, Position, Segment, SideEffect, Timeline, TimelineBuilder,
    TimelineEngine, TimelineId, TweenTarget, TweenValue, TweenWorld,
};
pub use assets::{ModelAsset, Prefab, PrefabNode};
pub use errors::{Result, StageError};
pub use frame_loop::{CountingScheduler, FrameLoop, FrameScheduler};
pub use render::{BloomCompositor, HeadlessBackend, MaterialVault, RenderBackend};
pub use resources::{BloomSettings, Material, ToneMappingSettings};
pub use scene::{BLOOM_LAYER, Camera, Layers, Node, NodeKey, Scene};
pub use settings::StageSettings;
pub use stage::Stage;
#[cfg(any(debug_assertions, feature = "tweaks"))]
pub use tweaks::Tweak;
