use crate::animation::cursor::Cursor;
use crate::animation::mixer::AnimationMixer;
use crate::animation::tween::{NodeProperty, SideEffect, TweenTarget, TweenValue, TweenWorld};
use crate::frame_loop::FrameLoop;
use crate::resources::tone_mapping::ToneMappingSettings;
use crate::scene::{Camera, Scene};

/// Poses the mixer at the cursor's playback position.
pub(crate) fn seek_mixer(cursor: Cursor, mixer: &mut AnimationMixer, scene: &mut Scene) {
    mixer.set_time(cursor.playback_time(mixer.duration()), scene);
}

/// Mutable view of the stage handed to the timeline engine for one advance.
pub(crate) struct StageWorld<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut Camera,
    pub tone: &'a mut ToneMappingSettings,
    pub cursor: &'a mut Cursor,
    pub mixer: &'a mut AnimationMixer,
    pub frame_loop: &'a mut FrameLoop,
}

impl TweenWorld for StageWorld<'_> {
    fn read(&self, target: TweenTarget) -> Option<TweenValue> {
        match target {
            TweenTarget::Node(key, property) => {
                let transform = &self.scene.get_node(key)?.transform;
                Some(TweenValue::Vector3(match property {
                    NodeProperty::Position => transform.position,
                    NodeProperty::Rotation => transform.rotation,
                    NodeProperty::Scale => transform.scale,
                }))
            }
            TweenTarget::CameraPosition => Some(self.camera.position.into()),
            TweenTarget::Exposure => Some(self.tone.exposure.into()),
            TweenTarget::Cursor => Some(self.cursor.value().into()),
            TweenTarget::LightIntensity(key) => self.scene.light(key).map(|l| l.intensity.into()),
            TweenTarget::MaterialColor(key) => self.scene.material(key).map(|m| m.color.into()),
        }
    }

    fn write(&mut self, target: TweenTarget, value: TweenValue) -> bool {
        match (target, value) {
            (TweenTarget::Node(key, property), TweenValue::Vector3(v)) => {
                let Some(node) = self.scene.get_node_mut(key) else {
                    return false;
                };
                match property {
                    NodeProperty::Position => node.transform.position = v,
                    NodeProperty::Rotation => node.transform.rotation = v,
                    NodeProperty::Scale => node.transform.scale = v,
                }
                true
            }
            (TweenTarget::CameraPosition, TweenValue::Vector3(v)) => {
                self.camera.position = v;
                true
            }
            (TweenTarget::Exposure, TweenValue::Scalar(v)) => {
                self.tone.set_exposure(v);
                true
            }
            (TweenTarget::Cursor, TweenValue::Scalar(v)) => {
                self.cursor.set(v);
                seek_mixer(*self.cursor, self.mixer, self.scene);
                true
            }
            (TweenTarget::LightIntensity(key), TweenValue::Scalar(v)) => match self.scene.light_mut(key) {
                Some(light) => {
                    light.intensity = v;
                    true
                }
                None => false,
            },
            (TweenTarget::MaterialColor(key), TweenValue::Color(c)) => match self.scene.material_mut(key) {
                Some(material) => {
                    material.color = c;
                    true
                }
                None => false,
            },
            (target, value) => {
                log::warn!("Value {value:?} does not fit target {target:?}");
                false
            }
        }
    }

    fn apply(&mut self, effect: &SideEffect) {
        match *effect {
            SideEffect::SetExposure(v) => self.tone.set_exposure(v),
            SideEffect::RemoveNode(key) => self.scene.remove_node(key),
            SideEffect::ReleaseCamera => self.frame_loop.release_camera(),
            SideEffect::Spin { node, delta } => {
                if let Some(node) = self.scene.get_node_mut(node) {
                    node.transform.rotation += delta;
                }
            }
            SideEffect::Milestone(name) => log::info!("Choreography: {name}"),
        }
    }
}
