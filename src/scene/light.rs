use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Cut-off distance; 0 means unlimited.
    pub distance: f32,
    pub decay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectAreaLight {
    pub width: f32,
    pub height: f32,
    /// Point the emitting face is aimed at.
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point(PointLight),
    RectArea(RectAreaLight),
}

// Light component; its placement comes from the owning node's transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, distance: f32, decay: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Point(PointLight { distance, decay }),
        }
    }

    #[must_use]
    pub fn new_rect_area(color: Vec3, intensity: f32, width: f32, height: f32, look_at: Vec3) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::RectArea(RectAreaLight {
                width,
                height,
                look_at,
            }),
        }
    }
}
