use glam::Vec4;

/// Shading model of a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    /// Unlit flat color.
    Basic,
    /// Metallic-roughness PBR.
    Standard,
    /// PBR with clearcoat and transmission.
    Physical(PhysicalParams),
    /// Custom point-sprite shader of the particle field.
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParams {
    pub roughness: f32,
    pub metalness: f32,
    pub transmission: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            metalness: 0.0,
            transmission: 0.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
        }
    }
}

/// Surface material description consumed by the render backend.
///
/// The name doubles as the material-slot label of loaded assets
/// (see [`crate::assets`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    /// Linear RGBA base color.
    pub color: Vec4,
    pub transparent: bool,
}

impl Material {
    #[must_use]
    pub fn new(name: &str, kind: MaterialKind, color: Vec4) -> Self {
        Self {
            name: name.to_string(),
            kind,
            color,
            transparent: false,
        }
    }

    #[must_use]
    pub fn basic(name: &str, color: Vec4) -> Self {
        Self::new(name, MaterialKind::Basic, color)
    }

    #[must_use]
    pub fn standard(name: &str) -> Self {
        Self::new(name, MaterialKind::Standard, Vec4::ONE)
    }

    #[must_use]
    pub fn physical(name: &str, color: Vec4, params: PhysicalParams) -> Self {
        Self::new(name, MaterialKind::Physical(params), color)
    }

    /// The flat black substitute used while extracting bloom.
    #[must_use]
    pub fn dark() -> Self {
        Self::basic("dark", Vec4::new(0.0, 0.0, 0.0, 1.0))
    }

    #[must_use]
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Fully opaque and without any light contribution of its own.
    #[must_use]
    pub fn is_black_opaque(&self) -> bool {
        matches!(self.kind, MaterialKind::Basic)
            && !self.transparent
            && self.color.truncate() == glam::Vec3::ZERO
            && self.color.w >= 1.0
    }
}
