use crate::{Vec3, Vec4};

/// Surface response used by the per-pixel lighting model.
///
/// Colours are RGBA. `diffuse.w` is the surface alpha and `specular.w`
/// holds the specular power rather than a colour channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub reflect: Vec4,
}

impl Material {
    #[inline]
    pub fn new(ambient: Vec4, diffuse: Vec4, specular: Vec4, reflect: Vec4) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            reflect,
        }
    }

    #[inline]
    pub fn specular_power(&self) -> f32 {
        self.specular.w
    }

    #[inline]
    pub fn specular_color(&self) -> Vec3 {
        self.specular.truncate()
    }

    /// Alpha taken from the diffuse colour.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.diffuse.w
    }

    /// `true` when any reflect channel is non-zero.
    pub fn is_reflective(&self) -> bool {
        self.reflect.truncate() != Vec3::ZERO
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            reflect: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}
