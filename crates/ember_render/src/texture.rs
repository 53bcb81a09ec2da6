//! Textures and the texture registry.

use std::collections::HashMap;

use ember_math::Vec3;

/// Handle into a [`TextureRegistry`].
///
/// Ids are only handed out by a registry and stay valid for that
/// registry's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

/// Spatially varying albedo source, sampled at surface coordinates
/// `(u, v)` and the world-space hit point.
#[derive(Debug, Clone)]
pub enum Texture {
    /// Uniform color, ignores the sample point.
    Constant { color: Vec3 },
    /// 3D checker pattern: the sign of the product of three sine waves
    /// along the coordinate axes selects one of two colors.
    Checker { even: Vec3, odd: Vec3, scale: f32 },
}

impl Texture {
    /// Create a uniform color texture.
    pub fn constant(color: Vec3) -> Self {
        Texture::Constant { color }
    }

    /// Create a checker texture with the default frequency.
    pub fn checker(even: Vec3, odd: Vec3) -> Self {
        Texture::Checker {
            even,
            odd,
            scale: 10.0,
        }
    }

    /// Sample the texture.
    pub fn value(&self, _u: f32, _v: f32, p: Vec3) -> Vec3 {
        match self {
            Texture::Constant { color } => *color,
            Texture::Checker { even, odd, scale } => {
                let sines = (scale * p.x).sin() * (scale * p.y).sin() * (scale * p.z).sin();
                if sines < 0.0 {
                    *odd
                } else {
                    *even
                }
            }
        }
    }
}

/// Owns every texture in a scene, addressed by name at construction time
/// and by [`TextureId`] during rendering.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: Vec<Texture>,
    names: HashMap<String, TextureId>,
}

impl TextureRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under a name and return its handle.
    ///
    /// Registering under an existing name replaces that entry in place,
    /// so ids issued earlier keep pointing at the name's current texture.
    pub fn register(&mut self, name: impl Into<String>, texture: Texture) -> TextureId {
        let name = name.into();
        if let Some(&id) = self.names.get(&name) {
            self.textures[id.0 as usize] = texture;
            return id;
        }
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(texture);
        self.names.insert(name, id);
        id
    }

    /// Register a uniform color texture.
    pub fn register_color(&mut self, name: impl Into<String>, color: Vec3) -> TextureId {
        self.register(name, Texture::constant(color))
    }

    /// Look up a previously registered texture by name.
    pub fn lookup(&self, name: &str) -> Option<TextureId> {
        self.names.get(name).copied()
    }

    /// Get the texture behind a handle.
    ///
    /// Panics on a handle from a different registry that is out of range
    /// here; scene construction validates handles before they can reach
    /// the render path.
    pub fn get(&self, id: TextureId) -> &Texture {
        &self.textures[id.0 as usize]
    }

    /// Whether a handle resolves in this registry.
    pub fn contains(&self, id: TextureId) -> bool {
        (id.0 as usize) < self.textures.len()
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
