//! Texture handles keyed by logical name
//!
//! The simulation never looks at pixels. A [`TextureLoader`] turns a logical
//! name into an opaque [`TextureHandle`]; anything it cannot supply is
//! replaced by the placeholder so a missing file never stops a run.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Opaque drawable handle issued by a loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Flat white quad, always available
    pub const PLACEHOLDER: TextureHandle = TextureHandle(0);
}

/// Every texture the scene asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Player,
    Enemy,
    Scout,
    Bomber,
    Bullet,
    Boss,
    BossBullet,
    Upgrade,
    Asteroid,
    PowerUp,
    Obstacle,
    Particle,
}

impl TextureKey {
    pub const ALL: [TextureKey; 12] = [
        TextureKey::Player,
        TextureKey::Enemy,
        TextureKey::Scout,
        TextureKey::Bomber,
        TextureKey::Bullet,
        TextureKey::Boss,
        TextureKey::BossBullet,
        TextureKey::Upgrade,
        TextureKey::Asteroid,
        TextureKey::PowerUp,
        TextureKey::Obstacle,
        TextureKey::Particle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TextureKey::Player => "player",
            TextureKey::Enemy => "enemy",
            TextureKey::Scout => "scout",
            TextureKey::Bomber => "bomber",
            TextureKey::Bullet => "bullet",
            TextureKey::Boss => "boss",
            TextureKey::BossBullet => "boss_bullet",
            TextureKey::Upgrade => "upgrade",
            TextureKey::Asteroid => "asteroid",
            TextureKey::PowerUp => "powerup",
            TextureKey::Obstacle => "obstacle",
            TextureKey::Particle => "particle",
        }
    }
}

/// Source of textures (GPU uploader, file loader, test stub)
pub trait TextureLoader {
    fn load(&mut self, name: &str) -> Result<TextureHandle>;
}

/// Issues sequential handles for every name (headless runs)
#[derive(Debug, Default)]
pub struct SequentialLoader {
    next: u32,
}

impl TextureLoader for SequentialLoader {
    fn load(&mut self, _name: &str) -> Result<TextureHandle> {
        self.next += 1;
        Ok(TextureHandle(self.next))
    }
}

/// Loaded textures with placeholder fallback
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    handles: HashMap<TextureKey, TextureHandle>,
    missing: Vec<TextureKey>,
}

impl AssetRegistry {
    /// Load every [`TextureKey`]; failures fall back to the placeholder
    pub fn load(loader: &mut impl TextureLoader) -> Self {
        let mut registry = Self::default();
        for key in TextureKey::ALL {
            match loader.load(key.name()) {
                Ok(handle) => {
                    registry.handles.insert(key, handle);
                }
                Err(e) => {
                    log::warn!("{e}; using placeholder");
                    registry.missing.push(key);
                }
            }
        }
        log::debug!(
            "Loaded {} textures ({} placeholders)",
            registry.handles.len(),
            registry.missing.len()
        );
        registry
    }

    pub fn get(&self, key: TextureKey) -> TextureHandle {
        self.handles
            .get(&key)
            .copied()
            .unwrap_or(TextureHandle::PLACEHOLDER)
    }

    /// Strict lookup for callers that want to know
    pub fn try_get(&self, key: TextureKey) -> Result<TextureHandle> {
        self.handles
            .get(&key)
            .copied()
            .ok_or_else(|| Error::MissingTexture {
                name: key.name().to_string(),
            })
    }

    /// Keys that fell back to the placeholder
    pub fn missing(&self) -> &[TextureKey] {
        &self.missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails for a fixed set of names
    struct Flaky(&'static [&'static str]);

    impl TextureLoader for Flaky {
        fn load(&mut self, name: &str) -> Result<TextureHandle> {
            if self.0.contains(&name) {
                Err(Error::MissingTexture {
                    name: name.to_string(),
                })
            } else {
                Ok(TextureHandle(name.len() as u32 + 100))
            }
        }
    }

    #[test]
    fn test_missing_texture_falls_back_to_placeholder() {
        let registry = AssetRegistry::load(&mut Flaky(&["boss", "asteroid"]));
        assert_eq!(registry.get(TextureKey::Boss), TextureHandle::PLACEHOLDER);
        assert_eq!(registry.missing(), &[TextureKey::Boss, TextureKey::Asteroid]);
        assert_eq!(registry.get(TextureKey::Enemy), TextureHandle(105));
        assert!(matches!(
            registry.try_get(TextureKey::Boss),
            Err(Error::MissingTexture { .. })
        ));
    }

    #[test]
    fn test_sequential_loader_issues_distinct_handles() {
        let registry = AssetRegistry::load(&mut SequentialLoader::default());
        assert!(registry.missing().is_empty());
        let mut seen: Vec<_> = TextureKey::ALL.iter().map(|k| registry.get(*k)).collect();
        seen.sort_by_key(|h| h.0);
        seen.dedup();
        assert_eq!(seen.len(), TextureKey::ALL.len());
        assert!(!seen.contains(&TextureHandle::PLACEHOLDER));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = TextureKey::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TextureKey::ALL.len());
    }
}
