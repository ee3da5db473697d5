//! The resolved style handed to generators.
use crate::style::Style;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A fully merged [`Style`] with its hash computed once on construction, so
/// it can be compared and used as a cache key cheaply. Properties still unset
/// after the cascade are left to the generator's own defaults.
#[derive(Debug, Clone)]
pub struct EffectiveStyle {
    inner: Style,
    cached_hash: u64,
}

impl EffectiveStyle {
    pub fn new(style: Style) -> Self {
        let mut s = DefaultHasher::new();
        style.hash(&mut s);
        Self {
            inner: style,
            cached_hash: s.finish(),
        }
    }

    pub fn style(&self) -> &Style {
        &self.inner
    }

    pub fn cached_hash(&self) -> u64 {
        self.cached_hash
    }
}

impl Default for EffectiveStyle {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl std::ops::Deref for EffectiveStyle {
    type Target = Style;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Eq for EffectiveStyle {}

impl PartialEq for EffectiveStyle {
    fn eq(&self, other: &Self) -> bool {
        self.cached_hash == other.cached_hash && self.inner == other.inner
    }
}

impl Hash for EffectiveStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cached_hash.hash(state);
    }
}

impl From<Style> for EffectiveStyle {
    fn from(style: Style) -> Self {
        Self::new(style)
    }
}
