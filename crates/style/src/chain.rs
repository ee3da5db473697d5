//! An ordered list of style levels, most general first.
//!
//! A report that extends another report appends its own default style to the
//! chain it inherited, so resolution walks the hierarchy base to derived.

use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleChain {
    levels: Vec<Arc<Style>>,
}

impl StyleChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_levels(levels: impl IntoIterator<Item = Style>) -> Self {
        Self {
            levels: levels.into_iter().map(Arc::new).collect(),
        }
    }

    /// Adds a more specific level at the end of the chain.
    pub fn push(&mut self, style: Style) {
        self.levels.push(Arc::new(style));
    }

    /// A new chain with `style` appended; `self` is left untouched.
    pub fn extended(&self, style: Style) -> Self {
        let mut chain = self.clone();
        chain.push(style);
        chain
    }

    /// A new chain with every level of `other` after the levels of `self`.
    /// Levels are shared, not copied.
    pub fn appended(&self, other: &StyleChain) -> Self {
        Self {
            levels: self.levels.iter().chain(&other.levels).cloned().collect(),
        }
    }

    pub fn levels(&self) -> &[Arc<Style>] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Shallow-merges every level, base first, so later levels win per key.
    pub fn flatten(&self) -> Style {
        self.levels.iter().fold(Style::default(), |mut acc, level| {
            acc.merge(level);
            acc
        })
    }

    /// A hash of the whole chain, used as part of style cache keys.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Eq for StyleChain {}

impl Hash for StyleChain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.levels.len().hash(state);
        for level in &self.levels {
            level.hash(state);
        }
    }
}
