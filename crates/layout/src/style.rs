//! The style cascade.
//!
//! An element's effective style is the shallow, key-by-key merge of, in
//! order: every level of the report's style chain (base first), the band's
//! default style, the element's own style, and each conditional style whose
//! predicate matched the current record.

use folio_style::{EffectiveStyle, Style, StyleChain};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Merges the cascade levels into an [`EffectiveStyle`]. Pure.
pub fn compute_style(
    chain: &StyleChain,
    band_style: &Style,
    element_style: &Style,
    conditional: &[&Style],
) -> EffectiveStyle {
    let mut merged = chain.flatten();
    merged.merge(band_style);
    merged.merge(element_style);
    for style in conditional {
        merged.merge(style);
    }
    EffectiveStyle::new(merged)
}

/// The inputs a cached style was computed from, compared on every hit.
#[derive(Debug)]
struct CacheEntry {
    chain: StyleChain,
    band_style: Style,
    element_style: Style,
    conditional: Vec<Style>,
    style: Arc<EffectiveStyle>,
}

impl CacheEntry {
    fn matches(
        &self,
        chain: &StyleChain,
        band_style: &Style,
        element_style: &Style,
        conditional: &[&Style],
    ) -> bool {
        self.chain == *chain
            && self.band_style == *band_style
            && self.element_style == *element_style
            && self.conditional.len() == conditional.len()
            && self.conditional.iter().zip(conditional).all(|(a, b)| a == *b)
    }
}

/// Resolves styles for one render pass. Results are bucketed by a hash of
/// every cascade input; a hit also compares the inputs themselves.
#[derive(Debug, Default)]
pub struct StyleResolver {
    enabled: bool,
    cache: HashMap<u64, Vec<CacheEntry>>,
    hits: usize,
    misses: usize,
}

impl StyleResolver {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn resolve(
        &mut self,
        chain: &StyleChain,
        band_style: &Style,
        element_style: &Style,
        conditional: &[&Style],
    ) -> Arc<EffectiveStyle> {
        if !self.enabled {
            return Arc::new(compute_style(chain, band_style, element_style, conditional));
        }

        let mut hasher = DefaultHasher::new();
        chain.hash(&mut hasher);
        band_style.hash(&mut hasher);
        element_style.hash(&mut hasher);
        conditional.len().hash(&mut hasher);
        for style in conditional {
            style.hash(&mut hasher);
        }
        self.resolve_keyed(hasher.finish(), chain, band_style, element_style, conditional)
    }

    pub(crate) fn resolve_keyed(
        &mut self,
        key: u64,
        chain: &StyleChain,
        band_style: &Style,
        element_style: &Style,
        conditional: &[&Style],
    ) -> Arc<EffectiveStyle> {
        let bucket = self.cache.entry(key).or_default();
        if let Some(entry) = bucket
            .iter()
            .find(|entry| entry.matches(chain, band_style, element_style, conditional))
        {
            self.hits += 1;
            return Arc::clone(&entry.style);
        }
        if !bucket.is_empty() {
            log::trace!("Style cache collision on key {:016x}", key);
        }
        self.misses += 1;
        let style = Arc::new(compute_style(chain, band_style, element_style, conditional));
        bucket.push(CacheEntry {
            chain: chain.clone(),
            band_style: band_style.clone(),
            element_style: element_style.clone(),
            conditional: conditional.iter().map(|style| (*style).clone()).collect(),
            style: Arc::clone(&style),
        });
        style
    }

    /// (hits, misses) since the resolver was created.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
