//! The shared, reference-counted shadow cache.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::{DecorationConfig, ShadowSize};
use crate::types::Color;

use super::{synthesize, ShadowDescriptor};

/// The parameters a shadow texture is synthesized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadowKey {
    /// The shadow size.
    pub size: ShadowSize,
    /// The shadow strength.
    pub strength: u8,
    /// The shadow color.
    pub color: Color,
}

impl ShadowKey {
    /// The key of the shadow described by `config`.
    pub fn from_config(config: &DecorationConfig) -> Self {
        Self {
            size: config.shadow_size,
            strength: config.shadow_strength,
            color: config.shadow_color,
        }
    }
}

#[derive(Debug)]
struct Entry {
    descriptor: Rc<ShadowDescriptor>,
    users: usize,
}

/// Shadow textures shared among decorations.
///
/// Every decoration [`acquire`](ShadowCache::acquire)s the shadow for its
/// configuration and [`release`](ShadowCache::release)s it when it is
/// reconfigured or dropped. A texture is synthesized when its key is first
/// acquired, and freed once its last user releases it.
#[derive(Debug, Default)]
pub struct ShadowCache {
    entries: HashMap<ShadowKey, Entry>,
}

impl ShadowCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shadow for `key`, synthesizing it if nobody uses it yet.
    pub fn acquire(&mut self, key: ShadowKey) -> Rc<ShadowDescriptor> {
        let entry = self.entries.entry(key).or_insert_with(|| {
            debug!(target: "shadow", "synthesizing shadow for {:?}", key);
            Entry {
                descriptor: Rc::new(synthesize(key.size, key.strength, key.color)),
                users: 0,
            }
        });
        entry.users += 1;
        trace!(target: "shadow", "{:?} now has {} users", key, entry.users);

        Rc::clone(&entry.descriptor)
    }

    /// Gives up one use of the shadow for `key`, freeing it if that was the last.
    ///
    /// Releasing a key that is not held does nothing.
    pub fn release(&mut self, key: ShadowKey) {
        let Some(entry) = self.entries.get_mut(&key) else {
            return
        };

        entry.users = entry.users.saturating_sub(1);
        if entry.users == 0 {
            debug!(target: "shadow", "freeing shadow for {:?}", key);
            self.entries.remove(&key);
        }
    }

    /// The number of users of the shadow for `key`.
    pub fn users(&self, key: &ShadowKey) -> usize {
        self.entries.get(key).map(|e| e.users).unwrap_or(0)
    }

    /// The number of shadows currently alive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no shadow is alive.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frees every shadow, regardless of users.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(size: ShadowSize) -> ShadowKey {
        ShadowKey {
            size,
            strength: 255,
            color: Color::BLACK,
        }
    }

    #[test]
    fn test_shared_until_last_release() {
        let mut cache = ShadowCache::new();
        let small = key(ShadowSize::Small);

        let a = cache.acquire(small);
        let b = cache.acquire(small);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.users(&small), 2);
        assert_eq!(cache.len(), 1);

        cache.release(small);
        assert_eq!(cache.len(), 1);
        cache.release(small);
        assert!(cache.is_empty());

        // releasing again is harmless
        cache.release(small);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_distinct_keys() {
        let mut cache = ShadowCache::new();
        let none = cache.acquire(key(ShadowSize::None));
        let small = cache.acquire(key(ShadowSize::Small));

        assert!(none.is_empty());
        assert!(!small.is_empty());
        assert_eq!(cache.len(), 2);
    }
}
