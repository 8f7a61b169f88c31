//! Configuration sections.

use std::any::Any;

use crate::types::Dict;

/// An object that can act as a section in a decoration configuration.
///
/// Persisted configuration is owned by the host: whatever it reads its settings
/// from, it exposes them to toarudeco through this trait, and
/// [`DecorationConfig::load`][1] picks out the keys it recognises.
///
/// # Retrieving Arbitrary Values
///
/// One of `ConfigSection`'s required methods is `get_key`, which
/// returns a dynamically typed trait object (i.e. `&dyn Any`).
///
/// It is then up to the caller to see if this object is of the
/// needed type, by calling [`downcast_ref`][2] on it:
///
/// ```rust
/// use toarudeco::config::ConfigSection;
///
/// fn try_getting_key(section: &dyn ConfigSection) {
///     let Some(val) = section.get_key("ShadowStrength") else {
///         println!("no strength set");
///         return
///     };
///     if let Some(s) = val.downcast_ref::<i32>() {
///         println!("strength is {s}");
///     } else {
///         println!("oh no, wrong type!");
///     }
/// }
/// ```
///
/// A provided method, `get_key_static`, does this call for you,
/// but the trade-off is that it cannot be called on a trait object.
///
/// [1]: super::DecorationConfig::load
/// [2]: https://doc.rust-lang.org/std/any/trait.Any.html#method.downcast_ref
pub trait ConfigSection {
    /// Retrieve arbitrary key value pairs from storage.
    ///
    /// Should return None if the key does not exist in storage.
    fn get_key(&self, key: &str) -> Option<&dyn Any>;

    /// Retrieve a subsection for this section.
    ///
    /// Should return None if the subsection does not exist.
    fn subsection(&self, name: &str) -> Option<&dyn ConfigSection>;

    /// A monomorphizable, easier-to-use version of `get_key`.
    fn get_key_static<V: Any>(&self, key: &str) -> Option<&V>
    where
        Self: Sized,
    {
        self.get_key(key).and_then(|v| v.downcast_ref::<V>())
    }
}

impl ConfigSection for Dict {
    fn get_key(&self, key: &str) -> Option<&dyn Any> {
        self.get(key).map(|v| &**v)
    }

    fn subsection(&self, name: &str) -> Option<&dyn ConfigSection> {
        self.get(name)
            .and_then(|v| v.downcast_ref::<Dict>())
            .map(|d| d as &dyn ConfigSection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict;

    #[test]
    fn test_dict_section() {
        let inner = dict! {
            "ShadowSize" => "Small",
        };
        let section = dict! {
            "ShadowStrength" => 128i32,
            "Windeco" => inner,
        };

        assert_eq!(section.get_key_static::<i32>("ShadowStrength"), Some(&128));
        assert!(section.get_key_static::<u8>("ShadowStrength").is_none());
        assert!(section.get_key("Missing").is_none());

        let sub = section.subsection("Windeco").expect("no subsection");
        let size = sub.get_key("ShadowSize").and_then(|v| v.downcast_ref::<&str>());
        assert_eq!(size, Some(&"Small"));
        assert!(section.subsection("ShadowStrength").is_none());
    }
}
