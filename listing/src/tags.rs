//! Typed metadata attached to model objects from the outside.
//!
//! Model objects hold a [`Handle`] instead of a mutable bag of extras;
//! renderers look metadata up in a [`Tags`] table they own.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    marker::PhantomData,
};

/// Opaque key of one tagged object, issued by [`Tags::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

/// A typed metadata key.
///
/// ```
/// use listing::{Tag, Tags};
///
/// const DEPRECATED: Tag<bool> = Tag::new("deprecated");
///
/// let mut tags = Tags::new();
/// let method = tags.handle();
/// tags.set(method, &DEPRECATED, true);
/// assert_eq!(tags.get(method, &DEPRECATED), Some(&true));
/// ```
pub struct Tag<T> {
    name: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> Tag<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Tag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Tag<T> {}

impl<T> fmt::Debug for Tag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tag").field(&self.name).finish()
    }
}

type Key = (Handle, &'static str, TypeId);

/// Side table mapping (handle, tag) to a typed value.
#[derive(Default)]
pub struct Tags {
    next: u64,
    values: HashMap<Key, Box<dyn Any>>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh handle.
    pub fn handle(&mut self) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        handle
    }

    /// Attach `value` under `tag`, returning the previous value.
    pub fn set<T: 'static>(&mut self, handle: Handle, tag: &Tag<T>, value: T) -> Option<T> {
        self.values
            .insert(key(handle, tag), Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    pub fn get<T: 'static>(&self, handle: Handle, tag: &Tag<T>) -> Option<&T> {
        self.values
            .get(&key(handle, tag))
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self, handle: Handle, tag: &Tag<T>) -> Option<&mut T> {
        self.values
            .get_mut(&key(handle, tag))
            .and_then(|value| value.downcast_mut::<T>())
    }

    pub fn remove<T: 'static>(&mut self, handle: Handle, tag: &Tag<T>) -> Option<T> {
        self.values
            .remove(&key(handle, tag))
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    /// Drop every value attached to `handle`.
    pub fn release(&mut self, handle: Handle) {
        self.values.retain(|(owner, _, _), _| *owner != handle);
    }

    /// Number of attached values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn key<T: 'static>(handle: Handle, tag: &Tag<T>) -> Key {
    (handle, tag.name, TypeId::of::<T>())
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tags")
            .field("handles", &self.next)
            .field("values", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAVADOC: Tag<String> = Tag::new("javadoc");
    const ORDER: Tag<u32> = Tag::new("order");

    #[test]
    fn test_handles_are_distinct() {
        let mut tags = Tags::new();
        let a = tags.handle();
        let b = tags.handle();
        assert_ne!(a, b);
        tags.set(a, &ORDER, 1);
        assert_eq!(tags.get(a, &ORDER), Some(&1));
        assert_eq!(tags.get(b, &ORDER), None);
    }

    #[test]
    fn test_same_name_different_type() {
        let mut tags = Tags::new();
        let handle = tags.handle();
        let order_text: Tag<String> = Tag::new("order");
        tags.set(handle, &ORDER, 7);
        tags.set(handle, &order_text, "seven".to_string());
        assert_eq!(tags.get(handle, &ORDER), Some(&7));
        assert_eq!(tags.get(handle, &order_text).map(String::as_str), Some("seven"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_set_get_mut_remove() {
        let mut tags = Tags::new();
        let handle = tags.handle();
        assert_eq!(tags.set(handle, &JAVADOC, "first".into()), None);
        assert_eq!(tags.set(handle, &JAVADOC, "second".into()).as_deref(), Some("first"));
        if let Some(doc) = tags.get_mut(handle, &JAVADOC) {
            doc.push('!');
        }
        assert_eq!(tags.remove(handle, &JAVADOC).as_deref(), Some("second!"));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_release() {
        let mut tags = Tags::new();
        let a = tags.handle();
        let b = tags.handle();
        tags.set(a, &ORDER, 1);
        tags.set(a, &JAVADOC, "a".into());
        tags.set(b, &ORDER, 2);
        tags.release(a);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get(b, &ORDER), Some(&2));
        assert_eq!(format!("{:?}", ORDER), "Tag(\"order\")");
    }
}
