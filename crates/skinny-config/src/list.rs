use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Serialize, Serializer};

/// A list field shared between the live object and its readers.
///
/// Every mutation takes the write lock once and swaps the whole list, so a
/// reader always sees either the old or the new contents. Cloning copies
/// the contents into a fresh lock: a snapshot never aliases the live list.
pub struct LockedList<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> LockedList<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` against the current contents under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.read())
    }

    /// Replace the contents, returning the previous list.
    pub fn replace(&self, items: Vec<T>) -> Vec<T> {
        std::mem::replace(&mut *self.inner.write(), items)
    }
}

impl<T: Clone> LockedList<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().clone()
    }
}

impl<T: PartialEq> LockedList<T> {
    /// Swap in `items` when they differ from the current contents.
    ///
    /// Returns whether the list changed.
    pub fn replace_if_changed(&self, items: Vec<T>) -> bool {
        let mut guard = self.inner.write();
        if *guard == items {
            return false;
        }
        *guard = items;
        true
    }
}

impl<T> Default for LockedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LockedList<T> {
    fn clone(&self) -> Self {
        Self::from_vec(self.snapshot())
    }
}

impl<T: PartialEq> PartialEq for LockedList<T> {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        *self.inner.read() == *other.inner.read()
    }
}

impl<T: fmt::Debug> fmt::Debug for LockedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.read().iter()).finish()
    }
}

impl<T: Serialize> Serialize for LockedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.read().serialize(serializer)
    }
}

impl<T> From<Vec<T>> for LockedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_is_deep() {
        let live = LockedList::from_vec(vec![1, 2]);
        let copy = live.clone();
        live.replace(vec![3]);
        assert_eq!(copy.snapshot(), vec![1, 2]);
        assert_eq!(live.snapshot(), vec![3]);
    }

    #[test]
    fn replace_if_changed_detects_equal_lists() {
        let list = LockedList::from_vec(vec!["a".to_string()]);
        assert!(!list.replace_if_changed(vec!["a".to_string()]));
        assert!(list.replace_if_changed(vec!["b".to_string()]));
        assert_eq!(list.read(|items| items.len()), 1);
    }

    #[test]
    fn equality_compares_contents() {
        let a = LockedList::from_vec(vec![1]);
        let b = LockedList::from_vec(vec![1]);
        assert_eq!(a, b);
        assert_eq!(a, a);
    }
}
