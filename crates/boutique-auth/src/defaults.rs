//! Collections with exactly one default record.

use serde::{Deserialize, Serialize};

/// A record that can be the preferred one in its collection.
pub trait DefaultFlag {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
    fn is_default(&self) -> bool;
    fn set_default(&mut self, value: bool);
}

/// Ordered records where a non-empty collection has exactly one default.
///
/// Every mutation builds the next list off to the side and swaps it in, so
/// no state with zero or two defaults is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultCollection<T> {
    items: Vec<T>,
}

impl<T> Default for DefaultCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: DefaultFlag + Clone> DefaultCollection<T> {
    /// Adopt existing records. The first flagged record stays default;
    /// with none flagged, the first record becomes default.
    pub fn from_vec(items: Vec<T>) -> Self {
        let keep = items.iter().position(|i| i.is_default()).unwrap_or(0);
        let items = items
            .into_iter()
            .enumerate()
            .map(|(idx, mut item)| {
                item.set_default(idx == keep);
                item
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// The default record, if any.
    pub fn default_item(&self) -> Option<&T> {
        self.items.iter().find(|i| i.is_default())
    }

    /// Append a record. A default record, or the first record of an empty
    /// collection, clears the flag on every sibling.
    pub fn add(&mut self, mut item: T) {
        let becomes_default = item.is_default() || self.items.is_empty();
        let mut next: Vec<T> = self.items.clone();
        if becomes_default {
            for sibling in &mut next {
                sibling.set_default(false);
            }
        }
        item.set_default(becomes_default);
        next.push(item);
        self.items = next;
    }

    /// Edit a record in place. Returns false when the id is unknown.
    ///
    /// Setting the flag clears it on siblings. Clearing the flag on the
    /// current default is ignored.
    pub fn update(&mut self, id: &T::Id, edit: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id() == id) else {
            return false;
        };
        let mut next: Vec<T> = self.items.clone();
        let was_default = next[pos].is_default();
        edit(&mut next[pos]);

        if next[pos].is_default() {
            for (idx, sibling) in next.iter_mut().enumerate() {
                if idx != pos {
                    sibling.set_default(false);
                }
            }
        } else if was_default {
            next[pos].set_default(true);
        }
        self.items = next;
        true
    }

    /// Remove a record. Removing the default promotes the first remaining
    /// record.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let pos = self.items.iter().position(|i| i.id() == id)?;
        let mut next: Vec<T> = self.items.clone();
        let removed = next.remove(pos);
        if removed.is_default() {
            if let Some(first) = next.first_mut() {
                first.set_default(true);
            }
        }
        self.items = next;
        Some(removed)
    }

    /// Make `id` the only default. Returns false when the id is unknown.
    pub fn set_default(&mut self, id: &T::Id) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        let next: Vec<T> = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                let flag = item.id() == id;
                item.set_default(flag);
                item
            })
            .collect();
        self.items = next;
        true
    }
}
