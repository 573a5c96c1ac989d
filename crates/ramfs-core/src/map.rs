//! Open-addressed hash table keyed by byte strings.
//!
//! Every directory stores its children in a [`HashTable`]. The table uses
//! linear probing over a power-of-two slot array that starts at 64 slots and
//! doubles whenever an insert would push the load factor above 0.8.
//!
//! Deletion uses backward shifting instead of tombstones: after a slot is
//! vacated, every following entry in the same probe run that would become
//! unreachable is moved back into the gap. Lookups can therefore stop at the
//! first empty slot without ever missing a live key.
//!
//! # Examples
//!
//! ```
//! use ramfs_core::HashTable;
//!
//! let mut table = HashTable::new();
//! assert!(table.set_if_absent(b"etc", 1));
//! assert!(!table.set_if_absent(b"etc", 2));
//!
//! assert_eq!(table.get(b"etc"), Some(&1));
//! assert_eq!(table.delete(b"etc"), Some(1));
//! assert!(table.is_empty());
//! ```

use crate::hash::super_fast_hash;
use std::fmt;

/// Initial number of slots in a new table.
pub const BASE_CAPACITY: usize = 64;

// Load factor ceiling of 0.8, kept as a ratio to stay in integer arithmetic.
const LOAD_NUMERATOR: usize = 4;
const LOAD_DENOMINATOR: usize = 5;

struct Entry<V> {
    key: Box<[u8]>,
    value: V,
}

/// Linear-probing hash table from byte-string keys to values.
///
/// Iteration follows slot order, which is neither insertion order nor stable
/// across growth or deletion.
pub struct HashTable<V> {
    slots: Vec<Option<Entry<V>>>,
    used: usize,
}

impl<V> HashTable<V> {
    /// Creates an empty table with [`BASE_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: empty_slots(BASE_CAPACITY),
            used: 0,
        }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.used
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns the number of slots in the backing array.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `len / capacity`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.used as f64 / self.capacity() as f64
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.slots[self.index(key)].as_ref().map(|e| &e.value)
    }

    /// Looks up `key` for mutation.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let i = self.index(key);
        self.slots[i].as_mut().map(|e| &mut e.value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` unless it is already present.
    ///
    /// Returns `true` if the entry was inserted. An existing entry is never
    /// overwritten; in that case `value` is dropped and `false` is returned.
    pub fn set_if_absent(&mut self, key: &[u8], value: V) -> bool {
        let i = self.index(key);
        if self.slots[i].is_some() {
            return false;
        }
        self.insert_vacant(i, key, value);
        true
    }

    /// Inserts `key`, overwriting any existing value.
    ///
    /// Returns the previous value, if any.
    pub fn replace(&mut self, key: &[u8], value: V) -> Option<V> {
        let i = self.index(key);
        if let Some(entry) = self.slots[i].as_mut() {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        self.insert_vacant(i, key, value);
        None
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    ///
    /// Entries after the vacated slot are shifted back so that every
    /// remaining key stays reachable from its home slot.
    pub fn delete(&mut self, key: &[u8]) -> Option<V> {
        let size = self.capacity();
        let mut gap = self.index(key);
        let removed = self.slots[gap].take()?;

        let mut j = gap;
        loop {
            j = (j + 1) % size;
            let Some(entry) = &self.slots[j] else {
                break;
            };

            // Leave the entry alone if its home lies in (gap, j], cyclically:
            // probing from home still reaches j without crossing the gap.
            let home = self.home(&entry.key);
            let reachable = if gap <= j {
                gap < home && home <= j
            } else {
                gap < home || home <= j
            };

            if !reachable {
                self.slots[gap] = self.slots[j].take();
                gap = j;
            }
        }

        self.used -= 1;
        Some(removed.value)
    }

    /// Reallocates the slot array to hold `new_capacity` slots and rehashes
    /// every entry.
    ///
    /// The capacity is rounded up to a power of two (so it stays a doubling
    /// of [`BASE_CAPACITY`]). Requests that would not enlarge the table are
    /// ignored.
    pub fn grow(&mut self, new_capacity: usize) {
        let new_capacity = new_capacity.max(BASE_CAPACITY).next_power_of_two();
        let old_capacity = self.capacity();
        if new_capacity <= old_capacity {
            return;
        }

        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        for entry in old.into_iter().flatten() {
            // Keys are unique and the table only grew, so the probe always
            // ends on an empty slot.
            let i = self.index(&entry.key);
            self.slots[i] = Some(entry);
        }

        tracing::trace!(
            old_capacity,
            new_capacity,
            used = self.used,
            "Grew hash table"
        );
    }

    /// Iterates over `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> {
        self.slots
            .iter()
            .flatten()
            .map(|e| (e.key.as_ref(), &e.value))
    }

    /// Iterates over keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Consumes the table and yields its values in slot order.
    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.slots.into_iter().flatten().map(|e| e.value)
    }

    fn home(&self, key: &[u8]) -> usize {
        super_fast_hash(key) as usize % self.capacity()
    }

    /// Slot holding `key`, or the first empty slot of its probe run.
    fn index(&self, key: &[u8]) -> usize {
        let size = self.capacity();
        let mut i = self.home(key);
        while let Some(entry) = &self.slots[i] {
            if *entry.key == *key {
                break;
            }
            i = (i + 1) % size;
        }
        i
    }

    fn insert_vacant(&mut self, mut i: usize, key: &[u8], value: V) {
        if (self.used + 1) * LOAD_DENOMINATOR > self.capacity() * LOAD_NUMERATOR {
            self.grow(self.capacity() * 2);
            i = self.index(key);
        }
        self.slots[i] = Some(Entry {
            key: key.into(),
            value,
        });
        self.used += 1;
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Option<Entry<V>>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: Vec<_> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.as_ref()
                    .map(|e| (i, String::from_utf8_lossy(&e.key), &e.value))
            })
            .collect();

        f.debug_struct("HashTable")
            .field("size", &self.capacity())
            .field("used", &self.used)
            .field("slots", &occupied)
            .finish()
    }
}
