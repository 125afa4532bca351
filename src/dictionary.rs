//! String to `f64` map backed by an open-addressing hash table.
//!
//! Collisions are resolved by linear probing. Deleted entries leave a
//! tombstone behind so that probe chains running through them stay intact;
//! tombstones count toward the load factor and are only cleared by a
//! rehash, which doubles the capacity once the load factor passes 0.6.
//!
//! `NaN` is reserved to mean "no value": storing it is a no-op and
//! [`Dictionary::retrieve`] returns it for missing keys.

use crate::error::DictionaryError;
use log::{debug, trace};

pub const DEFAULT_CAPACITY: usize = 8;
pub const REHASH_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Unused,
    InUse { key: String, value: f64 },
    Deleted,
}

/// Result of walking a probe chain for one key.
enum Probe {
    Found(usize),
    Vacant(usize),
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    slots: Vec<Slot>,
    stored: usize,
    deleted: usize,
}

/// Polynomial string hash reduced modulo `capacity`. The empty key hashes to 0.
fn hash(key: &str, capacity: usize) -> usize {
    let bytes = key.as_bytes();
    let Some(&first) = bytes.first() else {
        return 0;
    };

    let mut x = u32::from(first) << 7;
    for &b in bytes {
        x = 1_000_003u32.wrapping_mul(x) ^ u32::from(b);
    }
    x ^= bytes.len() as u32;

    x as usize % capacity
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty dictionary with `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Unused; capacity.max(1)],
            stored: 0,
            deleted: 0,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.stored
    }

    pub fn is_empty(&self) -> bool {
        self.stored == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of tombstones left by deletions since the last rehash.
    pub fn deleted(&self) -> usize {
        self.deleted
    }

    /// `(stored + deleted) / capacity`.
    pub fn load_factor(&self) -> f64 {
        (self.stored + self.deleted) as f64 / self.capacity() as f64
    }

    fn probe(&self, key: &str) -> Probe {
        let capacity = self.capacity();
        let start = hash(key, capacity);

        for i in 0..capacity {
            let index = (start + i) % capacity;
            match &self.slots[index] {
                Slot::Unused => return Probe::Vacant(index),
                Slot::InUse { key: existing, .. } if existing == key => {
                    return Probe::Found(index)
                }
                Slot::InUse { .. } | Slot::Deleted => {}
            }
        }

        Probe::Exhausted
    }

    /// Inserts or updates `key`. Storing `NaN` does nothing.
    pub fn store(&mut self, key: &str, value: f64) {
        if value.is_nan() {
            trace!("ignoring NaN store for {}", key);
            return;
        }

        match self.probe(key) {
            Probe::Found(index) => {
                if let Slot::InUse { value: existing, .. } = &mut self.slots[index] {
                    *existing = value;
                }
            }
            Probe::Vacant(index) => {
                self.slots[index] = Slot::InUse {
                    key: key.to_string(),
                    value,
                };
                self.stored += 1;

                if self.load_factor() > REHASH_THRESHOLD {
                    self.rehash();
                }
            }
            Probe::Exhausted => {
                // only reachable when a tiny table is saturated with tombstones
                self.rehash();
                self.store(key, value);
            }
        }
    }

    /// Value stored under `key`, or `NaN` if there is none.
    pub fn retrieve(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(f64::NAN)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        match self.probe(key) {
            Probe::Found(index) => match &self.slots[index] {
                Slot::InUse { value, .. } => Some(*value),
                Slot::Unused | Slot::Deleted => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Removes `key`, leaving a tombstone in its slot.
    pub fn delete(&mut self, key: &str) -> Result<(), DictionaryError> {
        match self.probe(key) {
            Probe::Found(index) => {
                self.slots[index] = Slot::Deleted;
                self.stored -= 1;
                self.deleted += 1;
                Ok(())
            }
            Probe::Vacant(_) | Probe::Exhausted => {
                Err(DictionaryError::KeyNotFound(key.to_string()))
            }
        }
    }

    /// Entries in physical slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::InUse { key, value } => Some((key.as_str(), *value)),
            Slot::Unused | Slot::Deleted => None,
        })
    }

    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&str, f64),
    {
        for (key, value) in self.iter() {
            callback(key, value);
        }
    }

    fn rehash(&mut self) {
        let capacity = self.capacity() * 2;
        debug!(
            "Rehashing dictionary from {} to {} slots ({} stored, {} deleted)",
            self.capacity(),
            capacity,
            self.stored,
            self.deleted
        );

        let old = std::mem::replace(&mut self.slots, vec![Slot::Unused; capacity]);
        for slot in old {
            if let Slot::InUse { key, value } = slot {
                let mut index = hash(&key, capacity);
                while matches!(self.slots[index], Slot::InUse { .. }) {
                    index = (index + 1) % capacity;
                }
                self.slots[index] = Slot::InUse { key, value };
            }
        }
        self.deleted = 0;
    }
}
