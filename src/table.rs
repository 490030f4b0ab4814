//! OpenAddressingHashSet: linear probing over a power-of-two slot array that
//! doubles, with a full rehash, whenever an insertion would push the load
//! factor past the configured threshold.

use crate::config::{validate_threshold, TableConfig};
use crate::error::{Result, TableError};
use crate::hashing::{HashKey, HashKind, KeyHasher};

/// Slot count of a freshly built table.
pub const INITIAL_CAPACITY: usize = 8;

// Largest slot array `Vec` can describe.
const MAX_SLOTS: usize = isize::MAX as usize / core::mem::size_of::<Option<i64>>();

/// Snapshot of a table's structural counters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TableStats {
    pub len: usize,
    pub capacity: usize,
    pub resize_count: usize,
    /// Probe steps since the last growth.
    pub collision_count: u64,
    /// Probe steps since construction, excluding rehashing.
    pub total_collisions: u64,
}

enum Probe {
    Found(usize),
    Vacant { index: usize, steps: u64 },
}

#[derive(Clone, Debug)]
pub struct OpenAddressingHashSet {
    slots: Vec<Option<i64>>,
    count: usize,
    threshold: f64,
    hasher: KeyHasher,
    resize_count: usize,
    collision_count: u64,
    total_collisions: u64,
}

impl OpenAddressingHashSet {
    pub fn new(load_factor_threshold: f64, hash: HashKind) -> Result<Self> {
        validate_threshold(load_factor_threshold)?;
        Ok(Self {
            slots: vec![None; INITIAL_CAPACITY],
            count: 0,
            threshold: load_factor_threshold,
            hasher: hash.build(),
            resize_count: 0,
            collision_count: 0,
            total_collisions: 0,
        })
    }

    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Self::new(config.load_factor_threshold, config.hash)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    pub fn len(&self) -> usize {
        self.count
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }
    pub fn load_factor_threshold(&self) -> f64 {
        self.threshold
    }
    pub fn hash_kind(&self) -> HashKind {
        self.hasher.kind()
    }
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }
    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }
    pub fn total_collisions(&self) -> u64 {
        self.total_collisions
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            len: self.count,
            capacity: self.capacity(),
            resize_count: self.resize_count,
            collision_count: self.collision_count,
            total_collisions: self.total_collisions,
        }
    }

    /// Raw slot array, in index order.
    pub fn slots(&self) -> &[Option<i64>] {
        &self.slots
    }

    #[inline]
    fn home(&self, key: i64, mask: usize) -> usize {
        (self.hasher.hash_key(key) & mask as u64) as usize
    }

    // Terminates because the load bound keeps at least one slot empty.
    fn probe(&self, key: i64) -> Probe {
        let mask = self.capacity() - 1;
        let mut index = self.home(key, mask);
        let mut steps = 0;
        loop {
            match self.slots[index] {
                Some(k) if k == key => return Probe::Found(index),
                Some(_) => {
                    steps += 1;
                    index = (index + 1) & mask;
                }
                None => return Probe::Vacant { index, steps },
            }
        }
    }

    pub fn contains(&self, key: i64) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// How many slots past its home slot `key` is stored, if present.
    pub fn probe_distance(&self, key: i64) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => {
                let mask = self.capacity() - 1;
                Some(index.wrapping_sub(self.home(key, mask)) & mask)
            }
            Probe::Vacant { .. } => None,
        }
    }

    /// Insert `key`. Returns `Ok(false)` if it was already present, in which
    /// case nothing changes. Growth happens before placement, so the load
    /// bound holds once this returns. On `OutOfMemory` the key is not
    /// inserted and the table is still valid.
    pub fn insert(&mut self, key: i64) -> Result<bool> {
        let (index, steps) = match self.probe(key) {
            Probe::Found(_) => return Ok(false),
            Probe::Vacant { index, steps } if !self.exceeds_threshold(self.capacity()) => {
                (index, steps)
            }
            Probe::Vacant { .. } => {
                self.reserve_one()?;
                match self.probe(key) {
                    Probe::Vacant { index, steps } => (index, steps),
                    Probe::Found(_) => return Ok(false),
                }
            }
        };
        self.slots[index] = Some(key);
        self.count += 1;
        self.collision_count += steps;
        self.total_collisions += steps;
        Ok(true)
    }

    /// Insert every key, returning how many were new.
    pub fn try_extend<I>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut added = 0;
        for key in keys {
            if self.insert(key)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
        }
    }

    fn exceeds_threshold(&self, capacity: usize) -> bool {
        (self.count + 1) as f64 / capacity as f64 > self.threshold
    }

    // Finds the smallest doubling that takes one more key under the
    // threshold and rehashes into it once, however many doublings it spans.
    fn reserve_one(&mut self) -> Result<()> {
        let mut target = self.capacity();
        while self.exceeds_threshold(target) {
            target = match target.checked_mul(2) {
                Some(t) if t <= MAX_SLOTS => t,
                _ => {
                    log::warn!(
                        "cannot grow past {} slots for threshold {}",
                        target,
                        self.threshold
                    );
                    return Err(TableError::OutOfMemory {
                        requested_slots: target.saturating_mul(2),
                    });
                }
            };
        }
        self.grow_to(target)
    }

    // The new array is fully populated before it replaces the old one, so a
    // failed allocation leaves the table untouched. Each doubling spanned
    // counts as one resize.
    fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity.is_power_of_two() && new_capacity > old_capacity);
        let mut slots: Vec<Option<i64>> = Vec::new();
        if let Err(err) = slots.try_reserve_exact(new_capacity) {
            log::warn!(
                "failed to allocate {} slots while growing from {}: {}",
                new_capacity,
                old_capacity,
                err
            );
            return Err(TableError::OutOfMemory {
                requested_slots: new_capacity,
            });
        }
        slots.resize(new_capacity, None);

        let mask = new_capacity - 1;
        let mut carried = 0;
        for key in self.slots.iter().flatten().copied() {
            let mut index = self.home(key, mask);
            while slots[index].is_some() {
                index = (index + 1) & mask;
            }
            slots[index] = Some(key);
            carried += 1;
        }
        debug_assert_eq!(carried, self.count);

        log::debug!(
            "grew {} table {} -> {} slots, rehashed {} keys",
            self.hasher.kind(),
            old_capacity,
            new_capacity,
            carried
        );
        self.slots = slots;
        self.count = carried;
        self.collision_count = 0;
        self.resize_count += (new_capacity.trailing_zeros() - old_capacity.trailing_zeros()) as usize;
        Ok(())
    }
}

impl Extend<i64> for OpenAddressingHashSet {
    /// Panics if the table cannot grow; use [`OpenAddressingHashSet::try_extend`]
    /// to handle allocation failure.
    fn extend<I: IntoIterator<Item = i64>>(&mut self, keys: I) {
        if let Err(err) = self.try_extend(keys) {
            panic!("{err}");
        }
    }
}

/// Iterator over stored keys in slot order.
pub struct Iter<'a> {
    it: core::slice::Iter<'a, Option<i64>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = i64;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|s| *s)
    }
}

impl<'a> IntoIterator for &'a OpenAddressingHashSet {
    type Item = i64;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
