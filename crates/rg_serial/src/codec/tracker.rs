use alloc::vec::Vec;

use rg_utils::hash::{FixedHashState, HashMap};
use rg_utils::hash::hash_map::Entry;

use crate::{DecodeError, Tracked};

// -----------------------------------------------------------------------------
// ReferenceTracker

/// The outcome of [`ReferenceTracker::track_if_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracking {
    /// First encounter; the instance is written in full under this id.
    New(u32),
    /// Seen before; the instance is written as a back-reference to this id.
    Seen(u32),
}

#[derive(Debug, Clone, Copy)]
struct RefEntry {
    id: u32,
    back_referenced: bool,
}

/// Write-side identity table: instance address to encounter-order id.
///
/// Instances are keyed by the address of their allocation, never by value,
/// so two equal but distinct instances get distinct ids.
///
/// # Examples
///
/// ```
/// use rg_serial::codec::{ReferenceTracker, Tracking};
///
/// let mut tracker = ReferenceTracker::new();
/// assert_eq!(tracker.track_if_new(0x1000), Tracking::New(0));
/// assert_eq!(tracker.track_if_new(0x2000), Tracking::New(1));
/// assert_eq!(tracker.track_if_new(0x1000), Tracking::Seen(0));
///
/// assert_eq!(tracker.len(), 2);
/// assert_eq!(tracker.back_referenced_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ReferenceTracker {
    entries: HashMap<usize, RefEntry, FixedHashState>,
}

impl ReferenceTracker {
    /// Creates an empty tracker.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Assigns the next id to a never-seen instance, or reports the id it already has.
    ///
    /// A repeated encounter marks the entry as back-referenced.
    pub fn track_if_new(&mut self, address: usize) -> Tracking {
        let next = self.entries.len() as u32;
        match self.entries.entry(address) {
            Entry::Occupied(mut entry) => {
                let entry = entry.get_mut();
                entry.back_referenced = true;
                Tracking::Seen(entry.id)
            }
            Entry::Vacant(entry) => {
                entry.insert(RefEntry {
                    id: next,
                    back_referenced: false,
                });
                Tracking::New(next)
            }
        }
    }

    /// The id of a tracked instance, without changing its entry.
    #[inline]
    pub fn id_of(&self, address: usize) -> Option<u32> {
        self.entries.get(&address).map(|entry| entry.id)
    }

    /// Returns `true` if the instance was encountered more than once.
    #[inline]
    pub fn is_back_referenced(&self, address: usize) -> bool {
        self.entries
            .get(&address)
            .is_some_and(|entry| entry.back_referenced)
    }

    /// Number of tracked instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of instances encountered more than once.
    pub fn back_referenced_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.back_referenced)
            .count()
    }

    /// Forgets every instance.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// -----------------------------------------------------------------------------
// ReferenceTable

/// Read-side identity table: id to the instance decoded under it.
///
/// Ids must arrive in encounter order, the same order the writer assigned them.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    objects: Vec<Tracked>,
}

impl ReferenceTable {
    /// Creates an empty table.
    #[inline]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Registers a freshly created instance under `id`.
    ///
    /// Fails with [`DecodeError::OutOfOrderReference`] unless `id` is the next id.
    pub fn register(&mut self, id: u32, object: Tracked) -> Result<(), DecodeError> {
        let expected = self.objects.len() as u32;
        if id != expected {
            return Err(DecodeError::OutOfOrderReference {
                expected,
                found: id,
            });
        }
        self.objects.push(object);
        Ok(())
    }

    /// The instance registered under `id`.
    ///
    /// Fails with [`DecodeError::UnresolvedReference`] for ids not read yet.
    pub fn resolve(&self, id: u32) -> Result<&Tracked, DecodeError> {
        self.objects
            .get(id as usize)
            .ok_or(DecodeError::UnresolvedReference { id })
    }

    /// Number of registered instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if nothing was registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drops every registered handle.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ReferenceTable, ReferenceTracker, Tracking};
    use crate::{DecodeError, Tracked, share};
    use alloc::vec::Vec;

    #[test]
    fn back_reference_flag_only_on_repeat() {
        let mut tracker = ReferenceTracker::new();
        tracker.track_if_new(1);
        tracker.track_if_new(2);
        assert!(!tracker.is_back_referenced(1));

        assert_eq!(tracker.track_if_new(1), Tracking::Seen(0));
        assert!(tracker.is_back_referenced(1));
        assert!(!tracker.is_back_referenced(2));
        assert_eq!(tracker.id_of(2), Some(1));
        assert_eq!(tracker.id_of(3), None);
    }

    #[test]
    fn table_requires_encounter_order() {
        let mut table = ReferenceTable::new();
        let object = Tracked::new(&share(Vec::<u8>::new()));

        table.register(0, object.clone()).unwrap();
        let err = table.register(2, object).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::OutOfOrderReference {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn table_rejects_forward_reference() {
        let table = ReferenceTable::new();
        assert!(matches!(
            table.resolve(0),
            Err(DecodeError::UnresolvedReference { id: 0 })
        ));
    }
}
