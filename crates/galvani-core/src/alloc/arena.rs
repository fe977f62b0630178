use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// Generational handle into a [`SlotArena`].
///
/// The upper 32 bits hold the generation, the lower 32 bits the slot index
/// plus one, so `Option<SlotHandle>` costs nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotHandle(NonZeroU64);

impl SlotHandle {
    pub fn new(generation: u32, idx: u32) -> Self {
        let packed = ((generation as u64) << 32) | idx as u64;
        Self(NonZeroU64::MIN.saturating_add(packed))
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Storage with O(1) insert/remove and handles that detect reuse.
///
/// A removed slot bumps its generation before it is recycled, so a stale
/// handle resolves to `None` instead of aliasing the new occupant.
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotArena<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotHandle {
        profile_function!();
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            SlotHandle::new(slot.generation, idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            SlotHandle::new(0, idx)
        }
    }

    fn slot(&self, handle: SlotHandle) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
    }

    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.slot(handle).and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    /// Remove the value behind `handle`. Stale handles return `None`.
    pub fn remove(&mut self, handle: SlotHandle) -> Option<T> {
        profile_function!();
        let index = handle.index();
        let slot = self
            .slots
            .get_mut(index as usize)
            .filter(|slot| slot.generation == handle.generation())?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Occupied slots in slot order (not insertion order).
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (SlotHandle::new(slot.generation, idx as u32), value))
        })
    }

    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(idx as u32);
            }
        }
        self.len = 0;
    }
}

static_assertions::assert_eq_size!(SlotHandle, Option<SlotHandle>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_insert() {
        let mut arena = SlotArena::<u8>::new();
        let handle = arena.insert(15);
        assert_eq!(handle.generation(), 0);
        assert_eq!(handle.index(), 0);
        assert_eq!(arena.get(handle), Some(&15));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_stale_handle() {
        let mut arena = SlotArena::<u8>::new();
        let _ = arena.insert(15);
        let stale = SlotHandle::new(1, 0);
        assert_eq!(arena.get(stale), None);
        assert_eq!(arena.remove(stale), None);
    }

    #[test]
    fn test_arena_remove_reuses_slot() {
        let mut arena = SlotArena::<u8>::new();
        let handle = arena.insert(15);
        assert_eq!(arena.remove(handle), Some(15));
        assert_eq!(arena.remove(handle), None);
        let new_handle = arena.insert(45);
        assert_eq!(handle.index(), new_handle.index());
        assert_ne!(handle.generation(), new_handle.generation());
        assert!(!arena.contains(handle));
        assert!(arena.contains(new_handle));
    }

    #[test]
    fn test_arena_iter_skips_free() {
        let mut arena = SlotArena::<u8>::new();
        let handles: Vec<_> = (0..100).map(|i| arena.insert(i)).collect();
        arena.remove(handles[0]);
        arena.remove(handles[1]);
        let collected: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected.len(), 98);
        for i in 2..100 {
            assert_eq!(collected[i - 2], i as u8);
        }
    }

    #[test]
    fn test_arena_clear() {
        let mut arena = SlotArena::<u8>::new();
        let a = arena.insert(1);
        arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
    }
}
