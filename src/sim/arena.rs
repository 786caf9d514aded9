//! Generation-checked entity storage with deferred removal
//!
//! Entities are retired during a frame and swept once the frame is over.
//! A retired entry is invisible to lookups and iteration immediately, so later
//! pipeline stages in the same frame never see it. Sweeping bumps the slot
//! generation, so a stale [`Handle`] can never resolve to a newer entity.

/// Handle to an arena entry: slot index plus generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    /// false once retired; the value is kept until the sweep
    live: bool,
    value: Option<T>,
}

/// Slot storage for one entity category
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    retired: Vec<u32>,
    live_count: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            retired: Vec::new(),
            live_count: 0,
        }
    }

    /// Insert a value, reusing a swept slot when one is available
    pub fn insert(&mut self, value: T) -> Handle {
        self.live_count += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.live = true;
            slot.value = Some(value);
            return Handle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            live: true,
            value: Some(value),
        });
        Handle {
            index,
            generation: 0,
        }
    }

    fn live_slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.live && s.generation == handle.generation)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.live_slot(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.live_slot(handle).and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.live && s.generation == handle.generation)
            .and_then(|s| s.value.as_mut())
    }

    /// Mark an entry dead. Returns false if the handle was already stale.
    pub fn retire(&mut self, handle: Handle) -> bool {
        match self.slots.get_mut(handle.index as usize) {
            Some(slot) if slot.live && slot.generation == handle.generation => {
                slot.live = false;
                self.retired.push(handle.index);
                self.live_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Retire every live entry
    pub fn retire_all(&mut self) {
        for handle in self.handles() {
            self.retire(handle);
        }
    }

    /// Free retired slots. Returns how many entries were dropped.
    pub fn sweep(&mut self) -> usize {
        let swept = self.retired.len();
        for index in self.retired.drain(..) {
            let slot = &mut self.slots[index as usize];
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
        swept
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            if !s.live {
                return None;
            }
            s.value.as_ref().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            if !s.live {
                return None;
            }
            let generation = s.generation;
            s.value.as_mut().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, v)| v)
    }

    /// Snapshot of live handles (safe to hold while mutating the arena)
    pub fn handles(&self) -> Vec<Handle> {
        self.iter().map(|(h, _)| h).collect()
    }
}
