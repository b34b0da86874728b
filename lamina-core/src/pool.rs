//! Fixed-capacity session pool
//!
//! Backs both LED overlay sessions and floating text boxes. Each slot
//! carries a watermark and a generated id; a [`Handle`] is valid only while
//! the slot's watermark matches the pool's and its id equals the handle's.
//! Releasing a slot clears both, so any copy of an old handle fails cleanly.

use core::marker::PhantomData;

/// Pool errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoolError {
    /// Every slot is in use
    Exhausted,
    /// Handle does not name a live slot
    InvalidHandle,
}

/// Handle to a live pool entry
///
/// Handles are plain values and may be copied freely; validity is checked
/// on every use.
pub struct Handle<T> {
    slot: u8,
    id: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    const fn new(slot: u8, id: u32) -> Self {
        Self {
            slot,
            id,
            _kind: PhantomData,
        }
    }

    /// Slot index within the pool
    pub const fn slot(&self) -> usize {
        self.slot as usize
    }

    /// Unique id assigned when the entry was created
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> core::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handle")
            .field("slot", &self.slot)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<T> defmt::Format for Handle<T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Handle(slot={}, id={})", self.slot, self.id);
    }
}

struct Slot<T> {
    watermark: u32,
    id: u32,
    value: Option<T>,
}

impl<T> Slot<T> {
    const fn vacant() -> Self {
        Self {
            watermark: 0,
            id: 0,
            value: None,
        }
    }
}

/// Fixed pool of at most `N` live entries
pub struct Pool<T, const N: usize> {
    slots: [Slot<T>; N],
    watermark: u32,
    next_id: u32,
}

impl<T, const N: usize> Pool<T, N> {
    /// Slot indices travel in a `u8`; larger pools fail to compile
    const SLOTS_FIT_HANDLE: () = assert!(
        N <= u8::MAX as usize + 1,
        "pool capacity exceeds handle slot range"
    );

    /// Create an empty pool tagging its slots with `watermark`
    pub fn new(watermark: u32) -> Self {
        let () = Self::SLOTS_FIT_HANDLE;
        Self {
            slots: core::array::from_fn(|_| Slot::vacant()),
            watermark,
            next_id: 1,
        }
    }

    /// Store `value` in the first free slot
    pub fn acquire(&mut self, value: T) -> Result<Handle<T>, PoolError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.id == 0)
            .ok_or(PoolError::Exhausted)?;

        let id = self.generate_id();
        let slot = &mut self.slots[index];
        slot.watermark = self.watermark;
        slot.id = id;
        slot.value = Some(value);

        Ok(Handle::new(index as u8, id))
    }

    /// Free the slot a handle names, returning its value
    pub fn release(&mut self, handle: Handle<T>) -> Result<T, PoolError> {
        let index = self.validate(handle)?;
        let slot = &mut self.slots[index];
        slot.watermark = 0;
        slot.id = 0;
        slot.value.take().ok_or(PoolError::InvalidHandle)
    }

    /// Borrow a live entry
    pub fn get(&self, handle: Handle<T>) -> Result<&T, PoolError> {
        let index = self.validate(handle)?;
        self.slots[index].value.as_ref().ok_or(PoolError::InvalidHandle)
    }

    /// Mutably borrow a live entry
    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, PoolError> {
        let index = self.validate(handle)?;
        self.slots[index].value.as_mut().ok_or(PoolError::InvalidHandle)
    }

    /// Whether a handle still names a live entry
    pub fn is_valid(&self, handle: Handle<T>) -> bool {
        self.validate(handle).is_ok()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.id != 0).count()
    }

    /// True when no entry is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pool capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            (slot.id != 0).then(|| (Handle::new(index as u8, slot.id), value))
        })
    }

    /// Live entries in slot order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let id = slot.id;
            let value = slot.value.as_mut()?;
            (id != 0).then(|| (Handle::new(index as u8, id), value))
        })
    }

    fn validate(&self, handle: Handle<T>) -> Result<usize, PoolError> {
        let index = handle.slot();
        match self.slots.get(index) {
            Some(slot)
                if slot.watermark == self.watermark && slot.id != 0 && slot.id == handle.id =>
            {
                Ok(index)
            }
            _ => Err(PoolError::InvalidHandle),
        }
    }

    fn generate_id(&mut self) -> u32 {
        let id = self.next_id;
        // Zero marks a free slot, so skip it on wraparound
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }
}
