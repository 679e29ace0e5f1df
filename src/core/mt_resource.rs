use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted resource container with read-write
/// locking.
///
/// `MtResource` provides synchronized access to a value of type `T` shared
/// across threads — here, the world shared between the foreground and the
/// chunk worker. It wraps an `Arc<RwLock<T>>`: reads can proceed
/// concurrently, writes are exclusive.
///
/// # Examples
///
/// ```
/// use voxel_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// *counter.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
/// ```
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read guard for the contained value.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap()
    }

    /// Returns a write guard for the contained value.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap()
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_state_between_threads() {
        let counter = MtResource::new(0);
        let clone = counter.clone();

        let handle = std::thread::spawn(move || {
            *clone.get_mut() += 1;
        });
        handle.join().unwrap();

        assert_eq!(*counter.get(), 1);
    }
}
