use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Registry contents stay consistent across a panicking writer: every write is a
// single push or clear.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
