use std::sync::{Mutex, MutexGuard};

// Guarded values are plain data with no cross-field invariants, so a poisoned lock is
// still safe to read.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
