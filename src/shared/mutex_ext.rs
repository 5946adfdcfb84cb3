//! Usage: Lock helpers that keep the app running after a panicking holder poisoned a mutex.

use std::sync::{Mutex, MutexGuard};

pub(crate) trait MutexExt<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("mutex poisoned, recovering inner state");
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn lock_or_recover_returns_value_after_poison() {
        let shared = Arc::new(Mutex::new(1));
        let cloned = Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let mut guard = cloned.lock().expect("lock");
            *guard = 2;
            panic!("poison the mutex");
        })
        .join();

        assert!(shared.is_poisoned());
        assert_eq!(*shared.lock_or_recover(), 2);
    }
}
