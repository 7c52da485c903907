//! Argument-less producers of values.
//!
//! A supplier has a single implicit key, so its memoized form computes its
//! value once and returns clones afterwards.

use crate::error::{Cause, FnError};
use crate::function::Function;
use crate::handle::Handle;
use crate::memoizer::{CacheStats, Memoizer};
use std::fmt;
use std::sync::Arc;

type DynSupplier<T> = dyn Fn() -> T + Send + Sync;
type DynThrowingSupplier<T, E> = dyn Fn() -> Result<T, E> + Send + Sync;

pub struct Supplier<T> {
    handle: Handle<DynSupplier<T>>,
}

impl<T: 'static> Supplier<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let f: Arc<DynSupplier<T>> = Arc::new(f);
        Supplier {
            handle: Handle::plain(f),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        (self.handle.get())()
    }

    pub fn map<V: 'static>(&self, f: Function<T, V>) -> Supplier<V> {
        let this = self.clone();
        Supplier::new(move || f.apply(this.get()))
    }
}

impl<T> Supplier<T> {
    pub fn is_memoized(&self) -> bool {
        self.handle.is_memoized()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.handle.stats()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.handle.ptr_eq(&other.handle)
    }
}

impl<T: Clone + Send + 'static> Supplier<T> {
    pub fn memoize(&self) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        let source = self.handle.shared();
        let cache = Arc::new(Memoizer::<(), T>::new());
        let memo = Arc::clone(&cache);
        let call: Arc<DynSupplier<T>> = Arc::new(move || memo.get_or_compute((), || source()));
        Supplier {
            handle: Handle::memoized(call, cache),
        }
    }
}

impl<T> Clone for Supplier<T> {
    fn clone(&self) -> Self {
        Supplier {
            handle: self.handle.clone(),
        }
    }
}

impl<T> fmt::Debug for Supplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Supplier")
            .field("memoized", &self.handle.is_memoized())
            .finish()
    }
}

/// A supplier that can fail.
pub struct ThrowingSupplier<T, E> {
    handle: Handle<DynThrowingSupplier<T, E>>,
}

impl<T: 'static, E: 'static> ThrowingSupplier<T, E> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        let f: Arc<DynThrowingSupplier<T, E>> = Arc::new(f);
        ThrowingSupplier {
            handle: Handle::plain(f),
        }
    }

    #[inline]
    pub fn try_get(&self) -> Result<T, E> {
        (self.handle.get())()
    }

    /// Re-raises failures as [`FnError::Nested`].
    pub fn nest(&self) -> ThrowingSupplier<T, FnError>
    where
        E: Into<Cause>,
    {
        let this = self.clone();
        ThrowingSupplier::new(move || this.try_get().map_err(FnError::nest))
    }

    /// Exposes the failure as a plain value.
    pub fn sneaky(&self) -> Supplier<Result<T, E>> {
        let this = self.clone();
        Supplier::new(move || this.try_get())
    }

    pub fn or_return(&self, value: T) -> Supplier<T>
    where
        T: Clone + Send + Sync,
    {
        let this = self.clone();
        Supplier::new(move || this.try_get().unwrap_or_else(|_| value.clone()))
    }
}

impl<T, E> ThrowingSupplier<T, E> {
    pub fn is_memoized(&self) -> bool {
        self.handle.is_memoized()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.handle.stats()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.handle.ptr_eq(&other.handle)
    }
}

impl<T: Clone + Send + 'static, E: 'static> ThrowingSupplier<T, E> {
    /// Caches the first success; failures are retried on the next call.
    pub fn memoize(&self) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        let source = self.handle.shared();
        let cache = Arc::new(Memoizer::<(), T>::new());
        let memo = Arc::clone(&cache);
        let call: Arc<DynThrowingSupplier<T, E>> =
            Arc::new(move || memo.try_get_or_compute((), || source()));
        ThrowingSupplier {
            handle: Handle::memoized(call, cache),
        }
    }
}

impl<T, E> Clone for ThrowingSupplier<T, E> {
    fn clone(&self) -> Self {
        ThrowingSupplier {
            handle: self.handle.clone(),
        }
    }
}

impl<T, E> fmt::Debug for ThrowingSupplier<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ThrowingSupplier")
            .field("memoized", &self.handle.is_memoized())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn memoized_supplier_computes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let answer = Supplier::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            42
        });
        assert_eq!(answer.get(), 42);
        assert_eq!(answer.get(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let memo = answer.memoize();
        assert_eq!(memo.get(), 42);
        assert_eq!(memo.get(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(memo.memoize().ptr_eq(&memo));
        assert_eq!(memo.cache_stats().unwrap().size, 1);
    }

    #[test]
    fn map() {
        let pi = Supplier::new(|| std::f64::consts::PI);
        let rounded = pi.map(Function::new(|x: f64| x.round() as i64));
        assert_eq!(rounded.get(), 3);
    }

    #[test]
    fn throwing_supplier_retries_after_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let flaky = ThrowingSupplier::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("not ready")
            } else {
                Ok('r')
            }
        })
        .memoize();
        assert_eq!(flaky.try_get(), Err("not ready"));
        assert_eq!(flaky.try_get(), Ok('r'));
        assert_eq!(flaky.try_get(), Ok('r'));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(flaky.memoize().ptr_eq(&flaky));
        assert_eq!(flaky.cache_stats().unwrap().size, 1);
    }

    #[test]
    fn adaptations() {
        let broken: ThrowingSupplier<i64, std::num::ParseIntError> =
            ThrowingSupplier::new(|| "x".parse::<i64>());
        assert!(broken.sneaky().get().is_err());
        assert_eq!(broken.or_return(-1).get(), -1);
        match broken.nest().try_get() {
            Err(FnError::Nested(cause)) => {
                assert!(cause.downcast_ref::<std::num::ParseIntError>().is_some())
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
