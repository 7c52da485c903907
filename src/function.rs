use crate::handle::Handle;
use crate::memoizer::{CacheStats, Memoizer};
use crate::prim::CacheKey;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

pub type DynFn<A, R> = dyn Fn(A) -> R + Send + Sync;

/// A function of one argument.
///
/// Clones share the underlying closure and, once memoized, the cache.
pub struct Function<A, R> {
    handle: Handle<DynFn<A, R>>,
}

/// A function whose argument and result have the same type.
pub type UnaryOperator<T> = Function<T, T>;

impl<A: 'static, R: 'static> Function<A, R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let f: Arc<DynFn<A, R>> = Arc::new(f);
        Function {
            handle: Handle::plain(f),
        }
    }

    #[inline]
    pub fn apply(&self, a: A) -> R {
        (self.handle.get())(a)
    }

    /// Returns a function that applies `before`, then this function.
    pub fn compose<V: 'static>(&self, before: Function<V, A>) -> Function<V, R> {
        let this = self.clone();
        Function::new(move |v| this.apply(before.apply(v)))
    }

    /// Returns a function that applies this function, then `after`.
    pub fn and_then<V: 'static>(&self, after: Function<R, V>) -> Function<A, V> {
        let this = self.clone();
        Function::new(move |a| after.apply(this.apply(a)))
    }
}

impl<A, R> Function<A, R> {
    pub fn is_memoized(&self) -> bool {
        self.handle.is_memoized()
    }

    /// Statistics of the cache of a memoized function, `None` otherwise.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.handle.stats()
    }

    /// True if both handles share the same underlying closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.handle.ptr_eq(&other.handle)
    }

    pub fn into_fn(self) -> Arc<DynFn<A, R>> {
        self.handle.shared()
    }

    /// Applies the function to every input on the rayon pool.
    /// A memoized function shares its single cache across the workers.
    pub fn apply_all(&self, inputs: &[A]) -> Vec<R>
    where
        A: Clone + Send + Sync + 'static,
        R: Send + 'static,
    {
        inputs.par_iter().map(|a| self.apply(a.clone())).collect()
    }
}

impl<A, R> Function<A, R>
where
    A: CacheKey + 'static,
    R: Clone + Send + 'static,
{
    /// Returns a function that computes each distinct argument at most once.
    ///
    /// Memoizing a memoized function returns it unchanged.
    pub fn memoize(&self) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        let source = self.handle.shared();
        let cache = Arc::new(Memoizer::<A::Key, R>::new());
        let memo = Arc::clone(&cache);
        let call: Arc<DynFn<A, R>> = Arc::new(move |a: A| {
            let key = a.cache_key();
            memo.get_or_compute(key, || source(a))
        });
        Function {
            handle: Handle::memoized(call, cache),
        }
    }
}

impl<A, R> Clone for Function<A, R> {
    fn clone(&self) -> Self {
        Function {
            handle: self.handle.clone(),
        }
    }
}

impl<A, R> fmt::Debug for Function<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("memoized", &self.handle.is_memoized())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(calls: &Arc<AtomicUsize>) -> Function<i32, i32> {
        let calls = Arc::clone(calls);
        Function::new(move |x: i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            x * x
        })
    }

    #[test]
    fn apply() {
        let inc = Function::new(|x: i64| x + 1);
        assert_eq!(inc.apply(41), 42);
        let len = Function::new(|s: String| s.len());
        assert_eq!(len.apply("four".to_string()), 4);
    }

    #[test]
    fn compose_and_then_order() {
        let inc = UnaryOperator::new(|x: i32| x + 1);
        let double = UnaryOperator::new(|x: i32| x * 2);
        assert_eq!(inc.and_then(double.clone()).apply(5), 12);
        assert_eq!(inc.compose(double).apply(5), 11);
    }

    #[test]
    fn and_then_is_associative() {
        let f = UnaryOperator::new(|x: i32| x + 1);
        let g = UnaryOperator::new(|x: i32| x * 2);
        let h = UnaryOperator::new(|x: i32| x - 3);
        let left = f.and_then(g.clone()).and_then(h.clone());
        let right = f.and_then(g.and_then(h));
        assert_eq!(left.apply(5), 9);
        assert_eq!(right.apply(5), 9);
    }

    #[test]
    fn memoize_computes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let square = counting(&calls).memoize();
        for _ in 0..10 {
            assert_eq!(square.apply(7), 49);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(square.apply(3), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let stats = square.cache_stats().unwrap();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.hits, 9);
    }

    #[test]
    fn memoize_is_idempotent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let plain = counting(&calls);
        assert!(!plain.is_memoized());
        assert!(plain.cache_stats().is_none());
        let once = plain.memoize();
        let twice = once.memoize();
        assert!(once.is_memoized());
        assert!(once.ptr_eq(&twice));
        assert!(!plain.ptr_eq(&once));
        once.apply(2);
        twice.apply(2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_the_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let square = counting(&calls).memoize();
        let copy = square.clone();
        square.apply(4);
        copy.apply(4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn memoize_keys_floats_by_boxed_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sign = Function::new(move |x: f64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x.is_sign_negative()
        })
        .memoize();
        assert!(!sign.apply(0.0));
        assert!(sign.apply(-0.0));
        assert!(!sign.apply(f64::NAN));
        assert!(!sign.apply(f64::NAN));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn apply_all_in_parallel() {
        let calls = Arc::new(AtomicUsize::new(0));
        let square = counting(&calls).memoize();
        let inputs: Vec<i32> = (0..100).map(|i| i % 10).collect();
        let outputs = square.apply_all(&inputs);
        assert_eq!(outputs, inputs.iter().map(|x| x * x).collect::<Vec<_>>());
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn into_fn() {
        let neg = Function::new(|x: i16| -x).into_fn();
        assert_eq!(neg(3), -3);
    }
}
