use crate::function::Function;
use crate::handle::Handle;
use crate::memoizer::{CacheStats, Memoizer};
use crate::prim::CacheKey;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub type DynBiFn<A, B, R> = dyn Fn(A, B) -> R + Send + Sync;

/// A function of two arguments.
pub struct BiFunction<A, B, R> {
    handle: Handle<DynBiFn<A, B, R>>,
}

/// A function combining two values of one type into a third of the same type.
pub type BinaryOperator<T> = BiFunction<T, T, T>;

impl<A: 'static, B: 'static, R: 'static> BiFunction<A, B, R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A, B) -> R + Send + Sync + 'static,
    {
        let f: Arc<DynBiFn<A, B, R>> = Arc::new(f);
        BiFunction {
            handle: Handle::plain(f),
        }
    }

    #[inline]
    pub fn apply(&self, a: A, b: B) -> R {
        (self.handle.get())(a, b)
    }

    pub fn and_then<V: 'static>(&self, after: Function<R, V>) -> BiFunction<A, B, V> {
        let this = self.clone();
        BiFunction::new(move |a, b| after.apply(this.apply(a, b)))
    }

    /// Fixes the first argument.
    pub fn apply_first(&self, a: A) -> Function<B, R>
    where
        A: Clone + Send + Sync,
    {
        let this = self.clone();
        Function::new(move |b| this.apply(a.clone(), b))
    }

    /// Fixes the second argument.
    pub fn apply_second(&self, b: B) -> Function<A, R>
    where
        B: Clone + Send + Sync,
    {
        let this = self.clone();
        Function::new(move |a| this.apply(a, b.clone()))
    }

    pub fn curried(&self) -> Function<A, Function<B, R>>
    where
        A: Clone + Send + Sync,
    {
        let this = self.clone();
        Function::new(move |a| this.apply_first(a))
    }
}

impl<A, B, R> BiFunction<A, B, R> {
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

impl<A, B, R> BiFunction<A, B, R>
where
    A: CacheKey + 'static,
    B: CacheKey + 'static,
    R: Clone + Send + 'static,
{
    /// Memoizes on the pair of arguments.
    pub fn memoize(&self) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        let source = self.handle.shared();
        let cache = Arc::new(Memoizer::<(A::Key, B::Key), R>::new());
        let memo = Arc::clone(&cache);
        let call: Arc<DynBiFn<A, B, R>> = Arc::new(move |a: A, b: B| {
            let key = (a.cache_key(), b.cache_key());
            memo.get_or_compute(key, || source(a, b))
        });
        BiFunction {
            handle: Handle::memoized(call, cache),
        }
    }
}

impl<T: 'static> BinaryOperator<T> {
    /// Returns the lesser of two values according to `compare`; the first on ties.
    pub fn min_by<C>(compare: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        BiFunction::new(move |a, b| match compare(&a, &b) {
            Ordering::Greater => b,
            _ => a,
        })
    }

    /// Returns the greater of two values according to `compare`; the first on ties.
    pub fn max_by<C>(compare: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        BiFunction::new(move |a, b| match compare(&a, &b) {
            Ordering::Less => b,
            _ => a,
        })
    }
}

impl<A, B, R> Clone for BiFunction<A, B, R> {
    fn clone(&self) -> Self {
        BiFunction {
            handle: self.handle.clone(),
        }
    }
}

impl<A, B, R> fmt::Debug for BiFunction<A, B, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BiFunction")
            .field("memoized", &self.handle.is_memoized())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    #[test]
    fn partial_application() {
        let sub = BinaryOperator::new(|a: i64, b: i64| a - b);
        assert_eq!(sub.apply_first(10).apply(3), 7);
        assert_eq!(sub.apply_second(10).apply(3), -7);
        assert_eq!(sub.curried().apply(10).apply(4), 6);
    }

    #[test]
    fn and_then() {
        let mul = BinaryOperator::new(|a: i32, b: i32| a * b);
        let describe = mul.and_then(Function::new(|x: i32| format!("={}", x)));
        assert_eq!(describe.apply(6, 7), "=42");
    }

    #[test]
    fn memoize_on_pairs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pow = BiFunction::new(move |base: i64, exp: i32| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
            base.pow(exp as u32)
        })
        .memoize();
        assert_eq!(pow.apply(2, 10), 1024);
        assert_eq!(pow.apply(2, 10), 1024);
        assert_eq!(pow.apply(10, 2), 100);
        assert_eq!(calls.load(AtomicOrdering::SeqCst), 2);
        assert!(pow.memoize().ptr_eq(&pow));
        assert_eq!(pow.cache_stats().unwrap().size, 2);
    }

    #[test]
    fn min_and_max() {
        let min = BinaryOperator::min_by(|a: &f64, b: &f64| a.total_cmp(b));
        let max = BinaryOperator::max_by(|a: &f64, b: &f64| a.total_cmp(b));
        assert_eq!(min.apply(1.5, -2.0), -2.0);
        assert_eq!(max.apply(1.5, -2.0), 1.5);
        let first = BinaryOperator::min_by(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(first.apply((1, 'a'), (1, 'b')), (1, 'a'));
    }
}
