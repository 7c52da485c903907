//! Fallible wrappers and the adapters that turn their failures into
//! something the caller chooses.
//!
//! `nest` re-raises any failure as [`FnError::Nested`], keeping the original
//! as its source. `sneaky` hands the `Result` to the caller unchanged behind a
//! non-throwing [`Function`]. `fallback_to` and `or_return` recover.

use crate::bifunction::BiFunction;
use crate::error::{Cause, FnError};
use crate::function::Function;
use crate::handle::Handle;
use crate::memoizer::{CacheStats, Memoizer};
use crate::prim::CacheKey;
use log::debug;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

pub type DynThrowingFn<A, R, E> = dyn Fn(A) -> Result<R, E> + Send + Sync;
pub type DynThrowingBiFn<A, B, R, E> = dyn Fn(A, B) -> Result<R, E> + Send + Sync;

pub struct ThrowingFunction<A, R, E> {
    handle: Handle<DynThrowingFn<A, R, E>>,
}

pub type ThrowingUnaryOperator<T, E> = ThrowingFunction<T, T, E>;
pub type ThrowingPredicate<T, E> = ThrowingFunction<T, bool, E>;

impl<A: 'static, R: 'static, E: 'static> ThrowingFunction<A, R, E> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    {
        let f: Arc<DynThrowingFn<A, R, E>> = Arc::new(f);
        ThrowingFunction {
            handle: Handle::plain(f),
        }
    }

    /// Wraps a function that never fails.
    pub fn lift(f: Function<A, R>) -> Self {
        ThrowingFunction::new(move |a| Ok(f.apply(a)))
    }

    #[inline]
    pub fn try_apply(&self, a: A) -> Result<R, E> {
        (self.handle.get())(a)
    }

    pub fn compose<V: 'static>(&self, before: ThrowingFunction<V, A, E>) -> ThrowingFunction<V, R, E> {
        let this = self.clone();
        ThrowingFunction::new(move |v| this.try_apply(before.try_apply(v)?))
    }

    /// Applies `after` to a success; a failure skips it.
    pub fn and_then<V: 'static>(&self, after: ThrowingFunction<R, V, E>) -> ThrowingFunction<A, V, E> {
        let this = self.clone();
        ThrowingFunction::new(move |a| after.try_apply(this.try_apply(a)?))
    }

    pub fn and_then_fn<V: 'static>(&self, after: Function<R, V>) -> ThrowingFunction<A, V, E> {
        let this = self.clone();
        ThrowingFunction::new(move |a| this.try_apply(a).map(|r| after.apply(r)))
    }

    pub fn map_err<E2, M>(&self, map: M) -> ThrowingFunction<A, R, E2>
    where
        E2: 'static,
        M: Fn(E) -> E2 + Send + Sync + 'static,
    {
        let this = self.clone();
        ThrowingFunction::new(move |a| this.try_apply(a).map_err(&map))
    }

    /// Re-raises failures as [`FnError::Nested`].
    pub fn nest(&self) -> ThrowingFunction<A, R, FnError>
    where
        E: Into<Cause>,
    {
        self.map_err(FnError::nest)
    }

    /// Exposes the failure as a plain value of a non-throwing function.
    pub fn sneaky(&self) -> Function<A, Result<R, E>> {
        let this = self.clone();
        Function::new(move |a| this.try_apply(a))
    }

    /// On failure, computes the result with `fallback` instead.
    pub fn fallback_to(&self, fallback: Function<A, R>) -> Function<A, R>
    where
        A: Clone,
    {
        let this = self.clone();
        Function::new(move |a: A| match this.try_apply(a.clone()) {
            Ok(r) => r,
            Err(_) => {
                debug!("{} failed, using fallback", type_name::<Self>());
                fallback.apply(a)
            }
        })
    }

    /// On failure, returns `value` instead.
    pub fn or_return(&self, value: R) -> Function<A, R>
    where
        R: Clone + Send + Sync,
    {
        let this = self.clone();
        Function::new(move |a| {
            this.try_apply(a).unwrap_or_else(|_| {
                debug!("{} failed, returning default", type_name::<Self>());
                value.clone()
            })
        })
    }
}

impl<A, R, E> ThrowingFunction<A, R, E> {
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

impl<A: 'static, R: 'static> ThrowingFunction<A, R, FnError> {
    /// Wraps a source that may produce no value. An absent value is
    /// reported as [`FnError::NullResult`], and so is never memoized.
    pub fn from_nullable<F>(f: F) -> Self
    where
        F: Fn(A) -> Option<R> + Send + Sync + 'static,
    {
        ThrowingFunction::new(move |a| f(a).ok_or_else(|| FnError::NullResult(type_name::<R>())))
    }
}

impl<A, R, E> ThrowingFunction<A, R, E>
where
    A: CacheKey + 'static,
    R: Clone + Send + 'static,
    E: 'static,
{
    /// Memoizes successes. A failure propagates and leaves no entry, so the
    /// same argument is computed again on the next call.
    pub fn memoize(&self) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        let source = self.handle.shared();
        let cache = Arc::new(Memoizer::<A::Key, R>::new());
        let memo = Arc::clone(&cache);
        let call: Arc<DynThrowingFn<A, R, E>> = Arc::new(move |a: A| {
            let key = a.cache_key();
            memo.try_get_or_compute(key, || source(a))
        });
        ThrowingFunction {
            handle: Handle::memoized(call, cache),
        }
    }
}

impl<A, R, E> Clone for ThrowingFunction<A, R, E> {
    fn clone(&self) -> Self {
        ThrowingFunction {
            handle: self.handle.clone(),
        }
    }
}

impl<A, R, E> fmt::Debug for ThrowingFunction<A, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ThrowingFunction")
            .field("memoized", &self.handle.is_memoized())
            .finish()
    }
}

pub struct ThrowingBiFunction<A, B, R, E> {
    handle: Handle<DynThrowingBiFn<A, B, R, E>>,
}

pub type ThrowingBinaryOperator<T, E> = ThrowingBiFunction<T, T, T, E>;

impl<A: 'static, B: 'static, R: 'static, E: 'static> ThrowingBiFunction<A, B, R, E> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A, B) -> Result<R, E> + Send + Sync + 'static,
    {
        let f: Arc<DynThrowingBiFn<A, B, R, E>> = Arc::new(f);
        ThrowingBiFunction {
            handle: Handle::plain(f),
        }
    }

    pub fn lift(f: BiFunction<A, B, R>) -> Self {
        ThrowingBiFunction::new(move |a, b| Ok(f.apply(a, b)))
    }

    #[inline]
    pub fn try_apply(&self, a: A, b: B) -> Result<R, E> {
        (self.handle.get())(a, b)
    }

    pub fn and_then<V: 'static>(
        &self,
        after: ThrowingFunction<R, V, E>,
    ) -> ThrowingBiFunction<A, B, V, E> {
        let this = self.clone();
        ThrowingBiFunction::new(move |a, b| after.try_apply(this.try_apply(a, b)?))
    }

    pub fn apply_first(&self, a: A) -> ThrowingFunction<B, R, E>
    where
        A: Clone + Send + Sync,
    {
        let this = self.clone();
        ThrowingFunction::new(move |b| this.try_apply(a.clone(), b))
    }

    pub fn apply_second(&self, b: B) -> ThrowingFunction<A, R, E>
    where
        B: Clone + Send + Sync,
    {
        let this = self.clone();
        ThrowingFunction::new(move |a| this.try_apply(a, b.clone()))
    }

    pub fn nest(&self) -> ThrowingBiFunction<A, B, R, FnError>
    where
        E: Into<Cause>,
    {
        let this = self.clone();
        ThrowingBiFunction::new(move |a, b| this.try_apply(a, b).map_err(FnError::nest))
    }

    pub fn sneaky(&self) -> BiFunction<A, B, Result<R, E>> {
        let this = self.clone();
        BiFunction::new(move |a, b| this.try_apply(a, b))
    }

    pub fn or_return(&self, value: R) -> BiFunction<A, B, R>
    where
        R: Clone + Send + Sync,
    {
        let this = self.clone();
        BiFunction::new(move |a, b| this.try_apply(a, b).unwrap_or_else(|_| value.clone()))
    }
}

impl<A, B, R, E> ThrowingBiFunction<A, B, R, E> {
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

impl<A, B, R, E> ThrowingBiFunction<A, B, R, E>
where
    A: CacheKey + 'static,
    B: CacheKey + 'static,
    R: Clone + Send + 'static,
    E: 'static,
{
    pub fn memoize(&self) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        let source = self.handle.shared();
        let cache = Arc::new(Memoizer::<(A::Key, B::Key), R>::new());
        let memo = Arc::clone(&cache);
        let call: Arc<DynThrowingBiFn<A, B, R, E>> = Arc::new(move |a: A, b: B| {
            let key = (a.cache_key(), b.cache_key());
            memo.try_get_or_compute(key, || source(a, b))
        });
        ThrowingBiFunction {
            handle: Handle::memoized(call, cache),
        }
    }
}

impl<A, B, R, E> Clone for ThrowingBiFunction<A, B, R, E> {
    fn clone(&self) -> Self {
        ThrowingBiFunction {
            handle: self.handle.clone(),
        }
    }
}

impl<A, B, R, E> fmt::Debug for ThrowingBiFunction<A, B, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ThrowingBiFunction")
            .field("memoized", &self.handle.is_memoized())
            .finish()
    }
}
