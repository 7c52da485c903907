//! Boolean-valued functions of one and two arguments.

use crate::bifunction::BiFunction;
use crate::function::Function;
use crate::memoizer::CacheStats;
use crate::prim::CacheKey;
use std::fmt;

pub struct Predicate<T> {
    function: Function<T, bool>,
}

impl<T: 'static> Predicate<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> bool + Send + Sync + 'static,
    {
        Predicate {
            function: Function::new(f),
        }
    }

    #[inline]
    pub fn test(&self, t: T) -> bool {
        self.function.apply(t)
    }

    pub fn negate(&self) -> Self {
        let this = self.clone();
        Predicate::new(move |t| !this.test(t))
    }

    /// Short-circuiting conjunction.
    pub fn and(&self, other: Predicate<T>) -> Self
    where
        T: Clone,
    {
        let this = self.clone();
        Predicate::new(move |t: T| this.test(t.clone()) && other.test(t))
    }

    /// Short-circuiting disjunction.
    pub fn or(&self, other: Predicate<T>) -> Self
    where
        T: Clone,
    {
        let this = self.clone();
        Predicate::new(move |t: T| this.test(t.clone()) || other.test(t))
    }

    pub fn xor(&self, other: Predicate<T>) -> Self
    where
        T: Clone,
    {
        let this = self.clone();
        Predicate::new(move |t: T| this.test(t.clone()) ^ other.test(t))
    }

    /// Tests the output of `before`.
    pub fn compose<V: 'static>(&self, before: Function<V, T>) -> Predicate<V> {
        Predicate {
            function: self.function.compose(before),
        }
    }
}

impl<T> Predicate<T> {
    pub fn is_memoized(&self) -> bool {
        self.function.is_memoized()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.function.cache_stats()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.function.ptr_eq(&other.function)
    }

    pub fn into_function(self) -> Function<T, bool> {
        self.function
    }
}

impl<T: CacheKey + 'static> Predicate<T> {
    pub fn memoize(&self) -> Self {
        Predicate {
            function: self.function.memoize(),
        }
    }
}

impl<T> From<Function<T, bool>> for Predicate<T> {
    fn from(function: Function<T, bool>) -> Self {
        Predicate { function }
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            function: self.function.clone(),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("memoized", &self.function.is_memoized())
            .finish()
    }
}

pub struct BiPredicate<A, B> {
    function: BiFunction<A, B, bool>,
}

impl<A: 'static, B: 'static> BiPredicate<A, B> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A, B) -> bool + Send + Sync + 'static,
    {
        BiPredicate {
            function: BiFunction::new(f),
        }
    }

    #[inline]
    pub fn test(&self, a: A, b: B) -> bool {
        self.function.apply(a, b)
    }

    pub fn negate(&self) -> Self {
        let this = self.clone();
        BiPredicate::new(move |a, b| !this.test(a, b))
    }

    pub fn and(&self, other: BiPredicate<A, B>) -> Self
    where
        A: Clone,
        B: Clone,
    {
        let this = self.clone();
        BiPredicate::new(move |a: A, b: B| this.test(a.clone(), b.clone()) && other.test(a, b))
    }

    pub fn or(&self, other: BiPredicate<A, B>) -> Self
    where
        A: Clone,
        B: Clone,
    {
        let this = self.clone();
        BiPredicate::new(move |a: A, b: B| this.test(a.clone(), b.clone()) || other.test(a, b))
    }

    pub fn apply_first(&self, a: A) -> Predicate<B>
    where
        A: Clone + Send + Sync,
    {
        Predicate {
            function: self.function.apply_first(a),
        }
    }

    pub fn apply_second(&self, b: B) -> Predicate<A>
    where
        B: Clone + Send + Sync,
    {
        Predicate {
            function: self.function.apply_second(b),
        }
    }
}

impl<A, B> BiPredicate<A, B> {
    pub fn is_memoized(&self) -> bool {
        self.function.is_memoized()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.function.cache_stats()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.function.ptr_eq(&other.function)
    }

    pub fn into_function(self) -> BiFunction<A, B, bool> {
        self.function
    }
}

impl<A: CacheKey + 'static, B: CacheKey + 'static> BiPredicate<A, B> {
    pub fn memoize(&self) -> Self {
        BiPredicate {
            function: self.function.memoize(),
        }
    }
}

impl<A, B> Clone for BiPredicate<A, B> {
    fn clone(&self) -> Self {
        BiPredicate {
            function: self.function.clone(),
        }
    }
}

impl<A, B> fmt::Debug for BiPredicate<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BiPredicate")
            .field("memoized", &self.function.is_memoized())
            .finish()
    }
}
