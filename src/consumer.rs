//! Operations run for their side effects.

use crate::function::Function;
use std::fmt;
use std::sync::Arc;

pub struct Consumer<T> {
    f: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T: 'static> Consumer<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Consumer { f: Arc::new(f) }
    }

    #[inline]
    pub fn accept(&self, t: T) {
        (self.f)(t)
    }

    /// Returns a consumer running this one, then `after`, on the same value.
    pub fn and_then(&self, after: Consumer<T>) -> Self
    where
        T: Clone,
    {
        let this = self.clone();
        Consumer::new(move |t: T| {
            this.accept(t.clone());
            after.accept(t);
        })
    }

    /// Feeds this consumer with the output of `before`.
    pub fn compose<V: 'static>(&self, before: Function<V, T>) -> Consumer<V> {
        let this = self.clone();
        Consumer::new(move |v| this.accept(before.apply(v)))
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Consumer {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Consumer")
    }
}

pub struct BiConsumer<A, B> {
    f: Arc<dyn Fn(A, B) + Send + Sync>,
}

impl<A: 'static, B: 'static> BiConsumer<A, B> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A, B) + Send + Sync + 'static,
    {
        BiConsumer { f: Arc::new(f) }
    }

    #[inline]
    pub fn accept(&self, a: A, b: B) {
        (self.f)(a, b)
    }

    pub fn and_then(&self, after: BiConsumer<A, B>) -> Self
    where
        A: Clone,
        B: Clone,
    {
        let this = self.clone();
        BiConsumer::new(move |a: A, b: B| {
            this.accept(a.clone(), b.clone());
            after.accept(a, b);
        })
    }

    /// Fixes the first argument.
    pub fn apply_first(&self, a: A) -> Consumer<B>
    where
        A: Clone + Send + Sync,
    {
        let this = self.clone();
        Consumer::new(move |b| this.accept(a.clone(), b))
    }
}

impl<A, B> Clone for BiConsumer<A, B> {
    fn clone(&self) -> Self {
        BiConsumer {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A, B> fmt::Debug for BiConsumer<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("BiConsumer")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn and_then_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = {
            let log = Arc::clone(&log);
            Consumer::new(move |x: i32| log.lock().unwrap().push(format!("first {}", x)))
        };
        let second = {
            let log = Arc::clone(&log);
            Consumer::new(move |x: i32| log.lock().unwrap().push(format!("second {}", x)))
        };
        first.and_then(second).accept(3);
        assert_eq!(*log.lock().unwrap(), vec!["first 3", "second 3"]);
    }

    #[test]
    fn compose() {
        let total = Arc::new(Mutex::new(0i64));
        let add = {
            let total = Arc::clone(&total);
            Consumer::new(move |x: i64| *total.lock().unwrap() += x)
        };
        let widen = Function::new(|x: i32| x as i64 * 1_000_000);
        let add_wide = add.compose(widen);
        add_wide.accept(5000);
        add_wide.accept(5000);
        assert_eq!(*total.lock().unwrap(), 10_000_000_000);
    }

    #[test]
    fn bi_consumer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = {
            let seen = Arc::clone(&seen);
            BiConsumer::new(move |k: char, v: bool| seen.lock().unwrap().push((k, v)))
        };
        let twice = record.and_then(record.clone());
        twice.accept('a', true);
        record.apply_first('z').accept(false);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![('a', true), ('a', true), ('z', false)]
        );
    }
}
