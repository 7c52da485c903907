use crate::memoizer::{CacheStats, MemoStats};
use std::sync::Arc;

/// Shared callable behind every wrapper, tagged with whether it is memoized.
pub(crate) enum Handle<F: ?Sized> {
    Plain(Arc<F>),
    Memoized(Arc<F>, Arc<dyn MemoStats>),
}

impl<F: ?Sized> Handle<F> {
    pub(crate) fn plain(f: Arc<F>) -> Self {
        Handle::Plain(f)
    }

    pub(crate) fn memoized(f: Arc<F>, cache: Arc<dyn MemoStats>) -> Self {
        Handle::Memoized(f, cache)
    }

    #[inline]
    pub(crate) fn get(&self) -> &F {
        match self {
            Handle::Plain(f) | Handle::Memoized(f, _) => f,
        }
    }

    pub(crate) fn shared(&self) -> Arc<F> {
        match self {
            Handle::Plain(f) | Handle::Memoized(f, _) => Arc::clone(f),
        }
    }

    pub(crate) fn is_memoized(&self) -> bool {
        matches!(self, Handle::Memoized(..))
    }

    pub(crate) fn stats(&self) -> Option<CacheStats> {
        match self {
            Handle::Plain(_) => None,
            Handle::Memoized(_, cache) => Some(cache.stats()),
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared(), &other.shared())
    }
}

impl<F: ?Sized> Clone for Handle<F> {
    fn clone(&self) -> Self {
        match self {
            Handle::Plain(f) => Handle::Plain(Arc::clone(f)),
            Handle::Memoized(f, cache) => Handle::Memoized(Arc::clone(f), Arc::clone(cache)),
        }
    }
}
