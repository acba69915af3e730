// source.rs — A named, re-invocable data source.

use std::fmt;
use std::future::Future;

use aura_backend::BackendError;
use futures::future::BoxFuture;
use futures::FutureExt;

type Fetch<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, BackendError>> + Send + Sync>;

/// One input to an aggregation: a key plus a factory for the fetch future.
///
/// The factory is called once per attempt, so a retried source issues a
/// fresh request rather than re-polling a finished future.
pub struct Source<T> {
    key: String,
    fetch: Fetch<T>,
}

impl<T> Source<T> {
    pub fn new<F, Fut>(key: impl Into<String>, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, BackendError>> + Send + 'static,
    {
        Self {
            key: key.into(),
            fetch: Box::new(move || fetch().boxed()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn fetch(&self) -> BoxFuture<'static, Result<T, BackendError>> {
        (self.fetch)()
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").field("key", &self.key).finish()
    }
}
