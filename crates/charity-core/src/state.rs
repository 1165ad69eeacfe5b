//! Loading/error/data triple held by UI state layers around a service call.

use std::fmt::Display;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Clears the loading flag on drop, including when the load is cancelled.
struct LoadingGuard<'a, T> {
    state: &'a mut Loadable<T>,
}

impl<'a, T> LoadingGuard<'a, T> {
    fn raise(state: &'a mut Loadable<T>) -> Self {
        state.loading = true;
        state.error = None;
        Self { state }
    }

    fn state(&mut self) -> &mut Loadable<T> {
        &mut *self.state
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        self.state.loading = false;
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` with the loading flag raised. On success the data is
    /// replaced; on failure the previous data is kept and the error's message
    /// is captured. Returns whether the operation succeeded.
    pub async fn load<F, E>(&mut self, operation: F) -> bool
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut guard = LoadingGuard::raise(self);

        match operation.await {
            Ok(data) => {
                guard.state().data = Some(data);
                true
            }
            Err(e) => {
                guard.state().error = Some(e.to_string());
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
