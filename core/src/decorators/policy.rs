//! decorators/policy.rs
//! Close policy: what a decorator does to a wrapped stream when it closes it,
//! and whether the decorator should report itself closed afterwards.

use crate::contract::Closeable;
use crate::types::StreamResult;

/// Capability invoked with the wrapped stream on close.
///
/// Returns `true` when the caller should consider itself closed. Any
/// `FnMut(&mut S) -> StreamResult<bool>` closure is a policy.
pub trait ClosePolicy<S: ?Sized> {
    fn on_close(&mut self, stream: &mut S) -> StreamResult<bool>;
}

impl<S: ?Sized, F> ClosePolicy<S> for F
where
    F: FnMut(&mut S) -> StreamResult<bool>,
{
    #[inline]
    fn on_close(&mut self, stream: &mut S) -> StreamResult<bool> {
        self(stream)
    }
}

/// The three canonical policies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StandardPolicy {
    /// Physically close the inner stream and report closed.
    #[default]
    Close,
    /// Leave the inner stream open and keep reporting open.
    LeaveOpen,
    /// Leave the inner stream open but report closed, fencing further use through the wrapper.
    Fence,
}

impl<S: Closeable + ?Sized> ClosePolicy<S> for StandardPolicy {
    fn on_close(&mut self, stream: &mut S) -> StreamResult<bool> {
        match self {
            StandardPolicy::Close => {
                stream.close()?;
                Ok(true)
            }
            StandardPolicy::LeaveOpen => Ok(false),
            StandardPolicy::Fence => Ok(true),
        }
    }
}
