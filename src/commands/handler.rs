//! Command handler abstraction.
//!
//! A handler is any callable that accepts the positional arguments following a
//! command name. Handlers communicate only through side effects; the dispatch
//! core never inspects what they do.

use std::sync::Arc;

/// Result returned by a handler body.
pub type HandlerResult = anyhow::Result<()>;

/// A callable bound to a command name.
pub trait Handler: Send + Sync {
    /// Invokes the handler with the raw text arguments.
    fn call(&self, args: &[String]) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&[String]) -> HandlerResult + Send + Sync,
{
    fn call(&self, args: &[String]) -> HandlerResult {
        self(args)
    }
}

/// A handler value that can be bound under several names.
pub type SharedHandler = Arc<dyn Handler>;

/// Wraps a handler into a [`SharedHandler`].
pub fn shared<H: Handler + 'static>(handler: H) -> SharedHandler {
    Arc::new(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_is_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = shared(move |args: &[String]| -> HandlerResult {
            sink.lock().unwrap().extend_from_slice(args);
            Ok(())
        });

        handler
            .call(&["some".to_string(), "strings".to_string()])
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["some", "strings"]);
    }

    #[test]
    fn test_handler_error_is_returned() {
        let handler = shared(|_: &[String]| -> HandlerResult { anyhow::bail!("boom") });
        let err = handler.call(&[]).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
