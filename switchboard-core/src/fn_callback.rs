use crate::{Callback, CallbackError, EventCode, Params};

type BoxedFn<C> = Box<dyn FnMut(&mut Params, &mut C) -> Result<(), CallbackError>>;

/// Adapts a plain closure into a [`Callback`].
///
/// The closure receives the adapter's own [`Params`] bag first and the live
/// engine context second, so parameters supplied at registration time
/// (counters, thresholds, labels) can be read and updated on every
/// dispatch:
///
/// ```
/// use switchboard_core::{FnCallback, EventCode, Params};
///
/// let mut seen_nodes = FnCallback::<()>::with_params(
///     |params, _ctx| {
///         let count = params.get_int("count").unwrap_or(0);
///         params.set("count", count + 1);
///         Ok(())
///     },
///     EventCode::new(4),
///     Params::new().with("count", 0_i64),
/// );
/// # let _ = &mut seen_nodes;
/// ```
pub struct FnCallback<C> {
    func: BoxedFn<C>,
    code: EventCode,
    params: Params,
}

impl<C> FnCallback<C> {
    /// Wraps `func` with an empty parameter bag.
    pub fn new<F>(func: F, code: EventCode) -> Self
    where
        F: FnMut(&mut Params, &mut C) -> Result<(), CallbackError> + 'static,
    {
        Self::with_params(func, code, Params::new())
    }

    /// Wraps `func` with parameters the closure can read back on dispatch.
    pub fn with_params<F>(func: F, code: EventCode, params: Params) -> Self
    where
        F: FnMut(&mut Params, &mut C) -> Result<(), CallbackError> + 'static,
    {
        Self {
            func: Box::new(func),
            code,
            params,
        }
    }

    /// The adapter's parameter bag.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Mutable access to the parameter bag.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }
}

impl<C> Callback<C> for FnCallback<C> {
    fn event_code(&self) -> EventCode {
        self.code
    }

    fn set_event_code(&mut self, code: EventCode) {
        self.code = code;
    }

    fn on_event(&mut self, ctx: &mut C) -> Result<(), CallbackError> {
        (self.func)(&mut self.params, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_sees_registration_params() {
        let mut adapter = FnCallback::<Vec<i64>>::with_params(
            |params, ctx| {
                ctx.push(params.get_int("threshold").unwrap_or(-1));
                Ok(())
            },
            EventCode::new(1),
            Params::new().with("threshold", 40_i64),
        );

        let mut ctx = Vec::new();
        adapter.on_event(&mut ctx).unwrap();

        assert_eq!(ctx, vec![40]);
    }

    #[test]
    fn params_mutations_persist_across_dispatches() {
        let mut adapter = FnCallback::<()>::with_params(
            |params, _| {
                let count = params.get_int("count").unwrap_or(0);
                params.set("count", count + 1);
                Ok(())
            },
            EventCode::new(2),
            Params::new().with("count", 0_i64),
        );

        for _ in 0..3 {
            adapter.on_event(&mut ()).unwrap();
        }

        assert_eq!(adapter.params().get_int("count"), Some(3));
    }

    #[test]
    fn event_code_is_readable_and_writable() {
        let mut adapter = FnCallback::<()>::new(|_, _| Ok(()), EventCode::new(5));
        assert_eq!(adapter.event_code(), EventCode::new(5));

        adapter.set_event_code(EventCode::new(6));
        assert_eq!(adapter.event_code(), EventCode::new(6));
    }

    #[test]
    fn closure_errors_propagate() {
        let mut adapter = FnCallback::<()>::new(
            |_, _| Err(CallbackError::Terminate),
            EventCode::new(3),
        );

        assert!(matches!(
            adapter.on_event(&mut ()),
            Err(CallbackError::Terminate)
        ));
    }
}
