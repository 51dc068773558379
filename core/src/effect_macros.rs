//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block body
///
/// # Example
///
/// ```rust
/// use guest_list_core::{async_effect, effect::Effect};
///
/// let effect: Effect<u32> = async_effect! {
///     Some(42)
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Future` that awaits a pending result and maps it to an action
///
/// The pending expression is evaluated immediately, where the macro is used;
/// only awaiting it is deferred to the effect. Both arms must produce an
/// `Option<Action>`.
///
/// # Example
///
/// ```rust
/// use guest_list_core::{effect::Effect, on_result};
///
/// let pending = async { Ok::<u32, String>(7) };
/// let effect: Effect<String> = on_result! {
///     pending,
///     on_success: |n| Some(format!("ok {n}")),
///     on_error: |e| Some(format!("failed {e}"))
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! on_result {
    (
        $pending:expr,
        on_success: |$success_param:pat_param| $success_body:expr,
        on_error: |$error_param:pat_param| $error_body:expr
    ) => {{
        let pending = $pending;
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            match pending.await {
                ::std::result::Result::Ok($success_param) => $success_body,
                ::std::result::Result::Err($error_param) => $error_body,
            }
        }))
    }};
}
