//! Stack growth for deep recursion over the tree.
//!
//! Parsing, walking, copying and rendering all recurse once per nesting
//! level, and a source line like `((((...(1)...))))` nests as deep as the
//! author likes. Recursive entry points wrap their body in
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: grows the stack with `stacker`.
//! - **WASM targets**: plain call.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
