//! Stack growth for deeply nested source.
//!
//! The lexer recurses into string interpolations and macro arguments, the
//! parser recurses per nesting level of blocks, calls and operands, and the
//! generator recurses over the same tree. Pathological input (a thousand
//! nested parentheses, a string interpolating a string interpolating ...)
//! must not overflow the native stack, so each recursive entry point runs
//! its body through [`ensure_sufficient_stack`].
//!
//! On wasm32 the guard is a plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
