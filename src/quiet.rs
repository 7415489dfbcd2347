//! Scoped suppression of process stdout.
//!
//! Line-shape providers (and the libraries they may wrap) can print progress
//! text straight to stdout. This module scopes a file-descriptor redirection
//! to a closure: the redirection is held by a guard value, so stdout is
//! restored on every exit path, including panics, rather than relying on a
//! global mutable swap of the output stream.

use gag::Gag;

/// Runs `f` with process stdout redirected to the platform null device,
/// returning `f`'s result.
///
/// If the redirection cannot be acquired (for instance because an enclosing
/// caller already holds one), `f` simply runs unsuppressed; suppression is a
/// courtesy, never a correctness requirement.
pub fn suppress_stdout<T>(f: impl FnOnce() -> T) -> T {
    let _gag = Gag::stdout().ok();
    f()
}
