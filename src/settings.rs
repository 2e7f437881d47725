//! Thread-local default verbosity.
//!
//! Comparisons take an explicit verbosity override; when none is given they
//! fall back to the default stored here. The default lives in a
//! `thread_local!`, so it is never shared between threads, and changes made
//! through [`set_verbosity`] are undone when the returned guard drops.
//!
//! ## Thread Safety
//!
//! - Each thread has its own default (via `thread_local!`)
//! - Guards use RAII for automatic restore on drop, including on early return
//!   or panic unwinding

use crate::messages::Verbosity;
use std::cell::Cell;

thread_local! {
    static DEFAULT_VERBOSITY: Cell<Verbosity> = const { Cell::new(Verbosity::Warning) };
}

/// RAII guard restoring the previous default verbosity on drop.
#[must_use = "the previous verbosity is restored as soon as the guard drops"]
pub struct VerbosityGuard {
    previous: Verbosity,
}

impl Drop for VerbosityGuard {
    fn drop(&mut self) {
        DEFAULT_VERBOSITY.with(|cell| cell.set(self.previous));
    }
}

/// Current default verbosity for this thread.
pub fn verbosity() -> Verbosity {
    DEFAULT_VERBOSITY.with(Cell::get)
}

/// Set the default verbosity until the returned guard drops.
///
/// # Example
///
/// ```rust
/// use tallycmp::messages::Verbosity;
/// use tallycmp::settings;
///
/// {
///     let _quiet = settings::set_verbosity(Verbosity::Error);
///     assert_eq!(settings::verbosity(), Verbosity::Error);
/// }
/// assert_eq!(settings::verbosity(), Verbosity::Warning);
/// ```
pub fn set_verbosity(verbosity: Verbosity) -> VerbosityGuard {
    DEFAULT_VERBOSITY.with(|cell| VerbosityGuard {
        previous: cell.replace(verbosity),
    })
}

/// Set the default verbosity without a guard.
///
/// Intended for program start-up, where the setting should last until the
/// thread exits.
pub fn set_verbosity_persistent(verbosity: Verbosity) {
    DEFAULT_VERBOSITY.with(|cell| cell.set(verbosity));
}
