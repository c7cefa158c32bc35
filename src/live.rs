//! Live animation driver.
//!
//! An [`AnimationSession`] owns the current scene, the rotating working copy and a fixed-period
//! timer. Callers pump it with [`AnimationSession::poll`] and receive slot updates through a
//! [`SlotView`].

pub(crate) mod debounce;
pub(crate) mod session;
pub(crate) mod timer;
