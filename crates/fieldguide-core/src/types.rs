//! Callback aliases used to hand canvas events back to the host.
//!
//! Everything runs on the host's UI thread, so callbacks are neither
//! `Send` nor `Sync`.

/// Callback receiving a single value.
pub type DataCallback<T> = Box<dyn Fn(T)>;

/// Receives the new AB-line heading, in degrees within `[0, 360)`.
pub type HeadingCallback = DataCallback<f64>;
