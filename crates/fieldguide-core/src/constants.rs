//! Default tuning values for the guidance canvas.

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.05;
/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 50.0;
/// Fractional zoom change per wheel notch.
pub const ZOOM_INTENSITY: f64 = 0.1;
/// Multiplier applied by the zoom in/out buttons.
pub const ZOOM_BUTTON_FACTOR: f64 = 1.5;
/// Screen-space radius (px) within which the pointer grabs the handle.
pub const HANDLE_HIT_RADIUS_PX: f64 = 20.0;
/// Drawn radius (px) of the heading handle.
pub const HANDLE_RADIUS_PX: f64 = 8.0;
/// World distance between the machine projection and the handle.
pub const LOOKAHEAD_DISTANCE: f64 = 40.0;
/// Tracks generated on each side of index 0.
pub const TRACK_WINDOW: i32 = 60;
/// Half-length of every generated track, in world units.
pub const TRACK_HALF_LENGTH: f64 = 3000.0;
/// Tracks after the current one that get the "next up" styling.
pub const NEXT_UP_COUNT: i32 = 3;
