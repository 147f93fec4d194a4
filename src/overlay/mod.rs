pub mod control_surface;
pub mod markers;
pub mod overlay_sync;
