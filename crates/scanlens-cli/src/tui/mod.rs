//! Terminal UI
//!
//! Adapter layer binding keys and widgets to the scan session. The
//! session owns the camera and decode lifecycle; everything here just
//! renders its state and forwards control keys.

mod app;
mod components;
mod handlers;
mod polling;
mod theme;

pub use handlers::run;
