pub mod runtime;
pub mod server;
pub mod wm;
