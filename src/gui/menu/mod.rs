pub mod model;
pub mod view;

pub use model::{Highlights, MenuState};
pub use view::{CairoMeasure, draw};

pub const FONT_FAMILY: &str = "Sans";
pub const FONT_SIZE: f64 = 14.0;
pub const BORDER_WIDTH: f64 = 2.0;
pub const CURSOR_LINE_WIDTH: f64 = 3.0;
pub const ORIGIN_LINE_WIDTH: f64 = 5.0;
pub const COLUMN_DISABLED_ALPHA: f64 = 0.5;
