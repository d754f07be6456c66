use std::time::Duration;

pub mod controller;
pub mod geometry;
pub mod layout;
pub mod registry;
pub mod resolver;
pub mod slice;
pub mod velocity;

pub use controller::{Highlight, PopupController, PopupState};
pub use geometry::{Point, Rect};
pub use layout::{Metrics, TextExtent, TextMeasure};
pub use registry::{Action, Item, ItemId, ItemLabel, ItemRegistry};
pub use slice::{Position, Slice, SliceSet};
pub use velocity::{Mode, VelocityTracker};

pub const SLICE_COUNT: u8 = 16;
pub const SLICE_ANGLE: f64 = 360.0 / SLICE_COUNT as f64;
pub const DEAD_ZONE_RADIUS: f64 = 20.0;
pub const POLL_INTERVAL: Duration = Duration::from_millis(2);

// Gesture classification
pub const SPEED_SAMPLES: usize = 40;
pub const SPEED_TOLERANCE: f64 = 0.02; // mean pixels per tick

// Layout, in reference pixels before the screen ratio is applied
pub const POPUP_WIDTH: f64 = 1000.0;
pub const POPUP_HEIGHT: f64 = 2000.0;
pub const ITEM_HEIGHT: f64 = 40.0;
pub const RADIAL_ITEM_MARGIN: f64 = 110.0; // added to the label width
pub const DIAGONAL_OFFSET: f64 = 20.0; // vertical nudge for NE/NW/SE/SW
pub const COLUMN_OFFSET: f64 = 170.0; // column top edge below the origin
pub const COLUMN_PADDING: f64 = 60.0; // per side
pub const ORIGIN_RADIUS: f64 = 8.0;
