use crate::menu::geometry::{Point, Rect};
use crate::menu::slice::Position;
use crate::menu::{
    COLUMN_OFFSET, COLUMN_PADDING, DEAD_ZONE_RADIUS, DIAGONAL_OFFSET, ITEM_HEIGHT, ORIGIN_RADIUS,
    POPUP_HEIGHT, POPUP_WIDTH, RADIAL_ITEM_MARGIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Measures rendered label text. The host adapter backs this with its font
/// machinery; layout only needs the width.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> TextExtent;
}

/// Popup-local sizes for a given screen ratio. All rectangles produced here
/// are relative to the popup's top-left corner, with the origin at the
/// popup's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub scale: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Metrics {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn width(&self) -> f64 {
        POPUP_WIDTH * self.scale
    }

    pub fn height(&self) -> f64 {
        POPUP_HEIGHT * self.scale
    }

    pub fn center(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    pub fn item_height(&self) -> f64 {
        ITEM_HEIGHT * self.scale
    }

    pub fn dead_zone(&self) -> f64 {
        DEAD_ZONE_RADIUS * self.scale
    }

    pub fn origin_radius(&self) -> f64 {
        ORIGIN_RADIUS * self.scale
    }

    pub fn column_padding(&self) -> f64 {
        COLUMN_PADDING * self.scale
    }

    /// Window rectangle that puts the popup's center on `screen_pos`.
    pub fn window_rect(&self, screen_pos: Point) -> Rect {
        Rect::new(
            screen_pos.x - self.width() / 2.0,
            screen_pos.y - self.height() / 2.0,
            self.width(),
            self.height(),
        )
    }

    fn anchor(&self, position: Position) -> Point {
        let (x, y) = match position {
            Position::North => (0.0, -100.0),
            Position::South => (0.0, 100.0),
            Position::East => (120.0, 0.0),
            Position::West => (-120.0, 0.0),
            Position::NorthEast => (85.0, -45.0),
            Position::NorthWest => (-85.0, -45.0),
            Position::SouthEast => (85.0, 45.0),
            Position::SouthWest => (-85.0, 45.0),
        };
        Point::new(x * self.scale, y * self.scale)
    }

    /// Places a radial item so that it hangs off its anchor on the side facing
    /// away from the origin.
    pub fn radial_rect(&self, position: Position, label_width: f64) -> Rect {
        let width = label_width + RADIAL_ITEM_MARGIN * self.scale;
        let height = self.item_height();
        let Point { mut x, mut y } = self.anchor(position);

        match position {
            Position::West | Position::NorthWest | Position::SouthWest => {
                x -= width;
                y -= height / 2.0;
            }
            Position::East | Position::NorthEast | Position::SouthEast => {
                y -= height / 2.0;
            }
            Position::North => {
                x -= width / 2.0;
                y -= height;
            }
            Position::South => {
                x -= width / 2.0;
            }
        }

        match position {
            Position::NorthEast | Position::NorthWest => y -= DIAGONAL_OFFSET * self.scale,
            Position::SouthEast | Position::SouthWest => y += DIAGONAL_OFFSET * self.scale,
            _ => {}
        }

        let center = self.center();
        Rect::new(x + center.x, y + center.y, width, height)
    }

    /// Bounding box of the overflow column holding `count` items of `width`.
    /// Neighbouring items overlap by a pixel so their borders merge.
    pub fn column_rect(&self, width: f64, count: usize) -> Rect {
        let h = self.item_height();
        let n = count as f64;
        let height = if count == 0 {
            0.0
        } else {
            h * n - (n - 1.0) * 2.0 + 3.0
        };
        let center = self.center();
        Rect::new(
            center.x - width / 2.0,
            center.y + COLUMN_OFFSET * self.scale,
            width,
            height,
        )
    }

    /// Rectangle of the column item at `index`, in popup coordinates.
    pub fn column_item_rect(&self, column: Rect, index: usize) -> Rect {
        let h = self.item_height();
        Rect::new(column.x, column.y + index as f64 * (h - 1.0), column.width, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rect_centers_origin() {
        let m = Metrics::new(0.5);
        let rect = m.window_rect(Point::new(800.0, 600.0));
        assert_eq!(rect, Rect::new(550.0, 100.0, 500.0, 1000.0));
        assert_eq!(rect.center(), Point::new(800.0, 600.0));
        assert_eq!(rect.origin() + m.center(), Point::new(800.0, 600.0));
    }

    #[test]
    fn test_radial_rects_face_away_from_origin() {
        let m = Metrics::default();
        let c = m.center();

        let north = m.radial_rect(Position::North, 50.0);
        assert_eq!(north, Rect::new(c.x - 80.0, c.y - 140.0, 160.0, 40.0));

        let south = m.radial_rect(Position::South, 50.0);
        assert_eq!(south, Rect::new(c.x - 80.0, c.y + 100.0, 160.0, 40.0));

        let east = m.radial_rect(Position::East, 50.0);
        assert_eq!(east, Rect::new(c.x + 120.0, c.y - 20.0, 160.0, 40.0));

        let west = m.radial_rect(Position::West, 50.0);
        assert_eq!(west, Rect::new(c.x - 280.0, c.y - 20.0, 160.0, 40.0));

        let north_west = m.radial_rect(Position::NorthWest, 50.0);
        assert_eq!(north_west, Rect::new(c.x - 245.0, c.y - 85.0, 160.0, 40.0));

        let south_east = m.radial_rect(Position::SouthEast, 50.0);
        assert_eq!(south_east, Rect::new(c.x + 85.0, c.y + 45.0, 160.0, 40.0));

        for p in [north, south, east, west, north_west, south_east] {
            assert!(!p.contains(c), "{p:?} covers the origin");
        }
    }

    #[test]
    fn test_column_stacking() {
        let m = Metrics::default();
        let column = m.column_rect(200.0, 3);
        assert_eq!(column.height, 40.0 * 3.0 - 4.0 + 3.0);
        assert_eq!(column.y, m.center().y + 170.0);

        let first = m.column_item_rect(column, 0);
        let third = m.column_item_rect(column, 2);
        assert_eq!(first.y, column.y);
        assert_eq!(third.y, column.y + 78.0);
        assert_eq!(third.width, 200.0);
    }
}
