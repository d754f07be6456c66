use crate::menu::geometry::{Point, angle_from_points};
use crate::menu::registry::{ItemId, ItemRegistry};
use crate::menu::slice::Slice;
use crate::menu::velocity::Mode;

/// Finds the item under the cursor.
///
/// Nothing is selected inside the dead zone. Once settled, the column is
/// checked first. Radial items are then scanned in registration order: a
/// rectangle hit returns at once, a slice hit is remembered while the scan
/// continues, so rectangles always beat slices.
pub fn resolve(
    cursor: Point,
    origin: Point,
    mode: Mode,
    registry: &ItemRegistry,
) -> Option<ItemId> {
    if origin.distance(cursor) <= registry.metrics().dead_zone() {
        return None;
    }

    if mode == Mode::Settled
        && let Some(id) = resolve_column(cursor, registry)
    {
        return Some(id);
    }

    let slice = Slice::from_angle(angle_from_points(origin, cursor));
    let mut by_slice = None;
    for (id, item) in registry.radial_items() {
        if item.rect.contains(cursor) {
            return Some(id);
        }
        if item.slices.contains(slice) {
            by_slice = Some(id);
        }
    }
    by_slice
}

fn resolve_column(cursor: Point, registry: &ItemRegistry) -> Option<ItemId> {
    registry
        .column_rect()
        .filter(|column| column.contains(cursor))?;

    registry
        .column_items()
        .find(|(_, item)| item.rect.contains(cursor))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::geometry::Rect;
    use crate::menu::layout::Metrics;
    use crate::menu::registry::Item;
    use crate::menu::registry::tests::FixedWidth;
    use crate::menu::slice::Position;

    fn cardinal_registry() -> (ItemRegistry, [ItemId; 4]) {
        let mut registry = ItemRegistry::new(Metrics::default());
        let ids = [
            Position::North,
            Position::South,
            Position::East,
            Position::West,
        ]
        .map(|p| registry.add_item(Item::new(p.to_string(), Some(p)), &FixedWidth));
        (registry, ids)
    }

    fn at_angle(origin: Point, degrees: f64, radius: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(origin.x + rad.cos() * radius, origin.y + rad.sin() * radius)
    }

    #[test]
    fn test_dead_zone_selects_nothing() {
        let (registry, _) = cardinal_registry();
        let origin = registry.metrics().center();
        for degrees in (0..360).step_by(15) {
            for radius in [0.0, 5.0, 19.9] {
                let cursor = at_angle(origin, degrees as f64, radius);
                assert_eq!(resolve(cursor, origin, Mode::Gesture, &registry), None);
                assert_eq!(resolve(cursor, origin, Mode::Settled, &registry), None);
            }
        }

        let edge = Point::new(origin.x + 20.0, origin.y);
        assert_eq!(resolve(edge, origin, Mode::Gesture, &registry), None);
        let past = Point::new(origin.x + 20.5, origin.y);
        assert!(resolve(past, origin, Mode::Gesture, &registry).is_some());
    }

    #[test]
    fn test_slice_scenario_for_cardinals() {
        let (registry, [north, south, east, west]) = cardinal_registry();
        let origin = registry.metrics().center();

        let pick = |degrees: f64| {
            resolve(
                at_angle(origin, degrees, 30.0),
                origin,
                Mode::Gesture,
                &registry,
            )
        };
        assert_eq!(pick(200.0), Some(west));
        assert_eq!(pick(140.0), Some(west));
        assert_eq!(pick(130.0), Some(south));
        assert_eq!(pick(10.0), Some(east));
        assert_eq!(pick(330.0), Some(east));
        assert_eq!(pick(310.0), Some(north));
        assert_eq!(pick(90.0), Some(south));
        assert_eq!(pick(270.0), Some(north));
    }

    #[test]
    fn test_rect_beats_slice() {
        let mut registry = ItemRegistry::new(Metrics::default());
        let east = registry.add_item(Item::new("East", Some(Position::East)), &FixedWidth);
        let north = registry.add_item(
            Item::new("x".repeat(40), Some(Position::North)),
            &FixedWidth,
        );
        registry.add_item(Item::new("South", Some(Position::South)), &FixedWidth);
        registry.add_item(Item::new("West", Some(Position::West)), &FixedWidth);
        let origin = registry.metrics().center();

        // The wide north item reaches over into east's slices.
        let north_rect = registry.get(north).unwrap().rect;
        let cursor = Point::new(north_rect.x + north_rect.width - 5.0, north_rect.y + 39.0);
        let slice = Slice::from_angle(angle_from_points(origin, cursor));
        assert!(registry.get(east).unwrap().slices.contains(slice));
        assert!(!registry.get(north).unwrap().slices.contains(slice));

        assert_eq!(resolve(cursor, origin, Mode::Gesture, &registry), Some(north));
    }

    #[test]
    fn test_column_needs_settled_mode() {
        let mut registry = ItemRegistry::new(Metrics::default());
        let north = registry.add_item(Item::new("Up", Some(Position::North)), &FixedWidth);
        let first = registry.add_item(Item::new("First", None), &FixedWidth);
        let second = registry.add_item(Item::new("Second", None), &FixedWidth);
        let origin = registry.metrics().center();

        let second_rect = registry.get(second).unwrap().rect;
        let cursor = Point::new(second_rect.center().x, second_rect.y + second_rect.height - 2.0);

        // While gesturing the lone north item owns the whole pie.
        assert_eq!(resolve(cursor, origin, Mode::Gesture, &registry), Some(north));
        assert_eq!(resolve(cursor, origin, Mode::Settled, &registry), Some(second));

        let first_rect = registry.get(first).unwrap().rect;
        assert_eq!(
            resolve(first_rect.center(), origin, Mode::Settled, &registry),
            Some(first)
        );
    }

    #[test]
    fn test_settled_outside_column_falls_back_to_slices() {
        let mut registry = ItemRegistry::new(Metrics::default());
        let west = registry.add_item(Item::new("Left", Some(Position::West)), &FixedWidth);
        registry.add_item(Item::new("Below", None), &FixedWidth);
        let origin = registry.metrics().center();

        let cursor = at_angle(origin, 0.0, 60.0);
        assert_eq!(resolve(cursor, origin, Mode::Settled, &registry), Some(west));
    }

    #[test]
    fn test_no_radial_items_only_column_hits() {
        let mut registry = ItemRegistry::new(Metrics::default());
        let only = registry.add_item(Item::new("Only", None), &FixedWidth);
        let origin = registry.metrics().center();

        assert_eq!(
            resolve(at_angle(origin, 45.0, 80.0), origin, Mode::Settled, &registry),
            None
        );
        let rect: Rect = registry.get(only).unwrap().rect;
        assert_eq!(resolve(rect.center(), origin, Mode::Settled, &registry), Some(only));
        assert_eq!(resolve(rect.center(), origin, Mode::Gesture, &registry), None);
    }

    #[test]
    fn test_duplicate_position_last_slice_match_wins() {
        let mut registry = ItemRegistry::new(Metrics::default());
        let first = registry.add_item(Item::new("a", Some(Position::North)), &FixedWidth);
        let second = registry.add_item(Item::new("b", Some(Position::North)), &FixedWidth);
        let origin = registry.metrics().center();

        // 265° is slice 11, owned by both; 200° only by the first.
        assert_eq!(
            resolve(at_angle(origin, 265.0, 30.0), origin, Mode::Gesture, &registry),
            Some(second)
        );
        assert_eq!(
            resolve(at_angle(origin, 200.0, 30.0), origin, Mode::Gesture, &registry),
            Some(first)
        );
    }
}
