use crate::menu::geometry::Rect;
use crate::menu::layout::{Metrics, TextMeasure};
use crate::menu::slice::{self, Position, SliceSet};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemLabel(String);

impl_string_newtype!(ItemLabel);

/// Index of an item in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct ItemId(usize);

impl ItemId {
    pub fn index(&self) -> usize {
        self.0
    }
}

pub type Action = Box<dyn FnMut() -> anyhow::Result<()>>;

pub struct Item {
    pub label: ItemLabel,
    pub position: Option<Position>,
    pub rect: Rect,
    pub slices: SliceSet,
    pub column_index: Option<usize>,
    label_width: f64,
    action: Option<Action>,
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("label", &self.label)
            .field("position", &self.position)
            .field("rect", &self.rect)
            .field("slices", &self.slices)
            .field("column_index", &self.column_index)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

impl Item {
    pub fn new(label: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            label: ItemLabel::new(label),
            position,
            rect: Rect::default(),
            slices: SliceSet::EMPTY,
            column_index: None,
            label_width: 0.0,
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl FnMut() -> anyhow::Result<()> + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn is_radial(&self) -> bool {
        self.position.is_some()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Runs the item's action, if it has one.
    pub fn invoke(&mut self) -> anyhow::Result<()> {
        match self.action.as_mut() {
            Some(action) => action(),
            None => Ok(()),
        }
    }
}

/// Items of one popup. Membership only grows; slice ownership and the column
/// box are recomputed on every registration.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    metrics: Metrics,
    items: Vec<Item>,
    column: Vec<ItemId>,
    column_rect: Option<Rect>,
}

impl ItemRegistry {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn add_item(&mut self, mut item: Item, measure: &dyn TextMeasure) -> ItemId {
        let id = ItemId(self.items.len());
        item.label_width = measure.measure(&item.label).width;

        match item.position {
            Some(position) => {
                item.rect = self.metrics.radial_rect(position, item.label_width);
                self.items.push(item);
                self.update_slice_membership();
            }
            None => {
                item.column_index = Some(self.column.len());
                self.items.push(item);
                self.column.push(id);
                self.update_column();
            }
        }

        log::debug!("Registered item {} as {}", id, self.items[id.0].label);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + use<> {
        (0..self.items.len()).map(ItemId)
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().enumerate().map(|(i, item)| (ItemId(i), item))
    }

    pub fn radial_items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items().filter(|(_, item)| item.is_radial())
    }

    /// Column items in stacking order.
    pub fn column_items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.column.iter().map(|&id| (id, &self.items[id.0]))
    }

    pub fn column_rect(&self) -> Option<Rect> {
        self.column_rect
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn update_slice_membership(&mut self) {
        let positions: Vec<Position> = self.items.iter().filter_map(|i| i.position).collect();
        let assigned = slice::assign_slices(&positions);

        self.items
            .iter_mut()
            .filter(|i| i.is_radial())
            .zip(assigned)
            .for_each(|(item, slices)| item.slices = slices);
    }

    fn update_column(&mut self) {
        let padding = self.metrics.column_padding() * 2.0;
        let width = self
            .column
            .iter()
            .map(|id| self.items[id.0].label_width + padding)
            .fold(0.0, f64::max);

        let column = self.metrics.column_rect(width, self.column.len());
        for (index, id) in self.column.iter().enumerate() {
            self.items[id.0].rect = self.metrics.column_item_rect(column, index);
        }
        self.column_rect = Some(column);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::menu::layout::TextExtent;

    /// Every character is ten pixels wide.
    pub(crate) struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn measure(&self, text: &str) -> TextExtent {
            TextExtent {
                width: text.chars().count() as f64 * 10.0,
                height: 12.0,
            }
        }
    }

    #[test]
    fn test_slices_follow_membership() {
        let mut registry = ItemRegistry::default();
        let north = registry.add_item(Item::new("North", Some(Position::North)), &FixedWidth);
        assert!(registry.get(north).unwrap().slices.is_full());

        let south = registry.add_item(Item::new("South", Some(Position::South)), &FixedWidth);
        assert_eq!(registry.get(north).unwrap().slices.len(), 8);
        assert_eq!(registry.get(south).unwrap().slices.len(), 8);
    }

    #[test]
    fn test_column_items_do_not_take_slices() {
        let mut registry = ItemRegistry::default();
        let east = registry.add_item(Item::new("East", Some(Position::East)), &FixedWidth);
        let extra = registry.add_item(Item::new("Extra", None), &FixedWidth);

        assert!(registry.get(east).unwrap().slices.is_full());
        assert!(registry.get(extra).unwrap().slices.is_empty());
        assert_eq!(registry.radial_items().count(), 1);
        assert_eq!(registry.column_items().count(), 1);
    }

    #[test]
    fn test_column_grows_to_widest_label() {
        let mut registry = ItemRegistry::default();
        assert!(registry.column_rect().is_none());

        let short = registry.add_item(Item::new("ab", None), &FixedWidth);
        assert_eq!(registry.column_rect().unwrap().width, 20.0 + 120.0);

        let long = registry.add_item(Item::new("abcdef", None), &FixedWidth);
        let column = registry.column_rect().unwrap();
        assert_eq!(column.width, 60.0 + 120.0);
        assert_eq!(registry.get(short).unwrap().rect.width, column.width);
        assert_eq!(registry.get(long).unwrap().column_index, Some(1));
        assert!(registry.get(long).unwrap().rect.y > registry.get(short).unwrap().rect.y);
    }

    #[test]
    fn test_invoke_without_action_is_noop() {
        let mut item = Item::new("Nothing", None);
        assert!(!item.has_action());
        assert!(item.invoke().is_ok());
    }
}
