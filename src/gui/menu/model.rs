use crate::config::{Config, ItemConfig, SETUP_COMMAND};
use crate::menu::{Highlight, Item, ItemId, ItemRegistry, PopupController, TextMeasure};
use crate::sys::wm;
use std::collections::HashSet;
use std::process::Command;

/// Hover state as reported by the controller, read back when drawing.
#[derive(Debug, Default)]
pub struct Highlights {
    hovered: HashSet<ItemId>,
}

impl Highlights {
    pub fn is_hovered(&self, id: ItemId) -> bool {
        self.hovered.contains(&id)
    }
}

impl Highlight for Highlights {
    fn enter(&mut self, id: ItemId) {
        self.hovered.insert(id);
    }

    fn leave(&mut self, id: ItemId) {
        self.hovered.remove(&id);
    }
}

#[derive(Debug)]
pub struct MenuState {
    pub controller: PopupController<Highlights>,
    pub draw_cursor_line: bool,
}

impl MenuState {
    pub fn from_config(config: &Config, measure: &dyn TextMeasure) -> Self {
        let mut registry = ItemRegistry::new(config.metrics());
        for cfg in &config.items {
            registry.add_item(Self::item_from_config(cfg), measure);
        }
        if registry.is_empty() {
            log::warn!("Menu has no items, nothing can be selected");
        }

        Self {
            controller: PopupController::new(registry, Highlights::default()),
            draw_cursor_line: config.draw_cursor_line,
        }
    }

    fn item_from_config(cfg: &ItemConfig) -> Item {
        let item = Item::new(cfg.label.to_string(), cfg.position);
        match cfg.exec.clone() {
            Some(exec) if exec.as_str() == SETUP_COMMAND => item.with_action(open_config),
            Some(exec) => {
                let class = cfg.class.clone();
                item.with_action(move || {
                    match &class {
                        Some(class) => wm::run_or_raise(class, &exec)?,
                        None => wm::spawn(&exec)?,
                    }
                    Ok(())
                })
            }
            None => item,
        }
    }
}

fn open_config() -> anyhow::Result<()> {
    let path = crate::config::write_default_config()?;
    let mut command = Command::new("xdg-open");
    command.arg(&path);
    wm::launch(command)?;
    Ok(())
}
