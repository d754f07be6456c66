use crate::menu::geometry::{Point, Rect};
use crate::menu::registry::{ItemId, ItemRegistry};
use crate::menu::resolver;
use crate::menu::velocity::{Mode, VelocityTracker};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Receives highlight changes. This is the only channel through which the
/// controller affects what the user sees.
pub trait Highlight {
    fn enter(&mut self, id: ItemId);
    fn leave(&mut self, id: ItemId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Closed,
    Open(Mode),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CursorAction {
    pub should_redraw: bool,
    pub settled: bool,
}

impl CursorAction {
    pub fn new(should_redraw: bool, settled: bool) -> Self {
        Self {
            should_redraw,
            settled,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Session {
    window: Rect,
    cursor: Point,
}

/// Drives one popup: opening at a screen position, polling the cursor,
/// switching to settled mode and committing the selection on release.
///
/// Cursor positions passed in are in screen coordinates; everything stored
/// is popup-local, with the origin at the popup's center.
#[derive(Debug)]
pub struct PopupController<H: Highlight> {
    registry: ItemRegistry,
    tracker: VelocityTracker,
    highlight: H,
    session: Option<Session>,
    active: Option<ItemId>,
}

impl<H: Highlight> PopupController<H> {
    pub fn new(registry: ItemRegistry, highlight: H) -> Self {
        Self {
            registry,
            tracker: VelocityTracker::new(),
            highlight,
            session: None,
            active: None,
        }
    }

    /// Opens the popup centered on `screen_pos` and returns the window
    /// rectangle the host should show. Reopening restarts the session.
    pub fn popup(&mut self, screen_pos: Point, now: Instant) -> Rect {
        if self.is_open() {
            log::debug!("Popup reopened while open, restarting session");
            self.teardown();
        }

        let metrics = self.registry.metrics();
        let window = metrics.window_rect(screen_pos);
        let origin = metrics.center();

        self.tracker.start(origin, now);
        self.session = Some(Session {
            window,
            cursor: origin,
        });
        log::debug!("Popup opened at {:?}", screen_pos);
        window
    }

    /// One polling tick: samples the cursor and re-resolves the selection.
    pub fn tick(&mut self, cursor: Point, now: Instant) -> CursorAction {
        let Some(local) = self.to_local(cursor) else {
            return CursorAction::default();
        };

        let settled = self.tracker.sample(local, now);
        if settled {
            log::debug!(
                "Cursor settled at {:?}, column {}",
                local,
                if self.column_enabled() {
                    "enabled"
                } else {
                    "absent"
                }
            );
        }

        let moved = self.move_cursor(local);
        let changed = self.update_selection();
        CursorAction::new(moved || changed || settled, settled)
    }

    /// Re-resolves the selection for a motion event between ticks.
    pub fn cursor_moved(&mut self, cursor: Point) -> CursorAction {
        let Some(local) = self.to_local(cursor) else {
            return CursorAction::default();
        };
        let moved = self.move_cursor(local);
        let changed = self.update_selection();
        CursorAction::new(moved || changed, false)
    }

    /// Closes the popup and runs the active item's action. A failing or
    /// panicking action is logged and otherwise ignored. Returns the
    /// committed item.
    pub fn release(&mut self) -> Option<ItemId> {
        if !self.is_open() {
            return None;
        }

        let committed = self.teardown();
        if let Some(id) = committed
            && let Some(item) = self.registry.get_mut(id)
        {
            log::info!("Activating '{}'", item.label);
            match panic::catch_unwind(AssertUnwindSafe(|| item.invoke())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::error!("Action for '{}' failed: {:#}", item.label, e),
                Err(payload) => log::error!(
                    "Action for '{}' panicked: {}",
                    item.label,
                    panic_message(payload.as_ref())
                ),
            }
        }
        committed
    }

    /// Closes the popup without running anything.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            self.teardown();
            log::debug!("Popup dismissed");
        }
    }

    pub fn state(&self) -> PopupState {
        match self.session {
            Some(_) => PopupState::Open(self.tracker.mode()),
            None => PopupState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    /// Column items only take part in selection once the cursor settled.
    pub fn column_enabled(&self) -> bool {
        self.state() == PopupState::Open(Mode::Settled) && self.registry.column_rect().is_some()
    }

    pub fn window_rect(&self) -> Option<Rect> {
        self.session.map(|s| s.window)
    }

    /// Last cursor position, popup-local.
    pub fn cursor(&self) -> Option<Point> {
        self.session.map(|s| s.cursor)
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn highlight(&self) -> &H {
        &self.highlight
    }

    fn to_local(&self, cursor: Point) -> Option<Point> {
        self.session.map(|s| cursor - s.window.origin())
    }

    fn move_cursor(&mut self, local: Point) -> bool {
        match self.session.as_mut() {
            Some(session) if session.cursor != local => {
                session.cursor = local;
                true
            }
            _ => false,
        }
    }

    fn update_selection(&mut self) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let next = resolver::resolve(
            session.cursor,
            self.registry.metrics().center(),
            self.tracker.mode(),
            &self.registry,
        );
        if next == self.active {
            return false;
        }

        if let Some(prev) = self.active {
            self.highlight.leave(prev);
        }
        if let Some(id) = next {
            self.highlight.enter(id);
        }
        self.active = next;
        true
    }

    /// Clears every highlight and ends the session, handing back the item
    /// that was active.
    fn teardown(&mut self) -> Option<ItemId> {
        for id in self.registry.ids() {
            self.highlight.leave(id);
        }
        self.session = None;
        self.active.take()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
