use crate::config;
use crate::events::AppEvent;
use crate::gui::menu::{self, CairoMeasure, MenuState};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::menu::{POLL_INTERVAL, Point};
use crate::sys::wm;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

const PRIMARY_BUTTON: u32 = 1;

pub struct AppModel {
    pub state: Rc<RefCell<MenuState>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    poll: Option<glib::SourceId>,
    pointer: Option<Point>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Cancel,
    Click(u32),
    CursorMove(Point),
    Tick,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Cancel => AppMsg::Cancel,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (MenuState, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Rosette"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "rosette-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Cancel);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "rosette-drawing-area",

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 0, // Listen to all buttons
                        connect_released[sender] => move |gesture, _, _, _| {
                            sender.input(AppMsg::Click(gesture.current_button()));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            poll: None,
            pointer: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                if let Some(name) = &wm::get_active_monitor() {
                    window::set_window_monitor(&self.root, name);
                }

                self.visible = true;

                let cursor_pos = window::get_cursor_position(&self.root)
                    .or_else(wm::get_cursor_pos_on_active_monitor)
                    .unwrap_or_default();
                self.pointer = Some(cursor_pos);

                self.state
                    .borrow_mut()
                    .controller
                    .popup(cursor_pos, Instant::now());
                self.start_polling(&sender);
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => self.close(true),
            AppMsg::Cancel => self.close(false),
            AppMsg::Click(btn) => {
                if self.visible {
                    self.close(btn == PRIMARY_BUTTON);
                }
            }
            AppMsg::CursorMove(point) => {
                if !self.visible {
                    return;
                }
                self.pointer = Some(point);
                let action = self.state.borrow_mut().controller.cursor_moved(point);
                if action.should_redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Tick => {
                let Some(cursor) = window::get_cursor_position(&self.root).or(self.pointer) else {
                    return;
                };
                let action = self
                    .state
                    .borrow_mut()
                    .controller
                    .tick(cursor, Instant::now());
                if action.should_redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.close(false);
                    let measure = CairoMeasure::new(new_config.metrics().scale);
                    *self.state.borrow_mut() = MenuState::from_config(&new_config, &measure);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn start_polling(&mut self, sender: &ComponentSender<Self>) {
        self.stop_polling();
        let sender = sender.clone();
        self.poll = Some(glib::timeout_add_local(POLL_INTERVAL, move || {
            sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        }));
    }

    fn stop_polling(&mut self) {
        if let Some(source) = self.poll.take() {
            source.remove();
        }
    }

    /// Ends the popup session, committing the selection if `commit` is set.
    fn close(&mut self, commit: bool) {
        self.stop_polling();
        self.visible = false;
        self.pointer = None;

        let mut state = self.state.borrow_mut();
        if commit {
            state.controller.release();
        } else {
            state.controller.dismiss();
        }
        drop(state);
        self.drawing_area.queue_draw();
    }
}
