use super::model::MenuState;
use super::{
    BORDER_WIDTH, COLUMN_DISABLED_ALPHA, CURSOR_LINE_WIDTH, FONT_FAMILY, FONT_SIZE,
    ORIGIN_LINE_WIDTH,
};
use crate::gui::theme::ThemeColors;
use crate::menu::{Item, Metrics, Point, Rect, TextExtent, TextMeasure};
use cairo::{Context, FontSlant, FontWeight, Format, ImageSurface};
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_font(cr: &Context, scale: f64, bold: bool) {
    let weight = if bold {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };
    cr.select_font_face(FONT_FAMILY, FontSlant::Normal, weight);
    cr.set_font_size(FONT_SIZE * scale);
}

/// Label measurement on an off-screen cairo context, using the same font as
/// [`draw`].
pub struct CairoMeasure {
    cr: Option<Context>,
    scale: f64,
}

impl CairoMeasure {
    pub fn new(scale: f64) -> Self {
        let cr = ImageSurface::create(Format::ARgb32, 1, 1)
            .and_then(|surface| Context::new(&surface))
            .map_err(|e| log::error!("Text measurement unavailable: {}", e))
            .ok();
        Self { cr, scale }
    }
}

impl TextMeasure for CairoMeasure {
    fn measure(&self, text: &str) -> TextExtent {
        let Some(cr) = &self.cr else {
            // rough average glyph width
            return TextExtent {
                width: text.chars().count() as f64 * FONT_SIZE * self.scale * 0.6,
                height: FONT_SIZE * self.scale,
            };
        };
        // bold is the widest a label gets, when hovered
        set_font(cr, self.scale, true);
        cr.text_extents(text)
            .map(|ext| TextExtent {
                width: ext.x_advance(),
                height: ext.height(),
            })
            .unwrap_or_default()
    }
}

struct ItemRenderer<'a> {
    item: &'a Item,
    hovered: bool,
    enabled: bool,
    metrics: Metrics,
}

impl ItemRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let rect = self.item.rect;
        let background = if self.hovered {
            colors.hovered
        } else if self.enabled {
            colors.item
        } else {
            colors.disabled
        };

        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        set_color(cr, background);
        cr.fill_preserve()?;
        set_color(cr, colors.border);
        cr.set_line_width(BORDER_WIDTH * self.metrics.scale.max(0.5));
        cr.stroke()?;

        self.draw_label(cr, rect, colors)
    }

    fn draw_label(
        &self,
        cr: &Context,
        rect: Rect,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        set_font(cr, self.metrics.scale, self.hovered);
        let ext = cr.text_extents(&self.item.label)?;

        // column labels are left aligned after the padding
        let x = if self.item.is_radial() {
            rect.x + (rect.width - ext.x_advance()) / 2.0
        } else {
            rect.x + self.metrics.column_padding()
        };
        let y = rect.y + (rect.height + ext.height()) / 2.0;

        let mut text = colors.text;
        if !self.enabled {
            text.alpha *= COLUMN_DISABLED_ALPHA;
        }
        set_color(cr, text);
        cr.move_to(x, y);
        cr.show_text(&self.item.label)
    }
}

pub fn draw(cr: &Context, state: &MenuState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let controller = &state.controller;
    let Some(window) = controller.window_rect() else {
        return Ok(());
    };
    let registry = controller.registry();
    let metrics = registry.metrics();

    cr.save()?;
    cr.translate(window.x, window.y);

    if state.draw_cursor_line
        && let Some(cursor) = controller.cursor()
    {
        draw_cursor_line(cr, metrics, cursor, colors)?;
    }
    draw_origin(cr, metrics, colors)?;

    let column_enabled = controller.column_enabled();
    for (id, item) in registry.items() {
        ItemRenderer {
            item,
            hovered: controller.highlight().is_hovered(id),
            enabled: item.is_radial() || column_enabled,
            metrics,
        }
        .draw(cr, colors)?;
    }

    cr.restore()
}

fn draw_cursor_line(
    cr: &Context,
    metrics: Metrics,
    cursor: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let center = metrics.center();
    set_color(cr, colors.origin);
    cr.set_line_width(CURSOR_LINE_WIDTH);
    cr.move_to(center.x, center.y);
    cr.line_to(cursor.x, cursor.y);
    cr.stroke()
}

fn draw_origin(cr: &Context, metrics: Metrics, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = metrics.center();
    let radius = metrics.origin_radius();

    set_color(cr, colors.origin);
    cr.set_line_width(ORIGIN_LINE_WIDTH);
    cr.arc(center.x, center.y, radius / 2.0, 0.0, 2.0 * PI);
    cr.stroke()?;

    set_color(cr, colors.border);
    cr.set_line_width(BORDER_WIDTH);
    cr.arc(center.x, center.y, radius / 2.0 + 1.0, 0.0, 2.0 * PI);
    cr.stroke()
}
