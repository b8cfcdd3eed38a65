use crate::ui::theme::{Shadow, Shape, Spacing, Typography, ZoneColors};
use egui::{Button, Color32, Response, RichText, Stroke, Ui, Vec2};

/// Styled button variants
pub(crate) enum ButtonVariant {
    /// Orange call-to-action
    Primary,
    /// Outlined, for cancel and back actions
    Secondary,
    /// Text only, for inline links
    Ghost,
}

/// A styled button that follows the ZONE design guidelines
pub(crate) struct StyledButton {
    text: String,
    variant: ButtonVariant,
    enabled: bool,
    full_width: bool,
}

impl StyledButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: ButtonVariant::Primary,
            enabled: true,
            full_width: false,
        }
    }

    pub fn primary(text: impl Into<String>) -> Self {
        Self::new(text)
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            ..Self::new(text)
        }
    }

    pub fn ghost(text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Ghost,
            ..Self::new(text)
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Stretch to the width of the enclosing layout
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let dark_mode = ui.ctx().style().visuals.dark_mode;

        let (text_color, bg_color, stroke) = match self.variant {
            ButtonVariant::Primary => (ZoneColors::WHITE, ZoneColors::ORANGE, None),
            ButtonVariant::Secondary => (
                ZoneColors::text_primary(dark_mode),
                ZoneColors::surface(dark_mode),
                Some(Stroke::new(1.0, ZoneColors::border(dark_mode))),
            ),
            ButtonVariant::Ghost => (ZoneColors::BLUE, Color32::TRANSPARENT, None),
        };

        let mut button = Button::new(
            RichText::new(self.text)
                .size(Typography::SCALE_BASE)
                .color(text_color),
        )
        .fill(if self.enabled {
            bg_color
        } else {
            ZoneColors::disabled(dark_mode)
        })
        .corner_radius(egui::CornerRadius::same(Shape::RADIUS_MD));

        if let Some(stroke) = stroke {
            button = button.stroke(stroke);
        }

        if self.full_width {
            button = button.min_size(Vec2::new(ui.available_width(), 40.0));
        }

        let response = ui.add_enabled(self.enabled, button);

        if response.hovered() && self.enabled {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        response
    }
}

/// Styled card component
pub(crate) struct StyledCard {
    padding: f32,
}

impl Default for StyledCard {
    fn default() -> Self {
        Self::new()
    }
}

impl StyledCard {
    pub fn new() -> Self {
        Self {
            padding: Spacing::CARD_PADDING,
        }
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn show<R>(self, ui: &mut Ui, content: impl FnOnce(&mut Ui) -> R) -> R {
        let dark_mode = ui.ctx().style().visuals.dark_mode;

        egui::Frame::new()
            .fill(ZoneColors::surface(dark_mode))
            .stroke(Stroke::new(1.0, ZoneColors::border(dark_mode)))
            .corner_radius(egui::CornerRadius::same(Shape::RADIUS_MD))
            .inner_margin(egui::Margin::same(self.padding as i8))
            .shadow(Shadow::medium())
            .show(ui, content)
            .inner
    }
}

/// Round badge with a glyph, shown above success messages
pub(crate) fn status_badge(ui: &mut Ui, glyph: &str, color: Color32) {
    egui::Frame::new()
        .fill(ZoneColors::tint(color))
        .corner_radius(egui::CornerRadius::same(u8::MAX))
        .inner_margin(egui::Margin::same(Spacing::MD as i8))
        .show(ui, |ui| {
            ui.label(RichText::new(glyph).size(Typography::SCALE_DISPLAY).color(color));
        });
}

/// Inline error line under an input
pub(crate) fn error_label(ui: &mut Ui, message: &str) -> Response {
    ui.label(
        RichText::new(message)
            .font(Typography::body_small())
            .color(ZoneColors::ERROR),
    )
}
