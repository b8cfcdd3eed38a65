use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Stroke, Vec2};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Theme mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Detect system theme preference
pub fn detect_system_theme() -> Result<ThemeMode, String> {
    match dark_light::detect().map_err(|e| e.to_string())? {
        dark_light::Mode::Dark => Ok(ThemeMode::Dark),
        dark_light::Mode::Light => Ok(ThemeMode::Light),
        dark_light::Mode::Unspecified => Ok(ThemeMode::Light), // Default to light if unknown
    }
}

/// Resolve the actual theme to use based on preference
pub fn resolve_theme_mode(preference: ThemeMode) -> ThemeMode {
    match preference {
        ThemeMode::System => detect_system_theme()
            .inspect_err(|e| tracing::warn!("Failed to detect system theme: {}", e))
            .unwrap_or(ThemeMode::Light),
        other => other,
    }
}

/// ZONE brand colors
pub struct ZoneColors;

impl ZoneColors {
    /// Primary orange, used for call-to-action buttons
    pub const ORANGE: Color32 = Color32::from_rgb(255, 122, 26);

    /// Hover and pressed shade of the primary orange
    pub const RED: Color32 = Color32::from_rgb(230, 64, 42);

    /// Link blue
    pub const BLUE: Color32 = Color32::from_rgb(37, 99, 235);

    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(17, 24, 39);

    // Status colors
    pub const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
    pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);

    // Light theme
    pub const BACKGROUND: Color32 = Color32::from_rgb(243, 244, 246);
    pub const SURFACE: Color32 = Color32::WHITE;
    pub const INPUT_BACKGROUND: Color32 = Color32::from_rgb(249, 250, 251);
    pub const BORDER: Color32 = Color32::from_rgb(229, 231, 235);
    pub const TEXT_PRIMARY: Color32 = Self::BLACK;
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
    pub const HOVER: Color32 = Color32::from_rgb(255, 237, 213);
    pub const SELECTED: Color32 = Color32::from_rgb(254, 215, 170);
    pub const DISABLED: Color32 = Color32::from_rgb(209, 213, 219);

    // Dark theme
    pub const DARK_BACKGROUND: Color32 = Color32::from_rgb(18, 18, 18);
    pub const DARK_SURFACE: Color32 = Color32::from_rgb(32, 32, 32);
    pub const DARK_INPUT_BACKGROUND: Color32 = Color32::from_rgb(40, 40, 40);
    pub const DARK_BORDER: Color32 = Color32::from_rgb(60, 60, 60);
    pub const DARK_TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 240);
    pub const DARK_TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160);
    pub const DARK_HOVER: Color32 = Color32::from_rgb(60, 45, 35);
    pub const DARK_SELECTED: Color32 = Color32::from_rgb(90, 60, 40);
    pub const DARK_DISABLED: Color32 = Color32::from_rgb(80, 80, 80);

    pub fn background(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_BACKGROUND
        } else {
            Self::BACKGROUND
        }
    }

    pub fn surface(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_SURFACE
        } else {
            Self::SURFACE
        }
    }

    pub fn input_background(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_INPUT_BACKGROUND
        } else {
            Self::INPUT_BACKGROUND
        }
    }

    pub fn border(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_BORDER
        } else {
            Self::BORDER
        }
    }

    pub fn text_primary(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_TEXT_PRIMARY
        } else {
            Self::TEXT_PRIMARY
        }
    }

    pub fn text_secondary(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_TEXT_SECONDARY
        } else {
            Self::TEXT_SECONDARY
        }
    }

    pub fn hover(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_HOVER
        } else {
            Self::HOVER
        }
    }

    pub fn selected(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_SELECTED
        } else {
            Self::SELECTED
        }
    }

    pub fn disabled(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_DISABLED
        } else {
            Self::DISABLED
        }
    }

    /// Pale tint behind success and warning icons
    pub fn tint(color: Color32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 32)
    }
}

/// Typography scale
pub struct Typography;

impl Typography {
    pub const SCALE_XS: f32 = 12.0;
    pub const SCALE_SM: f32 = 14.0;
    pub const SCALE_BASE: f32 = 16.0;
    pub const SCALE_XL: f32 = 20.0;
    pub const SCALE_XXL: f32 = 24.0;
    pub const SCALE_DISPLAY: f32 = 36.0;

    pub fn heading_large() -> FontId {
        FontId::proportional(Self::SCALE_XXL)
    }

    pub fn heading_medium() -> FontId {
        FontId::proportional(Self::SCALE_XL)
    }

    pub fn body() -> FontId {
        FontId::proportional(Self::SCALE_BASE)
    }

    pub fn body_small() -> FontId {
        FontId::proportional(Self::SCALE_SM)
    }

    pub fn caption() -> FontId {
        FontId::proportional(Self::SCALE_XS)
    }

    pub fn monospace_large() -> FontId {
        FontId::monospace(Self::SCALE_XXL)
    }
}

/// Spacing scale
pub struct Spacing;

impl Spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;

    pub const CARD_PADDING: f32 = 20.0;
    pub const MODAL_WIDTH: f32 = 380.0;
}

/// Corner radius scale
pub struct Shape;

impl Shape {
    pub const RADIUS_MD: u8 = 12;
    pub const RADIUS_LG: u8 = 16;
}

/// Shadow presets
pub struct Shadow;

impl Shadow {
    pub fn medium() -> egui::Shadow {
        egui::Shadow {
            offset: [0, 4],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(25),
        }
    }

    pub fn elevated() -> egui::Shadow {
        egui::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_black_alpha(40),
        }
    }
}

/// Locations of fonts with CJK coverage on common desktop installs.
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "C:\\Windows\\Fonts\\msjh.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
];

const CJK_FONT_NAME: &str = "cjk";

fn find_cjk_font(configured: Option<&Path>) -> Option<(PathBuf, Vec<u8>)> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(PathBuf::from));

    for path in candidates {
        match std::fs::read(&path) {
            Ok(bytes) => return Some((path, bytes)),
            Err(e) => tracing::trace!(?path, error = %e, "CJK font candidate not usable"),
        }
    }
    None
}

/// Configure fonts for the application
///
/// egui's bundled fonts have no CJK glyphs, so a CJK font is appended to both
/// families as a fallback. Without one, Chinese text renders as boxes.
pub fn configure_fonts(cjk_font_path: Option<&Path>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    let Some((path, bytes)) = find_cjk_font(cjk_font_path) else {
        tracing::warn!("No CJK font found; set ZONE_CJK_FONT_PATH to render Chinese text");
        return fonts;
    };
    tracing::info!(?path, "Using CJK fallback font");

    fonts
        .font_data
        .insert(CJK_FONT_NAME.to_owned(), FontData::from_owned(bytes).into());

    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }

    fonts
}

/// Apply the ZONE theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme_mode: ThemeMode) {
    // Resolve the actual theme to use
    let resolved_theme = resolve_theme_mode(theme_mode);
    let dark_mode = resolved_theme == ThemeMode::Dark;

    // Start with appropriate base mode
    let mut style = (*ctx.style()).clone();
    style.visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    style.visuals.window_fill = ZoneColors::surface(dark_mode);
    style.visuals.panel_fill = ZoneColors::background(dark_mode);
    style.visuals.extreme_bg_color = ZoneColors::input_background(dark_mode);
    style.visuals.faint_bg_color = ZoneColors::background(dark_mode);
    style.visuals.window_stroke = Stroke::new(1.0, ZoneColors::border(dark_mode));
    style.visuals.window_shadow = Shadow::elevated();
    style.visuals.window_corner_radius = egui::CornerRadius::same(Shape::RADIUS_LG);

    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, ZoneColors::border(dark_mode));
    style.visuals.widgets.hovered.weak_bg_fill = ZoneColors::hover(dark_mode);
    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ZoneColors::ORANGE);

    // Open state is also used for focused text inputs
    style.visuals.widgets.open.bg_stroke = Stroke::new(2.0, ZoneColors::ORANGE);
    style.visuals.text_cursor.stroke = Stroke::new(1.0, ZoneColors::text_primary(dark_mode));

    style.visuals.selection.bg_fill = ZoneColors::selected(dark_mode);
    style.visuals.selection.stroke = Stroke::new(1.0, ZoneColors::ORANGE);
    style.visuals.hyperlink_color = ZoneColors::BLUE;
    style.visuals.popup_shadow = Shadow::medium();

    style.spacing.item_spacing = Vec2::new(Spacing::SM, Spacing::SM);
    style.spacing.button_padding = Vec2::new(16.0, 8.0);

    ctx.set_style(style);
}
