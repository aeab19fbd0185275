use eframe::egui::{self, Color32};
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Dashboard theme
// ---------------------------------------------------------------------------

pub const BACKGROUND: Color32 = Color32::from_rgb(0xf4, 0xf6, 0xf9);
pub const CARD: Color32 = Color32::WHITE;
pub const TEXT: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
pub const TITLE: Color32 = Color32::from_rgb(0x29, 0x80, 0xb9);
pub const HEADER: Color32 = Color32::from_rgb(0x34, 0x49, 0x5e);
pub const ACCENT: Color32 = TITLE;

/// Switch the context to the light dashboard look.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.extreme_bg_color = CARD;
    visuals.override_text_color = Some(TEXT);
    ctx.set_visuals(visuals);
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from the accent blue.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    const ACCENT_HUE: f32 = 204.0;
    (0..n)
        .map(|i| {
            let hue = (ACCENT_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.64, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}
