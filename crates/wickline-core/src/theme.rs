// File: crates/wickline-core/src/theme.rs
// Summary: Light/Dark theming for candle rendering colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub candle_up: skia::Color,
    pub candle_down: skia::Color,
    /// Flat (no range) candles, including filled gaps.
    pub candle_flat: skia::Color,
    /// Selection band; must be translucent.
    pub highlight: skia::Color,
    pub info_label: skia::Color,
    pub info_background: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            candle_up: skia::Color::from_argb(255, 40, 200, 120),
            candle_down: skia::Color::from_argb(255, 220, 80, 80),
            candle_flat: skia::Color::from_argb(255, 128, 128, 128),
            highlight: skia::Color::from_argb(48, 235, 235, 245),
            info_label: skia::Color::from_argb(255, 235, 235, 245),
            info_background: skia::Color::from_argb(200, 30, 30, 36),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            candle_up: skia::Color::from_argb(255, 20, 160, 90),
            candle_down: skia::Color::from_argb(255, 200, 60, 60),
            candle_flat: skia::Color::from_argb(255, 128, 128, 128),
            highlight: skia::Color::from_argb(40, 30, 120, 240),
            info_label: skia::Color::from_argb(255, 20, 20, 30),
            info_background: skia::Color::from_argb(210, 240, 240, 244),
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            candle_up: skia::Color::from_argb(255, 0x2a, 0xa1, 0x98),   // cyan/green
            candle_down: skia::Color::from_argb(255, 0xdc, 0x32, 0x2f), // red
            candle_flat: skia::Color::from_argb(255, 0x83, 0x94, 0x96), // base0
            highlight: skia::Color::from_argb(56, 0xb5, 0x89, 0x00),    // yellow
            info_label: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),  // base2
            info_background: skia::Color::from_argb(210, 0x07, 0x36, 0x42),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            candle_up: skia::Color::from_argb(255, 0x00, 0xff, 0x00),
            candle_down: skia::Color::from_argb(255, 0xff, 0x00, 0x00),
            candle_flat: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            highlight: skia::Color::from_argb(72, 0xff, 0xff, 0x00),
            info_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            info_background: skia::Color::from_argb(220, 0x22, 0x22, 0x22),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_is_translucent_in_every_preset() {
        for t in presets() {
            let a = t.highlight.a();
            assert!(a > 0 && a < 255, "{} highlight alpha {}", t.name, a);
        }
    }

    #[test]
    fn find_falls_back_to_dark() {
        assert_eq!(find("LIGHT").name, "light");
        assert_eq!(find("nope").name, "dark");
    }
}
