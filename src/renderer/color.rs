//! Colors for game elements

/// A fill color, expressed the way the canvas consumes it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
    /// Hue in degrees [0, 360), saturation/lightness in percent
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
}

impl Color {
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };

    pub const fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Color::Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS color string (`rgb(..)` / `hsl(..)`)
    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgb { r, g, b } => format!("rgb({r}, {g}, {b})"),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => format!("hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }

    /// CSS color string with an explicit alpha channel
    pub fn to_css_alpha(&self, alpha: f32) -> String {
        match *self {
            Color::Rgb { r, g, b } => format!("rgba({r}, {g}, {b}, {alpha})"),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => format!("hsla({hue}, {saturation}%, {lightness}%, {alpha})"),
        }
    }
}
