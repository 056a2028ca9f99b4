use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBB` LED color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const OFF: Self = Self(0x000000);
    pub const RED: Self = Self(0xFF0000);
    pub const YELLOW: Self = Self(0xFFFF00);
    pub const GREEN: Self = Self(0x00FF00);
    pub const CYAN: Self = Self(0x00FFFF);
    pub const BLUE: Self = Self(0x0000FF);
    pub const VIOLET: Self = Self(0xFF00FF);
    pub const WHITE: Self = Self(0xFFFFFF);

    /// Highlight left on a cell once its pair has been found.
    pub const MATCHED: Self = Self(0x444444);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn components(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    pub const fn is_off(self) -> bool {
        self.0 == Self::OFF.0
    }

    /// Scales every channel by `factor` in `[0, 1]`.
    pub fn dimmed(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let (r, g, b) = self.components();
        let scale = |channel: u8| (f32::from(channel) * factor) as u8;
        Self::rgb(scale(r), scale(g), scale(b))
    }
}

/// Colors handed out to pairs; several pairs share a color.
pub const PALETTE: [Color; 6] = [
    Color::RED,
    Color::YELLOW,
    Color::GREEN,
    Color::CYAN,
    Color::BLUE,
    Color::VIOLET,
];

/// Maps `pos` onto a red, green, blue and back to red color wheel.
pub const fn wheel(pos: u8) -> Color {
    let pos = pos as u16;
    if pos < 85 {
        Color::rgb((255 - pos * 3) as u8, (pos * 3) as u8, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        Color::rgb(0, (255 - pos * 3) as u8, (pos * 3) as u8)
    } else {
        let pos = pos - 170;
        Color::rgb((pos * 3) as u8, 0, (255 - pos * 3) as u8)
    }
}
