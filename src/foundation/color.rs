/// Packed 32-bit ARGB color (alpha in the high byte), straight alpha.
///
/// The packing matches the row-major `u32` pixel buffers used throughout the
/// crate, so a `Color` converts to and from a buffer word for free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color(u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Builds a color from straight 8-bit components.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
    }

    /// Builds a fully opaque color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, u8::MAX)
    }

    /// Wraps an already-packed ARGB word.
    pub fn from_packed(word: u32) -> Self {
        Self(word)
    }

    /// The packed ARGB word.
    pub fn packed(self) -> u32 {
        self.0
    }

    /// Alpha component.
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// True when alpha is 255. An opaque pixel fully occludes whatever is
    /// beneath it, which lets composition skip downstream re-blends.
    pub fn is_opaque(self) -> bool {
        self.0 >= 0xFF00_0000
    }
}

/// Discrete source-over blend of `added` on top of `background`.
///
/// Integer arithmetic throughout, every division truncating toward zero.
/// The truncation direction is part of the pixel contract: composed buffers
/// are compared word-for-word to detect settled pixels, so two code paths
/// computing "the same" blend must agree bit-exactly.
pub fn over(background: Color, added: Color) -> Color {
    let ab = u32::from(background.alpha());
    let aa = u32::from(added.alpha());

    if aa == u32::from(u8::MAX) || ab == 0 {
        return added;
    }
    if aa == 0 {
        return background;
    }

    let ao = (255 * aa + 255 * ab - aa * ab) / 255;
    if ao == 0 {
        return Color::TRANSPARENT;
    }

    let blend = |cb: u32, ca: u32| (255 * ca * aa + 255 * cb * ab - cb * ab * aa) / (255 * ao);

    let r = blend(u32::from(background.red()), u32::from(added.red()));
    let g = blend(u32::from(background.green()), u32::from(added.green()));
    let b = blend(u32::from(background.blue()), u32::from(added.blue()));

    Color(ao << 24 | r << 16 | g << 8 | b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_roundtrip() {
        let c = Color::from_rgba(1, 2, 3, 4);
        assert_eq!(c.packed(), 0x0401_0203);
        assert_eq!(
            (c.red(), c.green(), c.blue(), c.alpha()),
            (1, 2, 3, 4)
        );
        assert_eq!(Color::from_packed(c.packed()), c);
    }

    #[test]
    fn opaque_added_replaces_background() {
        let bg = Color::from_rgba(10, 20, 30, 128);
        let added = Color::opaque(200, 0, 0);
        assert_eq!(over(bg, added), added);
    }

    #[test]
    fn transparent_background_yields_added() {
        let added = Color::from_rgba(9, 9, 9, 42);
        assert_eq!(over(Color::TRANSPARENT, added), added);
    }

    #[test]
    fn transparent_added_is_noop() {
        let bg = Color::from_rgba(10, 20, 30, 128);
        assert_eq!(over(bg, Color::from_rgba(255, 255, 255, 0)), bg);
    }

    #[test]
    fn opaque_background_stays_opaque() {
        let bg = Color::opaque(0, 0, 0);
        let added = Color::from_rgba(255, 255, 255, 128);
        assert_eq!(over(bg, added).alpha(), 255);
    }

    // Hand-computed against the truncating formula; guards the exact
    // rounding direction.
    #[test]
    fn half_alpha_blend_truncates() {
        let bg = Color::from_rgba(100, 50, 200, 128);
        let added = Color::from_rgba(200, 100, 0, 128);
        let out = over(bg, added);
        assert_eq!(out.alpha(), 191);
        assert_eq!(out.red(), 167);
        assert_eq!(out.green(), 83);
        assert_eq!(out.blue(), 66);
    }
}
