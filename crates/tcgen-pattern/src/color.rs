/// Colours the PT-430b video DAC can produce.
///
/// The low nibble drives the GRBW outputs (bit 0 green, bit 1 red, bit 2 blue, bit 3 white);
/// the high nibble is unused by the hardware and kept set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0xF0,
    Green = 0xF1,
    Red = 0xF2,
    Yellow = 0xF3,
    Blue = 0xF4,
    Cyan = 0xF5,
    Magenta = 0xF6,
    White = 0xFF,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::White,
        Color::Yellow,
        Color::Cyan,
        Color::Green,
        Color::Magenta,
        Color::Red,
        Color::Blue,
    ];

    /// EPROM byte for this colour.
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color.value()
    }
}
