use core::fmt;

/// Keys on the shield's resistor ladder, `None` when nothing is pressed.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Default)]
pub enum Key {
    #[default]
    None,
    Right,
    Up,
    Down,
    Left,
    Select,
}

/// Upper bounds (exclusive) of each key's band on the 10-bit ADC scale.
///
/// Bands: right 0-130, up 130-300, down 300-480, left 480-720, select 720-1023.
/// The thresholds sit between the nominal ladder voltages.
pub const KEY_THRESHOLDS: [(u16, Key); 5] = [
    (65, Key::Right),
    (215, Key::Up),
    (390, Key::Down),
    (600, Key::Left),
    (870, Key::Select),
];

impl Key {
    pub const ALL: [Key; 6] = [
        Key::None,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Select,
    ];

    /// Classifies a 0-1023 reading.
    pub fn from_reading(reading: u16) -> Key {
        KEY_THRESHOLDS
            .iter()
            .find(|(threshold, _)| reading < *threshold)
            .map_or(Key::None, |&(_, key)| key)
    }

    pub fn is_pressed(self) -> bool {
        self != Key::None
    }

    pub const fn name(self) -> &'static str {
        match self {
            Key::None => "None",
            Key::Right => "Right",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Select => "Select",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
