use core::fmt::Write;

use arrayvec::ArrayString;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use hd44780_driver::bus::DataBus;
use hd44780_driver::error::Result;
use hd44780_driver::{Cursor, CursorBlink, Display, DisplayMode, HD44780};
use lcd_keypad::Key;

const COLUMNS: usize = 16;
const SECOND_LINE: u8 = 0x40;

type Line = ArrayString<COLUMNS>;

/// The shield's 16x2 character display.
pub struct LcdDisplay<B: DataBus, D> {
    lcd: HD44780<B>,
    delay: D,
}

impl<B, D> LcdDisplay<B, D>
where
    B: DataBus,
    D: DelayUs<u16> + DelayMs<u8>,
{
    pub fn new(mut lcd: HD44780<B>, mut delay: D) -> Result<Self> {
        lcd.reset(&mut delay)?;
        lcd.clear(&mut delay)?;
        lcd.set_display_mode(
            DisplayMode {
                display: Display::On,
                cursor_visibility: Cursor::Invisible,
                cursor_blink: CursorBlink::Off,
            },
            &mut delay,
        )?;

        Ok(Self { lcd, delay })
    }

    /// Writes both lines, padding each so old text is overwritten.
    pub fn draw_lines(&mut self, top: &str, bottom: &str) -> Result<()> {
        self.lcd.set_cursor_pos(0, &mut self.delay)?;
        self.lcd.write_str(&Self::pad(top), &mut self.delay)?;
        self.lcd.set_cursor_pos(SECOND_LINE, &mut self.delay)?;
        self.lcd.write_str(&Self::pad(bottom), &mut self.delay)?;
        Ok(())
    }

    pub fn draw_key(&mut self, key: Key, backlight_on: bool) -> Result<()> {
        let mut status = Line::new();
        //cannot overflow, longest is "Select light off"
        let _ = write!(
            &mut status,
            "{} light {}",
            key,
            if backlight_on { "on" } else { "off" }
        );
        self.draw_lines("LCD Keypad", status.as_str())
    }

    /// Wraps text over both lines, anything past 32 characters is cut.
    pub fn draw_text_screen(&mut self, text: &str) -> Result<()> {
        let split = text
            .char_indices()
            .nth(COLUMNS)
            .map_or(text.len(), |(i, _)| i);
        let (top, bottom) = text.split_at(split);
        self.draw_lines(top, bottom)
    }

    fn pad(text: &str) -> Line {
        let mut line = Line::new();
        for c in text.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()) {
            if line.try_push(c).is_err() {
                break;
            }
        }
        while line.try_push(' ').is_ok() {}
        line
    }
}
