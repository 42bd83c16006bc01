use embedded_hal::digital::v2::OutputPin;

/// On/off control of the display backlight line.
pub struct Backlight<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Backlight<P> {
    /// Takes the pin and switches the backlight on.
    pub fn new(pin: P) -> Result<Self, P::Error> {
        let mut backlight = Self { pin, on: false };
        backlight.on()?;
        Ok(backlight)
    }

    pub fn on(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()?;
        self.on = true;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()?;
        self.on = false;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<(), P::Error> {
        if self.on {
            self.off()
        } else {
            self.on()
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn free(self) -> P {
        self.pin
    }
}
