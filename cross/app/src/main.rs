#![no_std]
#![no_main]

//! LCD keypad shield on an RP2040
//!
//! Shows the last debounced key on the display, select toggles the backlight.
//! Shield wiring: DB4-DB7 on GPIO4-7, RS on GPIO8, enable on GPIO9,
//! backlight on GPIO10 and the key ladder on GPIO26 (ADC0).

mod lcd_display;
mod logger;
mod panic;
mod timer_clock;

use core::cell::{Cell, RefCell};

use cortex_m::interrupt::Mutex;
use cortex_m_rt::entry;
use embedded_time::fixed_point::FixedPoint;
use embedded_time::rate::Hertz;
use hd44780_driver::bus::FourBitBus;
use hd44780_driver::HD44780;
use lcd_keypad::{AnalogKeypad, Backlight, Debouncer, EmbeddedTimeClock, Key};
use log::LevelFilter;
use rp2040_hal::{self as hal, clocks::Clock, pac};

use crate::lcd_display::LcdDisplay;
use crate::logger::Logger;
use crate::timer_clock::TimerClock;

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

pub const MAX_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const XOSC_CRYSTAL_FREQ: Hertz = Hertz(12_000_000);
const ADC_RESOLUTION_BITS: u8 = 12;

type OutPin<I> = hal::gpio::Pin<I, hal::gpio::PushPullOutput>;
type LcdBus = FourBitBus<
    OutPin<hal::gpio::bank0::Gpio8>,
    OutPin<hal::gpio::bank0::Gpio9>,
    OutPin<hal::gpio::bank0::Gpio4>,
    OutPin<hal::gpio::bank0::Gpio5>,
    OutPin<hal::gpio::bank0::Gpio6>,
    OutPin<hal::gpio::bank0::Gpio7>,
>;

static LOGGER: Logger = Logger::new();
static LCD_DISPLAY: Mutex<RefCell<Option<LcdDisplay<LcdBus, cortex_m::delay::Delay>>>> =
    Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    //Safety: no interrupts enabled
    unsafe {
        log::set_logger_racy(&LOGGER)
            .map(|()| log::set_max_level(MAX_LOG_LEVEL))
            .unwrap();
    }

    log::info!("Starting");

    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);
    let clocks = hal::clocks::init_clocks_and_plls(
        XOSC_CRYSTAL_FREQ.integer(),
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    //display, 4 bit bus
    let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());
    let lcd = HD44780::new_4bit(
        pins.gpio8.into_push_pull_output(),
        pins.gpio9.into_push_pull_output(),
        pins.gpio4.into_push_pull_output(),
        pins.gpio5.into_push_pull_output(),
        pins.gpio6.into_push_pull_output(),
        pins.gpio7.into_push_pull_output(),
        &mut delay,
    )
    .unwrap();
    let display = LcdDisplay::new(lcd, delay).unwrap();
    cortex_m::interrupt::free(|cs| LCD_DISPLAY.borrow(cs).replace(Some(display)));
    log::info!("Display initialised");

    let mut backlight = Backlight::new(pins.gpio10.into_push_pull_output()).unwrap();

    let adc = hal::Adc::new(pac.ADC, &mut pac.RESETS);
    let keypad =
        AnalogKeypad::new(adc, pins.gpio26.into_floating_input()).with_resolution(ADC_RESOLUTION_BITS);
    let clock = EmbeddedTimeClock::new(TimerClock::new(hal::Timer::new(
        pac.TIMER,
        &mut pac.RESETS,
    )));

    let confirmed = Cell::new(Some(Key::None));
    let mut debouncer =
        Debouncer::new(keypad, clock).with_key_listener(|key: Key| confirmed.set(Some(key)));

    log::info!("Entering main loop");
    loop {
        if let Err(e) = debouncer.advance() {
            log::warn!("keypad {:?}", e);
        }

        if let Some(key) = confirmed.take() {
            if key == Key::Select {
                backlight.toggle().unwrap();
            }

            cortex_m::interrupt::free(|cs| {
                if let Some(display) = LCD_DISPLAY.borrow(cs).borrow_mut().as_mut() {
                    if display.draw_key(key, backlight.is_on()).is_err() {
                        log::warn!("display write failed");
                    }
                }
            });
        }
    }
}
