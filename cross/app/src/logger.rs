use core::cell::RefCell;
use core::fmt::Write;

use heapless::String;
use log::{Level, Metadata, Record};

use crate::Mutex;

const BUFFER_SIZE: usize = 512;
const LINE_SIZE: usize = 128;

/// Keeps the most recent log lines in memory, oldest lines are dropped first.
pub struct Logger {
    buffer: Mutex<RefCell<String<BUFFER_SIZE>>>,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= crate::MAX_LOG_LEVEL
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut log_str = String::<LINE_SIZE>::new();
        //overlong records are cut short
        let _ = write!(
            &mut log_str,
            "{} {} {}",
            Self::level_str(record.level()),
            record
                .target()
                .split("::")
                .last()
                .unwrap_or_else(|| record.target()),
            record.args()
        );

        cortex_m::interrupt::free(|cs| {
            let buffer_ref = self.buffer.borrow(cs);
            let Ok(mut buffer) = buffer_ref.try_borrow_mut() else {
                return;
            };

            while !buffer.is_empty() && buffer.len() + log_str.len() + 1 > buffer.capacity() {
                let cut = buffer.find('\n').map_or(buffer.len(), |i| i + 1);
                let rest: String<BUFFER_SIZE> = String::from(&buffer[cut..]);
                *buffer = rest;
            }
            let _ = buffer.push_str(&log_str);
            let _ = buffer.push('\n');
        });
    }

    fn flush(&self) {}
}

impl Logger {
    pub const fn new() -> Self {
        Self {
            buffer: Mutex::new(RefCell::new(String::new())),
        }
    }

    /// The newest complete record, cut to `N` bytes.
    pub fn last_line<const N: usize>(&self) -> String<N> {
        cortex_m::interrupt::free(|cs| {
            let mut line = String::new();
            if let Ok(buffer) = self.buffer.borrow(cs).try_borrow() {
                let last = buffer.trim_end().rsplit('\n').next().unwrap_or("");
                for c in last.chars() {
                    if line.push(c).is_err() {
                        break;
                    }
                }
            }
            line
        })
    }

    fn level_str(level: Level) -> &'static str {
        match level {
            Level::Error => "E",
            Level::Warn => "W",
            Level::Info => "I",
            Level::Debug => "D",
            Level::Trace => "T",
        }
    }
}
