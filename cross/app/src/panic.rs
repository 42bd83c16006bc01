use crate::{LCD_DISPLAY, LOGGER};
use core::panic::PanicInfo;
use core::sync::atomic::{self, Ordering};
use log::error;

#[inline(never)]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("{}", info);

    let message = LOGGER.last_line::<32>();
    cortex_m::interrupt::free(|cs| {
        if let Ok(mut display_ref) = LCD_DISPLAY.borrow(cs).try_borrow_mut() {
            if let Some(display) = display_ref.as_mut() {
                let _r = display.draw_text_screen(message.as_str());
            }
        }
    });

    loop {
        atomic::compiler_fence(Ordering::SeqCst);
    }
}
