//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::error::Error;
use crate::ui::view::{Element, FontSize, Frame, Screen};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style(size: FontSize) -> MonoTextStyle<'static, BinaryColor> {
    let font = match size {
        FontSize::Small => &FONT_6X10,
        FontSize::Large => &FONT_10X20,
    };
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

/// Draw a frame into the buffer and push it to the panel.
pub fn draw_frame<I2C>(display: &mut Display<I2C>, frame: &Frame) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    for element in frame {
        match element {
            Element::Text { x, y, size, text } => {
                let _ = Text::with_baseline(
                    text.as_str(),
                    Point::new(*x, *y),
                    text_style(*size),
                    Baseline::Top,
                )
                .draw(display);
            }
            Element::Gauge {
                y,
                width,
                height,
                fill,
            } => {
                let _ = Rectangle::new(Point::new(0, *y), Size::new(*width as u32, *height as u32))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(display);
                if *fill > 0 {
                    let _ = Rectangle::new(
                        Point::new(1, y + 1),
                        Size::new(*fill as u32, (*height - 2).max(0) as u32),
                    )
                    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(display);
                }
            }
        }
    }

    display.flush().map_err(|_| Error::Display)
}

/// [`Screen`] backed by the OLED.
pub struct OledScreen<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledScreen<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self { display }
    }
}

impl<I2C> Screen for OledScreen<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, frame: &Frame) -> Result<(), Error> {
        draw_frame(&mut self.display, frame)
    }
}
