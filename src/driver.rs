//! Physical transport boundary
//!
//! A [`PixelDriver`] owns the per-lamp color words of the strip and clocks
//! them out on [`PixelDriver::show`]. Words use the [`PackedColor`] layout in
//! the channel order the driver reports.

use smart_leds::{RGB8, SmartLedsWrite};

use crate::color::{ChannelOrder, PackedColor};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// The controller is generic over it.
pub trait PixelDriver {
    type Error;

    /// Channel order of the packed words this driver expects
    fn channel_order(&self) -> ChannelOrder;

    /// Number of lamps the driver addresses
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bring up the transport
    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Turn every staged word off
    fn clear(&mut self);

    /// Stage a word for one lamp; out of range indices are ignored
    fn set_color(&mut self, index: usize, color: PackedColor);

    /// Currently staged word of one lamp
    fn color(&self, index: usize) -> Option<PackedColor>;

    /// Push every staged word to the strip
    ///
    /// Blocks for the whole transmission.
    fn show(&mut self) -> Result<(), Self::Error>;
}

/// [`PixelDriver`] on top of any `smart-leds` writer
///
/// The writer receives one `RGB8` per lamp with the wire slots in `r`, `g`,
/// `b`. Writers that reorder channels themselves (most WS2812 drivers) should
/// use [`ChannelOrder::Rgb`].
pub struct SmartLedsDriver<W, const N: usize> {
    writer: W,
    order: ChannelOrder,
    frame: [PackedColor; N],
    len: usize,
}

impl<W, const N: usize> SmartLedsDriver<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Create a driver for `len` lamps, capped at `N`
    pub fn new(writer: W, order: ChannelOrder, len: usize) -> Self {
        Self {
            writer,
            order,
            frame: [PackedColor::OFF; N],
            len: len.min(N),
        }
    }

    /// Get a reference to the underlying writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn frame(&self) -> &[PackedColor] {
        &self.frame[..self.len]
    }
}

impl<W, const N: usize> PixelDriver for SmartLedsDriver<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    type Error = W::Error;

    fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.frame.fill(PackedColor::OFF);
    }

    fn set_color(&mut self, index: usize, color: PackedColor) {
        if let Some(word) = self.frame.get_mut(..self.len).and_then(|f| f.get_mut(index)) {
            *word = color;
        }
    }

    fn color(&self, index: usize) -> Option<PackedColor> {
        self.frame().get(index).copied()
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        let frame = &self.frame[..self.len];
        self.writer.write(frame.iter().map(|word| {
            let [r, g, b] = word.slots();
            RGB8 { r, g, b }
        }))
    }
}
