#![allow(dead_code)]

use myrtio_lamp_array::{ChannelOrder, LampArrayMode, LampStateSource, PackedColor, PixelDriver, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowFailed;

/// Driver that records every interaction
pub struct MockDriver {
    pub order: ChannelOrder,
    pub staged: Vec<PackedColor>,
    pub shown: Vec<Vec<PackedColor>>,
    pub set_calls: Vec<usize>,
    pub initialized: usize,
    pub cleared: usize,
    pub fail_show: bool,
}

impl MockDriver {
    pub fn new(len: usize) -> Self {
        Self::with_order(len, ChannelOrder::Rgb)
    }

    pub fn with_order(len: usize, order: ChannelOrder) -> Self {
        Self {
            order,
            // Garbage left over from before power-up
            staged: vec![PackedColor::from_raw(0x00AB_CDEF); len],
            shown: Vec::new(),
            set_calls: Vec::new(),
            initialized: 0,
            cleared: 0,
            fail_show: false,
        }
    }

    pub fn show_count(&self) -> usize {
        self.shown.len()
    }

    pub fn last_frame(&self) -> &[PackedColor] {
        self.shown.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl PixelDriver for MockDriver {
    type Error = ShowFailed;

    fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    fn len(&self) -> usize {
        self.staged.len()
    }

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.initialized += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.cleared += 1;
        self.staged.fill(PackedColor::OFF);
    }

    fn set_color(&mut self, index: usize, color: PackedColor) {
        self.set_calls.push(index);
        if let Some(word) = self.staged.get_mut(index) {
            *word = color;
        }
    }

    fn color(&self, index: usize) -> Option<PackedColor> {
        self.staged.get(index).copied()
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        if self.fail_show {
            return Err(ShowFailed);
        }
        self.shown.push(self.staged.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTimeout;

/// State source answering with whatever the test put in it
pub struct ScriptedSource {
    pub mode: LampArrayMode,
    pub colors: Vec<Rgb>,
    pub fail: bool,
    pub queries: usize,
}

impl ScriptedSource {
    pub fn autonomous(len: usize) -> Self {
        Self {
            mode: LampArrayMode::Autonomous,
            colors: vec![Rgb::default(); len],
            fail: false,
            queries: 0,
        }
    }

    pub fn host(colors: Vec<Rgb>) -> Self {
        Self {
            mode: LampArrayMode::HostControlled,
            colors,
            fail: false,
            queries: 0,
        }
    }
}

impl LampStateSource for ScriptedSource {
    type Error = QueryTimeout;

    fn query_state(&mut self, colors: &mut [Rgb]) -> Result<LampArrayMode, Self::Error> {
        self.queries += 1;
        if self.fail {
            // Scribble over the buffer to prove it is ignored
            colors.fill(Rgb::new(1, 2, 3));
            return Err(QueryTimeout);
        }
        colors.copy_from_slice(&self.colors);
        Ok(self.mode)
    }
}
