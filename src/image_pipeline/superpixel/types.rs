//! Types for superpixel extraction

use std::fmt;

/// Output channel of an RGGB superpixel split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Single-letter name, used for the FILTER value and the output folder.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three decimated planes of one CFA image, each `width` x `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPlanes<T> {
    pub width: usize,
    pub height: usize,
    pub red: T,
    pub green: T,
    pub blue: T,
}

impl<T> ChannelPlanes<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ChannelPlanes<U> {
        ChannelPlanes {
            width: self.width,
            height: self.height,
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
        }
    }

    /// Consumes the planes in R, G, B order.
    pub fn into_channels(self) -> [(Channel, T); 3] {
        [
            (Channel::Red, self.red),
            (Channel::Green, self.green),
            (Channel::Blue, self.blue),
        ]
    }
}
