use serde::{Deserialize, Serialize};

/// One of the three color channels of a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    pub const ALL: [ColorChannel; 3] = [ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue];

    /// Byte offset of the channel within an RGBA pixel.
    pub fn offset(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }
}

impl std::fmt::Display for ColorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorChannel::Red => write!(f, "red"),
            ColorChannel::Green => write!(f, "green"),
            ColorChannel::Blue => write!(f, "blue"),
        }
    }
}

/// Which intensity a threshold compares against its cutoff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSelector {
    /// Unweighted mean of the three color channels.
    #[default]
    All,
    Single(ColorChannel),
}

impl From<ColorChannel> for ChannelSelector {
    fn from(channel: ColorChannel) -> Self {
        ChannelSelector::Single(channel)
    }
}
