//! Submission flags.

use crate::error::CtxError;

/// How a submission relates to the stream it belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum HashFlag {
    /// Continue an open stream.
    Update = 0,
    /// Start a new stream.
    First = 1,
    /// Finish an open stream.
    Last = 2,
    /// Start and finish a stream in one call.
    Entire = 3,
}

impl HashFlag {
    /// Whether this flag starts a new stream.
    pub const fn starts(self) -> bool {
        matches!(self, Self::First | Self::Entire)
    }

    /// Whether this flag finishes the stream.
    pub const fn finishes(self) -> bool {
        matches!(self, Self::Last | Self::Entire)
    }
}

impl TryFrom<u32> for HashFlag {
    type Error = CtxError;

    fn try_from(flags: u32) -> Result<Self, Self::Error> {
        match flags {
            0 => Ok(Self::Update),
            1 => Ok(Self::First),
            2 => Ok(Self::Last),
            3 => Ok(Self::Entire),
            _ => Err(CtxError::InvalidFlags { flags }),
        }
    }
}

impl From<HashFlag> for u32 {
    fn from(flag: HashFlag) -> Self {
        flag as Self
    }
}
