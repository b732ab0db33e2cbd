//! DXGI format codes stored in texture archive entries.

/// Tile mode byte marking the default linear texture layout.
///
/// Entries with any other tile mode hold a platform-swizzled (console)
/// layout and are tagged accordingly in the output header.
pub const TILE_MODE_LINEAR: u8 = 0x8;

/// The DXGI format codes known to appear in texture archives.
///
/// This is a closed set: archives produced for the game only use these
/// codes, and [`DxgiFormat::from_code`] refuses everything else so an
/// unknown format fails loudly instead of being guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DxgiFormat {
    R8G8B8A8Unorm = 28,
    R8G8B8A8UnormSrgb = 29,
    R8Unorm = 61,
    Bc1Unorm = 71,
    Bc1UnormSrgb = 72,
    Bc2Unorm = 74,
    Bc3Unorm = 77,
    Bc3UnormSrgb = 78,
    Bc4Unorm = 80,
    Bc5Unorm = 83,
    Bc5Snorm = 84,
    B5G6R5Unorm = 85,
    B8G8R8A8Unorm = 87,
    B8G8R8X8Unorm = 88,
    Bc6hUf16 = 95,
    Bc7Unorm = 98,
    Bc7UnormSrgb = 99,
}

impl DxgiFormat {
    /// Parse a format code from an entry's format byte.
    ///
    /// Returns `None` for codes outside the known table.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            28 => Some(Self::R8G8B8A8Unorm),
            29 => Some(Self::R8G8B8A8UnormSrgb),
            61 => Some(Self::R8Unorm),
            71 => Some(Self::Bc1Unorm),
            72 => Some(Self::Bc1UnormSrgb),
            74 => Some(Self::Bc2Unorm),
            77 => Some(Self::Bc3Unorm),
            78 => Some(Self::Bc3UnormSrgb),
            80 => Some(Self::Bc4Unorm),
            83 => Some(Self::Bc5Unorm),
            84 => Some(Self::Bc5Snorm),
            85 => Some(Self::B5G6R5Unorm),
            87 => Some(Self::B8G8R8A8Unorm),
            88 => Some(Self::B8G8R8X8Unorm),
            95 => Some(Self::Bc6hUf16),
            98 => Some(Self::Bc7Unorm),
            99 => Some(Self::Bc7UnormSrgb),
            _ => None,
        }
    }

    /// The raw DXGI code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this is a block-compressed (BC*) format.
    ///
    /// Block-compressed textures are the only ones that get the tiled
    /// layout marker when the entry's tile mode is non-linear.
    #[must_use]
    pub fn is_block_compressed(self) -> bool {
        matches!(
            self,
            Self::Bc1Unorm
                | Self::Bc1UnormSrgb
                | Self::Bc2Unorm
                | Self::Bc3Unorm
                | Self::Bc3UnormSrgb
                | Self::Bc4Unorm
                | Self::Bc5Unorm
                | Self::Bc5Snorm
                | Self::Bc6hUf16
                | Self::Bc7Unorm
                | Self::Bc7UnormSrgb
        )
    }

    /// Short display name for listings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::R8G8B8A8Unorm => "R8G8B8A8",
            Self::R8G8B8A8UnormSrgb => "R8G8B8A8_SRGB",
            Self::R8Unorm => "R8",
            Self::Bc1Unorm => "BC1",
            Self::Bc1UnormSrgb => "BC1_SRGB",
            Self::Bc2Unorm => "BC2",
            Self::Bc3Unorm => "BC3",
            Self::Bc3UnormSrgb => "BC3_SRGB",
            Self::Bc4Unorm => "BC4",
            Self::Bc5Unorm => "BC5",
            Self::Bc5Snorm => "BC5_SNORM",
            Self::B5G6R5Unorm => "B5G6R5",
            Self::B8G8R8A8Unorm => "B8G8R8A8",
            Self::B8G8R8X8Unorm => "B8G8R8X8",
            Self::Bc6hUf16 => "BC6H",
            Self::Bc7Unorm => "BC7",
            Self::Bc7UnormSrgb => "BC7_SRGB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_codes() {
        for code in [28u8, 29, 61, 71, 72, 74, 77, 78, 80, 83, 84, 85, 87, 88, 95, 98, 99] {
            let format = DxgiFormat::from_code(code).expect("known code");
            assert_eq!(format.code(), code);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(DxgiFormat::from_code(0), None);
        assert_eq!(DxgiFormat::from_code(60), None);
        assert_eq!(DxgiFormat::from_code(100), None);
        assert_eq!(DxgiFormat::from_code(255), None);
    }

    #[test]
    fn block_compression_split() {
        assert!(DxgiFormat::Bc1Unorm.is_block_compressed());
        assert!(DxgiFormat::Bc7UnormSrgb.is_block_compressed());
        assert!(!DxgiFormat::R8G8B8A8Unorm.is_block_compressed());
        assert!(!DxgiFormat::B5G6R5Unorm.is_block_compressed());
        assert!(!DxgiFormat::R8Unorm.is_block_compressed());
    }
}
