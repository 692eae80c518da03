use std::ops::Index;

use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes of console RAM.
pub const RAM_SIZE: usize = 128;

/// Error returned when building a [`RamSnapshot`] from a slice of the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid RAM snapshot: expected 128 bytes, got {len}")]
pub struct RamSizeError {
    pub len: usize,
}

/// Console RAM contents at one frame.
///
/// ```
/// use ramsight_core::{RamSnapshot, RAM_SIZE};
///
/// let bytes = vec![0; RAM_SIZE];
/// let ram = RamSnapshot::try_from(bytes.as_slice()).unwrap();
/// assert_eq!(ram[51], 0);
///
/// assert!(RamSnapshot::try_from(&bytes[..64]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RamSnapshot([u8; RAM_SIZE]);

impl Default for RamSnapshot {
    fn default() -> Self {
        Self([0; RAM_SIZE])
    }
}

impl RamSnapshot {
    #[must_use]
    pub const fn new(bytes: [u8; RAM_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn byte(&self, offset: usize) -> u8 {
        self.0[offset]
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAM_SIZE] {
        &self.0
    }

    /// Reads `N` consecutive bytes starting at `offset`.
    #[must_use]
    pub fn bytes<const N: usize>(&self, offset: usize) -> ArrayVec<u8, N> {
        self.0[offset..offset + N].iter().copied().collect()
    }
}

impl Index<usize> for RamSnapshot {
    type Output = u8;

    fn index(&self, offset: usize) -> &Self::Output {
        &self.0[offset]
    }
}

impl TryFrom<&[u8]> for RamSnapshot {
    type Error = RamSizeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let len = bytes.len();
        let bytes = <[u8; RAM_SIZE]>::try_from(bytes).map_err(|_| RamSizeError { len })?;
        Ok(Self(bytes))
    }
}

impl Serialize for RamSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for RamSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::try_from(bytes.as_slice()).map_err(serde::de::Error::custom)
    }
}

/// Sign-extends a 4-bit field: values with bit 3 set are negative.
///
/// ```
/// use ramsight_core::signed_nibble;
///
/// assert_eq!(signed_nibble(8), -8);
/// assert_eq!(signed_nibble(7), 7);
/// assert_eq!(signed_nibble(0xF), -1);
/// ```
#[must_use]
#[expect(clippy::cast_possible_wrap)]
pub const fn signed_nibble(nibble: u8) -> i8 {
    let nibble = (nibble & 0x0F) as i8;
    if nibble & 0x08 != 0 {
        nibble - 16
    } else {
        nibble
    }
}

#[must_use]
pub const fn high_nibble(byte: u8) -> u8 {
    byte >> 4
}

#[must_use]
pub const fn low_nibble(byte: u8) -> u8 {
    byte & 0x0F
}

/// Layout of a number stored as one byte per decimal place.
///
/// Each byte holds `digit * scale` (the offset of the digit glyph in the font
/// table); bytes equal to `blank` are unlit leading digits and are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentedDigits {
    /// Offsets of the digit bytes, most significant first.
    pub offsets: &'static [usize],
    pub blank: u8,
    pub scale: u8,
}

impl SegmentedDigits {
    #[must_use]
    pub const fn new(offsets: &'static [usize], blank: u8, scale: u8) -> Self {
        Self {
            offsets,
            blank,
            scale,
        }
    }

    /// Decodes the number. Blank digits count as zero in their place.
    #[must_use]
    pub fn decode(&self, ram: &RamSnapshot) -> u32 {
        self.offsets.iter().fold(0, |acc, &offset| {
            let byte = ram[offset];
            let digit = if byte == self.blank {
                0
            } else {
                byte / self.scale.max(1)
            };
            acc * 10 + u32::from(digit)
        })
    }

    /// Number of digits from the first lit one (at least one, so that zero still shows
    /// a glyph).
    #[must_use]
    pub fn lit_digits(&self, ram: &RamSnapshot) -> usize {
        let leading_blanks = self
            .offsets
            .iter()
            .take_while(|&&offset| ram[offset] == self.blank)
            .count();
        (self.offsets.len() - leading_blanks).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGITS: SegmentedDigits = SegmentedDigits::new(&[0, 1, 2, 3, 4, 5], 88, 8);

    fn ram_with(prefix: &[u8]) -> RamSnapshot {
        let mut bytes = [0; RAM_SIZE];
        bytes[..prefix.len()].copy_from_slice(prefix);
        RamSnapshot::new(bytes)
    }

    #[test]
    fn test_signed_nibble() {
        assert_eq!(signed_nibble(8), -8);
        assert_eq!(signed_nibble(7), 7);
        assert_eq!(signed_nibble(0), 0);
        // upper bits are ignored
        assert_eq!(signed_nibble(0x19), -7);
    }

    #[test]
    fn test_nibble_split() {
        assert_eq!(high_nibble(0xA5), 0xA);
        assert_eq!(low_nibble(0xA5), 0x5);
    }

    #[test]
    fn test_segmented_digits() {
        let ram = ram_with(&[88, 88, 88, 24, 16, 8]);
        assert_eq!(DIGITS.decode(&ram), 321);
        assert_eq!(DIGITS.lit_digits(&ram), 3);

        let ram = ram_with(&[8, 0, 0, 0, 0, 0]);
        assert_eq!(DIGITS.decode(&ram), 100_000);

        // a blank inside the number keeps the place value
        let ram = ram_with(&[88, 8, 88, 16, 0, 0]);
        assert_eq!(DIGITS.decode(&ram), 10_200);
        assert_eq!(DIGITS.lit_digits(&ram), 5);

        let blank = ram_with(&[88; 6]);
        assert_eq!(DIGITS.decode(&blank), 0);
        assert_eq!(DIGITS.lit_digits(&blank), 1);
    }

    #[test]
    fn test_snapshot_length_is_checked() {
        let err = RamSnapshot::try_from([0u8; 127].as_slice()).unwrap_err();
        assert_eq!(err.len, 127);
        assert!(RamSnapshot::try_from([0u8; 129].as_slice()).is_err());
    }

    #[test]
    fn test_snapshot_reads() {
        let ram = ram_with(&[1, 2, 3, 4]);
        assert_eq!(ram.byte(2), 3);
        assert_eq!(ram.bytes::<3>(1).as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn test_snapshot_json() {
        let ram = ram_with(&[9, 8, 7]);
        let json = serde_json::to_string(&ram).unwrap();
        let restored: RamSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ram);

        assert!(serde_json::from_str::<RamSnapshot>("[1, 2, 3]").is_err());
    }
}
