use core::fmt::{Debug, Formatter, Result as FmtResult};

use bit_field::BitArray as _;
use bitvec::{bitbox, boxed::BitBox, vec::BitVec};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use static_assertions::assert_eq_size;

use crate::{
    consts::BITS_PER_BYTE,
    error::{BitListError, ReadError},
    porcelain::{Size, SszRead, SszSize, SszWrite},
};

/// A sequence of bits whose length is part of its value.
///
/// Committee participation is recorded in these. Two lists of different lengths describe
/// different committees, so every binary operation rejects them instead of padding the shorter one.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitList {
    // The only reason we use `BitBox` instead of `Box<[u8]>` is because `Box<[u8]>` would
    // necessitate storing the length in bits in a separate field, making this struct 1 word bigger.
    //
    // We rely on `bitvec::order::Lsb0` being the default bit ordering to implement SSZ correctly.
    // Bits past the length are always zero. `BitList::overlaps` and `BitList::is_subset_of`
    // compare raw bytes and depend on that.
    bits: BitBox<u8>,
}

assert_eq_size!(BitList, [usize; 2]);

impl From<BitList> for Vec<u8> {
    fn from(bit_list: BitList) -> Self {
        let length = bit_list.len();
        let mut bytes = bit_list.bits.into_bitvec().into_vec();
        bytes.resize(bytes_with_delimiting_bit(length), 0);
        bytes.set_bit(length, true);
        bytes
    }
}

impl TryFrom<Vec<u8>> for BitList {
    type Error = ReadError;

    fn try_from(mut bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let length = measure_length(bytes.as_slice())?;
        bytes.truncate(bytes_without_delimiting_bit(length));
        Ok(Self::from_vec_with_length(bytes, length))
    }
}

// This sort of code arguably belongs in an impl of `core::fmt::Binary` rather than `Debug`,
// but we don't ever format bit lists directly and we need a `Debug` impl anyway.
impl Debug for BitList {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("0b")?;

        for bit in self.bits.iter().by_vals() {
            formatter.write_str(if bit { "1" } else { "0" })?;
        }

        Ok(())
    }
}

// `BitBox` deserializes itself as a struct with multiple fields.
impl<'de> Deserialize<'de> for BitList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;

        let digits = string
            .strip_prefix("0x")
            .ok_or_else(|| D::Error::custom("bit list should be a 0x-prefixed hex string"))?;

        hex::decode(digits)
            .map_err(D::Error::custom)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

// `BitBox` serializes itself as a struct with multiple fields.
impl Serialize for BitList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("0x{}", hex::encode(self.to_ssz())))
    }
}

impl SszSize for BitList {
    const SIZE: Size = Size::Variable { minimum_size: 1 };
}

impl SszRead for BitList {
    fn from_ssz_unchecked(bytes: &[u8]) -> Result<Self, ReadError> {
        let length = measure_length(bytes)?;
        let bytes = bytes[..bytes_without_delimiting_bit(length)].to_vec();
        Ok(Self::from_vec_with_length(bytes, length))
    }
}

impl SszWrite for BitList {
    fn write_variable(&self, bytes: &mut Vec<u8>) {
        let length_before = bytes.len();
        let length_after = length_before + bytes_with_delimiting_bit(self.len());

        bytes.resize(length_after, 0);

        let new_bytes = &mut bytes[length_before..];

        new_bytes[..bytes_without_delimiting_bit(self.len())]
            .copy_from_slice(self.bits.as_raw_slice());
        new_bytes.set_bit(self.len(), true);
    }
}

impl BitList {
    #[must_use]
    pub fn new(value: bool, length: usize) -> Self {
        Self::from_bit_box(bitbox![_, _; u8::from(value); length])
    }

    #[must_use]
    pub fn with_length(length: usize) -> Self {
        Self::new(false, length)
    }

    /// Builds a list of `length` bits with exactly the bits at `indices` set.
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn from_indices(length: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut bit_list = Self::with_length(length);

        for index in indices {
            bit_list.set(index, true);
        }

        bit_list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.assert_in_bounds(index);
        self.bits[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.assert_in_bounds(index);
        self.bits.set(index, value);
    }

    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    #[must_use]
    pub fn as_raw_slice(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn bitwise_or(&self, other: &Self) -> Result<Self, BitListError> {
        let mut union = self.clone();
        union.bitwise_or_assign(other)?;
        Ok(union)
    }

    pub fn bitwise_or_assign(&mut self, other: &Self) -> Result<(), BitListError> {
        self.ensure_same_length(other)?;

        // Starting with `bitvec` 1.0.0, bitwise assignment operators should be just as fast as
        // batched updates using `BitBox::as_raw_slice` and `BitBox::as_raw_mut_slice`.
        self.bits |= &other.bits;

        Ok(())
    }

    pub fn overlaps(&self, other: &Self) -> Result<bool, BitListError> {
        self.ensure_same_length(other)?;

        Ok(core::iter::zip(self.as_raw_slice(), other.as_raw_slice())
            .any(|(byte, other_byte)| byte & other_byte > 0))
    }

    pub fn is_subset_of(&self, other: &Self) -> Result<bool, BitListError> {
        self.ensure_same_length(other)?;

        Ok(core::iter::zip(self.as_raw_slice(), other.as_raw_slice())
            .all(|(byte, other_byte)| byte & !other_byte == 0))
    }

    fn ensure_same_length(&self, other: &Self) -> Result<(), BitListError> {
        let left = self.bits.len();
        let right = other.bits.len();

        if left != right {
            return Err(BitListError::LengthMismatch { left, right });
        }

        Ok(())
    }

    fn assert_in_bounds(&self, index: usize) {
        let length = self.len();

        assert!(
            index < length,
            "bit index {index} is out of bounds for bit list of length {length}",
        );
    }

    fn from_vec_with_length(bytes: Vec<u8>, length: usize) -> Self {
        let mut bits = BitVec::from_vec(bytes);
        bits.truncate(length);
        Self::from_bit_box(bits.into_boxed_bitslice())
    }

    fn from_bit_box(mut bits: BitBox<u8>) -> Self {
        bits.fill_uninitialized(false);
        Self { bits }
    }
}

fn measure_length(bytes: &[u8]) -> Result<usize, ReadError> {
    let leading_zeros_in_last_byte = bytes
        .last()
        .ok_or(ReadError::BitListEmptySlice)?
        .leading_zeros()
        .try_into()
        .expect("number of bits in a byte should fit in usize");

    let data_bits_in_last_byte = (BITS_PER_BYTE - 1)
        .checked_sub(leading_zeros_in_last_byte)
        .ok_or(ReadError::BitListNoDelimitingBit)?;

    Ok((bytes.len() - 1) * BITS_PER_BYTE + data_bits_in_last_byte)
}

const fn bytes_without_delimiting_bit(length: usize) -> usize {
    length.div_ceil(BITS_PER_BYTE)
}

const fn bytes_with_delimiting_bit(length: usize) -> usize {
    length.saturating_add(1).div_ceil(BITS_PER_BYTE)
}
