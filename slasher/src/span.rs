use ssz::{ReadError, Size, SszRead, SszSize, SszWrite};

use crate::error::Error;

pub const SPAN_SIZE: usize = 7;

/// Per-validator record of the min-max surround vote detection state for one epoch.
///
/// Encoded as `[min_lo, min_hi, max_lo, max_hi, sig_0, sig_1, has_attested]`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Span {
    pub min_span: u16,
    pub max_span: u16,
    // The first 2 bytes of the signature of the attestation the span was last updated for.
    pub sig_bytes: [u8; 2],
    pub has_attested: bool,
}

impl SszSize for Span {
    const SIZE: Size = Size::Fixed { size: SPAN_SIZE };
}

impl SszRead for Span {
    fn from_ssz_unchecked(bytes: &[u8]) -> Result<Self, ReadError> {
        let array = bytes
            .try_into()
            .map_err(|_| ReadError::FixedSizeMismatch {
                expected: SPAN_SIZE,
                actual: bytes.len(),
            })?;

        Ok(Self::from_array(array))
    }
}

impl SszWrite for Span {
    fn write_fixed(&self, bytes: &mut [u8]) {
        bytes.copy_from_slice(&self.to_array());
    }
}

impl Span {
    /// Converts an epoch distance into a value that can be stored in a span.
    pub fn distance(distance: u64) -> Result<u16, Error> {
        u16::try_from(distance).map_err(|_| Error::SpanDistanceTooLarge { distance })
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }

    pub(crate) const fn from_array(bytes: [u8; SPAN_SIZE]) -> Self {
        let [min_0, min_1, max_0, max_1, sig_0, sig_1, has_attested] = bytes;

        Self {
            min_span: u16::from_le_bytes([min_0, min_1]),
            max_span: u16::from_le_bytes([max_0, max_1]),
            sig_bytes: [sig_0, sig_1],
            // Any nonzero byte counts as `true`.
            has_attested: has_attested != 0,
        }
    }

    pub(crate) fn to_array(self) -> [u8; SPAN_SIZE] {
        let [min_0, min_1] = self.min_span.to_le_bytes();
        let [max_0, max_1] = self.max_span.to_le_bytes();
        let [sig_0, sig_1] = self.sig_bytes;

        [
            min_0,
            min_1,
            max_0,
            max_1,
            sig_0,
            sig_1,
            u8::from(self.has_attested),
        ]
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use test_case::test_case;

    use super::*;

    #[test_case(
        hex!("01010101010101"),
        Span { min_span: 257, max_span: 257, sig_bytes: [1, 1], has_attested: true }
    )]
    #[test_case(
        hex!("11810195510100"),
        Span { min_span: 33041, max_span: 38145, sig_bytes: [81, 1], has_attested: false }
    )]
    #[test_case(
        hex!("01010114770101"),
        Span { min_span: 257, max_span: 5121, sig_bytes: [119, 1], has_attested: true }
    )]
    #[test_case(hex!("00000000000000"), Span::default())]
    fn span_ssz_layout(bytes: [u8; SPAN_SIZE], span: Span) -> Result<(), ReadError> {
        assert_eq!(Span::from_ssz(bytes)?, span);
        assert_eq!(span.to_ssz(), bytes);
        Ok(())
    }

    #[test]
    fn any_nonzero_flag_byte_means_attested() -> Result<(), ReadError> {
        let span = Span::from_ssz(hex!("0000000000007f"))?;

        assert!(span.has_attested);
        assert_eq!(span.to_ssz(), hex!("00000000000001"));

        Ok(())
    }

    #[test_case(&hex!("000000") => Err(ReadError::FixedSizeMismatch { expected: 7, actual: 3 }))]
    #[test_case(
        &hex!("0000000000000000")
            => Err(ReadError::FixedSizeMismatch { expected: 7, actual: 8 })
    )]
    #[test_case(&[] => Err(ReadError::FixedSizeMismatch { expected: 7, actual: 0 }))]
    fn span_rejects_wrong_length(bytes: &[u8]) -> Result<Span, ReadError> {
        Span::from_ssz(bytes)
    }

    #[test_case(0 => Ok(0))]
    #[test_case(54000 => Ok(54000))]
    #[test_case(65535 => Ok(u16::MAX))]
    #[test_case(65536 => Err(Error::SpanDistanceTooLarge { distance: 65536 }))]
    #[test_case(u64::MAX => Err(Error::SpanDistanceTooLarge { distance: u64::MAX }))]
    fn distance_is_rejected_instead_of_truncated(distance: u64) -> Result<u16, Error> {
        Span::distance(distance)
    }

    #[test]
    fn zero_span_is_default() {
        assert!(Span::default().is_zero());
        assert!(!Span {
            has_attested: true,
            ..Span::default()
        }
        .is_zero());
    }
}
