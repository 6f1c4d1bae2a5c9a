pub const BITS_PER_BYTE: usize = 8;
