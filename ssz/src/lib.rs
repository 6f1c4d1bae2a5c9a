pub use crate::{
    bit_list::BitList,
    consts::BITS_PER_BYTE,
    error::{BitListError, ReadError},
    porcelain::{Size, SszRead, SszSize, SszWrite},
};

mod bit_list;
mod consts;
mod error;
mod porcelain;
