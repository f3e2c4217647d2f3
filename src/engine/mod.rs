pub mod codec;
pub mod codes;
pub mod compressor;
pub mod config;
pub mod decompressor;
pub mod frequency;
pub mod hash;
pub mod huffman;
pub mod min_heap;
pub mod policy;
pub mod stats;

pub use codec::HuffmanCodec;
pub use decompressor::{DecodeWarning, Decoded};
pub use policy::SumCheck;
