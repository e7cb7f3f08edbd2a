#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid Skein state size {0}, supported sizes are 256, 512 and 1024 bits")]
    InvalidStateSize(usize),
    #[error("invalid Skein output size {0}, output size must be greater than zero")]
    InvalidOutputSize(usize),
    #[error("partial byte only on last data block")]
    AlreadyBitPadded,
    #[error("length of input buffer {len} does not match bit length {bits}")]
    LengthMismatch { bits: usize, len: usize },
    #[error("invalid Threefish key of {0} words")]
    InvalidKeySize(usize),
    #[error("invalid Threefish tweak of {0} words, expected 2")]
    InvalidTweakSize(usize),
}
