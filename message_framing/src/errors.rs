//! Error taxonomy for declaring, constructing, encoding, and decoding
//! messages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeclareError {
    #[error("type tag {0} is already registered")]
    DuplicateTypeTag(u32),
}

#[derive(Error, Debug)]
pub enum CreateError {
    #[error("response type does not derive from the message base")]
    NotAMessage,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("buffer truncated: needed at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("field decode failed: {0}")]
    Field(String),
}

#[derive(Error, Debug)]
pub enum FramingError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("unknown message type tag {0}")]
    UnknownType(u32),

    #[error(transparent)]
    Declare(#[from] DeclareError),

    #[error(transparent)]
    Create(#[from] CreateError),
}
