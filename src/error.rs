use std::error;
use std::fmt;
use std::io;
use std::result;
use std::string::FromUtf8Error;

use rmp_serde::decode;
use rmp_serde::encode;
use sled::transaction::TransactionError;

#[derive(Debug)]
pub enum ShortyError {
    /// No entry is stored under the given key.
    NotFound(String),
    /// Every candidate key drawn for a new value was already taken.
    CapacityExhausted { attempts: u32 },
    Decode(decode::Error),
    Encode(encode::Error),
    IO(io::Error),
    Sled(sled::Error),
    Utf8(FromUtf8Error),
    UnexpectedResponse,
    StringError(String),
}

impl fmt::Display for ShortyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "Key not found: {}", key),
            Self::CapacityExhausted { attempts } => {
                write!(f, "No free key found after {} attempts", attempts)
            }
            Self::Decode(err) => write!(f, "Decode: {}", err),
            Self::Encode(err) => write!(f, "Encode: {}", err),
            Self::IO(err) => write!(f, "IO: {}", err),
            Self::Sled(err) => write!(f, "Sled: {}", err),
            Self::Utf8(err) => write!(f, "Utf8: {}", err),
            Self::UnexpectedResponse => write!(f, "Unexpected response"),
            Self::StringError(msg) => write!(f, "{}", msg),
        }
    }
}

impl error::Error for ShortyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Decode(source) => Some(source),
            Self::Encode(source) => Some(source),
            Self::IO(source) => Some(source),
            Self::Sled(source) => Some(source),
            Self::Utf8(source) => Some(source),
            Self::NotFound(_)
            | Self::CapacityExhausted { .. }
            | Self::UnexpectedResponse
            | Self::StringError(_) => None,
        }
    }
}

impl From<encode::Error> for ShortyError {
    fn from(e: encode::Error) -> Self {
        Self::Encode(e)
    }
}

impl From<decode::Error> for ShortyError {
    fn from(e: decode::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<io::Error> for ShortyError {
    fn from(e: io::Error) -> Self {
        Self::IO(e)
    }
}

impl From<sled::Error> for ShortyError {
    fn from(e: sled::Error) -> Self {
        Self::Sled(e)
    }
}

impl From<TransactionError<ShortyError>> for ShortyError {
    fn from(e: TransactionError<ShortyError>) -> Self {
        match e {
            TransactionError::Abort(err) => err,
            TransactionError::Storage(err) => Self::Sled(err),
        }
    }
}

impl From<FromUtf8Error> for ShortyError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

pub type Result<T> = result::Result<T, ShortyError>;
