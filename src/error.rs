//! definition of the general ethercat error type

use std::sync::Arc;
use core::fmt;

/**
    general object reporting an unexpected result while building or sending ethercat frames

    Its variants are meant to help finding the cause responsible for the problem and how to deal with it.
*/
#[derive(Clone, Debug)]
pub enum EthercatError {
    /// error caused by communication support
    ///
    /// these errors are exterior to this library
    Io(Arc<std::io::Error>),

    /// a value does not fit the bit width of the wire field it is written to
    ///
    /// the operation reporting it left its target unchanged, so it can be retried with a smaller value or in a new frame
    OutOfRange(&'static str),
}

/// convenient alias to simplify return annotations
pub type EthercatResult<T=()> = core::result::Result<T, EthercatError>;

impl fmt::Display for EthercatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (src, msg) = match self {
            Self::Io(value) => ("Io", value.to_string()),
            Self::OutOfRange(value) => ("OutOfRange", value.to_string()),
        };
        f.debug_struct("EthercatError")
            .field("source", &src)
            .field("message", &msg)
            .finish()
    }
}

impl std::error::Error for EthercatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e.as_ref()),
            Self::OutOfRange(_) => None,
        }
    }
}

impl From<std::io::Error> for EthercatError {
    fn from(src: std::io::Error) -> Self {
        EthercatError::Io(Arc::new(src))
    }
}

impl PartialEq for EthercatError {
    /// io errors are compared by kind, since [std::io::Error] is not comparable
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::OutOfRange(a), Self::OutOfRange(b)) => a == b,
            _ => false,
        }
    }
}
