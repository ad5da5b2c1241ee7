//! Error types for the advent computations.
//!
//! Defines the input error taxonomy shared by every computation, the stable
//! codes attached to it, and a convenient result alias.

use std::{fmt, io, num::ParseIntError};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Failure raised while reading or interpreting puzzle input.
///
/// Every variant is fatal for the computation that produced it: no partial
/// result accompanies the error.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InputError {
    /// Reading the underlying source failed.
    #[error("failed to read line {line}: {source}")]
    Io {
        /// 1-based number of the line being read when the failure occurred.
        line: usize,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line expected to hold a signed integer could not be parsed.
    #[error("line {line} is not a signed integer: `{value}`")]
    InvalidInteger {
        /// 1-based line number of the offending record.
        line: usize,
        /// Raw text of the offending record.
        value: String,
        /// Parse failure reported by the standard library.
        #[source]
        source: ParseIntError,
    },
    /// A cyclic scan was requested over an input with no items.
    #[error("cannot cycle through an empty sequence")]
    EmptySequence,
}

define_error_codes! {
    /// Stable codes describing [`InputError`] variants.
    enum InputErrorCode for InputError {
        /// Reading the underlying source failed.
        Io => Io { .. } => "INPUT_IO",
        /// A line could not be parsed as a signed integer.
        InvalidInteger => InvalidInteger { .. } => "INPUT_INVALID_INTEGER",
        /// A cyclic scan was requested over an empty input.
        EmptySequence => EmptySequence => "INPUT_EMPTY_SEQUENCE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, InputError>;
