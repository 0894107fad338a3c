//! Error types for the haystack core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::{fmt, io};

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

/// Error type produced when configuring or emitting a haystack.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HaystackError {
    /// A floating-point parameter was NaN or infinite.
    #[error("{parameter} must be finite (got {value})")]
    NonFiniteValue {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Writing or flushing the output stream failed.
    #[error("failed to write haystack output: {source}")]
    OutputWrite {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`HaystackError`] variants.
    enum HaystackErrorCode for HaystackError {
        /// A floating-point parameter was NaN or infinite.
        NonFiniteValue => NonFiniteValue { .. } => "HAYSTACK_NON_FINITE_VALUE",
        /// Writing or flushing the output stream failed.
        OutputWrite => OutputWrite { .. } => "HAYSTACK_OUTPUT_WRITE",
    }
}

impl From<io::Error> for HaystackError {
    fn from(source: io::Error) -> Self {
        Self::OutputWrite { source }
    }
}

/// Convenient result alias for haystack operations.
pub type Result<T> = core::result::Result<T, HaystackError>;
