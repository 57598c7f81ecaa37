use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// EncodeError

/// Errors that can occur while encoding an object graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A cycle was reached while copying; copies cannot represent cycles.
    #[error("cycle detected at `{type_path}` while copying without references")]
    CyclicCopy { type_path: &'static str },

    /// A shared instance was mutably borrowed while the graph was being read.
    #[error("a shared instance is mutably borrowed during encoding")]
    AlreadyBorrowed,

    /// The type path cannot be written as a type name.
    #[error("type path `{type_path}` cannot be written as a type name")]
    InvalidTypePath { type_path: &'static str },

    /// The graph nests deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

// -----------------------------------------------------------------------------
// DecodeError

/// Errors that can occur while decoding text back into an object graph.
///
/// Offsets are byte offsets into the text after transport decoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The transport layer rejected the input.
    #[error("invalid transport encoding: {0}")]
    Transport(#[from] base64::DecodeError),

    /// The transport payload is not valid UTF-8.
    #[error("transport payload is not valid UTF-8")]
    InvalidUtf8,

    /// The input ended where more data was required.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A different token was found than the grammar allows here.
    #[error("expected {expected} at offset {offset}, found `{found}`")]
    UnexpectedToken {
        offset: usize,
        expected: &'static str,
        found: String,
    },

    /// A literal could not be parsed as the target kind.
    #[error("invalid {target} literal `{literal}` at offset {offset}")]
    InvalidLiteral {
        offset: usize,
        literal: String,
        target: &'static str,
    },

    /// A string length does not end on a character boundary.
    #[error("string length at offset {offset} does not end on a character boundary")]
    InvalidStringBoundary { offset: usize },

    /// The type name is not present in the registry.
    #[error("type `{type_path}` is not registered")]
    UnknownType { type_path: String },

    /// A type token was used before its name was declared.
    #[error("type token {token} was never declared")]
    UnknownTypeToken { token: u32 },

    /// A back-reference points at an id that has not been read yet.
    #[error("reference {id} does not point to a decoded object")]
    UnresolvedReference { id: u32 },

    /// Object ids must follow encounter order.
    #[error("object id {found} is out of order, expected {expected}")]
    OutOfOrderReference { expected: u32, found: u32 },

    /// The decoded type does not match the destination type.
    #[error("expected `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },

    /// A record body has a different number of members than its type.
    #[error("`{type_path}` has {expected} members, found {found}")]
    MemberCountMismatch {
        type_path: String,
        expected: usize,
        found: usize,
    },

    /// A fixed-size array was read with a different length.
    #[error("expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// An enumeration value matches none of the variants.
    #[error("`{value}` is not a variant of `{type_path}`")]
    UnknownVariant { type_path: &'static str, value: i64 },

    /// The input nests deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Data remains after the root value.
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },
}
