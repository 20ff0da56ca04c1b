use super::component_type::ComponentType;

/// Broad classification of an [`Error`].
///
/// Argument errors are programmer mistakes (wrong component type, index out of
/// range, unusable delimiters).  Grammar errors come from well-typed input
/// which doesn't satisfy the grammar of the thing being built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The call itself was malformed.
    Argument,

    /// The input failed a component, segment, token or encoding grammar.
    Grammar,
}

/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A numeric component type tag outside of `1..=7` was given.
    #[error("unknown component type tag {0}")]
    UnknownComponentType(u8),

    /// An operation which only applies to one component type was attempted on
    /// a component of a different type.
    #[error("expected a {expected} component, found a {found} component")]
    WrongComponentType {
        /// The component type the operation requires.
        expected: ComponentType,

        /// The component type the operation was given.
        found: ComponentType,
    },

    /// A character or key index was beyond the end of what it indexes.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,

        /// The number of characters or ordered keys.
        len: usize,
    },

    /// A list of path segments or name labels was empty.
    #[error("segment list is empty")]
    EmptySegmentList,

    /// A host name label was empty.
    #[error("host name labels cannot be empty")]
    EmptyLabel,

    /// The key, value and list delimiters of a key/value component must all
    /// be different characters.
    #[error("key/value delimiters must be distinct")]
    DelimiterConflict,

    /// The normalized component didn't satisfy its grammar.
    #[error("malformed {0} component")]
    Malformed(ComponentType),

    /// A percent-encoded run wasn't made up solely of `%` followed by two hex
    /// digits.
    #[error("illegal percent encoding")]
    IllegalPercentEncoding,

    /// Percent-encoded bytes didn't form a well-formed UTF-8 sequence.
    #[error("invalid UTF-8 byte sequence at byte {0}")]
    InvalidUtf8(usize),

    /// A path segment contained characters not allowed in a segment.
    #[error("malformed path segment {0:?}")]
    MalformedSegment(String),

    /// A key or value of a key/value component was empty or contained a
    /// delimiter character.
    #[error("malformed key/value token {0:?}")]
    MalformedToken(String),

    /// A key appeared more than once in a key/value component.
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),

    /// A key/value segment had more than one value delimiter.
    #[error("malformed key/value segment {0:?}")]
    MalformedPair(String),
}

impl Error {
    /// Classify the error as an argument error or a grammar error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownComponentType(_)
            | Self::WrongComponentType { .. }
            | Self::IndexOutOfRange { .. }
            | Self::EmptySegmentList
            | Self::EmptyLabel
            | Self::DelimiterConflict => ErrorKind::Argument,
            Self::Malformed(_)
            | Self::IllegalPercentEncoding
            | Self::InvalidUtf8(_)
            | Self::MalformedSegment(_)
            | Self::MalformedToken(_)
            | Self::DuplicateKey(_)
            | Self::MalformedPair(_) => ErrorKind::Grammar,
        }
    }
}
