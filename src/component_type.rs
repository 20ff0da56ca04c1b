use std::convert::TryFrom;

use super::error::Error;

/// The seven syntactic components of a URI.  The type of a [`Component`]
/// fixes which grammar its string must satisfy and which normalization steps
/// are applied when it is assigned.
///
/// [`Component`]: struct.Component.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    /// `http` in `http://user@example.com:80/a?b#c`
    Scheme,

    /// `user` in `http://user@example.com:80/a?b#c`
    User,

    /// `example.com` in `http://user@example.com:80/a?b#c`
    Name,

    /// `80` in `http://user@example.com:80/a?b#c`
    Port,

    /// `/a` in `http://user@example.com:80/a?b#c`
    Path,

    /// `b` in `http://user@example.com:80/a?b#c`
    Query,

    /// `c` in `http://user@example.com:80/a?b#c`
    Fragment,
}

impl ComponentType {
    /// Every component type, in the order they appear in a URI.
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Scheme,
        ComponentType::User,
        ComponentType::Name,
        ComponentType::Port,
        ComponentType::Path,
        ComponentType::Query,
        ComponentType::Fragment,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Scheme => 0,
            Self::User => 1,
            Self::Name => 2,
            Self::Port => 3,
            Self::Path => 4,
            Self::Query => 5,
            Self::Fragment => 6,
        }
    }
}

impl TryFrom<u8> for ComponentType {
    type Error = Error;

    /// Converts the numeric tags `1` (scheme) through `7` (fragment).
    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1..=7 => Ok(Self::ALL[usize::from(tag) - 1]),
            tag => Err(Error::UnknownComponentType(tag)),
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Scheme => "scheme",
            Self::User => "user",
            Self::Name => "name",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        })
    }
}
