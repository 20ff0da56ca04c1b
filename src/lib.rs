//! This crate implements the components of a URI as defined by
//! [IETF RFC 3986](https://tools.ietf.org/html/rfc3986), "Uniform Resource
//! Identifier (URI): Generic Syntax".  Each [`Component`] holds the scheme,
//! user, name (host), port, path, query or fragment of a URI as a normalized,
//! percent-encoded string which is always valid for its [`ComponentType`].
//!
//! ```text
//! http://user@www.example.com:8080/foo/bar?baz=1,2&qux#top
//! \__/   \__/ \_____________/ \__/\______/ \_________/ \_/
//!  |      |         |          |     |          |       |
//! scheme user      name       port  path      query  fragment
//! ```
//!
//! Every assignment normalizes the string: percent triplets encoding
//! unreserved characters are decoded, characters which may not appear in the
//! component are percent-encoded, schemes are lowercased and the hex digits
//! of percent triplets are uppercased.  A string which still doesn't satisfy
//! the grammar of the component is rejected and the component keeps its
//! previous value.
//!
//! On top of components the crate provides
//!
//! * [`PathExt`], segment access and dot-segment resolution for paths,
//! * [`NameExt`], reverse label access and IPv4/IPv6/DNS classification for
//!   host names,
//! * [`KeyValue`], a codec for `key=value,value&key` style queries and
//!   fragments,
//! * [`Uri`], which parses a URI string into all seven components and
//!   assembles them back into a URI string.
//!
//! # Examples
//!
//! ## Parsing a URI into its components
//!
//! ```rust
//! use uri_component::{ComponentType, KeyValue, Uri};
//!
//! # fn main() -> Result<(), uri_component::Error> {
//! let uri = Uri::parse("http://www.example.com/foo/../bar?baz=1,2&qux#top")?;
//! assert_eq!("www.example.com", uri.name().as_str());
//! assert_eq!("/foo/../bar", uri.component(ComponentType::Path).as_str());
//!
//! let query = KeyValue::parse(uri.query().as_str())?;
//! assert_eq!(["baz", "qux"], query.keys());
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with single components
//!
//! ```rust
//! use uri_component::{Component, ComponentType, PathExt};
//!
//! # fn main() -> Result<(), uri_component::Error> {
//! let mut path = Component::with_string(ComponentType::Path, "/a/b/c/./../../g")?;
//! path.resolve()?;
//! assert_eq!("/a/g", path.as_str());
//!
//! let fragment = Component::with_string(ComponentType::Fragment, "caf\u{e9}")?;
//! assert_eq!("caf%C3%A9", fragment.as_str());
//! assert_eq!("caf\u{e9}", fragment.decoded()?);
//!
//! assert!(Component::with_string(ComponentType::Port, "eighty").is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! * `serde` (default): (de)serialize [`Uri`] and [`KeyValue`] as strings.
//! * `url` (default): conversions between [`Uri`] and `url::Url`.
//! * `log`: emit `debug` and `trace` events through the `log` facade.
//!
//! [`Component`]: struct.Component.html
//! [`ComponentType`]: enum.ComponentType.html
//! [`KeyValue`]: struct.KeyValue.html
//! [`NameExt`]: trait.NameExt.html
//! [`PathExt`]: trait.PathExt.html
//! [`Uri`]: struct.Uri.html

// #![warn(clippy::pedantic)]
#![allow(clippy::non_ascii_literal)]
#![warn(missing_docs)]

mod log;

mod authority;
pub use authority::Authority;

mod character_classes;

mod codec;
pub use codec::{
    decode_percent_run, encode_char_at, percent_decode, percent_encode, utf8_char_at, utf8_decode,
};

mod component;
pub use component::Component;

mod component_type;
pub use component_type::ComponentType;

mod error;
pub use error::{Error, ErrorKind};

mod grammar;

mod key_value;
pub use key_value::{Delimiters, KeyValue};

mod name;
pub use name::NameExt;

mod path;
pub use path::{resolve_dot_segments, PathExt};

mod percent_encoded_character_decoder;
mod uri;
pub use uri::Uri;
mod validate_ipv4_address;
mod validate_ipv6_address;
