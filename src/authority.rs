use std::borrow::Cow;

use super::{codec::percent_decode, component::Component, name::NameExt};

/// The authority part of a [`Uri`]: its user, name (host) and port
/// components, borrowed from the URI.
///
/// # Examples
///
/// ```rust
/// use uri_component::Uri;
///
/// # fn main() -> Result<(), uri_component::Error> {
/// let uri = Uri::parse("http://nobody@www.example.com:8080/")?;
/// let authority = uri.authority().unwrap();
/// assert_eq!(Some("nobody"), authority.user());
/// assert_eq!("www.example.com", authority.host());
/// assert_eq!(Some(8080), authority.port());
/// assert_eq!("nobody@www.example.com:8080", authority.to_string());
/// # Ok(())
/// # }
/// ```
///
/// [`Uri`]: struct.Uri.html
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Authority<'a> {
    pub(crate) user: &'a Component,
    pub(crate) name: &'a Component,
    pub(crate) port: &'a Component,
}

impl<'a> Authority<'a> {
    /// The user component, if there is one.
    #[must_use]
    pub fn user(&self) -> Option<&'a str> {
        non_empty(self.user)
    }

    /// The name (host) component.
    #[must_use]
    pub fn host(&self) -> &'a str {
        self.name.as_str()
    }

    /// The host as written in a URI string.  IPv6 literals are stored
    /// percent-encoded and are written with their brackets and colons.
    #[must_use]
    pub fn host_literal(&self) -> Cow<'a, str> {
        if self.name.is_ip6() {
            if let Ok(literal) = percent_decode(self.name.as_str()) {
                return Cow::Owned(literal);
            }
        }
        Cow::Borrowed(self.name.as_str())
    }

    /// The port number, if there is a port component and it fits in 16 bits.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        non_empty(self.port).and_then(|port| port.parse().ok())
    }

    /// The port component, if there is one.
    #[must_use]
    pub fn port_str(&self) -> Option<&'a str> {
        non_empty(self.port)
    }
}

fn non_empty(component: &Component) -> Option<&str> {
    if component.is_empty() {
        None
    } else {
        Some(component.as_str())
    }
}

impl std::fmt::Display for Authority<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(user) = self.user() {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", self.host_literal())?;
        if let Some(port) = self.port_str() {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ComponentType;

    fn authority_string(user: &str, name: &str, port: &str) -> String {
        let user = Component::with_string(ComponentType::User, user).unwrap();
        let name = Component::with_string(ComponentType::Name, name).unwrap();
        let port = Component::with_string(ComponentType::Port, port).unwrap();
        Authority {
            user: &user,
            name: &name,
            port: &port,
        }
        .to_string()
    }

    #[test]
    fn display() {
        struct Test {
            user: &'static str,
            name: &'static str,
            port: &'static str,
            expected_output: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                user: "",
                name: "www.example.com",
                port: "",
                expected_output: "www.example.com",
            },
            Test {
                user: "joe",
                name: "www.example.com",
                port: "",
                expected_output: "joe@www.example.com",
            },
            Test {
                user: "pepe:feelsbadman",
                name: "www.example.com",
                port: "8080",
                expected_output: "pepe:feelsbadman@www.example.com:8080",
            },
            Test {
                user: "joe@home",
                name: "example.com",
                port: "",
                expected_output: "joe%40home@example.com",
            },
            Test {
                user: "",
                name: "[::1]",
                port: "80",
                expected_output: "[::1]:80",
            },
            Test {
                user: "",
                name: "[not:ip6]",
                port: "",
                expected_output: "%5Bnot%3Aip6%5D",
            },
        ];
        for test_vector in test_vectors {
            assert_eq!(
                test_vector.expected_output,
                authority_string(test_vector.user, test_vector.name, test_vector.port)
            );
        }
    }

    #[test]
    fn port_numbers() {
        let user = Component::new(ComponentType::User);
        let name = Component::with_string(ComponentType::Name, "h").unwrap();
        let big = Component::with_string(ComponentType::Port, "65536").unwrap();
        let authority = Authority {
            user: &user,
            name: &name,
            port: &big,
        };
        assert_eq!(None, authority.port());
        assert_eq!(Some("65536"), authority.port_str());
        assert_eq!(None, authority.user());

        let port = Component::with_string(ComponentType::Port, "0080").unwrap();
        let authority = Authority {
            port: &port,
            ..authority
        };
        assert_eq!(Some(80), authority.port());
    }
}
