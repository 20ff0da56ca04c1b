use super::{
    codec::percent_decode, component::Component, component_type::ComponentType, error::Error,
    validate_ipv4_address::validate_ipv4_address, validate_ipv6_address::validate_ipv6_address,
};

/// Operations which only apply to [`ComponentType::Name`] (host) components.
///
/// Labels are presented most significant first, which is the reverse of how
/// they are written in the host name: `www.example.com` has the labels
/// `["com", "example", "www"]` and the reverse string `com.example.www`.
///
/// [`ComponentType::Name`]: enum.ComponentType.html#variant.Name
///
/// # Examples
///
/// ```rust
/// use uri_component::{Component, ComponentType, NameExt};
///
/// # fn main() -> Result<(), uri_component::Error> {
/// let mut name = Component::with_string(ComponentType::Name, "www.example.com")?;
/// assert_eq!(vec!["com", "example", "www"], name.labels());
/// assert_eq!("com.example.www", name.string_reverse());
/// assert!(name.is_dns());
///
/// name.set_string_reverse("org.example.api")?;
/// assert_eq!("api.example.org", name.as_str());
/// # Ok(())
/// # }
/// ```
pub trait NameExt {
    /// The labels of the host name in reverse order.
    fn labels(&self) -> Vec<&str>;

    /// Replace the host name by the given labels, which are in reverse order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySegmentList`] for an empty slice,
    /// [`Error::EmptyLabel`] if any label is empty, or a grammar error if the
    /// resulting name is malformed.
    ///
    /// [`Error::EmptySegmentList`]: enum.Error.html#variant.EmptySegmentList
    /// [`Error::EmptyLabel`]: enum.Error.html#variant.EmptyLabel
    fn set_labels<T>(&mut self, labels: &[T]) -> Result<(), Error>
    where
        T: AsRef<str>;

    /// The host name with its labels in reverse order.
    fn string_reverse(&self) -> String;

    /// Replace the host name from its reverse-order form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLabel`] if `reverse` is empty, or a grammar
    /// error if the resulting name is malformed.
    ///
    /// [`Error::EmptyLabel`]: enum.Error.html#variant.EmptyLabel
    fn set_string_reverse<T>(&mut self, reverse: T) -> Result<(), Error>
    where
        T: AsRef<str>;

    /// Determines if the host is an IPv4 address in dotted decimal form.
    fn is_ip4(&self) -> bool;

    /// Determines if the host is a bracketed IPv6 address literal.
    fn is_ip6(&self) -> bool;

    /// Determines if the host is a DNS name: dot separated labels of letters,
    /// digits and inner hyphens, each 1 to 63 characters long, 253 characters
    /// at most in total, and not an IPv4 address.
    fn is_dns(&self) -> bool;
}

impl NameExt for Component {
    fn labels(&self) -> Vec<&str> {
        self.as_str().rsplit('.').collect()
    }

    fn set_labels<T>(&mut self, labels: &[T]) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        expect_name(self)?;
        if labels.is_empty() {
            return Err(Error::EmptySegmentList);
        }
        let mut forward = Vec::with_capacity(labels.len());
        for label in labels.iter().rev() {
            let label = label.as_ref();
            if label.is_empty() {
                return Err(Error::EmptyLabel);
            }
            forward.push(label);
        }
        self.set_string(forward.join("."))
    }

    fn string_reverse(&self) -> String {
        self.labels().join(".")
    }

    fn set_string_reverse<T>(&mut self, reverse: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        expect_name(self)?;
        let reverse = reverse.as_ref();
        if reverse.is_empty() {
            return Err(Error::EmptyLabel);
        }
        let forward: Vec<&str> = reverse.rsplit('.').collect();
        self.set_string(forward.join("."))
    }

    fn is_ip4(&self) -> bool {
        validate_ipv4_address(self.as_str())
    }

    fn is_ip6(&self) -> bool {
        // Brackets and colons are stored percent-encoded.
        match percent_decode(self.as_str()) {
            Ok(host) => host
                .strip_prefix('[')
                .and_then(|host| host.strip_suffix(']'))
                .map_or(false, validate_ipv6_address),
            Err(_) => false,
        }
    }

    fn is_dns(&self) -> bool {
        let host = self.as_str();
        !host.is_empty()
            && host.len() <= 253
            && !validate_ipv4_address(host)
            && host.split('.').all(is_ldh_label)
    }
}

impl Component {
    /// Build a name component from its reverse-order form
    /// (`com.example.www` for `www.example.com`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLabel`] if `reverse` is empty, or a grammar
    /// error if the resulting name is malformed.
    ///
    /// [`Error::EmptyLabel`]: enum.Error.html#variant.EmptyLabel
    pub fn name_from_reverse_str<T>(reverse: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut name = Self::new(ComponentType::Name);
        name.set_string_reverse(reverse)?;
        Ok(name)
    }

    /// Build a name component from its labels in reverse order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySegmentList`] for an empty slice,
    /// [`Error::EmptyLabel`] if any label is empty, or a grammar error if the
    /// resulting name is malformed.
    ///
    /// [`Error::EmptySegmentList`]: enum.Error.html#variant.EmptySegmentList
    /// [`Error::EmptyLabel`]: enum.Error.html#variant.EmptyLabel
    pub fn name_from_labels<T>(labels: &[T]) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut name = Self::new(ComponentType::Name);
        name.set_labels(labels)?;
        Ok(name)
    }
}

fn is_ldh_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn expect_name(component: &Component) -> Result<(), Error> {
    if component.kind() == ComponentType::Name {
        Ok(())
    } else {
        Err(Error::WrongComponentType {
            expected: ComponentType::Name,
            found: component.kind(),
        })
    }
}
