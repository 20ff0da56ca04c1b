use super::{
    codec::{decode_percent_run, encode_element, percent_decode},
    component_type::ComponentType,
    error::Error,
    grammar::{grammar, TRIPLETS, UNRESERVED_TRIPLETS},
    log::{debug, trace},
};

/// One syntactic component of a URI: a [`ComponentType`] and the normalized,
/// percent-encoded string of that type.
///
/// The string is always either empty or valid for the component type.  Every
/// assignment runs the normalization steps of the component type, in this
/// order:
///
/// 1. percent triplets encoding unreserved characters are decoded
///    (`%41` becomes `A`),
/// 2. characters which may not appear literally are percent-encoded,
/// 3. the scheme is lowercased,
/// 4. the hex digits of remaining triplets are uppercased (`%2f` becomes
///    `%2F`),
///
/// and the result is checked against the grammar of the component type.  An
/// assignment which fails leaves the previous value in place.
///
/// # Examples
///
/// ```rust
/// use uri_component::{Component, ComponentType};
///
/// # fn main() -> Result<(), uri_component::Error> {
/// let scheme = Component::with_string(ComponentType::Scheme, "HTTP")?;
/// assert_eq!("http", scheme.as_str());
///
/// let path = Component::with_string(ComponentType::Path, "/%7euser/a b/%2f")?;
/// assert_eq!("/~user/a%20b/%2F", path.as_str());
///
/// let port = Component::from_uri_str(ComponentType::Port, "http://example.com:8080/")?;
/// assert_eq!("8080", port.to_string());
/// # Ok(())
/// # }
/// ```
///
/// [`ComponentType`]: enum.ComponentType.html
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Component {
    kind: ComponentType,
    string: String,
}

impl Component {
    /// Create an empty component of the given type.
    #[must_use]
    pub fn new(kind: ComponentType) -> Self {
        Self {
            kind,
            string: String::new(),
        }
    }

    /// Create a component of the given type from a component string.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the normalized string is not valid for the
    /// component type.
    pub fn with_string<T>(kind: ComponentType, string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut component = Self::new(kind);
        component.set_string(string)?;
        Ok(component)
    }

    /// Build a component from a string which holds just this component.
    /// Alias of [`with_string`](#method.with_string).
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the normalized string is not valid for the
    /// component type.
    pub fn from_component_str<T>(kind: ComponentType, raw: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        Self::with_string(kind, raw)
    }

    /// Extract the component of the given type from a complete URI string.
    ///
    /// If the URI has no such component, the result is empty.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the URI has a substring in the position of
    /// this component but it isn't valid for the component type (for example
    /// malformed percent encoding).
    pub fn from_uri_str<T>(kind: ComponentType, uri: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut component = Self::new(kind);
        component.assign_uri_str(kind, uri)?;
        Ok(component)
    }

    /// Reinitialize this component from a string which holds just one
    /// component, reusing its buffer.  Alias of [`define`](#method.define).
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the normalized string is not valid for the
    /// component type; `self` is left unchanged in that case.
    pub fn assign_component_str<T>(&mut self, kind: ComponentType, raw: T) -> Result<&mut Self, Error>
    where
        T: AsRef<str>,
    {
        self.define(kind, raw)
    }

    /// Reinitialize this component by extracting the component of the given
    /// type from a complete URI string, reusing its buffer.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the extracted substring isn't valid for the
    /// component type; `self` is left unchanged in that case.
    pub fn assign_uri_str<T>(&mut self, kind: ComponentType, uri: T) -> Result<&mut Self, Error>
    where
        T: AsRef<str>,
    {
        let raw = grammar(kind)
            .uri
            .captures(uri.as_ref())
            .and_then(|captures| captures.get(1))
            .map_or("", |m| m.as_str());
        trace!("extracted {} component {:?}", kind, raw);
        self.define(kind, raw)
    }

    /// Borrow the normalized, percent-encoded string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Determines if the component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// The type of the component.
    #[must_use]
    pub fn kind(&self) -> ComponentType {
        self.kind
    }

    /// Change the string of the component.  The empty string always succeeds
    /// and clears the component.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the normalized string is not valid for the
    /// component type; `self` is left unchanged in that case.
    pub fn set_string<T>(&mut self, string: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        self.string = normalize(self.kind, string.as_ref())?;
        Ok(())
    }

    /// Reinitialize the component with a new type and string.
    ///
    /// # Errors
    ///
    /// Returns a grammar error if the normalized string is not valid for the
    /// new component type; `self` is left unchanged in that case.
    pub fn define<T>(&mut self, kind: ComponentType, string: T) -> Result<&mut Self, Error>
    where
        T: AsRef<str>,
    {
        let normalized = normalize(kind, string.as_ref())?;
        self.kind = kind;
        self.string.clear();
        self.string.push_str(&normalized);
        Ok(self)
    }

    /// Reinitialize the component as a copy of `source`.
    pub fn copy_of(&mut self, source: &Self) -> &mut Self {
        self.kind = source.kind;
        self.string.clone_from(&source.string);
        self
    }

    /// Determines if two components have the same type and string.
    #[must_use]
    pub fn is_eq(a: &Self, b: &Self) -> bool {
        a == b
    }

    /// Decode every percent triplet of the component.
    ///
    /// # Errors
    ///
    /// Since components may carry percent-encoded bytes which are not UTF-8,
    /// this function may return [`Error::InvalidUtf8`].
    ///
    /// [`Error::InvalidUtf8`]: enum.Error.html#variant.InvalidUtf8
    pub fn decoded(&self) -> Result<String, Error> {
        percent_decode(&self.string)
    }

    /// Determines if the stored string satisfies the grammar of the type.
    pub(crate) fn satisfies_grammar(&self) -> bool {
        self.string.is_empty() || grammar(self.kind).component.is_match(&self.string)
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.string)
    }
}

impl AsRef<str> for Component {
    fn as_ref(&self) -> &str {
        &self.string
    }
}

/// Run the normalization steps of `kind` over `string` and validate the
/// result.
pub(crate) fn normalize(kind: ComponentType, string: &str) -> Result<String, Error> {
    if string.is_empty() {
        return Ok(String::new());
    }
    let grammar = grammar(kind);
    let mut normalized = string.to_string();
    if grammar.decode_unreserved {
        normalized = decode_unreserved(&normalized)?;
    }
    if let Some(allowed) = grammar.encode_unsafe {
        normalized = encode_element(&normalized, allowed);
    }
    if grammar.normalize_case {
        normalized.make_ascii_lowercase();
    }
    if grammar.normalize_entity_case {
        normalized = TRIPLETS
            .replace_all(&normalized, |captures: &regex::Captures<'_>| {
                captures[0].to_ascii_uppercase()
            })
            .into_owned();
    }
    if grammar.component.is_match(&normalized) {
        Ok(normalized)
    } else {
        debug!("rejected {} component {:?}", kind, string);
        Err(Error::Malformed(kind))
    }
}

fn decode_unreserved(string: &str) -> Result<String, Error> {
    let mut decoded = String::with_capacity(string.len());
    let mut last = 0;
    for run in UNRESERVED_TRIPLETS.find_iter(string) {
        decoded.push_str(&string[last..run.start()]);
        decoded.push_str(&decode_percent_run(run.as_str())?);
        last = run.end();
    }
    decoded.push_str(&string[last..]);
    Ok(decoded)
}
