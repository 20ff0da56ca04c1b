use std::{convert::TryFrom, str::FromStr};

use super::{
    character_classes::QUERY_OR_FRAGMENT_NOT_PCT_ENCODED,
    codec::{percent_decode, push_encoded_char},
    component::Component,
    component_type::ComponentType,
    error::Error,
    log::debug,
};

/// The three delimiter characters of a [`KeyValue`].
///
/// [`KeyValue`]: struct.KeyValue.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delimiters {
    /// Separates one key (and its values) from the next.  Defaults to `&`.
    pub key_limit: char,

    /// Separates a key from its values.  Defaults to `=`.
    pub value_limit: char,

    /// Separates the values of one key.  Defaults to `,`.
    pub list_limit: char,
}

impl Delimiters {
    /// Build a set of delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DelimiterConflict`] unless all three characters are
    /// different.
    ///
    /// [`Error::DelimiterConflict`]: enum.Error.html#variant.DelimiterConflict
    pub fn new(key_limit: char, value_limit: char, list_limit: char) -> Result<Self, Error> {
        let delimiters = Self {
            key_limit,
            value_limit,
            list_limit,
        };
        delimiters.check()?;
        Ok(delimiters)
    }

    fn check(self) -> Result<Self, Error> {
        if self.key_limit == self.value_limit
            || self.key_limit == self.list_limit
            || self.value_limit == self.list_limit
        {
            Err(Error::DelimiterConflict)
        } else {
            Ok(self)
        }
    }

    fn contains(self, c: char) -> bool {
        c == self.key_limit || c == self.value_limit || c == self.list_limit
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            key_limit: '&',
            value_limit: '=',
            list_limit: ',',
        }
    }
}

/// A delimiter based list of keys, each with zero or more values, such as the
/// query `a=1,2&b&c=3`.
///
/// Keys are either *ordered* (they have a position, and are written first, in
/// that order) or *unordered* (they only carry values, and are written after
/// the ordered keys in the order they were first given values).  Parsing makes
/// every key ordered.  No key or value may be empty or contain one of the
/// delimiters; there is no escaping.
///
/// # Examples
///
/// ```rust
/// use uri_component::KeyValue;
///
/// # fn main() -> Result<(), uri_component::Error> {
/// let mut query = KeyValue::parse("a=1,2&b&c=3")?;
/// assert_eq!(["a", "b", "c"], query.keys());
/// assert_eq!(Some(&["1".to_string(), "2".to_string()][..]), query.get_key("a"));
/// assert_eq!(None, query.get_key("b"));
///
/// query.set_key("d", &["4"])?;
/// query.insert_key("z", &["26"], 0)?;
/// assert_eq!("z=26&a=1,2&b&c=3&d=4", query.to_string());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyValue {
    delimiters: Delimiters,
    keys: Vec<String>,
    values: Vec<(String, Vec<String>)>,
}

impl KeyValue {
    /// Create an empty instance with the default delimiters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty instance with the given delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DelimiterConflict`] unless all three delimiters are
    /// different.
    ///
    /// [`Error::DelimiterConflict`]: enum.Error.html#variant.DelimiterConflict
    pub fn with_delimiters(delimiters: Delimiters) -> Result<Self, Error> {
        Ok(Self {
            delimiters: delimiters.check()?,
            keys: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Parse a string using the default delimiters.
    ///
    /// # Errors
    ///
    /// See [`set_string`](#method.set_string).
    pub fn parse<T>(string: T) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        Self::parse_with(string, Delimiters::default())
    }

    /// Parse a string using the given delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DelimiterConflict`] for unusable delimiters, otherwise
    /// see [`set_string`](#method.set_string).
    ///
    /// [`Error::DelimiterConflict`]: enum.Error.html#variant.DelimiterConflict
    pub fn parse_with<T>(string: T, delimiters: Delimiters) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut key_value = Self::with_delimiters(delimiters)?;
        key_value.set_string(string)?;
        Ok(key_value)
    }

    /// Build an instance from its ordered keys and its values.
    ///
    /// Keys which only appear in `values` become unordered keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DelimiterConflict`] for unusable delimiters,
    /// [`Error::MalformedToken`] for an empty key or value or one containing a
    /// delimiter, and [`Error::DuplicateKey`] if a key is listed twice in
    /// either `keys` or `values`.
    ///
    /// [`Error::DelimiterConflict`]: enum.Error.html#variant.DelimiterConflict
    /// [`Error::MalformedToken`]: enum.Error.html#variant.MalformedToken
    /// [`Error::DuplicateKey`]: enum.Error.html#variant.DuplicateKey
    pub fn from_parts<K, V>(
        keys: &[K],
        values: &[(K, Vec<V>)],
        delimiters: Delimiters,
    ) -> Result<Self, Error>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut key_value = Self::with_delimiters(delimiters)?;
        for key in keys {
            let key = key_value.token(key.as_ref())?;
            if key_value.keys.contains(&key) {
                return Err(Error::DuplicateKey(key));
            }
            key_value.keys.push(key);
        }
        for (key, list) in values {
            let key = key_value.token(key.as_ref())?;
            if key_value.values.iter().any(|(existing, _)| *existing == key) {
                return Err(Error::DuplicateKey(key));
            }
            let list = key_value.tokens(list)?;
            key_value.values.push((key, list));
        }
        Ok(key_value)
    }

    /// Discard all keys and start over with new delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DelimiterConflict`] unless all three delimiters are
    /// different; `self` is left unchanged in that case.
    ///
    /// [`Error::DelimiterConflict`]: enum.Error.html#variant.DelimiterConflict
    pub fn define(&mut self, delimiters: Delimiters) -> Result<&mut Self, Error> {
        self.delimiters = delimiters.check()?;
        self.keys.clear();
        self.values.clear();
        Ok(self)
    }

    /// The delimiters in use.
    #[must_use]
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// The ordered keys.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Every key which has values, with those values, in the order the keys
    /// were first given values.
    pub fn values(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.values
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    /// Determines if there are no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.values.is_empty()
    }

    /// Determines if every key and value is a valid token for the current
    /// delimiters and no ordered key is repeated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let tokens_valid = self
            .keys
            .iter()
            .chain(self.values.iter().map(|(key, _)| key))
            .chain(self.values.iter().flat_map(|(_, list)| list))
            .all(|token| self.is_token(token));
        let keys_unique = self
            .keys
            .iter()
            .enumerate()
            .all(|(i, key)| !self.keys[..i].contains(key));
        tokens_valid && keys_unique
    }

    /// Replace the contents by parsing `string`.
    ///
    /// The string is split on the key delimiter and empty segments are
    /// skipped.  Each segment is a key, optionally followed by the value
    /// delimiter and a list of values separated by the list delimiter.  Every
    /// key becomes an ordered key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPair`] if a segment has more than one value
    /// delimiter, [`Error::MalformedToken`] for an empty key or value or a key
    /// containing the list delimiter, and [`Error::DuplicateKey`] if a key
    /// appears twice.  `self` is left unchanged on error.
    ///
    /// [`Error::MalformedPair`]: enum.Error.html#variant.MalformedPair
    /// [`Error::MalformedToken`]: enum.Error.html#variant.MalformedToken
    /// [`Error::DuplicateKey`]: enum.Error.html#variant.DuplicateKey
    pub fn set_string<T>(&mut self, string: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        let string = string.as_ref();
        let (keys, values) = self.split(string).map_err(|error| {
            debug!("rejected key/value string {:?}: {}", string, error);
            error
        })?;
        self.keys = keys;
        self.values = values;
        Ok(())
    }

    fn split(&self, string: &str) -> Result<(Vec<String>, Vec<(String, Vec<String>)>), Error> {
        let mut keys: Vec<String> = Vec::new();
        let mut values = Vec::new();
        for segment in string
            .split(self.delimiters.key_limit)
            .filter(|segment| !segment.is_empty())
        {
            let mut pair = segment.splitn(3, self.delimiters.value_limit);
            let key = pair.next().unwrap_or_default();
            let list = pair.next();
            if pair.next().is_some() {
                return Err(Error::MalformedPair(segment.to_string()));
            }
            let key = self.token(key)?;
            if keys.contains(&key) {
                return Err(Error::DuplicateKey(key));
            }
            if let Some(list) = list {
                let list = self.tokens(
                    &list
                        .split(self.delimiters.list_limit)
                        .collect::<Vec<&str>>(),
                )?;
                values.push((key.clone(), list));
            }
            keys.push(key);
        }
        Ok((keys, values))
    }

    /// Insert an ordered key at `index`, moving it there if it is already
    /// ordered.  Non-empty `values` replace the values of the key; an empty
    /// slice leaves them as they are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedToken`] for an invalid key or value, or
    /// [`Error::IndexOutOfRange`] if `index` is beyond the number of ordered
    /// keys.
    ///
    /// [`Error::MalformedToken`]: enum.Error.html#variant.MalformedToken
    /// [`Error::IndexOutOfRange`]: enum.Error.html#variant.IndexOutOfRange
    pub fn insert_key<K, V>(&mut self, key: K, values: &[V], index: usize) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let key = self.token(key.as_ref())?;
        let list = self.tokens(values)?;
        if index > self.keys.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.keys.len(),
            });
        }
        let mut index = index;
        if let Some(existing) = self.keys.iter().position(|k| *k == key) {
            self.keys.remove(existing);
            if existing < index {
                index -= 1;
            }
        }
        self.keys.insert(index, key.clone());
        if !list.is_empty() {
            self.store(key, list);
        }
        Ok(())
    }

    /// Insert an ordered key after all others.
    ///
    /// # Errors
    ///
    /// See [`insert_key`](#method.insert_key).
    pub fn append_key<K, V>(&mut self, key: K, values: &[V]) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let len = self.keys.len();
        self.insert_key(key, values, len)
    }

    /// Set the values of a key.  A key which isn't ordered becomes (or stays)
    /// unordered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedToken`] for an invalid key or value.
    ///
    /// [`Error::MalformedToken`]: enum.Error.html#variant.MalformedToken
    pub fn set_key<K, V>(&mut self, key: K, values: &[V]) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let key = self.token(key.as_ref())?;
        let list = self.tokens(values)?;
        self.store(key, list);
        Ok(())
    }

    /// The values of a key, or `None` if the key has none.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&[String]> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, list)| list.as_slice())
    }

    /// Remove a key and its values.  Returns whether anything was removed.
    pub fn remove_key(&mut self, key: &str) -> bool {
        let keys_before = self.keys.len();
        let values_before = self.values.len();
        self.keys.retain(|k| k != key);
        self.values.retain(|(k, _)| k != key);
        keys_before != self.keys.len() || values_before != self.values.len()
    }

    /// The position of an ordered key; the number of ordered keys for a key
    /// which only has values; `None` for a key which is not present.
    #[must_use]
    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key).or_else(|| {
            self.values
                .iter()
                .any(|(k, _)| k == key)
                .then(|| self.keys.len())
        })
    }

    /// Make this instance a copy of `source`, delimiters included.
    pub fn copy_of(&mut self, source: &Self) -> &mut Self {
        self.delimiters = source.delimiters;
        self.keys.clone_from(&source.keys);
        self.values.clone_from(&source.values);
        self
    }

    /// Every key in serialization order (ordered keys first) with its
    /// values, which may be empty.
    fn entries(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        let unordered = self
            .values
            .iter()
            .map(|(key, _)| key)
            .filter(move |key| !self.keys.contains(*key));
        self.keys
            .iter()
            .chain(unordered)
            .map(move |key| (key.as_str(), self.get_key(key).unwrap_or(&[])))
    }

    /// Percent-decode every key and value.
    fn decoded(&self) -> Result<Self, Error> {
        let keys = self
            .keys
            .iter()
            .map(|key| percent_decode(key))
            .collect::<Result<Vec<_>, _>>()?;
        let values = self
            .values
            .iter()
            .map(|(key, list)| -> Result<(String, Vec<String>), Error> {
                let list = list
                    .iter()
                    .map(|value| percent_decode(value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((percent_decode(key)?, list))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(&keys, &values, self.delimiters)
    }

    fn store(&mut self, key: String, list: Vec<String>) {
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = list,
            None => self.values.push((key, list)),
        }
    }

    fn is_token(&self, token: &str) -> bool {
        !token.is_empty() && !token.chars().any(|c| self.delimiters.contains(c))
    }

    fn token(&self, token: &str) -> Result<String, Error> {
        if self.is_token(token) {
            Ok(token.to_string())
        } else {
            Err(Error::MalformedToken(token.to_string()))
        }
    }

    fn tokens<V>(&self, tokens: &[V]) -> Result<Vec<String>, Error>
    where
        V: AsRef<str>,
    {
        tokens
            .iter()
            .map(|token| self.token(token.as_ref()))
            .collect()
    }
}

impl std::fmt::Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, list)) in self.entries().enumerate() {
            if i > 0 {
                write!(f, "{}", self.delimiters.key_limit)?;
            }
            f.write_str(key)?;
            for (j, value) in list.iter().enumerate() {
                let delimiter = if j == 0 {
                    self.delimiters.value_limit
                } else {
                    self.delimiters.list_limit
                };
                write!(f, "{}{}", delimiter, value)?;
            }
        }
        Ok(())
    }
}

impl FromStr for KeyValue {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse(string)
    }
}

impl TryFrom<&'_ str> for KeyValue {
    type Error = Error;

    fn try_from(string: &'_ str) -> Result<Self, Self::Error> {
        Self::parse(string)
    }
}

impl Component {
    /// Parse a query or fragment component as a [`KeyValue`] with the given
    /// delimiters.
    ///
    /// The component is split on its literal delimiters and each key and
    /// value is then percent-decoded on its own, so `a=x%26y` holds a
    /// single key `a` whose value `x&y` contains a delimiter, and is
    /// rejected.  A delimiter which may not appear literally in the
    /// component (such as `#` or `%`) is recognized in its encoded form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongComponentType`] unless this is a query or
    /// fragment component, [`Error::MalformedToken`] if a decoded key or
    /// value contains a delimiter, or any error of [`percent_decode`] and
    /// [`KeyValue::parse_with`].
    ///
    /// [`KeyValue`]: struct.KeyValue.html
    /// [`Error::WrongComponentType`]: enum.Error.html#variant.WrongComponentType
    /// [`Error::MalformedToken`]: enum.Error.html#variant.MalformedToken
    /// [`percent_decode`]: fn.percent_decode.html
    /// [`KeyValue::parse_with`]: struct.KeyValue.html#method.parse_with
    pub fn key_value(&self, delimiters: Delimiters) -> Result<KeyValue, Error> {
        expect_query_or_fragment(self)?;
        let delimiters = delimiters.check()?;
        let mut order = [
            delimiters.key_limit,
            delimiters.value_limit,
            delimiters.list_limit,
        ];
        order.sort_by_key(|delimiter| *delimiter == '%');
        let mut structure = self.as_str().to_string();
        for delimiter in order {
            if !is_literal(delimiter) {
                let mut encoded = String::new();
                push_encoded_char(&mut encoded, delimiter);
                structure = structure.replace(&encoded, &delimiter.to_string());
            }
        }
        KeyValue::parse_with(structure, delimiters)?.decoded()
    }

    /// Replace the string of a query or fragment component by the serialized
    /// form of `key_value`.  Every key and value is percent-encoded on its
    /// own, `%` included, so [`key_value`](#method.key_value) reads back the
    /// same keys and values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongComponentType`] unless this is a query or
    /// fragment component.
    ///
    /// [`Error::WrongComponentType`]: enum.Error.html#variant.WrongComponentType
    pub fn set_key_value(&mut self, key_value: &KeyValue) -> Result<(), Error> {
        expect_query_or_fragment(self)?;
        let delimiters = key_value.delimiters();
        let mut string = String::new();
        for (i, (key, list)) in key_value.entries().enumerate() {
            if i > 0 {
                push_literal(&mut string, delimiters.key_limit);
            }
            push_token(&mut string, key);
            for (j, value) in list.iter().enumerate() {
                push_literal(
                    &mut string,
                    if j == 0 {
                        delimiters.value_limit
                    } else {
                        delimiters.list_limit
                    },
                );
                push_token(&mut string, value);
            }
        }
        self.set_string(string)
    }
}

/// Determines if `c` may appear unencoded in a query or fragment without
/// being read as part of a percent triplet.
fn is_literal(c: char) -> bool {
    c != '%' && QUERY_OR_FRAGMENT_NOT_PCT_ENCODED.contains(&c)
}

fn push_literal(output: &mut String, c: char) {
    if is_literal(c) {
        output.push(c);
    } else {
        push_encoded_char(output, c);
    }
}

fn push_token(output: &mut String, token: &str) {
    for c in token.chars() {
        push_literal(output, c);
    }
}

fn expect_query_or_fragment(component: &Component) -> Result<(), Error> {
    match component.kind() {
        ComponentType::Query | ComponentType::Fragment => Ok(()),
        found => Err(Error::WrongComponentType {
            expected: ComponentType::Query,
            found,
        }),
    }
}

#[cfg(feature = "serde")]
impl serde_::Serialize for KeyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde_::Deserialize<'de> for KeyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_::Deserializer<'de>,
    {
        let s = <String as serde_::Deserialize>::deserialize(deserializer)?;
        KeyValue::parse(s).map_err(serde_::de::Error::custom)
    }
}
