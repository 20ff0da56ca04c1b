use super::{
    component::Component, component_type::ComponentType, error::Error, grammar::PATH_SEGMENT,
};

/// Remove the navigational `.` and `..` segments of a path.
///
/// The path is split on `/` and walked left to right, counting the segments
/// which a later `..` may remove:
///
/// * `.` is dropped, except as the first or the last segment;
/// * `..` removes the previously kept segment if there is one to remove and
///   it is not the last segment, otherwise it is kept;
/// * an empty segment is always kept, and counts unless it is the first one
///   (the marker of an absolute path);
/// * any other segment is kept and counts.
///
/// This differs from the `remove_dot_segments` routine of RFC 3986 section
/// 5.2.4 at the edges: a leading `.` and a trailing `..` are preserved.
///
/// # Examples
///
/// ```rust
/// use uri_component::resolve_dot_segments;
///
/// assert_eq!("/a/g", resolve_dot_segments("/a/b/c/./../../g"));
/// assert_eq!("./a", resolve_dot_segments("./a"));
/// assert_eq!("/a", resolve_dot_segments("/./a"));
/// ```
#[must_use]
pub fn resolve_dot_segments(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut output: Vec<&str> = Vec::with_capacity(segments.len());
    let mut n = 0_usize;
    for (i, segment) in segments.iter().copied().enumerate() {
        match segment {
            "." => {
                if i == 0 || i == last {
                    output.push(segment);
                }
            }
            ".." => {
                if n > 0 && i != last {
                    output.pop();
                    n -= 1;
                } else {
                    output.push(segment);
                }
            }
            "" => {
                output.push(segment);
                if i != 0 {
                    n += 1;
                }
            }
            _ => {
                output.push(segment);
                n += 1;
            }
        }
    }
    output.join("/")
}

/// Operations which only apply to [`ComponentType::Path`] components.
///
/// The read operations work on whatever string the component holds; the
/// mutators return [`Error::WrongComponentType`] for any other component type
/// and leave the component unchanged on failure.
///
/// [`ComponentType::Path`]: enum.ComponentType.html#variant.Path
/// [`Error::WrongComponentType`]: enum.Error.html#variant.WrongComponentType
///
/// # Examples
///
/// ```rust
/// use uri_component::{Component, ComponentType, PathExt};
///
/// # fn main() -> Result<(), uri_component::Error> {
/// let mut path = Component::with_string(ComponentType::Path, "/foo/bar/../baz")?;
/// assert!(path.is_absolute());
/// assert_eq!(vec!["", "foo", "bar", "..", "baz"], path.segments());
/// path.resolve()?;
/// assert_eq!("/foo/baz", path.as_str());
/// path.set_last_segment("index.html")?;
/// assert_eq!("/foo/index.html", path.as_str());
/// # Ok(())
/// # }
/// ```
pub trait PathExt {
    /// The path split on `/`.  An absolute path starts with an empty segment
    /// and a path ending in a slash ends with one.
    fn segments(&self) -> Vec<&str>;

    /// Replace the path by the given segments joined with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySegmentList`] for an empty slice, or a grammar
    /// error if the joined path is malformed.
    ///
    /// [`Error::EmptySegmentList`]: enum.Error.html#variant.EmptySegmentList
    fn set_segments<T>(&mut self, segments: &[T]) -> Result<(), Error>
    where
        T: AsRef<str>;

    /// Determines if the path begins with `/`.
    fn is_absolute(&self) -> bool;

    /// Add or remove the leading `/` without otherwise changing the segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongComponentType`] if this isn't a path component.
    ///
    /// [`Error::WrongComponentType`]: enum.Error.html#variant.WrongComponentType
    fn set_absolute(&mut self, absolute: bool) -> Result<(), Error>;

    /// Everything after the final `/`, or the whole path if it has none.
    fn last_segment(&self) -> &str;

    /// Replace everything after the final `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSegment`] if `segment` is not a valid path
    /// segment (for example if it contains a `/`).
    ///
    /// [`Error::MalformedSegment`]: enum.Error.html#variant.MalformedSegment
    fn set_last_segment<T>(&mut self, segment: T) -> Result<(), Error>
    where
        T: AsRef<str>;

    /// The path with its dot segments resolved.
    fn resolved(&self) -> String;

    /// Resolve the dot segments of the path in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongComponentType`] if this isn't a path component.
    ///
    /// [`Error::WrongComponentType`]: enum.Error.html#variant.WrongComponentType
    fn resolve(&mut self) -> Result<(), Error>;
}

impl PathExt for Component {
    fn segments(&self) -> Vec<&str> {
        self.as_str().split('/').collect()
    }

    fn set_segments<T>(&mut self, segments: &[T]) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        expect_path(self)?;
        if segments.is_empty() {
            return Err(Error::EmptySegmentList);
        }
        let joined = segments
            .iter()
            .map(|segment| segment.as_ref())
            .collect::<Vec<&str>>()
            .join("/");
        self.set_string(joined)
    }

    fn is_absolute(&self) -> bool {
        self.as_str().starts_with('/')
    }

    fn set_absolute(&mut self, absolute: bool) -> Result<(), Error> {
        expect_path(self)?;
        let path = self.as_str();
        let toggled = match (absolute, path.starts_with('/')) {
            (true, false) => format!("/{}", path),
            (false, true) => path[1..].to_string(),
            _ => return Ok(()),
        };
        self.set_string(toggled)
    }

    fn last_segment(&self) -> &str {
        let path = self.as_str();
        path.rfind('/').map_or(path, |i| &path[i + 1..])
    }

    fn set_last_segment<T>(&mut self, segment: T) -> Result<(), Error>
    where
        T: AsRef<str>,
    {
        expect_path(self)?;
        let segment = segment.as_ref();
        if !PATH_SEGMENT.is_match(segment) {
            return Err(Error::MalformedSegment(segment.to_string()));
        }
        let path = self.as_str();
        let prefix = path.rfind('/').map_or("", |i| &path[..=i]);
        let replaced = format!("{}{}", prefix, segment);
        self.set_string(replaced)
    }

    fn resolved(&self) -> String {
        resolve_dot_segments(self.as_str())
    }

    fn resolve(&mut self) -> Result<(), Error> {
        expect_path(self)?;
        let resolved = self.resolved();
        self.set_string(resolved)
    }
}

impl Component {
    /// Build a path component from its segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySegmentList`] for an empty slice, or a grammar
    /// error if the joined path is malformed.
    ///
    /// [`Error::EmptySegmentList`]: enum.Error.html#variant.EmptySegmentList
    pub fn path_from_segments<T>(segments: &[T]) -> Result<Self, Error>
    where
        T: AsRef<str>,
    {
        let mut path = Self::new(ComponentType::Path);
        path.set_segments(segments)?;
        Ok(path)
    }
}

fn expect_path(component: &Component) -> Result<(), Error> {
    if component.kind() == ComponentType::Path {
        Ok(())
    } else {
        Err(Error::WrongComponentType {
            expected: ComponentType::Path,
            found: component.kind(),
        })
    }
}
