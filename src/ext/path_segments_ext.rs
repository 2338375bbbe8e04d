pub const SEPARATOR: char = '/';
pub const ROOT_PATH: &str = "/";

const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// A meaningful component of a slash-delimited path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Parent,
    Name(&'a str),
}

/// Splitting helpers for slash-delimited namespace paths.
///
/// Empty segments (doubled or trailing separators) and `.` carry no
/// movement and are never yielded.
pub trait PathSegmentsExt {
    fn is_absolute_path(&self) -> bool;

    fn path_segments(&self) -> impl Iterator<Item = Segment<'_>>;

    /// Splits off the last segment as a leaf name.
    /// The prefix is `"/"` for `"/leaf"` and empty for a bare `"leaf"`.
    fn split_leaf(&self) -> (&str, &str);
}

impl PathSegmentsExt for str {
    fn is_absolute_path(&self) -> bool {
        self.starts_with(SEPARATOR)
    }

    fn path_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.split(SEPARATOR)
            .filter(|segment| !segment.is_empty() && *segment != CURRENT_DIR)
            .map(|segment| match segment {
                PARENT_DIR => Segment::Parent,
                name => Segment::Name(name),
            })
    }

    fn split_leaf(&self) -> (&str, &str) {
        match self.rfind(SEPARATOR) {
            Some(0) => (ROOT_PATH, &self[1..]),
            Some(pos) => (&self[..pos], &self[pos + 1..]),
            None => ("", self),
        }
    }
}
