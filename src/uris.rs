//! Conversions between filesystem paths and `file://` URIs.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

/// A `file://` URI, serialized as a plain string so it can be put into
/// protocol messages as is.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct URI(pub String);

impl URI {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for URI {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for URI {
    fn from(input: &str) -> Self {
        Self(input.to_string())
    }
}

impl From<Url> for URI {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}

impl fmt::Display for URI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriError {
    input: String,
    message: &'static str,
}

impl UriError {
    fn new(input: impl fmt::Display, message: &'static str) -> Self {
        Self {
            input: input.to_string(),
            message,
        }
    }

    /// The path or URI that could not be converted.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to convert {:?}: {}", self.input, self.message)
    }
}

impl std::error::Error for UriError {}

/// Maps an absolute filesystem path into a `file://` URI.
///
/// Characters not allowed in a URI path (spaces, `#`, `?`, non-ASCII, ...)
/// are percent-encoded, bytes that are not valid UTF-8 included. Relative
/// paths are rejected.
pub fn from_fs_path(path: &Path) -> Result<URI, UriError> {
    Url::from_file_path(path)
        .map(URI::from)
        .map_err(|()| UriError::new(path.display(), "path is not absolute"))
}

/// Maps a `file://` URI back into a filesystem path.
pub fn to_fs_path(uri: &str) -> Result<PathBuf, UriError> {
    let url = Url::parse(uri).map_err(|_| UriError::new(uri, "not a valid URI"))?;
    if url.scheme() != "file" {
        return Err(UriError::new(uri, "not a file URI"));
    }
    url.to_file_path()
        .map_err(|()| UriError::new(uri, "URI does not name a local path"))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use insta::assert_snapshot;
    use test_case::test_case;

    use super::*;

    #[cfg(unix)]
    #[test_case("/tmp/foo.py", "file:///tmp/foo.py" ;"plain")]
    #[test_case("/tmp/with space/a#b?.py", "file:///tmp/with%20space/a%23b%3F.py" ;"reserved_chars")]
    #[test_case("/tmp/caf\u{e9}.txt", "file:///tmp/caf%C3%A9.txt" ;"non_ascii")]
    #[test_case("/", "file:///" ;"root")]
    fn test_from_fs_path(path: &str, expected: &str) {
        assert_eq!(from_fs_path(Path::new(path)).unwrap(), URI::from(expected));
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = from_fs_path(Path::new("foo/bar.py")).unwrap_err();

        assert_eq!(err.input(), "foo/bar.py");
        assert_snapshot!(err.to_string(), @r###"Failed to convert "foo/bar.py": path is not absolute"###);
    }

    #[cfg(unix)]
    #[test]
    fn file_uri_maps_back_to_path() {
        assert_eq!(
            to_fs_path("file:///tmp/a%20b/c.py").unwrap(),
            PathBuf::from("/tmp/a b/c.py")
        );
    }

    #[test_case("https://example.com/a.py", "not a file URI" ;"other_scheme")]
    #[test_case("no scheme at all", "not a valid URI" ;"not_a_uri")]
    fn test_to_fs_path_errors(uri: &str, message: &str) {
        let err = to_fs_path(uri).unwrap_err();

        assert_eq!(err.input(), uri);
        assert!(err.to_string().ends_with(message));
    }

    #[test]
    fn uri_serializes_as_plain_string() {
        let uri = URI::from("file:///tmp/foo.py");

        assert_eq!(
            serde_json::to_string(&uri).unwrap(),
            r#""file:///tmp/foo.py""#
        );
        assert_eq!(uri.to_string(), "file:///tmp/foo.py");
    }
}
