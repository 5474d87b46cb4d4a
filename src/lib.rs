//! URIs for files of an example workspace, for use in test fixtures.
//!
//! ```no_run
//! use workspace_uri::WorkspaceUriResolver;
//!
//! let uri_for =
//!     WorkspaceUriResolver::from_anchor(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/common/mod.rs"))?;
//! let uri = uri_for.uri_for(["sums.txt"])?;
//! # Ok::<(), workspace_uri::Error>(())
//! ```

pub mod resolver;
pub mod uris;

pub use resolver::WorkspaceUriResolver;
pub use uris::{from_fs_path, to_fs_path, UriError, URI};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T, E = Error> = std::result::Result<T, E>;
