//! [`WorkspaceUriResolver`] builds URIs for files of an example workspace.
//!
//! The workspace is located relative to an *anchor*, usually the source file
//! that defines the resolver, at `<anchor>/../../examples/servers/workspace`.

use std::env;
use std::ffi::OsString;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::{debug, error};

use crate::uris::{self, UriError, URI};

/// Path of the example workspace, relative to the anchor.
pub const WORKSPACE_OFFSET: [&str; 5] = ["..", "..", "examples", "servers", "workspace"];

const MAX_SYMLINK_HOPS: usize = 40;

pub type FromFsPath = fn(&Path) -> Result<URI, UriError>;

#[derive(Debug, Clone)]
pub struct WorkspaceUriResolver<F = FromFsPath> {
    /// Absolute path without symlinks, every segment is joined onto it
    base_dir: PathBuf,
    converter: F,
}

impl WorkspaceUriResolver {
    /// Creates a resolver for the workspace next to `anchor`, converting
    /// paths with [`uris::from_fs_path`].
    pub fn from_anchor<P: AsRef<Path>>(anchor: P) -> io::Result<Self> {
        Self::from_anchor_with(anchor, uris::from_fs_path as FromFsPath)
    }
}

impl<F> WorkspaceUriResolver<F> {
    /// Same as [`WorkspaceUriResolver::from_anchor`], with a custom path to URI
    /// conversion.
    pub fn from_anchor_with<P: AsRef<Path>>(anchor: P, converter: F) -> io::Result<Self> {
        let mut path = anchor.as_ref().to_path_buf();
        path.extend(WORKSPACE_OFFSET);

        Self::with_base_dir(path, converter)
    }

    /// Uses `dir` itself (with symlinks and `..` resolved) as the base
    /// directory.
    ///
    /// The directory does not have to exist; only failures such as a
    /// permission error or a symlink loop are reported.
    pub fn with_base_dir<P: AsRef<Path>>(dir: P, converter: F) -> io::Result<Self> {
        let base_dir = resolve_path(dir.as_ref()).map_err(|e| {
            error!("Cannot resolve {}: {}", dir.as_ref().display(), e);
            e
        })?;
        debug!("Workspace base directory: {}", base_dir.display());

        Ok(Self {
            base_dir,
            converter,
        })
    }

    /// The directory every call to [`WorkspaceUriResolver::uri_for`] starts
    /// from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Joins `segments` in order onto the base directory and converts the
    /// result into a URI.
    ///
    /// The joined path does not have to exist. Segments are joined verbatim:
    /// `..` is kept and an absolute segment replaces everything before it.
    pub fn uri_for<I, S, E>(&self, segments: I) -> Result<URI, E>
    where
        F: Fn(&Path) -> Result<URI, E>,
        E: Display,
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut path = self.base_dir.clone();
        path.extend(segments);

        (self.converter)(&path).map_err(|e| {
            error!("Cannot convert {} into URI: {}", path.display(), e);
            e
        })
    }
}

enum Step {
    Parent,
    Name(OsString),
}

/// Makes `path` absolute, following symlinks one component at a time, so a
/// `..` after a symlink leads to the parent of the link's target. Components
/// that do not exist are kept as they are.
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut resolved = PathBuf::new();
    let mut pending = Vec::new();
    enqueue(&path, &mut resolved, &mut pending);

    let mut hops = 0;
    while let Some(step) = pending.pop() {
        let name = match step {
            Step::Parent => {
                resolved.pop();
                continue;
            }
            Step::Name(name) => name,
        };

        let candidate = resolved.join(&name);
        match fs::symlink_metadata(&candidate) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("too many levels of symbolic links: {}", candidate.display()),
                    ));
                }
                let target = fs::read_link(&candidate)?;
                enqueue(&target, &mut resolved, &mut pending);
            }
            Ok(_) => resolved = candidate,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                resolved = candidate
            }
            Err(e) => return Err(e),
        }
    }

    Ok(resolved)
}

// Relative paths continue from `resolved`, absolute ones restart from their root.
fn enqueue(path: &Path, resolved: &mut PathBuf, pending: &mut Vec<Step>) {
    if path.has_root() {
        *resolved = path
            .components()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();
    }

    for component in path.components().rev() {
        match component {
            Component::ParentDir => pending.push(Step::Parent),
            Component::Normal(name) => pending.push(Step::Name(name.to_os_string())),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
}
