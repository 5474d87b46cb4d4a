use std::env;

use simplelog::*;

use workspace_uri::resolver::FromFsPath;
use workspace_uri::{from_fs_path, Result, WorkspaceUriResolver};

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Trace;
#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Prints the URI of `current_dir/<SEGMENT>...` on stdout.
pub fn main() -> Result<()> {
    // stdout carries only the URI
    TermLogger::init(
        LOG_LEVEL,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let resolver =
        WorkspaceUriResolver::with_base_dir(env::current_dir()?, from_fs_path as FromFsPath)?;
    let uri = resolver.uri_for(env::args_os().skip(1))?;
    println!("{}", uri);

    Ok(())
}
