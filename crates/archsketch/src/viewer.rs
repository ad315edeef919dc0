//! Opens rendered files in the platform's default viewer.

use std::{io, path::Path, process::Command};

use log::debug;

/// Hand `path` to the platform launcher and wait for it to exit.
///
/// The launchers return once the viewer has been started, so waiting only
/// blocks for the hand-off and leaves no unreaped child behind.
pub(crate) fn open(path: &Path) -> io::Result<()> {
    let mut command = viewer_command(path);
    debug!(
        path = path.display().to_string(),
        program:? = command.get_program();
        "Opening rendered diagram"
    );

    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "viewer {:?} exited with {status}",
            command.get_program()
        )))
    }
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
