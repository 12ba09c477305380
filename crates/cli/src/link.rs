//! Outbound link opening.
//!
//! Delegates to the platform's default URI opener. The shop only ever hands
//! over http(s) links (product websites and fallback search links); anything
//! that does not parse as a URL is rejected before a process is spawned.

use std::process::Command;

use thiserror::Error;

/// Errors from opening a link.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("not a valid link: {0}")]
    Invalid(#[from] url::ParseError),

    #[error("could not launch the system opener: {0}")]
    Launch(#[from] std::io::Error),

    /// The platform opener ran but refused the link.
    #[error("the system declined to open this link")]
    Declined,
}

/// Open a URL with the platform's default opener.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the opener cannot be launched,
/// or the opener exits unsuccessfully. No state changes either way.
pub fn open_url(raw: &str) -> Result<(), LinkError> {
    let url = url::Url::parse(raw)?;

    let status = platform_opener(url.as_str()).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(LinkError::Declined)
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn platform_opener(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
