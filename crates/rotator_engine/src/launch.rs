use std::process::{Child, Command, Stdio};
use std::thread;

use rotator_core::{LaunchError, UrlSink};
use rotator_logging::{rotator_debug, rotator_warn};

/// Opens URLs in the user's default browser through the platform opener.
///
/// Launches are spawn-only: an error is reported only when the opener cannot
/// be started. The opener is reaped on a background thread and a non-zero exit
/// is logged.
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    program: String,
    args: Vec<String>,
}

impl BrowserLauncher {
    pub fn system() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Opener for an OS name as reported by `std::env::consts::OS`.
    ///
    /// Windows goes through `rundll32` rather than `cmd /C start`, which
    /// would split query strings at `&`.
    pub fn for_os(os: &str) -> Self {
        match os {
            "windows" => Self::with_command("rundll32", ["url.dll,FileProtocolHandler"]),
            "macos" => Self::with_command("open", [] as [&str; 0]),
            _ => Self::with_command("xdg-open", [] as [&str; 0]),
        }
    }

    /// Uses `program args... <url>` as the opener.
    pub fn with_command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The command that opens `url`; the URL is always a single argument.
    pub fn command(&self, url: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Default for BrowserLauncher {
    fn default() -> Self {
        Self::system()
    }
}

impl UrlSink for BrowserLauncher {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError> {
        rotator_debug!("Launching {} {:?} {}", self.program, self.args, url);
        let child = self.command(url).spawn().map_err(|err| LaunchError::Spawn {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        reap(child, url.to_string());
        Ok(())
    }
}

fn reap(mut child: Child, url: String) {
    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => {
            rotator_warn!("Opener for {} exited with {}", url, status);
        }
        Ok(_) => {}
        Err(err) => rotator_warn!("Could not wait on opener for {}: {}", url, err),
    });
}

/// Records URLs instead of opening them.
#[derive(Debug, Clone, Default)]
pub struct DryRunLauncher {
    pub urls: Vec<String>,
}

impl UrlSink for DryRunLauncher {
    fn launch(&mut self, url: &str) -> Result<(), LaunchError> {
        self.urls.push(url.to_string());
        Ok(())
    }
}
