use os_pipe::PipeReader;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;

/// A shell command whose stdout and stderr share one pipe.
///
/// Dropping a process that is still running kills and reaps it.
pub struct ShellProcess {
    child: Child,
    output: BufReader<PipeReader>,
}

/// Final state of a process after its output has been fully drained.
#[derive(Debug)]
pub struct Completion {
    pub status: ExitStatus,
    pub output: String,
}

#[cfg(not(target_os = "windows"))]
fn shell(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(target_os = "windows")]
fn shell(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

impl ShellProcess {
    pub fn spawn(command_line: &str) -> io::Result<Self> {
        let (reader, writer) = os_pipe::pipe()?;
        let mut cmd = shell(command_line);
        cmd.stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        let child = cmd.spawn()?;
        // The parent's write ends must be closed or the reader never sees EOF.
        drop(cmd);
        Ok(Self {
            child,
            output: BufReader::new(reader),
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Blocks until a full line (newline included) is available. `None` once the
    /// stream is closed.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.output.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Sleeps in `interval` steps until the process has exited.
    pub fn wait_polling(&mut self, interval: Duration) -> io::Result<ExitStatus> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            std::thread::sleep(interval);
        }
    }

    /// Reads whatever output is left and reaps the process.
    pub fn finish(mut self) -> io::Result<Completion> {
        let mut rest = Vec::new();
        self.output.read_to_end(&mut rest)?;
        let status = self.child.wait()?;
        Ok(Completion {
            status,
            output: String::from_utf8_lossy(&rest).into_owned(),
        })
    }
}

impl Drop for ShellProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
