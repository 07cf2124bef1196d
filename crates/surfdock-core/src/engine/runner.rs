use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::Command;
use tracing::{debug, info};

pub const LOG_TAIL_LINES: usize = 20;

/// What a finished invocation left behind.
#[derive(Debug)]
pub struct RunOutcome {
    pub pid: Option<u32>,
    pub status: ExitStatus,
    /// The last lines of combined output, oldest first.
    pub log_tail: Vec<String>,
}

/// Spawns the docking executable with a flags file and tees its output to a log.
pub struct DockingRunner {
    executable_path: PathBuf,
}

impl DockingRunner {
    pub fn new<P: AsRef<Path>>(executable_path: P) -> Self {
        Self {
            executable_path: executable_path.as_ref().to_path_buf(),
        }
    }

    /// The argument vector the executable is started with, program first.
    pub fn command_line(&self, flags_path: &Path) -> Vec<OsString> {
        let mut flags_arg = OsString::from("@");
        flags_arg.push(flags_path.as_os_str());
        vec![self.executable_path.clone().into_os_string(), flags_arg]
    }

    /// Runs to completion in `work_dir`, streaming every stdout/stderr line to `reporter` and
    /// to `log_path`. A non-zero exit is returned in the outcome, not as an error.
    pub async fn run(
        &self,
        flags_path: &Path,
        work_dir: &Path,
        log_path: &Path,
        reporter: &ProgressReporter<'_>,
    ) -> Result<RunOutcome, EngineError> {
        let args = self.command_line(flags_path);
        info!("Launching {:?} in {:?}", args, work_dir);

        let mut child = Command::new(&args[0])
            .args(&args[1..])
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Launch {
                path: self.executable_path.clone(),
                source,
            })?;

        let pid = child.id();
        if let Some(pid) = pid {
            reporter.report(Progress::ProcessStarted { pid });
        }

        let log_file = File::create(log_path)
            .await
            .map_err(|e| EngineError::write(log_path, e))?;
        let mut log = BufWriter::new(log_file);
        let mut tail: VecDeque<String> = VecDeque::with_capacity(LOG_TAIL_LINES);

        let mut stdout = child.stdout.take().map(|s| BufReader::new(s).split(b'\n'));
        let mut stderr = child.stderr.take().map(|s| BufReader::new(s).split(b'\n'));

        loop {
            let line = tokio::select! {
                line = next_line(&mut stdout), if stdout.is_some() => match line? {
                    Some(l) => l,
                    None => { stdout = None; continue; }
                },
                line = next_line(&mut stderr), if stderr.is_some() => match line? {
                    Some(l) => l,
                    None => { stderr = None; continue; }
                },
                else => break,
            };

            log.write_all(line.as_bytes()).await?;
            log.write_all(b"\n").await?;
            if tail.len() == LOG_TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line.clone());
            reporter.report(Progress::ProcessOutput(line));
        }
        log.flush().await?;

        let status = child.wait().await?;
        debug!("Docking process {:?} exited with {}", pid, status);

        Ok(RunOutcome {
            pid,
            status,
            log_tail: tail.into_iter().collect(),
        })
    }
}

/// Reads the next output line, decoding invalid UTF-8 lossily.
async fn next_line<R>(segments: &mut Option<tokio::io::Split<R>>) -> std::io::Result<Option<String>>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let Some(segments) = segments else {
        return Ok(None);
    };
    Ok(segments.next_segment().await?.map(|raw| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(&raw[..]);
        String::from_utf8_lossy(raw).into_owned()
    }))
}
