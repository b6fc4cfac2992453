//! Blocking child-process helpers shared by the process-backed toolchain.

use crate::error::{ReleaseError, Result};
use std::io::Read;
use std::process::{Command, Stdio};

/// Render a command the way an operator would type it
pub fn render(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    for arg in cmd.get_args() {
        let arg = arg.to_string_lossy();
        if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
            parts.push(format!("'{}'", arg.replace('\'', "'\\''")));
        } else {
            parts.push(arg.into_owned());
        }
    }
    let line = parts.join(" ");
    match cmd.get_current_dir() {
        Some(dir) => format!("(cd {} && {})", dir.display(), line),
        None => line,
    }
}

/// Run with inherited stdio, failing on a non-zero exit status.
///
/// The child talks to the operator directly, so interactive prompts work.
pub fn run_inherited(mut cmd: Command, operation: &str) -> Result<()> {
    let rendered = render(&cmd);
    tracing::debug!(command = %rendered, "running");

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ReleaseError::external(operation, format!("cannot run `{}`: {}", rendered, e)))?;

    if !status.success() {
        return Err(ReleaseError::external(
            operation,
            format!("`{}` exited with code {}", rendered, exit_code(status)),
        ));
    }
    Ok(())
}

/// Run with captured output, failing on a non-zero exit status or when
/// either stream exceeds `max_bytes`.
///
/// Returns stdout as lossy UTF-8.
pub fn run_captured(mut cmd: Command, operation: &str, max_bytes: usize) -> Result<String> {
    let rendered = render(&cmd);
    tracing::debug!(command = %rendered, "running (captured)");

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReleaseError::external(operation, format!("cannot run `{}`: {}", rendered, e)))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // stderr drains on its own thread so a chatty child cannot block on a full pipe.
    let (out, err) = std::thread::scope(|scope| {
        let err_handle = scope.spawn(move || match stderr {
            Some(mut pipe) => {
                let result = read_bounded(&mut pipe, max_bytes);
                if matches!(result, Ok((_, true))) {
                    std::io::copy(&mut pipe, &mut std::io::sink())?;
                }
                result
            }
            None => Ok((Vec::new(), false)),
        });
        let out = match stdout {
            Some(mut pipe) => read_bounded(&mut pipe, max_bytes),
            None => Ok((Vec::new(), false)),
        };
        if !matches!(out, Ok((_, false))) {
            // Nobody reads stdout any more; stop the child so stderr reaches EOF.
            let _ = child.kill();
        }
        let err = err_handle
            .join()
            .unwrap_or_else(|_| Ok((Vec::new(), false)));
        (out, err)
    });

    let (out, out_overflow) = out?;
    let (err, err_overflow) = err?;

    if out_overflow || err_overflow {
        let _ = child.kill();
        let _ = child.wait();
        return Err(ReleaseError::external(
            operation,
            format!("`{}` produced more than {} bytes of output", rendered, max_bytes),
        ));
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(ReleaseError::external(
            operation,
            format!(
                "`{}` exited with code {}\nStdout: {}\nStderr: {}",
                rendered,
                exit_code(status),
                String::from_utf8_lossy(&out).trim(),
                String::from_utf8_lossy(&err).trim()
            ),
        ));
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Read up to `limit` bytes; the flag is true when more was available.
pub fn read_bounded<R: Read>(reader: &mut R, limit: usize) -> std::io::Result<(Vec<u8>, bool)> {
    let mut buf = Vec::new();
    reader.by_ref().take(limit as u64 + 1).read_to_end(&mut buf)?;
    let overflowed = buf.len() > limit;
    buf.truncate(limit);
    Ok((buf, overflowed))
}

fn exit_code(status: std::process::ExitStatus) -> String {
    status
        .code()
        .map(|code| code.to_string())
        .unwrap_or_else(|| "none (terminated by signal)".to_string())
}
