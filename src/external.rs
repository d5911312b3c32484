use crate::builtin::Registry;
use crate::command::{ExecutableCommand, Flow};
use crate::SHELL_NAME;
use anyhow::Result;
use std::io::Write;
use std::process::Command;

/// A command that is not a builtin: runs as a child process.
///
/// The program name is resolved through the operating system's executable
/// search rules (`PATH`), which `std::process::Command` delegates to. The
/// child inherits the parent's standard streams, environment and working
/// directory unchanged.
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Build a launcher from a non-empty token sequence: `tokens[0]` is the
    /// program, the rest its argument vector.
    ///
    /// # Panics
    /// Panics if `tokens` is empty; the dispatcher never passes an empty
    /// sequence here.
    pub fn new(tokens: &[String]) -> Self {
        let (program, args) = tokens
            .split_first()
            .expect("external command requires at least a program name");
        Self {
            program: program.clone(),
            args: args.to_vec(),
        }
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawn the program and block until it terminates.
    ///
    /// Every failure mode ends in `Flow::Continue`: a command line that
    /// names a missing program, or a program that itself fails, must never
    /// take the interactive loop down. `wait` does not return for a child
    /// that is merely stopped, so the parent keeps waiting until the child
    /// exits or is killed by a signal, and the handle is reaped before this
    /// returns.
    fn execute(
        self: Box<Self>,
        _registry: &Registry,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        let mut child = match Command::new(&self.program).args(&self.args).spawn() {
            Ok(child) => child,
            Err(e) => {
                writeln!(stderr, "{}: {}: {}", SHELL_NAME, self.program, e)?;
                return Ok(Flow::Continue);
            }
        };

        if let Err(e) = child.wait() {
            writeln!(stderr, "{}: {}: {}", SHELL_NAME, self.program, e)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env as stdenv;
    use std::fs;

    fn launch(tokens: &[String]) -> (Flow, String, String) {
        let registry = Registry::with_default_builtins();
        let cmd = Box::new(ExternalCommand::new(tokens));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = cmd.execute(&registry, &mut out, &mut err).unwrap();
        (
            flow,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_missing_program_reports_error_and_continues() {
        let tokens = vec!["doesnotexist123".to_string()];
        let (flow, out, err) = launch(&tokens);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.starts_with("minish: doesnotexist123:"));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_program_to_completion() {
        let mut marker = stdenv::temp_dir();
        marker.push(format!("minish_external_test_{}", std::process::id()));
        let _ = fs::remove_file(&marker);

        let tokens = vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            format!("echo launched > {}", marker.display()),
        ];
        let (flow, _out, err) = launch(&tokens);

        // The blocking wait guarantees the child finished before we look.
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
        assert_eq!(fs::read_to_string(&marker).unwrap(), "launched\n");

        let _ = fs::remove_file(&marker);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_status_still_continues() {
        let tokens = vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            "exit 7".to_string(),
        ];
        let (flow, out, err) = launch(&tokens);

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }
}
