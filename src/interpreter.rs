use crate::builtin::Registry;
use crate::command::{ExecutableCommand, Flow};
use crate::external::ExternalCommand;
use crate::lexer;
use crate::{PROMPT, SHELL_NAME};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// The interactive command interpreter.
///
/// `Shell` owns the builtin [`Registry`] and implements the two layers on
/// top of it: [`execute`](Shell::execute) classifies one tokenized line as
/// builtin or external and runs it, and [`repl`](Shell::repl) drives the
/// read-tokenize-execute cycle against the terminal until the user asks to
/// stop or the input stream ends.
pub struct Shell {
    registry: Registry,
}

impl Shell {
    /// Create a shell dispatching over the given registry.
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Dispatch one tokenized command line.
    ///
    /// An empty token sequence is silently ignored. Otherwise the first
    /// token selects a builtin by exact name, falling back to launching it
    /// as an external program. Whatever goes wrong is reported on `stderr`
    /// right here; the only thing the caller learns is whether to keep
    /// reading input.
    pub fn execute(
        &self,
        tokens: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let Some(name) = tokens.first() else {
            return Flow::Continue;
        };
        let args: Vec<&str> = tokens[1..].iter().map(String::as_str).collect();

        let cmd: Box<dyn ExecutableCommand> = match self.registry.resolve(name, &args) {
            Some(builtin) => builtin,
            None => Box::new(ExternalCommand::new(tokens)),
        };

        match cmd.execute(&self.registry, stdout, stderr) {
            Ok(flow) => flow,
            Err(e) => {
                // Err only reaches this point when a sink itself failed, in
                // which case this write is best-effort too.
                let _ = writeln!(stderr, "{}: {:#}", SHELL_NAME, e);
                Flow::Continue
            }
        }
    }

    /// Run the interactive loop against the process's real streams.
    ///
    /// Each cycle prints the prompt, reads one line, tokenizes and
    /// dispatches it. The loop ends cleanly when a command signals
    /// [`Flow::Exit`] or the input stream reaches end-of-file; Ctrl-C at
    /// the prompt discards the current line and re-prompts. Only a broken
    /// line reader escapes as an error.
    pub fn repl(&self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let tokens = lexer::split_into_tokens(&line);
                    let flow =
                        self.execute(&tokens, &mut std::io::stdout(), &mut std::io::stderr());
                    if flow == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Default for Shell {
    /// A shell with the standard builtins: `cd`, `help`, `exit`.
    fn default() -> Self {
        Self::new(Registry::with_default_builtins())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_into_tokens;

    fn dispatch(line: &str) -> (Flow, String, String) {
        let shell = Shell::default();
        let tokens = split_into_tokens(line);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = shell.execute(&tokens, &mut out, &mut err);
        (
            flow,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_empty_line_is_a_silent_noop() {
        let (flow, out, err) = dispatch("");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_whitespace_only_line_is_a_silent_noop() {
        let (flow, out, err) = dispatch("   \t  ");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_exit_builtin_stops_the_loop() {
        let (flow, out, err) = dispatch("exit");
        assert_eq!(flow, Flow::Exit);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_help_builtin_dispatches_and_continues() {
        let (flow, out, err) = dispatch("help");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
        assert!(out.contains("built in"));
    }

    #[test]
    fn test_unknown_command_falls_back_to_external_launch() {
        let (flow, out, err) = dispatch("doesnotexist123 --some-arg");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert!(err.contains("doesnotexist123"));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_program_failure_does_not_stop_the_loop() {
        let (flow, _out, err) = dispatch("/bin/sh -c false");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
    }
}
