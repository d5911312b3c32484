use crate::builtin::Registry;
use anyhow::Result;
use std::io::Write;

/// Signal returned by every dispatched command, telling the interactive
/// loop whether to read another line.
///
/// This is the only value that ever crosses the dispatcher boundary:
/// recoverable failures are reported to standard error where they happen
/// and collapse to [`Flow::Continue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Terminate the interactive loop.
    Exit,
}

/// Object-safe trait for anything the shell can run: builtins and external
/// programs alike.
///
/// Output sinks are passed in rather than hardcoded to the process streams
/// so tests can capture what a command writes.
pub trait ExecutableCommand {
    /// Run the command to completion.
    ///
    /// `registry` gives commands read access to the builtin table (used by
    /// `help`). Implementations must report their own recoverable failures
    /// to `stderr` and return `Ok`; an `Err` here means the sinks themselves
    /// are unusable.
    fn execute(
        self: Box<Self>,
        registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow>;
}

/// Factory that tries to create a command instance from a name and its
/// arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. The
/// registry queries its factories in registration order, so the first
/// factory claiming a name wins.
pub trait CommandFactory {
    /// Canonical command name this factory answers to, e.g. "cd".
    fn name(&self) -> &'static str;

    /// One-line description shown by the `help` builtin.
    fn description(&self) -> &'static str;

    /// Attempt to create a command instance for the provided name and
    /// arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
