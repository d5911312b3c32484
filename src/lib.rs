//! A tiny interactive shell.
//!
//! This crate implements the smallest useful command interpreter: read one
//! line of input, split it into whitespace-delimited tokens, run the first
//! token as either a built-in command or an external program, and repeat
//! until the user types `exit` or closes the input stream.
//!
//! The main entry point is [`Shell`], which owns the builtin
//! [`Registry`](builtin::Registry) and drives the interactive loop. The
//! public modules [`command`], [`builtin`] and [`lexer`] expose the
//! building blocks for embedding the dispatcher without the loop.
//!
//! ```
//! use minish::{Flow, Shell};
//!
//! let shell = Shell::default();
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let flow = shell.execute(&["help".to_string()], &mut out, &mut err);
//! assert_eq!(flow, Flow::Continue);
//! ```
//!
//! Deliberately out of scope: pipelines, redirection, quoting, variables,
//! job control and command history. A command line is exactly one program
//! name followed by its arguments.

pub mod builtin;
pub mod command;
mod external;
mod interpreter;
pub mod lexer;

pub use command::Flow;
pub use interpreter::Shell;

/// Name used to prefix every diagnostic written to standard error.
pub(crate) const SHELL_NAME: &str = "minish";

/// Prompt written before each line is read.
pub(crate) const PROMPT: &str = ">> ";
