use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::SHELL_NAME;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use std::marker::PhantomData;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// One-line description shown by `help`.
    fn description() -> &'static str;

    /// Executes the command using the provided output sinks.
    fn run(
        self,
        registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        match T::run(*self, registry, stdout, stderr) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                // The {:#} form includes the OS error under the context line.
                writeln!(stderr, "{}: {:#}", SHELL_NAME, e)?;
                Ok(Flow::Continue)
            }
        }
    }
}

/// Result of a failed (or short-circuited, e.g. `--help`) argh parse.
///
/// Wrapping it as a command keeps the dispatcher oblivious to how builtin
/// arguments are validated.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _registry: &Registry,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        if self.is_error {
            writeln!(stderr, "{}: {}", SHELL_NAME, self.output.trim_end())?;
        } else {
            stdout.write_all(self.output.as_bytes())?;
        }
        Ok(Flow::Continue)
    }
}

/// Generic factory producing one builtin type.
pub(crate) struct Factory<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn description(&self) -> &'static str {
        T::description()
    }

    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

/// Immutable table of builtin commands, built once at startup.
///
/// Lookup is exact string equality against factory names, in registration
/// order; the default set contains no duplicates, so the order is only
/// observable through [`Registry::list`] and the `help` output.
pub struct Registry {
    factories: Vec<Box<dyn CommandFactory>>,
}

impl Registry {
    /// Build the default registry: `cd`, `help`, `exit`.
    pub fn with_default_builtins() -> Self {
        Self {
            factories: vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        }
    }

    /// Find the builtin registered under `name` and instantiate it with
    /// `args`. Returns `None` when no builtin claims the name.
    pub fn resolve(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        self.factories
            .iter()
            .find_map(|factory| factory.try_create(name, args))
    }

    /// Enumerate (name, description) pairs in registration order.
    pub fn list(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.factories
            .iter()
            .map(|factory| (factory.name(), factory.description()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_builtins()
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to, absolute or relative to the current one;
    /// tokens after the first are accepted and ignored
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn description() -> &'static str {
        "change the current working directory"
    }

    fn run(
        self,
        _registry: &Registry,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        // Only the first token names the target; the rest is ignored.
        let target = match self.args.first() {
            Some(t) if !t.is_empty() => t,
            _ => {
                writeln!(stderr, "{}: expected argument to \"cd\"", SHELL_NAME)?;
                return Ok(Flow::Continue);
            }
        };

        env::set_current_dir(target).with_context(|| format!("cd: {}", target))?;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Show the commands built into the shell.
pub struct Help {
    #[argh(positional, greedy)]
    /// trailing tokens are accepted and ignored
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "show this list of builtin commands"
    }

    fn run(
        self,
        registry: &Registry,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> Result<Flow> {
        writeln!(stdout, "{}: type a program name and arguments, then press enter.", SHELL_NAME)?;
        writeln!(stdout, "The following commands are built in:")?;
        for (name, description) in registry.list() {
            writeln!(stdout, "  {:<8}{}", name, description)?;
        }
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// trailing tokens are accepted and ignored
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn description() -> &'static str {
        "leave the shell"
    }

    fn run(
        self,
        _registry: &Registry,
        _stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
    ) -> Result<Flow> {
        // No process::exit here: termination is the loop's job.
        Ok(Flow::Exit)
    }
}
