//! Sinks for the command stream.

use std::io::{self, Write};

use crate::domain::Command;

/// Receives fully resolved commands in evaluation order.
pub trait CommandEmitter {
    fn emit(&mut self, command: Command) -> io::Result<()>;
}

impl<E: CommandEmitter + ?Sized> CommandEmitter for &mut E {
    fn emit(&mut self, command: Command) -> io::Result<()> {
        (**self).emit(command)
    }
}

/// Keeps every command in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLog {
    commands: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands rendered one per entry, as the generator would read them.
    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }
}

impl CommandEmitter for CommandLog {
    fn emit(&mut self, command: Command) -> io::Result<()> {
        self.commands.push(command);
        Ok(())
    }
}

/// Writes one command per line.
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    out: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> CommandEmitter for LineWriter<W> {
    fn emit(&mut self, command: Command) -> io::Result<()> {
        writeln!(self.out, "{}", command)
    }
}
