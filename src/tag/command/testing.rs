use super::payload::Command;
use super::sink::ICommandSink;

/// A purely in-memory sink that keeps every command it receives.
/// Exposes the recorded commands for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<Command>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl ICommandSink for RecordingSink {
    fn submit(&mut self, command: Command) {
        self.commands.push(command);
    }
}
