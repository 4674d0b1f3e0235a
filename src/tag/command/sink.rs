#[cfg(test)]
use mockall::automock;

use super::payload::Command;

/// Receiver of outbound commands, typically the reader transport or the
/// interactive surface. Delivery is fire-and-forget.
#[cfg_attr(test, automock)]
pub trait ICommandSink {
    fn submit(&mut self, command: Command);
}
