//! This module provides the line console used to drive the client interactively.
//! It includes the `console_command` module for parsing input lines and
//! the `console_messenger` module that executes them against the claim controller.

mod console_command;
mod console_messenger;
#[cfg(test)]
mod tests;

pub(crate) use console_command::{ConsoleCommand, ConsoleError, ConsoleVerb, PositionUpdate};
pub(crate) use console_messenger::ConsoleMessenger;
