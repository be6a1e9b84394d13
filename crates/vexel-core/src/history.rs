//! Bounded undo/redo stacks.

use crate::command::Command;

/// Default undo depth.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Two-stack edit history. The history never touches the document; it
/// hands commands back to the caller, who replays them via
/// [`Command::revert`] / [`Command::reapply`].
#[derive(Debug, Clone)]
pub struct CommandHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    capacity: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_UNDO_HISTORY)
    }

    /// History bounded to `capacity` undo entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a completed command. Any redoable future is discarded,
    /// and the oldest entry is evicted once the stack is full.
    pub fn push(&mut self, command: Command) {
        self.redo_stack.clear();
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.capacity {
            log::debug!("undo history full, evicting oldest command");
            self.undo_stack.remove(0);
        }
    }

    /// Pop the most recent command for the caller to revert. `None` on
    /// an empty stack (underflow is a no-op, never an error).
    pub fn undo(&mut self) -> Option<Command> {
        let command = self.undo_stack.pop()?;
        self.redo_stack.push(command.clone());
        Some(command)
    }

    /// Pop the most recently undone command for the caller to reapply.
    pub fn redo(&mut self) -> Option<Command> {
        let command = self.redo_stack.pop()?;
        self.undo_stack.push(command.clone());
        Some(command)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Forget everything, e.g. after loading a different document.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
