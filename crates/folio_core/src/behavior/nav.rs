//! Mobile navigation menu transitions.
//!
//! Two states, `Closed` (initial) and `Open`. The toggle flips; following a
//! menu link or pressing Escape forces `Closed` from either state.

use crate::state::MenuState;

/// Inputs that move the menu state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Toggle,
    LinkFollowed,
    Escape,
}

/// Returns the menu state after `command`.
pub fn apply(state: MenuState, command: MenuCommand) -> MenuState {
    match command {
        MenuCommand::Toggle => state.toggled(),
        MenuCommand::LinkFollowed | MenuCommand::Escape => MenuState::Closed,
    }
}
