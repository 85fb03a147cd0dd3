//! Agent port - the interface every participant in an episode implements
//!
//! Both sides of a game speak through this trait:
//! - the player, which slides the board (and may learn from what follows)
//! - the environment, which inserts new tiles
//!
//! Capabilities are composed inside each implementation (a value function,
//! a learning rate, a random source) rather than inherited.

use crate::{
    Result,
    threes::{Action, Board},
};

/// Agent trait - unified interface for players and environments
///
/// # Examples
///
/// ```no_run
/// use threes_td::{
///     ports::Agent,
///     threes::{Action, Board},
/// };
///
/// fn first_action<A: Agent>(agent: &mut A) -> Action {
///     agent.take_action(&Board::new())
/// }
/// ```
pub trait Agent: Send {
    /// Choose an action for the given board.
    ///
    /// Returning [`Action::NoOp`] signals that the agent has no legal action.
    fn take_action(&mut self, board: &Board) -> Action;

    /// Update internal state after a full turn.
    ///
    /// `before` is the board the agent acted on; `after` is the board once
    /// both the agent and its opponent have moved.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-adaptive agents.
    fn learn(&mut self, _before: &Board, _after: &Board) -> Result<()> {
        Ok(())
    }

    /// Called before the first action of an episode.
    fn open_episode(&mut self) {}

    /// Called after the last action of an episode.
    fn close_episode(&mut self) {}

    /// Get the agent's name.
    ///
    /// Used for identification in statistics and logging.
    fn name(&self) -> &str;

    /// Get the agent's role ("player" or "environment").
    fn role(&self) -> &str;

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
