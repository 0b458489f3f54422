//! Move-selection policy contract.
//!
//! A `MovePolicy` picks one move out of the legal moves available in a
//! position. This crate ships the contract only, no concrete policy: a
//! random mover, a material-count search, or a UCI-driven external engine
//! are all equally valid implementations, and none of them belongs in a
//! rules crate. The trait has exactly one method and callers that need a
//! policy take `impl MovePolicy` / `<P: MovePolicy>` generically rather than
//! a boxed `dyn MovePolicy` - nothing here needs type erasure.

use crate::movegen::MoveList;
use crate::Position;
use chess_core::Move;

/// Chooses a move from the legal moves available in `position`.
///
/// Implementations may assume `legal_moves` was produced by
/// [`crate::movegen::generate_moves`] for `position` and is therefore
/// non-empty when a move should be chosen; callers are responsible for
/// checking game-over conditions before asking a policy to move.
pub trait MovePolicy {
    /// Returns the chosen move. Implementations that need randomness or
    /// search state should hold it in `&mut self`, not here.
    fn choose_move(&mut self, position: &Position, legal_moves: &MoveList) -> Move;
}

/// Plays out `depth` plies from `position` by repeatedly asking `policy` for
/// a move, stopping early if the game ends. Generic over `P: MovePolicy`,
/// not `Box<dyn MovePolicy>`: the caller picks the concrete policy type at
/// compile time and no indirection is paid for at each move.
pub fn play_out<P: MovePolicy>(position: &Position, policy: &mut P, depth: u32) -> Position {
    let mut current = position.clone();
    for _ in 0..depth {
        let moves = crate::movegen::generate_moves(&current);
        if moves.is_empty() {
            break;
        }
        let chosen = policy.choose_move(&current, &moves);
        current.make_move(chosen);
    }
    current
}
