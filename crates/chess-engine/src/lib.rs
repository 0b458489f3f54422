//! Chess rules engine: position representation, legal move generation, and
//! game-ending condition checks.
//!
//! This crate has no knowledge of UCI, search, or evaluation - it answers
//! exactly one question, "given this position, what are the legal moves and
//! is the game over", and answers it deterministically.
//!
//! # Architecture
//!
//! [`Position`] holds bitboards for each piece type/color combination.
//! [`movegen::generate_moves`] produces legal moves by generating
//! pseudo-legal moves and discarding any that leave the mover's own king in
//! check. [`is_checkmate`], [`is_stalemate`], and [`is_insufficient_material`]
//! answer the game-ending questions this crate cares about; the fifty-move
//! rule needs no move generation at all, so callers check
//! `position.halfmove_clock >= 100` directly.
//!
//! # Example
//!
//! ```
//! use chess_engine::{generate_moves, Position};
//!
//! let position = Position::startpos();
//! let moves = generate_moves(&position);
//! println!("Legal moves from starting position: {}", moves.len());
//! ```

mod bitboard;
pub mod movegen;
mod policy;
mod position;
mod rules;

pub use bitboard::Bitboard;
pub use movegen::{
    bishop_attacks, generate_moves, is_king_attacked, is_square_attacked, king_attacks,
    knight_attacks, pawn_attacks, queen_attacks, rook_attacks, MoveList,
};
pub use policy::{play_out, MovePolicy};
pub use position::{CastlingRights, Position};
pub use rules::{is_checkmate, is_insufficient_material, is_stalemate};
