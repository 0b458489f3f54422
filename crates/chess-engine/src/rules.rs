//! Game-ending condition checks: checkmate, stalemate, and insufficient
//! material.
//!
//! These are plain functions over a [`Position`] rather than a trait object,
//! since there is exactly one rule set here (no variant-chess dispatch) and
//! a trait would only add indirection. The fifty-move rule is not checked
//! here because it needs no board inspection at all: callers compare
//! `position.halfmove_clock` against 100 directly.

use crate::movegen::{generate_moves, is_king_attacked};
use crate::Bitboard;
use chess_core::{Color, Piece};

use crate::Position;

/// Returns true if `color` has no legal moves and is currently in check.
pub fn is_checkmate(position: &Position, color: Color) -> bool {
    position.side_to_move == color
        && is_king_attacked(position, color)
        && generate_moves(position).is_empty()
}

/// Returns true if `color` has no legal moves but is not in check.
pub fn is_stalemate(position: &Position, color: Color) -> bool {
    position.side_to_move == color
        && !is_king_attacked(position, color)
        && generate_moves(position).is_empty()
}

/// Returns true if neither side has enough material to deliver checkmate.
///
/// Covers the four combinations recognized by the standard rules: king vs.
/// king, king+knight vs. king, king+bishop vs. king, and king+bishop vs.
/// king+bishop with both bishops on the same color of square. Any other
/// material (a second minor piece, a pawn, a rook, a queen) is assumed
/// capable of forcing or avoiding mate and is not treated as insufficient.
pub fn is_insufficient_material(position: &Position) -> bool {
    let non_king_pieces = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

    let has_heavy_or_pawn = non_king_pieces
        .iter()
        .filter(|p| **p != Piece::Knight && **p != Piece::Bishop)
        .any(|p| (position.pieces[p.index()]).is_not_empty());
    if has_heavy_or_pawn {
        return false;
    }

    let white_knights = position.pieces_of(Piece::Knight, Color::White).count();
    let white_bishops = position.pieces_of(Piece::Bishop, Color::White).count();
    let black_knights = position.pieces_of(Piece::Knight, Color::Black).count();
    let black_bishops = position.pieces_of(Piece::Bishop, Color::Black).count();

    let white_minors = white_knights + white_bishops;
    let black_minors = black_knights + black_bishops;

    match (white_minors, black_minors) {
        // King vs. king.
        (0, 0) => true,
        // A single minor against a bare king, either side.
        (1, 0) | (0, 1) => true,
        // Bishop vs. bishop: insufficient only if both are on the same
        // color of square.
        (1, 1) if white_bishops == 1 && black_bishops == 1 => {
            let all_bishops =
                position.pieces_of(Piece::Bishop, Color::White) | position.pieces_of(Piece::Bishop, Color::Black);
            (all_bishops & Bitboard::LIGHT_SQUARES) == all_bishops
                || (all_bishops & Bitboard::DARK_SQUARES) == all_bishops
        }
        _ => false,
    }
}
