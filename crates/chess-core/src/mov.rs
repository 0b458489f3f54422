//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// A chess move: a source square, a destination square, and an optional
/// promotion piece.
///
/// Special-move classification (castling, en passant, double push) is not
/// carried on `Move` itself: it is derived contextually from the position
/// that the move is applied to, the same way the UCI wire format expresses
/// it (`e1g1` is "castling" only because the piece standing on `e1` is a
/// king). `Move` stays a plain, context-free description of "what square to
/// what square, promoting to what".
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    /// Creates a new move with no promotion.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promotion move.
    #[inline]
    pub const fn promoting(from: Square, to: Square, promotion: Piece) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Returns true if both squares are real squares (not [`Square::NONE`]).
    ///
    /// A `Move` built by [`Move::from_uci`] from malformed text is
    /// structurally invalid exactly when this is false.
    #[inline]
    pub const fn is_well_formed(self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    ///
    /// The null/invalid move (both squares [`Square::NONE`]) encodes as
    /// `"0000"`, matching the UCI convention for a null move.
    pub fn to_uci(self) -> String {
        if self.from.is_none() && self.to.is_none() {
            return "0000".to_string();
        }
        let promo = match self.promotion {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses a move from UCI notation.
    ///
    /// Malformed input never raises: it is reported by returning an invalid
    /// move whose `from`/`to` are both [`Square::NONE`], mirroring the null
    /// move `"0000"`. Only `from`/`to`/`promotion` are recovered here; the
    /// caller (the move generator, given the position the move applies to)
    /// is responsible for confirming the move is actually legal.
    pub fn from_uci(s: &str) -> Self {
        if s == "0000" {
            return Move::NULL;
        }
        if s.len() < 4 || s.len() > 5 {
            return Move::NULL;
        }
        let from = match Square::from_algebraic(&s[0..2]) {
            Some(sq) => sq,
            None => return Move::NULL,
        };
        let to = match Square::from_algebraic(&s[2..4]) {
            Some(sq) => sq,
            None => return Move::NULL,
        };
        let promotion = if s.len() == 5 {
            match s.as_bytes()[4].to_ascii_lowercase() {
                b'n' => Some(Piece::Knight),
                b'b' => Some(Piece::Bishop),
                b'r' => Some(Piece::Rook),
                b'q' => Some(Piece::Queen),
                _ => return Move::NULL,
            }
        } else {
            None
        };
        Move {
            from,
            to,
            promotion,
        }
    }

    /// The null move: both squares are [`Square::NONE`]. Used as a
    /// placeholder and as the result of parsing malformed UCI text; never a
    /// legal move.
    pub const NULL: Move = Move {
        from: Square::NONE,
        to: Square::NONE,
        promotion: None,
    };
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
