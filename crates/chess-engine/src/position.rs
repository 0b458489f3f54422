//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Move, Piece, Square};

use crate::Bitboard;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Bitboards for each piece type, indexed by Piece enum.
    pub pieces: [Bitboard; 6],

    /// Bitboards for each color's pieces.
    pub colors: [Bitboard; 2],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square, or [`Square::NONE`] if none is available.
    pub en_passant: Square,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: Square::NONE,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        // Parse piece placement
        let ranks: Vec<&str> = parsed.piece_placement.split('/').collect();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx; // FEN starts from rank 8
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    let sq = unsafe { Square::from_index_unchecked((rank * 8 + file) as u8) };
                    position.pieces[piece.index()].set(sq);
                    position.colors[color.index()].set(sq);
                    file += 1;
                }
            }
        }

        // Active color
        position.side_to_move = match parsed.active_color {
            'w' => Color::White,
            'b' => Color::Black,
            _ => unreachable!("FEN parser validated this"),
        };

        // Castling rights
        let mut castling = 0u8;
        for c in parsed.castling.chars() {
            match c {
                'K' => castling |= CastlingRights::WHITE_KINGSIDE,
                'Q' => castling |= CastlingRights::WHITE_QUEENSIDE,
                'k' => castling |= CastlingRights::BLACK_KINGSIDE,
                'q' => castling |= CastlingRights::BLACK_QUEENSIDE,
                '-' => {}
                _ => {}
            }
        }
        position.castling = CastlingRights::new(castling);

        // En passant
        position.en_passant = if parsed.en_passant == "-" {
            Square::NONE
        } else {
            Square::from_algebraic(&parsed.en_passant).unwrap_or(Square::NONE)
        };

        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        // Piece placement
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let sq = unsafe { Square::from_index_unchecked(rank * 8 + file) };
                if let Some((piece, color)) = self.piece_at(sq) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        // Active color
        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        // Castling
        fen.push(' ');
        if self.castling.raw() == 0 {
            fen.push('-');
        } else {
            if self.castling.can_castle_kingside(Color::White) {
                fen.push('K');
            }
            if self.castling.can_castle_queenside(Color::White) {
                fen.push('Q');
            }
            if self.castling.can_castle_kingside(Color::Black) {
                fen.push('k');
            }
            if self.castling.can_castle_queenside(Color::Black) {
                fen.push('q');
            }
        }

        // En passant
        fen.push(' ');
        fen.push_str(&self.en_passant.to_algebraic());

        // Halfmove clock and fullmove number
        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }

    /// Returns the piece and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let bb = Bitboard::from_square(sq);

        // Check if any piece is on this square
        let color = if (self.colors[Color::White.index()] & bb).is_not_empty() {
            Color::White
        } else if (self.colors[Color::Black.index()] & bb).is_not_empty() {
            Color::Black
        } else {
            return None;
        };

        // Find which piece type
        for piece in Piece::ALL {
            if (self.pieces[piece.index()] & bb).is_not_empty() {
                return Some((piece, color));
            }
        }

        None
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Returns a bitboard of all empty squares.
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    /// Applies `m` to this position in place, classifying it into one of
    /// five cases (castling, en passant capture, promotion, double push, or
    /// an ordinary move/capture) and updating castling rights, the en
    /// passant square, the halfmove clock, the side to move, and the
    /// fullmove number accordingly.
    ///
    /// Returns `true` if `m` named a piece of the side to move, satisfied
    /// any case-specific preconditions (castling rights, empty path, rook
    /// present, king not passing through check), and did not leave that
    /// side's own king in check; returns `false` otherwise.
    ///
    /// Castling validates every precondition before touching any bitboard,
    /// so a rejected castle leaves `self` untouched. The other cases still
    /// mutate before the final king-safety check: on a `false` return from
    /// one of those, `self` may already reflect the attempted move. Safe
    /// usage is either (a) only ever calling this on a position you are
    /// willing to discard on failure, or (b) operating on a disposable
    /// clone and discarding it on `false` - which is exactly what the
    /// pseudo-legal-to-legal filter in `movegen` does.
    pub fn make_move(&mut self, m: Move) -> bool {
        if !m.is_well_formed() {
            return false;
        }

        let us = self.side_to_move;
        let them = us.opposite();
        let from = m.from;
        let to = m.to;

        let Some((piece, mover_color)) = self.piece_at(from) else {
            return false;
        };
        if mover_color != us {
            return false;
        }

        let is_castle = piece == Piece::King
            && ((us == Color::White && from == Square::E1 && (to == Square::G1 || to == Square::C1))
                || (us == Color::Black
                    && from == Square::E8
                    && (to == Square::G8 || to == Square::C8)));
        let is_en_passant = piece == Piece::Pawn && self.en_passant.is_some() && to == self.en_passant;
        let is_double_push = piece == Piece::Pawn
            && !is_en_passant
            && (to.index() as i16 - from.index() as i16).abs() == 16;
        let promotion_rank = match us {
            Color::White => 7,
            Color::Black => 0,
        };
        let is_promotion = piece == Piece::Pawn && to.rank().index() == promotion_rank;

        // Castling re-verifies spec Case 1's preconditions itself (right
        // held, path empty, king not in check, transit square not attacked)
        // rather than relying on the caller to have sourced `m` from
        // `generate_moves` - unlike the other branches below, nothing here
        // mutates `self` until every precondition has passed.
        if is_castle {
            let kingside = to == Square::G1 || to == Square::G8;
            let has_right = if kingside {
                self.castling.can_castle_kingside(us)
            } else {
                self.castling.can_castle_queenside(us)
            };
            if !has_right {
                return false;
            }

            let (rook_from, rook_to, pass_through, between) = match (us, kingside) {
                (Color::White, true) => (
                    Square::H1,
                    Square::F1,
                    Square::F1,
                    Bitboard::from_square(Square::F1) | Bitboard::from_square(Square::G1),
                ),
                (Color::White, false) => (
                    Square::A1,
                    Square::D1,
                    Square::D1,
                    Bitboard::from_square(Square::B1)
                        | Bitboard::from_square(Square::C1)
                        | Bitboard::from_square(Square::D1),
                ),
                (Color::Black, true) => (
                    Square::H8,
                    Square::F8,
                    Square::F8,
                    Bitboard::from_square(Square::F8) | Bitboard::from_square(Square::G8),
                ),
                (Color::Black, false) => (
                    Square::A8,
                    Square::D8,
                    Square::D8,
                    Bitboard::from_square(Square::B8)
                        | Bitboard::from_square(Square::C8)
                        | Bitboard::from_square(Square::D8),
                ),
            };

            if self.piece_at(rook_from) != Some((Piece::Rook, us)) {
                return false;
            }
            if (self.occupied() & between).is_not_empty() {
                return false;
            }
            if crate::movegen::is_king_attacked(self, us) {
                return false;
            }
            if crate::movegen::is_square_attacked(self, pass_through, them) {
                return false;
            }

            self.pieces[Piece::King.index()].clear(from);
            self.colors[us.index()].clear(from);
            self.pieces[Piece::King.index()].set(to);
            self.colors[us.index()].set(to);
            self.pieces[Piece::Rook.index()].clear(rook_from);
            self.colors[us.index()].clear(rook_from);
            self.pieces[Piece::Rook.index()].set(rook_to);
            self.colors[us.index()].set(rook_to);
            self.castling.remove_color(us);

            self.en_passant = Square::NONE;
            self.halfmove_clock += 1;
            if us == Color::Black {
                self.fullmove_number += 1;
            }
            self.side_to_move = them;

            return !crate::movegen::is_king_attacked(self, us);
        }

        // Remove the mover from its source square.
        self.pieces[piece.index()].clear(from);
        self.colors[us.index()].clear(from);

        let mut is_capture = false;

        if is_en_passant {
            let captured_sq = match us {
                Color::White => unsafe { Square::from_index_unchecked(to.index() - 8) },
                Color::Black => unsafe { Square::from_index_unchecked(to.index() + 8) },
            };
            self.pieces[Piece::Pawn.index()].clear(captured_sq);
            self.colors[them.index()].clear(captured_sq);
            self.pieces[Piece::Pawn.index()].set(to);
            self.colors[us.index()].set(to);
            is_capture = true;
        } else {
            // Ordinary move, capture, double push, or promotion: all share
            // the same "remove whatever is on `to`, place the mover (or its
            // promoted form) on `to`" shape.
            if let Some((captured, captured_color)) = self.piece_at(to) {
                self.pieces[captured.index()].clear(to);
                self.colors[captured_color.index()].clear(to);
                is_capture = true;
            }
            let dest_piece = if is_promotion {
                m.promotion.unwrap_or(Piece::Queen)
            } else {
                piece
            };
            self.pieces[dest_piece.index()].set(to);
            self.colors[us.index()].set(to);

            if piece == Piece::King {
                self.castling.remove_color(us);
            }
            if piece == Piece::Rook {
                match (us, from) {
                    (Color::White, sq) if sq == Square::H1 => self.castling.remove_kingside(us),
                    (Color::White, sq) if sq == Square::A1 => self.castling.remove_queenside(us),
                    (Color::Black, sq) if sq == Square::H8 => self.castling.remove_kingside(us),
                    (Color::Black, sq) if sq == Square::A8 => self.castling.remove_queenside(us),
                    _ => {}
                }
            }
        }

        // A capture landing on a rook's home square removes that rook's
        // castling right, regardless of which case above fired.
        match to {
            sq if sq == Square::H1 => self.castling.remove_kingside(Color::White),
            sq if sq == Square::A1 => self.castling.remove_queenside(Color::White),
            sq if sq == Square::H8 => self.castling.remove_kingside(Color::Black),
            sq if sq == Square::A8 => self.castling.remove_queenside(Color::Black),
            _ => {}
        }

        // En passant target is set only immediately after a double push,
        // and only to the square the capturing pawn would land on.
        self.en_passant = if is_double_push {
            match us {
                Color::White => unsafe { Square::from_index_unchecked(to.index() - 8) },
                Color::Black => unsafe { Square::from_index_unchecked(to.index() + 8) },
            }
        } else {
            Square::NONE
        };

        if piece == Piece::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = them;

        !crate::movegen::is_king_attacked(self, us)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Rank};

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(pos.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(pos.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(pos.piece_at(Square::new(File::E, Rank::R4)), None);
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));
    }

    #[test]
    fn castling_rights_remove_queenside() {
        let mut rights = CastlingRights::ALL;
        rights.remove_queenside(Color::Black);
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn castling_rights_remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn castling_rights_none() {
        let rights = CastlingRights::NONE;
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
        assert_eq!(rights.raw(), 0);
    }

    #[test]
    fn position_empty() {
        let pos = Position::empty();
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.castling.raw(), 0);
        assert!(pos.en_passant.is_none());
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert!(pos.occupied().is_empty());
    }

    #[test]
    fn position_default() {
        let pos = Position::default();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn position_occupied_empty() {
        let pos = Position::startpos();
        // Starting position has 32 pieces
        assert_eq!(pos.occupied().count(), 32);
        assert_eq!(pos.empty_squares().count(), 32);
    }

    #[test]
    fn position_pieces_of() {
        let pos = Position::startpos();
        // White pawns on rank 2
        assert_eq!(pos.pieces_of(Piece::Pawn, Color::White).count(), 8);
        // Black pawns on rank 7
        assert_eq!(pos.pieces_of(Piece::Pawn, Color::Black).count(), 8);
        // One king each
        assert_eq!(pos.pieces_of(Piece::King, Color::White).count(), 1);
        assert_eq!(pos.pieces_of(Piece::King, Color::Black).count(), 1);
    }

    #[test]
    fn position_with_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert!(pos.en_passant.is_some());
        assert_eq!(pos.en_passant.to_algebraic(), "e3");
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn position_no_castling() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert!(!pos.castling.can_castle_kingside(Color::White));
        assert!(!pos.castling.can_castle_queenside(Color::White));
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn position_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.side_to_move, Color::Black);
    }

    #[test]
    fn make_move_pawn_double_push_sets_en_passant() {
        let mut pos = Position::startpos();
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert!(pos.make_move(Move::normal(e2, e4)));
        assert_eq!(pos.side_to_move, Color::Black);
        assert!(pos.piece_at(e4).is_some());
        assert!(pos.piece_at(e2).is_none());
        assert_eq!(pos.en_passant.to_algebraic(), "e3");
        assert_eq!(pos.halfmove_clock, 0);
    }

    #[test]
    fn make_move_capture_resets_halfmove_clock() {
        let mut pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
                .unwrap();
        let e4 = Square::new(File::E, Rank::R4);
        let d5 = Square::new(File::D, Rank::R5);
        assert!(pos.make_move(Move::normal(e4, d5)));
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.piece_at(d5), Some((Piece::Pawn, Color::White)));
    }

    #[test]
    fn make_move_kingside_castle_moves_rook() {
        let mut pos =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        assert!(pos.make_move(Move::normal(Square::E1, Square::G1)));
        assert_eq!(pos.piece_at(Square::G1), Some((Piece::King, Color::White)));
        assert_eq!(pos.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
        assert!(pos.piece_at(Square::H1).is_none());
        assert!(!pos.castling.can_castle_kingside(Color::White));
        assert!(!pos.castling.can_castle_queenside(Color::White));
    }

    #[test]
    fn make_move_en_passant_removes_captured_pawn() {
        let mut pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        let f5 = Square::new(File::F, Rank::R5);
        let e6 = Square::new(File::E, Rank::R6);
        assert!(pos.make_move(Move::normal(f5, e6)));
        assert_eq!(pos.piece_at(e6), Some((Piece::Pawn, Color::White)));
        assert!(pos.piece_at(Square::new(File::E, Rank::R5)).is_none());
        assert_eq!(pos.halfmove_clock, 0);
    }

    #[test]
    fn make_move_promotion_replaces_pawn() {
        let mut pos = Position::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let a7 = Square::new(File::A, Rank::R7);
        let a8 = Square::new(File::A, Rank::R8);
        assert!(pos.make_move(Move::promoting(a7, a8, Piece::Queen)));
        assert_eq!(pos.piece_at(a8), Some((Piece::Queen, Color::White)));
    }

    #[test]
    fn make_move_rejects_move_leaving_own_king_in_check() {
        // White king on e1 pinned-adjacent; moving the e2 pawn would leave
        // it exposed to the rook on e8.
        let mut pos = Position::from_fen("4r2k/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let e2 = Square::new(File::E, Rank::R2);
        let d3 = Square::new(File::D, Rank::R3);
        assert!(!pos.make_move(Move::normal(e2, d3)));
    }

    #[test]
    fn make_move_rejects_move_of_absent_piece() {
        let mut pos = Position::startpos();
        let e3 = Square::new(File::E, Rank::R3);
        let e4 = Square::new(File::E, Rank::R4);
        assert!(!pos.make_move(Move::normal(e3, e4)));
    }

    #[test]
    fn make_move_rejects_castle_with_no_rights_and_leaves_position_untouched() {
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        assert!(!pos.make_move(Move::normal(Square::E1, Square::G1)));
        assert_eq!(pos, before);
        assert_eq!(pos.piece_at(Square::H1), Some((Piece::Rook, Color::White)));
        assert_eq!(pos.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert!(pos.piece_at(Square::F1).is_none());
        assert!(pos.piece_at(Square::G1).is_none());
    }

    #[test]
    fn make_move_rejects_castle_with_blocked_path() {
        // Knight sitting on g1 blocks the kingside castle even though the
        // right is present.
        let fen = "4k3/8/8/8/8/8/8/4K1NR w K - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        assert!(!pos.make_move(Move::normal(Square::E1, Square::G1)));
        assert_eq!(pos, before);
    }

    #[test]
    fn make_move_rejects_castle_with_rook_missing() {
        // Castling right claims kingside is available, but there is no rook
        // on h1 to relocate.
        let fen = "4k3/8/8/8/8/8/8/4K3 w K - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        assert!(!pos.make_move(Move::normal(Square::E1, Square::G1)));
        assert_eq!(pos, before);
    }

    #[test]
    fn make_move_rejects_castle_through_check() {
        // Black rook on f8 attacks f1, the square the white king must pass
        // through to reach g1.
        let fen = "5r1k/8/8/8/8/8/8/4K2R w K - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        assert!(!pos.make_move(Move::normal(Square::E1, Square::G1)));
        assert_eq!(pos, before);
    }

    #[test]
    fn make_move_rejects_castle_while_in_check() {
        let fen = "4r2k/8/8/8/8/8/8/4K2R w K - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        assert!(!pos.make_move(Move::normal(Square::E1, Square::G1)));
        assert_eq!(pos, before);
    }

    #[test]
    fn make_move_clears_the_actual_occupant_color_at_the_destination() {
        // King "captures" its own rook on h1. generate_moves would never
        // offer this, but make_move takes a bare `Move` and must still
        // leave the piece bitboards disjoint: the rook actually occupying
        // `to` has to be cleared by its real color (White), not by
        // assuming whoever is there is the opponent (Black).
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        pos.make_move(Move::normal(Square::E1, Square::H1));

        // No square may be claimed by two piece types at once.
        for a in Piece::ALL {
            for b in Piece::ALL {
                if a != b {
                    assert!((pos.pieces[a.index()] & pos.pieces[b.index()]).is_empty());
                }
            }
        }
        assert!(!pos.pieces[Piece::Rook.index()].contains(Square::H1));
        assert_eq!(pos.piece_at(Square::H1), Some((Piece::King, Color::White)));
    }
}
