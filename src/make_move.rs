//! Applying a move to a position, and taking it back.
//!
//! `make_move` returns a `MoveUndo` holding everything it changed.  Pass that record to
//! `undo_move` (exactly once, and before any other move is taken back) to get the position back
//! exactly as it was.

use crate::castle_rights::{CastleRights, CastleSide};
use crate::chess_move::{ChessMove, MoveKind};
use crate::color::Color;
use crate::error::{EngineError, EngineResult};
use crate::file::File;
use crate::piece::{ColoredPiece, Piece};
use crate::position::Position;
use crate::square::Square;
use tracing::debug;

/// Everything needed to reverse one applied move.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct MoveUndo {
    source: Square,
    dest: Square,
    moved: ColoredPiece,
    captured: Option<(ColoredPiece, Square)>,
    kind: MoveKind,
    side_to_move: Color,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl MoveUndo {
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }

    /// The piece that moved, as it stood on the source square (a pawn, for promotions).
    #[inline]
    pub fn moved(&self) -> ColoredPiece {
        self.moved
    }

    /// The captured piece and the square it was taken from.  For en passant that is not the
    /// destination square.
    #[inline]
    pub fn captured(&self) -> Option<(ColoredPiece, Square)> {
        self.captured
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }
}

fn reject(chess_move: ChessMove, reason: &str) -> EngineError {
    debug!(mv = %chess_move, reason, "move rejected");
    EngineError::illegal(format!("{}: {}", chess_move, reason))
}

/// Apply `chess_move` to `position`.
///
/// Only the basic preconditions are checked here: the source holds a piece of the side to move,
/// the destination does not hold a friendly piece, and special moves are consistent with the
/// board.  The move may still leave the mover in check; `ChessEngine::legal_moves` filters those.
///
/// ```
/// use chess_rules::{make_move, undo_move, ChessMove, Position, Square};
///
/// let mut position = Position::default();
/// let undo = make_move(&mut position, ChessMove::quiet(Square::E2, Square::E4)).unwrap();
/// assert_eq!(position.en_passant(), Some(Square::E3));
/// undo_move(&mut position, &undo);
/// assert_eq!(position, Position::default());
/// ```
pub fn make_move(position: &mut Position, chess_move: ChessMove) -> EngineResult<MoveUndo> {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    let mover = position.side_to_move();

    let moved = match position.piece_on(source) {
        Some(p) => p,
        None => return Err(reject(chess_move, "no piece on the source square")),
    };
    if moved.color != mover {
        return Err(reject(chess_move, "piece does not belong to the side to move"));
    }
    if source == dest {
        return Err(reject(chess_move, "source and destination are the same square"));
    }
    if let Some(p) = position.piece_on(dest) {
        if p.color == mover {
            return Err(reject(chess_move, "destination holds a friendly piece"));
        }
    }
    let promotion = if chess_move.is_promotion() {
        match chess_move.get_promotion() {
            Some(piece) if piece.is_promotion_target() && moved.piece == Piece::Pawn => Some(piece),
            _ => return Err(reject(chess_move, "bad promotion")),
        }
    } else {
        None
    };

    let kind = chess_move.kind();
    let undo_base = MoveUndo {
        source,
        dest,
        moved,
        captured: None,
        kind,
        side_to_move: mover,
        castle_rights: position.castle_rights(),
        en_passant: position.en_passant(),
        halfmove_clock: position.halfmove_clock(),
        fullmove_number: position.fullmove_number(),
    };

    let captured = match kind {
        MoveKind::Castling => {
            apply_castle(position, chess_move, moved)?;
            None
        }
        MoveKind::EnPassant => {
            let victim_sq = Square::make_square(source.get_rank(), dest.get_file());
            if moved.piece != Piece::Pawn
                || position.en_passant() != Some(dest)
                || !position.has(victim_sq, Piece::Pawn, !mover)
            {
                return Err(reject(chess_move, "en passant is not available"));
            }
            let victim = position.clear_square(victim_sq);
            position.clear_square(source);
            position.set_piece(dest, moved);
            victim.map(|v| (v, victim_sq))
        }
        _ => {
            let taken = position.clear_square(dest).map(|p| (p, dest));
            position.clear_square(source);
            let placed = match promotion {
                Some(piece) => ColoredPiece::new(piece, mover),
                None => moved,
            };
            position.set_piece(dest, placed);
            taken
        }
    };

    let mut rights = position.castle_rights();
    if moved.piece == Piece::King {
        rights = rights.remove_color(mover);
    }
    rights = rights.remove_rook_square(mover, source);
    if let Some((_, sq)) = captured {
        rights = rights.remove_rook_square(!mover, sq);
    }

    let en_passant = if moved.piece == Piece::Pawn
        && dest.get_rank().distance(source.get_rank()) == 2
    {
        source.forward(mover)
    } else {
        None
    };

    let halfmove_clock = if moved.piece == Piece::Pawn || captured.is_some() {
        0
    } else {
        position.halfmove_clock().saturating_add(1)
    };
    let fullmove_number = if mover == Color::Black {
        position.fullmove_number().saturating_add(1)
    } else {
        position.fullmove_number()
    };

    position.write_state(!mover, rights, en_passant, halfmove_clock, fullmove_number);

    Ok(MoveUndo {
        captured,
        ..undo_base
    })
}

/// Move the king, then the rook on the same side.
fn apply_castle(position: &mut Position, chess_move: ChessMove, king: ColoredPiece) -> EngineResult<()> {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    let rank = king.color.to_my_backrank();
    if king.piece != Piece::King
        || source != Square::make_square(rank, File::E)
        || dest.get_rank() != rank
        || dest.get_file().distance(source.get_file()) != 2
    {
        return Err(reject(chess_move, "not a castling move"));
    }
    let side = CastleSide::from_king_move(source, dest);
    let rook_from = Square::make_square(rank, side.rook_file());
    let rook_to = Square::make_square(rank, side.rook_dest_file());
    if !position.has(rook_from, Piece::Rook, king.color)
        || !position.is_empty(dest)
        || !position.is_empty(rook_to)
    {
        return Err(reject(chess_move, "castling rook missing or path blocked"));
    }

    position.clear_square(source);
    position.set_piece(dest, king);
    if let Some(rook) = position.clear_square(rook_from) {
        position.set_piece(rook_to, rook);
    }
    Ok(())
}

/// Reverse a move applied by `make_move`.
///
/// `undo` must be the record of the most recent move still applied to `position`.
pub fn undo_move(position: &mut Position, undo: &MoveUndo) {
    position.write_state(
        undo.side_to_move,
        undo.castle_rights,
        undo.en_passant,
        undo.halfmove_clock,
        undo.fullmove_number,
    );

    position.clear_square(undo.dest);
    position.set_piece(undo.source, undo.moved);

    match undo.kind {
        MoveKind::Castling => {
            let rank = undo.moved.color.to_my_backrank();
            let side = CastleSide::from_king_move(undo.source, undo.dest);
            let rook_to = Square::make_square(rank, side.rook_dest_file());
            if let Some(rook) = position.clear_square(rook_to) {
                position.set_piece(Square::make_square(rank, side.rook_file()), rook);
            }
        }
        _ => {
            if let Some((piece, sq)) = undo.captured {
                position.set_piece(sq, piece);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineErrorCode;
    use std::str::FromStr;

    fn pos(fen: &str) -> Position {
        Position::from_str(fen).unwrap()
    }

    fn round_trip(fen: &str, chess_move: ChessMove) -> Position {
        let mut position = pos(fen);
        let undo = make_move(&mut position, chess_move).unwrap();
        let after = position.clone();
        undo_move(&mut position, &undo);
        assert_eq!(position.to_string(), fen);
        after
    }

    #[test]
    fn double_push_sets_en_passant() {
        let after = round_trip(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            ChessMove::quiet(Square::E2, Square::E4),
        );
        assert_eq!(
            after.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn en_passant_is_cleared_by_the_next_move() {
        let mut position = Position::default();
        make_move(&mut position, ChessMove::quiet(Square::E2, Square::E4)).unwrap();
        assert_eq!(position.en_passant(), Some(Square::E3));
        make_move(&mut position, ChessMove::quiet(Square::G8, Square::F6)).unwrap();
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.halfmove_clock(), 1);
        assert_eq!(position.fullmove_number(), 2);
    }

    #[test]
    fn en_passant_removes_the_victim() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        let after = round_trip(fen, ChessMove::en_passant(Square::E5, Square::D6));
        assert!(after.is_empty(Square::D5));
        assert!(after.is_empty(Square::E5));
        assert!(after.has(Square::D6, Piece::Pawn, Color::White));

        let mut position = pos(fen);
        let undo = make_move(&mut position, ChessMove::en_passant(Square::E5, Square::D6)).unwrap();
        assert_eq!(undo.kind(), MoveKind::EnPassant);
        assert_eq!(
            undo.captured(),
            Some((ColoredPiece::new(Piece::Pawn, Color::Black), Square::D5))
        );
    }

    #[test]
    fn castling_moves_the_rook() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10";
        let after = round_trip(fen, ChessMove::castle(Square::E1, Square::G1));
        assert_eq!(after.to_string(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");

        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10";
        let after = round_trip(fen, ChessMove::castle(Square::E8, Square::C8));
        assert_eq!(after.to_string(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 4 11");
    }

    #[test]
    fn rook_moves_and_captures_clear_rights() {
        let after = round_trip(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            ChessMove::capture(Square::A1, Square::A8),
        );
        assert_eq!(
            after.castle_rights(),
            CastleRights::NONE
                .with(Color::White, CastleSide::KingSide, true)
                .with(Color::Black, CastleSide::KingSide, true)
        );
        assert_eq!(after.halfmove_clock(), 0);
    }

    #[test]
    fn promotion_places_the_new_piece() {
        let fen = "1r2k3/P7/8/8/8/8/8/4K3 w - - 5 30";
        let capture = ChessMove::new(
            Square::A7,
            Square::B8,
            crate::chess_move::MoveFlags::PROMOTION | crate::chess_move::MoveFlags::CAPTURE,
            Some(Piece::Knight),
        )
        .unwrap();
        let after = round_trip(fen, capture);
        assert_eq!(after.to_string(), "1N2k3/8/8/8/8/8/8/4K3 b - - 0 30");
    }

    #[test]
    fn preconditions() {
        let mut position = Position::default();
        let before = position.clone();
        let err = make_move(&mut position, ChessMove::quiet(Square::E3, Square::E4)).unwrap_err();
        assert_eq!(err.code(), EngineErrorCode::IllegalMove);
        assert!(make_move(&mut position, ChessMove::quiet(Square::E7, Square::E5)).is_err());
        assert!(make_move(&mut position, ChessMove::quiet(Square::A1, Square::A2)).is_err());
        assert!(make_move(&mut position, ChessMove::castle(Square::E1, Square::G1)).is_err());
        // castling without a rook on the corner is refused
        let mut position = pos("4k3/8/8/8/8/8/8/4K3 w K - 0 1");
        assert!(make_move(&mut position, ChessMove::castle(Square::E1, Square::G1)).is_err());
        let mut position = before;
        assert!(make_move(&mut position, ChessMove::en_passant(Square::E2, Square::D3)).is_err());
        assert_eq!(position, Position::default());
    }

    #[test]
    fn clocks_stop_at_their_maximum() {
        let fen = "4k3/8/8/8/8/8/8/4K2N w - - 4294967295 1";
        let after = round_trip(fen, ChessMove::quiet(Square::H1, Square::G3));
        assert_eq!(after.halfmove_clock(), u32::MAX);
        let mut position = pos(fen);
        assert_eq!(
            crate::engine::ChessEngine::default().legal_moves(&mut position).len(),
            7
        );

        let fen = "4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295";
        let after = round_trip(fen, ChessMove::quiet(Square::E8, Square::D8));
        assert_eq!(after.fullmove_number(), u32::MAX);
        assert_eq!(after.halfmove_clock(), 1);
    }
}
