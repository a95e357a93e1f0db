use crate::attacks::is_square_attacked;
use crate::castle_rights::{CastleSide, ALL_CASTLE_SIDES};
use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::file::File;
use crate::movegen::MoveList;
use crate::offsets::{Offset, DIAGONALS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONALS, QUEEN_DIRECTIONS};
use crate::piece::{Piece, PROMOTION_PIECES};
use crate::position::Position;
use crate::square::Square;

/// The movement rules for one kind of piece.  Each implementation pushes the pseudo-legal moves
/// of the piece of `color` standing on `src`: moves that follow the piece's geometry but may
/// still leave its own king in check.
pub trait PieceType {
    fn into_piece() -> Piece;
    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList);
}

pub struct PawnType;
pub struct KnightType;
pub struct BishopType;
pub struct RookType;
pub struct QueenType;
pub struct KingType;

/// One step per offset; land on empty squares or capture enemies.
fn step_moves(
    position: &Position,
    src: Square,
    color: Color,
    offsets: &[Offset],
    movelist: &mut MoveList,
) {
    for &(df, dr) in offsets {
        let dest = match src.offset(df, dr) {
            Some(dest) => dest,
            None => continue,
        };
        match position.piece_on(dest) {
            None => movelist.push(ChessMove::quiet(src, dest)),
            Some(p) if p.color != color => movelist.push(ChessMove::capture(src, dest)),
            Some(_) => {}
        }
    }
}

/// Walk each direction until the edge, a friendly piece (stop) or an enemy piece (capture, stop).
fn ray_moves(
    position: &Position,
    src: Square,
    color: Color,
    directions: &[Offset],
    movelist: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut sq = src;
        while let Some(dest) = sq.offset(df, dr) {
            sq = dest;
            match position.piece_on(dest) {
                None => movelist.push(ChessMove::quiet(src, dest)),
                Some(p) => {
                    if p.color != color {
                        movelist.push(ChessMove::capture(src, dest));
                    }
                    break;
                }
            }
        }
    }
}

impl PawnType {
    /// Push one move per promotion piece.
    fn push_promotions(src: Square, dest: Square, capture: bool, movelist: &mut MoveList) {
        for &piece in PROMOTION_PIECES.iter() {
            movelist.push(ChessMove::promotion(src, dest, piece, capture));
        }
    }

    /// Can a pawn of `color` on `src` take en passant onto `dest`?  The target must be the
    /// recorded en-passant square and the pawn that just double-stepped must actually be there.
    pub fn en_passant_target(position: &Position, src: Square, dest: Square, color: Color) -> bool {
        if position.en_passant() != Some(dest) {
            return false;
        }
        let victim = Square::make_square(src.get_rank(), dest.get_file());
        position.has(victim, Piece::Pawn, !color)
    }
}

impl PieceType for PawnType {
    fn into_piece() -> Piece {
        Piece::Pawn
    }

    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList) {
        let promotion_rank = color.to_their_backrank();

        if let Some(one) = src.forward(color) {
            if position.is_empty(one) {
                if one.get_rank() == promotion_rank {
                    PawnType::push_promotions(src, one, false, movelist);
                } else {
                    movelist.push(ChessMove::quiet(src, one));

                    if src.get_rank() == color.to_second_rank() {
                        if let Some(two) = one.forward(color) {
                            if position.is_empty(two) {
                                movelist.push(ChessMove::quiet(src, two));
                            }
                        }
                    }
                }
            }
        }

        for &df in [-1, 1].iter() {
            let dest = match src.offset(df, color.forward()) {
                Some(dest) => dest,
                None => continue,
            };

            match position.piece_on(dest) {
                Some(p) if p.color != color => {
                    if dest.get_rank() == promotion_rank {
                        PawnType::push_promotions(src, dest, true, movelist);
                    } else {
                        movelist.push(ChessMove::capture(src, dest));
                    }
                }
                Some(_) => {}
                None => {
                    if PawnType::en_passant_target(position, src, dest, color) {
                        movelist.push(ChessMove::en_passant(src, dest));
                    }
                }
            }
        }
    }
}

impl PieceType for KnightType {
    fn into_piece() -> Piece {
        Piece::Knight
    }

    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList) {
        step_moves(position, src, color, &KNIGHT_JUMPS, movelist);
    }
}

impl PieceType for BishopType {
    fn into_piece() -> Piece {
        Piece::Bishop
    }

    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList) {
        ray_moves(position, src, color, &DIAGONALS, movelist);
    }
}

impl PieceType for RookType {
    fn into_piece() -> Piece {
        Piece::Rook
    }

    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList) {
        ray_moves(position, src, color, &ORTHOGONALS, movelist);
    }
}

impl PieceType for QueenType {
    fn into_piece() -> Piece {
        Piece::Queen
    }

    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList) {
        ray_moves(position, src, color, &QUEEN_DIRECTIONS, movelist);
    }
}

impl PieceType for KingType {
    fn into_piece() -> Piece {
        Piece::King
    }

    /// Single steps only.  Castling is generated by `KingType::castle_moves`, because it also
    /// depends on the engine configuration.
    fn pseudo_legals(position: &Position, src: Square, color: Color, movelist: &mut MoveList) {
        step_moves(position, src, color, &KING_STEPS, movelist);
    }
}

impl KingType {
    /// Generate castle moves for the king of `color` on `src`.
    ///
    /// A side is generated when the right is still held, the king and rook stand on their home
    /// squares, and every square between them is empty.  With `strict` set, the king's start,
    /// transit and destination squares must also not be attacked.  This is the only place where
    /// pseudo-legal generation looks at attacks.
    pub fn castle_moves(
        position: &Position,
        src: Square,
        color: Color,
        strict: bool,
        movelist: &mut MoveList,
    ) {
        let rank = color.to_my_backrank();
        if src != Square::make_square(rank, File::E) {
            return;
        }

        for &side in ALL_CASTLE_SIDES.iter() {
            if !position.castle_rights().has(color, side) {
                continue;
            }
            if !position.has(
                Square::make_square(rank, side.rook_file()),
                Piece::Rook,
                color,
            ) {
                continue;
            }
            if !side
                .empty_files()
                .iter()
                .all(|&f| position.is_empty(Square::make_square(rank, f)))
            {
                continue;
            }
            if strict && !KingType::castle_path_safe(position, color, side) {
                continue;
            }
            movelist.push(ChessMove::castle(
                src,
                Square::make_square(rank, side.king_dest_file()),
            ));
        }
    }

    fn castle_path_safe(position: &Position, color: Color, side: CastleSide) -> bool {
        let rank = color.to_my_backrank();
        side.king_path_files()
            .iter()
            .all(|&f| !is_square_attacked(position, Square::make_square(rank, f), !color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::MoveKind;
    use std::str::FromStr;

    fn generate<T: PieceType>(fen: &str, src: Square) -> MoveList {
        let position = Position::from_str(fen).unwrap();
        let color = position.side_to_move();
        assert!(position.has(src, T::into_piece(), color));
        let mut movelist = MoveList::new();
        T::pseudo_legals(&position, src, color, &mut movelist);
        movelist
    }

    fn castles(fen: &str, strict: bool) -> Vec<String> {
        let position = Position::from_str(fen).unwrap();
        let color = position.side_to_move();
        let mut movelist = MoveList::new();
        KingType::castle_moves(
            &position,
            position.king_square(color),
            color,
            strict,
            &mut movelist,
        );
        movelist.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn knight_in_the_corner() {
        let moves = generate::<KnightType>("4k3/8/8/8/8/1p6/8/N3K3 w - - 0 1", Square::A1);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&ChessMove::capture(Square::A1, Square::B3)));
        assert!(moves.contains(&ChessMove::quiet(Square::A1, Square::C2)));
    }

    #[test]
    fn rook_stops_at_pieces() {
        let moves = generate::<RookType>("4k3/8/8/8/1p6/8/8/1R2K3 w - - 0 1", Square::B1);
        // a1, c1, d1 along the rank, b2 b3 and the capture on b4 up the file
        assert_eq!(moves.len(), 6);
        assert!(moves.contains(&ChessMove::capture(Square::B1, Square::B4)));
        assert!(!moves.iter().any(|m| m.get_dest() == Square::E1));
    }

    #[test]
    fn queen_in_the_middle() {
        let moves = generate::<QueenType>("k7/8/8/8/3Q4/8/8/7K w - - 0 1", Square::D4);
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn pawn_pushes() {
        let moves = generate::<PawnType>("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Square::E2);
        assert_eq!(moves.len(), 2);
        let moves = generate::<PawnType>("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Square::E2);
        assert_eq!(moves.len(), 0);
        let moves = generate::<PawnType>("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", Square::E2);
        assert_eq!(moves.len(), 1);
        let moves = generate::<PawnType>("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1", Square::E7);
        assert!(moves.contains(&ChessMove::quiet(Square::E7, Square::E5)));
    }

    #[test]
    fn pawn_promotions_come_in_fours() {
        let moves = generate::<PawnType>("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Square::A7);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 4);
        let pieces: Vec<Piece> = moves.iter().filter_map(|m| m.get_promotion()).collect();
        assert_eq!(&pieces[0..4], &PROMOTION_PIECES);
    }

    #[test]
    fn en_passant_needs_the_victim() {
        let moves = generate::<PawnType>("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", Square::E5);
        let ep: Vec<&ChessMove> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].get_dest(), Square::D6);
        assert!(ep[0].is_capture());
        assert_eq!(ep[0].kind(), MoveKind::EnPassant);

        let moves = generate::<PawnType>("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1", Square::E5);
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn castling_needs_rights_and_room() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(castles(fen, true), vec!["e1g1", "e1c1"]);
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1", true),
            vec!["e1g1"]
        );
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1", true),
            vec!["e1g1"]
        );
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", true),
            vec!["e8g8", "e8c8"]
        );
    }

    #[test]
    fn strict_castling_checks_the_kings_path() {
        // the rook on f8 covers f1; b1 being attacked does not matter
        let fen = "1r2kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1";
        assert_eq!(castles(fen, true), vec!["e1c1"]);
        assert_eq!(castles(fen, false), vec!["e1g1", "e1c1"]);
        // no castling out of check
        let fen = "4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1";
        assert!(castles(fen, true).is_empty());
        assert_eq!(castles(fen, false).len(), 2);
    }
}
