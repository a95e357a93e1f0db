//! Attack detection.
//!
//! Nothing here is cached: every call scans the board again, so the answers are always in sync
//! with the position, even halfway through a make/undo pair.

use crate::color::Color;
use crate::offsets::{Offset, DIAGONALS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONALS};
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

/// Is `square` attacked by any piece of color `by`?
///
/// The square itself may be empty or occupied by either color.
///
/// ```
/// use chess_rules::{attacks, Color, Position, Square};
///
/// let pos = Position::default();
/// assert!(attacks::is_square_attacked(&pos, Square::F3, Color::White));
/// assert!(!attacks::is_square_attacked(&pos, Square::E4, Color::White));
/// assert!(attacks::is_square_attacked(&pos, Square::F6, Color::Black));
/// ```
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    attacked_by_step(position, square, by, &KNIGHT_JUMPS, Piece::Knight)
        || attacked_by_pawn(position, square, by)
        || attacked_by_step(position, square, by, &KING_STEPS, Piece::King)
        || attacked_by_slider(position, square, by, &DIAGONALS, Piece::Bishop)
        || attacked_by_slider(position, square, by, &ORTHOGONALS, Piece::Rook)
}

/// Is the king of `color` in check?
///
/// # Panics
///
/// Panics if there is no king of `color` on the board.
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let ksq = position.king_square(color);
    is_square_attacked(position, ksq, !color)
}

fn attacked_by_step(
    position: &Position,
    target: Square,
    by: Color,
    offsets: &[Offset],
    piece: Piece,
) -> bool {
    offsets.iter().any(|&(df, dr)| match target.offset(df, dr) {
        Some(sq) => position.has(sq, piece, by),
        None => false,
    })
}

fn attacked_by_pawn(position: &Position, target: Square, by: Color) -> bool {
    // an attacking pawn sits one rank behind the target, from its own point of view
    let dr = -by.forward();
    [-1, 1]
        .iter()
        .any(|&df| match target.offset(df, dr) {
            Some(sq) => position.has(sq, Piece::Pawn, by),
            None => false,
        })
}

/// Walk each ray until the first occupied square, and see if it's an enemy `slider` or queen.
fn attacked_by_slider(
    position: &Position,
    target: Square,
    by: Color,
    directions: &[Offset],
    slider: Piece,
) -> bool {
    directions.iter().any(|&(df, dr)| {
        let mut sq = target;
        while let Some(next) = sq.offset(df, dr) {
            sq = next;
            if let Some(p) = position.piece_on(sq) {
                return p.color == by && (p.piece == slider || p.piece == Piece::Queen);
            }
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pos(fen: &str) -> Position {
        Position::from_str(fen).unwrap()
    }

    #[test]
    fn pawn_direction_depends_on_attacker() {
        let p = pos("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&p, Square::D5, Color::White));
        assert!(is_square_attacked(&p, Square::F5, Color::White));
        assert!(!is_square_attacked(&p, Square::E5, Color::White));
        assert!(!is_square_attacked(&p, Square::D3, Color::White));
        assert!(is_square_attacked(&p, Square::E4, Color::Black));
        assert!(is_square_attacked(&p, Square::C4, Color::Black));
        assert!(!is_square_attacked(&p, Square::D6, Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let p = pos("4k3/8/8/8/1b6/2N5/8/R3K3 w - - 0 1");
        // bishop b4 hits c3 but not d2 behind the knight
        assert!(is_square_attacked(&p, Square::C3, Color::Black));
        assert!(!is_square_attacked(&p, Square::D2, Color::Black));
        // rook a1 runs along the rank up to the king
        assert!(is_square_attacked(&p, Square::D1, Color::White));
        assert!(!is_square_attacked(&p, Square::G1, Color::White));
        assert!(is_square_attacked(&p, Square::A8, Color::White));
    }

    #[test]
    fn queen_counts_on_both_geometries() {
        let p = pos("4k3/8/8/3q4/8/8/8/K7 w - - 0 1");
        assert!(is_square_attacked(&p, Square::A2, Color::Black));
        assert!(is_square_attacked(&p, Square::D1, Color::Black));
        assert!(is_square_attacked(&p, Square::H5, Color::Black));
        assert!(!is_square_attacked(&p, Square::E3, Color::Black));
        assert!(!is_king_in_check(&p, Color::White));
    }

    #[test]
    fn knights_and_kings() {
        let p = pos("8/8/8/4k3/8/3N4/8/4K3 b - - 0 1");
        assert!(is_king_in_check(&p, Color::Black));
        assert!(is_square_attacked(&p, Square::F2, Color::White));
        assert!(is_square_attacked(&p, Square::D6, Color::Black));
        assert!(!is_king_in_check(&p, Color::White));
    }

    #[test]
    fn wrong_slider_type_does_not_attack() {
        let p = pos("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(is_king_in_check(&p, Color::White));
        let p = pos("4k3/8/8/8/8/8/8/b3K3 w - - 0 1");
        assert!(!is_king_in_check(&p, Color::White));
    }
}
