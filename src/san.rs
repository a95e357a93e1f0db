//! Standard algebraic notation: `e4`, `Nbd7`, `exd6`, `e8=Q+`, `O-O-O#`.

use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::engine::{BoardStatus, ChessEngine};
use crate::error::Error;
use crate::piece::{ColoredPiece, Piece};
use crate::position::Position;
use tracing::debug;

fn piece_letter(piece: Piece) -> char {
    ColoredPiece::new(piece, Color::White).to_char()
}

/// Just enough of the source square to tell `chess_move` apart from the other legal moves of the
/// same piece type to the same square.
fn disambiguation(position: &Position, chess_move: &ChessMove, piece: Piece, legal: &[ChessMove]) -> String {
    let source = chess_move.get_source();
    let rivals: Vec<&ChessMove> = legal
        .iter()
        .filter(|m| {
            m.get_dest() == chess_move.get_dest()
                && m.get_source() != source
                && position
                    .piece_on(m.get_source())
                    .map_or(false, |p| p.piece == piece)
        })
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|m| m.get_source().get_file() != source.get_file()) {
        source.get_file().to_char().to_string()
    } else if rivals.iter().all(|m| m.get_source().get_rank() != source.get_rank()) {
        source.get_rank().to_char().to_string()
    } else {
        source.to_string()
    }
}

/// SAN without the check suffix.
fn format_plain(position: &Position, chess_move: &ChessMove, legal: &[ChessMove]) -> Result<String, Error> {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();

    if chess_move.is_castling() {
        return Ok(if dest.get_file() > source.get_file() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        });
    }

    let moved = position
        .piece_on(source)
        .ok_or_else(|| Error::invalid_argument(format!("no piece on {}", source)))?;

    let mut result = String::with_capacity(8);
    if moved.piece == Piece::Pawn {
        if chess_move.is_capture() {
            result.push(source.get_file().to_char());
        }
    } else {
        result.push(piece_letter(moved.piece));
        result.push_str(&disambiguation(position, chess_move, moved.piece, legal));
    }

    if chess_move.is_capture() {
        result.push('x');
    }
    result.push_str(&dest.to_string());

    if let Some(promotion) = chess_move.get_promotion() {
        result.push('=');
        result.push(piece_letter(promotion));
    }
    Ok(result)
}

/// Write `chess_move`, which must be legal in `position`, in SAN.
///
/// The move is played and taken back to decide between `+` and `#`.
///
/// ```
/// use chess_rules::{san, ChessEngine, Position};
///
/// let engine = ChessEngine::default();
/// let mut position = Position::default();
/// let mv = engine.parse_uci(&mut position, "g1f3").unwrap();
/// assert_eq!(san::format(&engine, &mut position, mv).unwrap(), "Nf3");
/// ```
pub fn format(engine: &ChessEngine, position: &mut Position, chess_move: ChessMove) -> Result<String, Error> {
    let legal = engine.legal_moves(position);
    let mut result = format_plain(position, &chess_move, legal.as_slice())?;

    let undo = engine
        .make_move(position, chess_move)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    if engine.is_king_in_check(position, position.side_to_move()) {
        match engine.status(position) {
            BoardStatus::Checkmate => result.push('#'),
            _ => result.push('+'),
        }
    }
    engine.undo_move(position, &undo);

    Ok(result)
}

fn normalize(text: &str) -> String {
    let trimmed = text.trim().trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    match trimmed {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        other => other.to_string(),
    }
}

/// Find the legal move that `text` describes.
///
/// Check and annotation suffixes (`+#!?`) are ignored, and castling may be written with zeros.
///
/// ```
/// use chess_rules::{san, ChessEngine, Position, Square};
///
/// let engine = ChessEngine::default();
/// let mut position = Position::default();
/// let mv = san::parse(&engine, &mut position, "Nf3!?").unwrap();
/// assert_eq!(mv.get_source(), Square::G1);
/// assert!(san::parse(&engine, &mut position, "Nf4").is_err());
/// ```
pub fn parse(engine: &ChessEngine, position: &mut Position, text: &str) -> Result<ChessMove, Error> {
    let wanted = normalize(text);
    if !wanted.is_empty() {
        let legal = engine.legal_moves(position);
        for m in legal.as_slice() {
            if format_plain(position, m, legal.as_slice())? == wanted {
                return Ok(*m);
            }
        }
    }

    debug!(san = text, fen = %position, "no legal move matches");
    Err(Error::InvalidSanMove {
        text: text.to_string(),
    })
}
