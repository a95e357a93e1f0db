//! Reading and writing games in Portable Game Notation.
//!
//! Only the main line is kept.  Variations and numeric annotation glyphs are skipped, and
//! comments are attached to the move they follow.

use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::engine::ChessEngine;
use crate::error::Error;
use crate::fen::STARTING_FEN;
use crate::position::Position;
use crate::san;
use std::str::FromStr;
use tracing::debug;

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// One move of an imported game.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PgnMove {
    chess_move: ChessMove,
    san: String,
    comment: Option<String>,
}

impl PgnMove {
    /// The move, with all of its flags.
    pub fn chess_move(&self) -> ChessMove {
        self.chess_move
    }

    /// The move as it was written in the movetext.
    pub fn san(&self) -> &str {
        &self.san
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// A game read from PGN.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PgnGame {
    tags: Vec<(String, String)>,
    start_fen: String,
    moves: Vec<PgnMove>,
    result: String,
}

impl PgnGame {
    /// Every tag pair, in the order they appeared.
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// Look up a tag by name, ignoring case.  A repeated tag gives its last value.
    pub fn tag(&self, name: &str) -> Option<&str> {
        find_tag(&self.tags, name)
    }

    /// The `FEN` tag if there is one, otherwise the standard start position.
    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    pub fn moves(&self) -> &[PgnMove] {
        &self.moves
    }

    /// The main line as plain moves.
    pub fn chess_moves(&self) -> Vec<ChessMove> {
        self.moves.iter().map(|m| m.chess_move).collect()
    }

    /// The result token that ended the movetext, or else the `Result` tag, or else `*`.
    pub fn result(&self) -> &str {
        &self.result
    }
}

fn find_tag<'a>(tags: &'a [(String, String)], name: &str) -> Option<&'a str> {
    tags.iter()
        .rev()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[derive(Debug, PartialEq)]
enum Token {
    Tag(String, String),
    San(String),
    Comment(String),
    Result(String),
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidPgn {
        reason: reason.into(),
    }
}

/// Read `[Name "Value"]` starting just after the `[`.
fn read_tag(chars: &[char], mut i: usize) -> Result<(Token, usize), Error> {
    let start = i;
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
        i += 1;
    }
    let name: String = chars[start..i].iter().collect();
    if name.is_empty() {
        return Err(invalid("tag without a name"));
    }
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i >= chars.len() || chars[i] != '"' {
        return Err(invalid(format!("tag {} has no quoted value", name)));
    }
    i += 1;
    let start = i;
    while i < chars.len() && chars[i] != '"' {
        i += 1;
    }
    let value: String = chars[start..i].iter().collect();
    i += 1;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i >= chars.len() || chars[i] != ']' {
        return Err(invalid(format!("tag {} is not closed", name)));
    }
    Ok((Token::Tag(name, value), i + 1))
}

fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = vec![];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c == '[' {
            let (tag, next) = read_tag(&chars, i + 1)?;
            tokens.push(tag);
            i = next;
        } else if c == ';' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
        } else if c == '{' {
            let start = i + 1;
            i = start;
            while i < chars.len() && chars[i] != '}' {
                i += 1;
            }
            let comment: String = chars[start..i].iter().collect();
            let comment = comment.trim();
            if !comment.is_empty() {
                tokens.push(Token::Comment(comment.to_string()));
            }
            i += 1;
        } else if c == '(' {
            let mut depth = 1;
            i += 1;
            while i < chars.len() && depth > 0 {
                match chars[i] {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                i += 1;
            }
        } else if c == '$' {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        } else {
            let start = i;
            while i < chars.len()
                && !chars[i].is_whitespace()
                && !matches!(chars[i], '{' | '(' | ';' | '[')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if RESULTS.contains(&word.as_str()) {
                tokens.push(Token::Result(word));
                continue;
            }
            // "12." and "12..." are move numbers; "12.e4" carries the move after the dots
            let san = word.trim_start_matches(|c: char| c.is_ascii_digit());
            let san = if san.len() < word.len() && san.starts_with('.') {
                san.trim_start_matches('.')
            } else {
                word.as_str()
            };
            if !san.is_empty() {
                tokens.push(Token::San(san.to_string()));
            }
        }
    }
    Ok(tokens)
}

/// Read a game and replay its main line.
///
/// ```
/// use chess_rules::{pgn, ChessEngine};
///
/// let text = r#"[Event "Casual"]
/// [Result "1-0"]
///
/// 1. e4 {best by test} e5 2. Nf3 (2. f4 exf4) Nc6 $1 3. Bb5 1-0"#;
///
/// let game = pgn::import(text, &ChessEngine::default()).unwrap();
/// assert_eq!(game.tag("event"), Some("Casual"));
/// assert_eq!(game.moves().len(), 5);
/// assert_eq!(game.moves()[0].comment(), Some("best by test"));
/// assert_eq!(game.result(), "1-0");
/// ```
pub fn import(text: &str, engine: &ChessEngine) -> Result<PgnGame, Error> {
    if text.trim().is_empty() {
        return Err(invalid("PGN is empty"));
    }

    let tokens = tokenize(text)?;
    let tags: Vec<(String, String)> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Tag(n, v) => Some((n.clone(), v.clone())),
            _ => None,
        })
        .collect();

    let start_fen = find_tag(&tags, "FEN")
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(STARTING_FEN)
        .to_string();
    let result = find_tag(&tags, "Result").unwrap_or("*").to_string();
    let mut game = PgnGame {
        tags,
        start_fen,
        moves: vec![],
        result,
    };

    let mut position = Position::from_str(&game.start_fen)?;
    for token in tokens {
        match token {
            Token::Tag(..) => {}
            Token::Result(result) => {
                game.result = result;
                break;
            }
            Token::Comment(comment) => {
                if let Some(last) = game.moves.last_mut() {
                    last.comment = Some(match last.comment.take() {
                        Some(existing) => format!("{} {}", existing, comment),
                        None => comment,
                    });
                }
            }
            Token::San(text) => {
                let chess_move = san::parse(engine, &mut position, &text)
                    .map_err(|_| invalid(format!("invalid SAN '{}' at ply {}", text, game.moves.len() + 1)))?;
                engine
                    .make_move(&mut position, chess_move)
                    .map_err(|e| invalid(format!("illegal move '{}': {}", text, e)))?;
                game.moves.push(PgnMove {
                    chess_move,
                    san: text,
                    comment: None,
                });
            }
        }
    }

    debug!(
        tags = game.tags.len(),
        plies = game.moves.len(),
        result = %game.result,
        "imported PGN"
    );
    Ok(game)
}

/// Write the movetext for `moves` played from `start_fen`, ending with `*`.
///
/// ```
/// use chess_rules::{pgn, ChessEngine, ChessMove, STARTING_FEN};
///
/// let moves: Vec<ChessMove> = ["e2e4", "e7e5", "g1f3"]
///     .iter()
///     .map(|m| m.parse().unwrap())
///     .collect();
/// let text = pgn::export(STARTING_FEN, &moves, &ChessEngine::default()).unwrap();
/// assert_eq!(text, "1. e4 e5 2. Nf3 *");
/// ```
pub fn export(start_fen: &str, moves: &[ChessMove], engine: &ChessEngine) -> Result<String, Error> {
    let mut position = Position::from_str(start_fen)?;
    let mut parts: Vec<String> = Vec::with_capacity(moves.len() * 3 / 2 + 1);

    for (ply, m) in moves.iter().enumerate() {
        let chess_move = engine
            .find_legal(&mut position, *m)
            .ok_or_else(|| invalid(format!("illegal move {} at ply {}", m, ply + 1)))?;

        match position.side_to_move() {
            Color::White => parts.push(format!("{}.", position.fullmove_number())),
            Color::Black if ply == 0 => {
                parts.push(format!("{}...", position.fullmove_number()))
            }
            Color::Black => {}
        }

        parts.push(san::format(engine, &mut position, chess_move)?);
        engine
            .make_move(&mut position, chess_move)
            .map_err(|e| invalid(e.to_string()))?;
    }

    parts.push("*".to_string());
    Ok(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ChessEngine {
        ChessEngine::default()
    }

    #[test]
    fn tokenizer_skips_the_noise() {
        let tokens = tokenize("1.e4 ; a comment\n1... e5 (1... c5 (1... e6)) $14 2. Nf3 {x} 1/2-1/2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::San("e4".to_string()),
                Token::San("e5".to_string()),
                Token::San("Nf3".to_string()),
                Token::Comment("x".to_string()),
                Token::Result("1/2-1/2".to_string()),
            ]
        );
    }

    #[test]
    fn fen_tag_sets_the_start() {
        let text = "[FEN \"4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\"]\n\n1. e4 Kd7 *";
        let game = import(text, &engine()).unwrap();
        assert_eq!(game.start_fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(game.chess_moves().len(), 2);
        assert_eq!(game.result(), "*");
        assert_eq!(game.moves()[1].san(), "Kd7");
    }

    #[test]
    fn result_token_stops_the_movetext() {
        let game = import("1. e4 e5 0-1 2. Nf3", &engine()).unwrap();
        assert_eq!(game.moves().len(), 2);
        assert_eq!(game.result(), "0-1");
    }

    #[test]
    fn bad_movetext_is_an_error() {
        for text in ["", "1. e5", "[Event \"x\"] 1. e4 e4", "[Event x] 1. e4", "[Event \"x\" 1. e4"].iter() {
            match import(text, &engine()) {
                Err(Error::InvalidPgn { .. }) => {}
                other => panic!("{:?} should fail, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn export_then_import() {
        let engine = engine();
        let text = "1. f3 e5 2. g4 Qh4# 0-1";
        let game = import(text, &engine).unwrap();
        let exported = export(game.start_fen(), &game.chess_moves(), &engine).unwrap();
        assert_eq!(exported, "1. f3 e5 2. g4 Qh4# *");
        let again = import(&exported, &engine).unwrap();
        assert_eq!(again.chess_moves(), game.chess_moves());
    }

    #[test]
    fn export_from_black_to_move() {
        let moves = vec![ChessMove::from_uci("e8d7").unwrap(), ChessMove::from_uci("e2e4").unwrap()];
        let text = export("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7", &moves, &engine()).unwrap();
        assert_eq!(text, "7... Kd7 8. e4 *");
    }

    #[test]
    fn export_rejects_illegal_moves() {
        let moves = vec![ChessMove::from_uci("e2e5").unwrap()];
        assert!(export(STARTING_FEN, &moves, &engine()).is_err());
    }
}
