use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::engine::{BoardStatus, ChessEngine};
use crate::error::{EngineError, EngineResult, Error};
use crate::make_move::MoveUndo;
use crate::movegen::MoveGen;
use crate::pgn;
use crate::position::Position;
use crate::san;
use std::str::FromStr;

/// One played move, with what is needed to take it back.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveEntry {
    chess_move: ChessMove,
    undo: MoveUndo,
    san: String,
}

impl MoveEntry {
    pub fn chess_move(&self) -> ChessMove {
        self.chess_move
    }

    pub fn undo(&self) -> &MoveUndo {
        &self.undo
    }

    /// The move in SAN, as it was written when it was played.
    pub fn san(&self) -> &str {
        &self.san
    }
}

/// For UI front ends, store a game: a position, the rules to play it by, and the stack of moves
/// played so far.  Only legal moves are accepted, and moves are taken back in reverse order.
#[derive(Clone, Debug)]
pub struct Game {
    start: Position,
    position: Position,
    engine: ChessEngine,
    history: Vec<MoveEntry>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// Create a new `Game` with the initial position.
    ///
    /// ```
    /// use chess_rules::{Game, Position};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.position(), &Position::default());
    /// ```
    pub fn new() -> Game {
        Game::new_with_position(Position::default(), ChessEngine::default())
    }

    /// Create a new `Game` with a specific starting position and rules.
    pub fn new_with_position(position: Position, engine: ChessEngine) -> Game {
        Game {
            start: position.clone(),
            position,
            engine,
            history: vec![],
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The position before any move in the history.
    pub fn start_position(&self) -> &Position {
        &self.start
    }

    pub fn engine(&self) -> &ChessEngine {
        &self.engine
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Every move played so far, oldest first.
    pub fn history(&self) -> &[MoveEntry] {
        &self.history
    }

    pub fn legal_moves(&mut self) -> MoveGen {
        self.engine.legal_moves(&mut self.position)
    }

    /// Is the game over, and how?
    ///
    /// ```
    /// use chess_rules::{BoardStatus, Game};
    ///
    /// let mut game = Game::new();
    /// for san in ["f3", "e5", "g4", "Qh4#"].iter() {
    ///     game.make_san(san).unwrap();
    /// }
    /// assert_eq!(game.status(), BoardStatus::Checkmate);
    /// ```
    pub fn status(&mut self) -> BoardStatus {
        self.engine.status(&mut self.position)
    }

    /// Play a move.  It is matched against the legal moves on its squares and promotion, so a
    /// move parsed from UCI text is fine.
    pub fn make_move(&mut self, chess_move: ChessMove) -> EngineResult<&MoveEntry> {
        let legal = self
            .engine
            .find_legal(&mut self.position, chess_move)
            .ok_or_else(|| {
                EngineError::illegal(format!("{} is not legal in {}", chess_move, self.position))
            })?;
        let san = san::format(&self.engine, &mut self.position, legal)
            .map_err(|e| EngineError::illegal(e.to_string()))?;
        let undo = self.engine.make_move(&mut self.position, legal)?;
        self.history.push(MoveEntry {
            chess_move: legal,
            undo,
            san,
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Play a move written in SAN.
    pub fn make_san(&mut self, text: &str) -> EngineResult<&MoveEntry> {
        let chess_move = san::parse(&self.engine, &mut self.position, text)
            .map_err(|e| EngineError::invalid_format(e.to_string()))?;
        self.make_move(chess_move)
    }

    /// Play a move written in UCI coordinates.
    ///
    /// ```
    /// use chess_rules::{EngineErrorCode, Game};
    ///
    /// let mut game = Game::new();
    /// assert_eq!(game.make_uci("e2e4").unwrap().san(), "e4");
    /// assert_eq!(game.make_uci("e2e4").unwrap_err().code(), EngineErrorCode::IllegalMove);
    /// assert_eq!(game.make_uci("e2-e4").unwrap_err().code(), EngineErrorCode::InvalidMoveFormat);
    /// ```
    pub fn make_uci(&mut self, text: &str) -> EngineResult<&MoveEntry> {
        let chess_move = self.engine.parse_uci(&mut self.position, text)?;
        self.make_move(chess_move)
    }

    /// Take back the last move.  Returns `None` when there is nothing to take back.
    pub fn undo(&mut self) -> Option<MoveEntry> {
        let entry = self.history.pop()?;
        self.engine.undo_move(&mut self.position, &entry.undo);
        Some(entry)
    }

    /// Can the side to move claim a draw under the fifty-move rule?
    ///
    /// Always false when the rule is switched off in the engine configuration, or when the game
    /// is already over.
    pub fn can_declare_draw(&mut self) -> bool {
        self.engine.config().fifty_move_rule()
            && self.position.halfmove_clock() >= 100
            && self.status() == BoardStatus::Ongoing
    }

    /// Write the game as PGN movetext.
    pub fn to_pgn(&self) -> Result<String, Error> {
        let moves: Vec<ChessMove> = self.history.iter().map(|e| e.chess_move).collect();
        pgn::export(&self.start.to_string(), &moves, &self.engine)
    }
}

impl FromStr for Game {
    type Err = Error;

    /// Start a game from a FEN string, with the default rules.
    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Ok(Game::new_with_position(
            Position::from_str(fen)?,
            ChessEngine::default(),
        ))
    }
}
