//! # Chess rules, without the chess player
//!
//! This crate knows the rules of chess and nothing about playing it well.  It keeps a
//! [`Position`], generates legal moves, applies and takes back moves exactly, and reads and writes
//! FEN, SAN, UCI and PGN.
//!
//! Legality is decided the simple way: every pseudo-legal move is played, the mover's king is
//! tested for check, and the move is taken back.
//!
//! ```
//! use chess_rules::{san, ChessEngine, Position};
//!
//! let engine = ChessEngine::default();
//! let mut position = Position::default();
//!
//! let e4 = engine.parse_uci(&mut position, "e2e4").unwrap();
//! let undo = engine.make_move(&mut position, e4).unwrap();
//!
//! let replies = engine.legal_moves(&mut position);
//! assert!(replies.contains(&"d7d5".parse().unwrap()));
//! assert!(san::parse(&engine, &mut position, "Nf6").is_ok());
//!
//! engine.undo_move(&mut position, &undo);
//! assert_eq!(position, Position::default());
//! ```

mod board;
pub use crate::board::*;

mod castle_rights;
pub use crate::castle_rights::*;

mod chess_move;
pub use crate::chess_move::*;

mod color;
pub use crate::color::*;

mod config;
pub use crate::config::*;

mod engine;
pub use crate::engine::*;

mod error;
pub use crate::error::*;

mod fen;
pub use crate::fen::STARTING_FEN;

mod file;
pub use crate::file::*;

mod game;
pub use crate::game::*;

mod make_move;
pub use crate::make_move::*;

mod movegen;
pub use crate::movegen::*;

mod offsets;

mod piece;
pub use crate::piece::*;

mod position;
pub use crate::position::*;

mod rank;
pub use crate::rank::*;

mod square;
pub use crate::square::*;

pub mod attacks;
pub mod pgn;
pub mod san;
