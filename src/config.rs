/// Rule switches for a `ChessEngine`.
///
/// Only `strict_castling` changes move generation.  `fifty_move_rule` is honoured by
/// `Game::can_declare_draw`.  The repetition and material switches are carried for front ends;
/// this crate does not detect either draw.
///
/// ```
/// use chess_rules::EngineConfig;
///
/// let config = EngineConfig::default().with_strict_castling(false);
/// assert!(!config.strict_castling());
/// assert!(config.fifty_move_rule());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    threefold_repetition: bool,
    fifty_move_rule: bool,
    insufficient_material: bool,
    strict_castling: bool,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            threefold_repetition: true,
            fifty_move_rule: true,
            insufficient_material: true,
            strict_castling: true,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn threefold_repetition(&self) -> bool {
        self.threefold_repetition
    }

    #[inline]
    pub fn fifty_move_rule(&self) -> bool {
        self.fifty_move_rule
    }

    #[inline]
    pub fn insufficient_material(&self) -> bool {
        self.insufficient_material
    }

    /// Must the king's start, transit and landing squares be safe to castle?
    #[inline]
    pub fn strict_castling(&self) -> bool {
        self.strict_castling
    }

    pub fn with_threefold_repetition(mut self, enabled: bool) -> EngineConfig {
        self.threefold_repetition = enabled;
        self
    }

    pub fn with_fifty_move_rule(mut self, enabled: bool) -> EngineConfig {
        self.fifty_move_rule = enabled;
        self
    }

    pub fn with_insufficient_material(mut self, enabled: bool) -> EngineConfig {
        self.insufficient_material = enabled;
        self
    }

    pub fn with_strict_castling(mut self, enabled: bool) -> EngineConfig {
        self.strict_castling = enabled;
        self
    }
}
