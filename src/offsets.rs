//! Fixed `(file, rank)` offsets used both to generate moves and to detect attacks.

/// A step of `(files, ranks)`.
pub type Offset = (i8, i8);

/// The eight knight jumps.
pub const KNIGHT_JUMPS: [Offset; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The eight squares around a king.
pub const KING_STEPS: [Offset; 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Bishop directions.
pub const DIAGONALS: [Offset; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Rook directions.
pub const ORTHOGONALS: [Offset; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Queen directions: the diagonals, then the orthogonals.
pub const QUEEN_DIRECTIONS: [Offset; 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];
