//! Type definitions and utilities for chess game logic
//!
//! Provides newtype patterns and trait implementations for chess-specific types
//! to improve type safety and code clarity. Squares travel over the wire in
//! algebraic notation, colors as `"w"` / `"b"`, pieces as lowercase letters.

use crate::game::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=8).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board square position (file, rank)
///
/// Ordered rank-major so sets of squares iterate a1, b1, ... h8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Create a square from file and rank indices (0-7 each)
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square {
                file: File(file),
                rank: Rank(rank),
            })
        } else {
            None
        }
    }

    /// Create a square from its two notation characters (`'e'`, `'4'`)
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        let rank_num = rank.to_digit(10)? as u8;
        Some(Square {
            file: File::from_char(file)?,
            rank: Rank::from_number(rank_num)?,
        })
    }

    /// Linear index, a1 = 0 ... h8 = 63
    pub fn index(self) -> u8 {
        self.rank.index() * 8 + self.file.index()
    }

    /// Convert square to algebraic notation (e.g., "e4")
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file.to_char(), self.rank.to_number())
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        let mut chars = s.trim().chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Square::from_chars(file, rank),
            _ => None,
        };
        parsed.ok_or_else(|| GameError::InvalidSquare {
            notation: s.to_string(),
        })
    }
}

impl TryFrom<String> for Square {
    type Error = GameError;

    fn try_from(value: String) -> GameResult<Self> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_algebraic()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PieceColor {
    #[default]
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Wire code, `'w'` or `'b'`
    pub fn code(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }

    pub fn from_code(code: &str) -> GameResult<Self> {
        match code.trim() {
            "w" | "white" => Ok(PieceColor::White),
            "b" | "black" => Ok(PieceColor::Black),
            other => Err(GameError::InvalidColor {
                code: other.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    /// Pieces a pawn may promote to, in the order the picker offers them
    pub const PROMOTION_CHOICES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Lowercase letter used on the wire and in FEN
    pub fn to_char(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        }
    }

    /// Parse a piece letter, either case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'q' => Some(PieceType::Queen),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            'r' => Some(PieceType::Rook),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }

    /// Parse a promotion piece as sent over the wire (`"q"`, `"n"`, ...)
    pub fn parse_promotion(code: &str) -> GameResult<Self> {
        let mut chars = code.trim().chars();
        match (chars.next().and_then(PieceType::from_char), chars.next()) {
            (Some(kind), None) if kind.is_promotion_choice() => Ok(kind),
            _ => Err(GameError::InvalidPromotion {
                code: code.to_string(),
            }),
        }
    }
}

/// A move that has been validated and applied by the rules engine
///
/// Immutable once constructed. Produced either by resolving a local gesture
/// or by validating a remote frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub piece: PieceType,
    pub captured: Option<PieceType>,
}
