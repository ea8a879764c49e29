//! Rules engine adapter - Single source of truth for chess legality
//!
//! The sync engine never implements chess rules itself. Everything it needs
//! to know about the position goes through the [`RulesEngine`] trait, and the
//! canonical position is only ever exposed as an opaque FEN string.
//!
//! # Architecture
//!
//! The rules engine is authoritative for:
//! - Move validation and application
//! - Legal move generation (verbose, with promotion flags)
//! - Check/checkmate/draw detection
//! - Board serialization
//!
//! [`ChessEngine`] is the production adapter, backed by `shakmaty`.
//!
//! # Coordinate System
//!
//! - **Sync coordinates**: [`Square`] with file/rank indices 0-7
//! - **shakmaty coordinates**: linear index 0-63, a1 = 0, h8 = 63
//!
//! Castling is exposed king-centric (e1→g1), the way a user drags the king.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{ChessMove, PieceColor, PieceType, Square};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Role};

/// One entry of the verbose legal-move list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceType,
    pub captured: Option<PieceType>,
    /// Set on every promotion variant; one entry exists per promotion piece
    pub promotion: Option<PieceType>,
}

/// Result of a successful `apply_move`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub chess_move: ChessMove,
    pub color: PieceColor,
    /// Standard algebraic notation including check suffix
    pub notation: String,
}

/// Contract the sync engine consumes from the rules engine
pub trait RulesEngine {
    /// Validate and apply a move. Returns `None` (no mutation) when illegal.
    ///
    /// A promotion move requires `promotion`; a non-promotion move ignores it.
    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Option<AppliedMove>;

    /// Legal moves of the side to move, optionally restricted to one origin square
    fn legal_moves(&self, square: Option<Square>) -> Vec<LegalMove>;

    fn turn_color(&self) -> PieceColor;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_draw(&self) -> bool;

    fn is_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Canonical FEN of the current position
    fn serialize(&self) -> String;

    fn piece_at(&self, square: Square) -> Option<(PieceColor, PieceType)>;

    /// Replace the position from a FEN string
    fn load(&mut self, board: &str) -> GameResult<()>;

    /// Whether `from→to` is legal and needs a promotion piece
    fn requires_promotion(&self, from: Square, to: Square) -> bool {
        self.legal_moves(Some(from))
            .iter()
            .any(|m| m.to == to && m.promotion.is_some())
    }
}

/// Chess engine resource backed by `shakmaty`
#[derive(Debug, Clone, Default)]
pub struct ChessEngine {
    /// The underlying position
    ///
    /// This is the authoritative source for all chess logic.
    position: Chess,
}

impl ChessEngine {
    /// Start from the standard initial position
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary FEN
    pub fn from_fen(board: &str) -> GameResult<Self> {
        let mut engine = Self::default();
        engine.load(board)?;
        Ok(engine)
    }

    #[inline]
    fn to_engine_square(square: Square) -> shakmaty::Square {
        shakmaty::Square::new(u32::from(square.index()))
    }

    #[inline]
    fn from_engine_square(square: shakmaty::Square) -> Option<Square> {
        square.to_string().parse().ok()
    }

    #[inline]
    pub fn role_to_piece_type(role: Role) -> PieceType {
        match role {
            Role::Pawn => PieceType::Pawn,
            Role::Knight => PieceType::Knight,
            Role::Bishop => PieceType::Bishop,
            Role::Rook => PieceType::Rook,
            Role::Queen => PieceType::Queen,
            Role::King => PieceType::King,
        }
    }

    #[inline]
    pub fn piece_type_to_role(piece_type: PieceType) -> Role {
        match piece_type {
            PieceType::Pawn => Role::Pawn,
            PieceType::Knight => Role::Knight,
            PieceType::Bishop => Role::Bishop,
            PieceType::Rook => Role::Rook,
            PieceType::Queen => Role::Queen,
            PieceType::King => Role::King,
        }
    }

    #[inline]
    fn color_from_engine(color: Color) -> PieceColor {
        match color {
            Color::White => PieceColor::White,
            Color::Black => PieceColor::Black,
        }
    }

    /// King-centric endpoints of an engine move
    fn endpoints(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
        match m {
            Move::Normal { from, to, .. } => Some((*from, *to)),
            Move::EnPassant { from, to } => Some((*from, *to)),
            Move::Castle { king, rook } => {
                let king_dest = if rook.file() > king.file() {
                    shakmaty::Square::from_coords(File::G, rook.rank())
                } else {
                    shakmaty::Square::from_coords(File::C, rook.rank())
                };
                Some((*king, king_dest))
            }
            Move::Put { .. } => None,
        }
    }

    fn describe(m: &Move) -> Option<LegalMove> {
        let (from, to) = Self::endpoints(m)?;
        Some(LegalMove {
            from: Self::from_engine_square(from)?,
            to: Self::from_engine_square(to)?,
            piece: Self::role_to_piece_type(m.role()),
            captured: m.capture().map(Self::role_to_piece_type),
            promotion: m.promotion().map(Self::role_to_piece_type),
        })
    }

    /// Find the engine move for a `(from, to, promotion)` request
    fn find_move(&self, from: Square, to: Square, promotion: Option<PieceType>) -> Option<Move> {
        let from_sq = Self::to_engine_square(from);
        let to_sq = Self::to_engine_square(to);
        let wanted = promotion.map(Self::piece_type_to_role);

        self.position
            .legal_moves()
            .iter()
            .filter(|m| Self::endpoints(m) == Some((from_sq, to_sq)))
            .find(|m| match m.promotion() {
                Some(role) => Some(role) == wanted,
                None => true,
            })
            .cloned()
    }
}

impl RulesEngine for ChessEngine {
    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Option<AppliedMove> {
        let m = self.find_move(from, to, promotion)?;
        let legal = Self::describe(&m)?;
        let color = self.turn_color();
        let san = San::from_move(&self.position, m.clone()).to_string();

        let next = self.position.clone().play(m).ok()?;
        self.position = next;

        let suffix = if self.position.is_checkmate() {
            "#"
        } else if self.position.is_check() {
            "+"
        } else {
            ""
        };

        Some(AppliedMove {
            chess_move: ChessMove {
                from: legal.from,
                to: legal.to,
                promotion: legal.promotion,
                piece: legal.piece,
                captured: legal.captured,
            },
            color,
            notation: format!("{san}{suffix}"),
        })
    }

    fn legal_moves(&self, square: Option<Square>) -> Vec<LegalMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(Self::describe)
            .filter(|m| square.map_or(true, |sq| m.from == sq))
            .collect()
    }

    fn turn_color(&self) -> PieceColor {
        Self::color_from_engine(self.position.turn())
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= 100
    }

    fn serialize(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    fn piece_at(&self, square: Square) -> Option<(PieceColor, PieceType)> {
        self.position
            .board()
            .piece_at(Self::to_engine_square(square))
            .map(|piece| {
                (
                    Self::color_from_engine(piece.color),
                    Self::role_to_piece_type(piece.role),
                )
            })
    }

    fn load(&mut self, board: &str) -> GameResult<()> {
        let fen: Fen = board.trim().parse().map_err(|e| GameError::InvalidBoard {
            message: format!("{e}"),
        })?;
        self.position =
            fen.into_position(CastlingMode::Standard)
                .map_err(|e| GameError::InvalidBoard {
                    message: format!("{e}"),
                })?;
        Ok(())
    }
}
