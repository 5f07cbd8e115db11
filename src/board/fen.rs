use std::str::FromStr;

use log::debug;

use super::builder::PositionBuilder;
use super::error::{FenError, MoveParseError};
use super::state::Position;
use super::types::{
    CastlingRights, Color, File, Move, Piece, PieceType, Rank, Square, PROMOTION_TYPES,
};

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The half-move clock and full-move number may be omitted and default to
    /// 0 and 1. Nothing is constructed unless every field parses and the
    /// resulting position is legal.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::TooFewFields {
                found: fields.len(),
            });
        }
        if fields.len() > 6 {
            return Err(FenError::TooManyFields {
                found: fields.len(),
            });
        }

        let mut builder = parse_placement(fields[0])?;

        builder = match fields[1] {
            "w" => builder.side_to_move(Color::White),
            "b" => builder.side_to_move(Color::Black),
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        builder = builder.castling(parse_castling(fields[2])?);

        if fields[3] != "-" {
            let square: Square = fields[3].parse().map_err(|_| FenError::InvalidEnPassant {
                found: fields[3].to_string(),
            })?;
            builder = builder.en_passant(square);
        }

        if let Some(field) = fields.get(4) {
            let clock = field.parse().map_err(|_| FenError::InvalidHalfmoveClock {
                found: field.to_string(),
            })?;
            builder = builder.halfmove_clock(clock);
        }

        if let Some(field) = fields.get(5) {
            let number = match field.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(FenError::InvalidFullmoveNumber {
                        found: field.to_string(),
                    })
                }
            };
            builder = builder.fullmove_number(number);
        }

        let position = builder.build()?;
        debug!("parsed position {fen}");
        Ok(position)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics on any [`FenError`]; see [`Position::try_from_fen`].
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(position) => position,
            Err(err) => panic!("invalid FEN '{fen}': {err}"),
        }
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in Rank::ALL.iter().rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_on(Square::new(file, *rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Find the legal move written as `uci` (`e2e4`, `e7e8q`).
    ///
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Position;
    ///
    /// let position = Position::startpos();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }

        let square = |file: char, rank: char| match (File::from_char(file), Rank::from_char(rank)) {
            (Some(file), Some(rank)) => Ok(Square::new(file, rank)),
            _ => Err(MoveParseError::InvalidSquare {
                notation: uci.to_string(),
            }),
        };
        let from = square(chars[0], chars[1])?;
        let to = square(chars[2], chars[3])?;

        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match PieceType::from_char(c) {
                Some(piece_type) if PROMOTION_TYPES.contains(&piece_type) => Some(piece_type),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a UCI move and play it in one call.
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Position;
    ///
    /// let mut position = Position::startpos();
    /// position.do_move_uci("e2e4").unwrap();
    /// position.do_move_uci("e7e5").unwrap();
    /// assert_eq!(position.ply(), 2);
    /// ```
    pub fn do_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.do_move(mv);
        Ok(mv)
    }
}

fn parse_placement(placement: &str) -> Result<PositionBuilder, FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::WrongRankCount { found: rows.len() });
    }

    let mut builder = PositionBuilder::new();
    for (rank, row) in Rank::ALL.iter().rev().zip(rows) {
        let rank_number = rank.index() + 1;
        let mut file = 0usize;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiece { char: c });
                }
                file += skip as usize;
            } else {
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if let Some(f) = File::from_index(file) {
                    builder = builder.piece(Square::new(f, *rank), piece);
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_number,
                    files: file,
                });
            }
        }
        if file < 8 {
            return Err(FenError::TooFewFiles {
                rank: rank_number,
                files: file,
            });
        }
    }
    Ok(builder)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, kingside) = match c {
            'K' => (Color::White, true),
            'Q' => (Color::White, false),
            'k' => (Color::Black, true),
            'q' => (Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        };
        if rights.has(color, kingside) {
            return Err(FenError::DuplicateCastling { char: c });
        }
        rights.set(color, kingside);
    }
    Ok(rights)
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}
