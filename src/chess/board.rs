use shakmaty::{
    Chess, Color, EnPassantMode, File, Move, Position, Rank, Square, fen::Fen, san::SanPlus,
};

/// Position advanced one half-move at a time while a game is annotated.
#[derive(Debug, Clone)]
pub struct BoardState {
    pos: Chess,
}

impl BoardState {
    pub fn new(start: Chess) -> Self {
        Self { pos: start }
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.pos.fullmoves().get()
    }

    /// Plays `m` and returns its SAN, computed against the position before the move.
    pub fn play(&mut self, m: Move) -> SanPlus {
        SanPlus::from_move_and_play_unchecked(&mut self.pos, m)
    }

    /// Eight text rows, rank 8 first, `.` for empty squares.
    pub fn diagram(&self) -> String {
        let board = self.pos.board();
        let mut out = String::with_capacity(128);

        for rank in (0..8).rev().map(Rank::new) {
            for file in (0..8).map(File::new) {
                if file != File::A {
                    out.push(' ');
                }
                let square = Square::from_coords(file, rank);
                out.push(board.piece_at(square).map_or('.', |piece| piece.char()));
            }
            if rank != Rank::First {
                out.push('\n');
            }
        }

        out
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(Chess::default())
    }
}
