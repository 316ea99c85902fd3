//! Active falling piece logic

use crate::board::Board;
use crate::tetromino::{PieceType, Rotation};

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of piece
    pub piece_type: PieceType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Pivot column
    pub x: i32,
    /// Pivot row, row 0 is the top of the board
    pub y: i32,
}

impl Piece {
    /// Create a new piece at the spawn position for a board `cols` wide
    pub fn spawn(piece_type: PieceType, cols: usize) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            x: cols as i32 / 2 - 1,
            y: 0,
        }
    }

    /// Get the absolute positions of all 4 cells
    pub fn cells(&self) -> [(i32, i32); 4] {
        Self::cells_at(self.piece_type.shape(self.rotation), self.x, self.y)
    }

    fn cells_at(offsets: [(i32, i32); 4], x: i32, y: i32) -> [(i32, i32); 4] {
        offsets.map(|(dx, dy)| (x + dx, y + dy))
    }

    fn fits(board: &Board, cells: &[(i32, i32); 4]) -> bool {
        cells.iter().all(|&(x, y)| !board.is_occupied(x, y))
    }

    /// Whether the piece could be shifted by (dx, dy) without leaving the
    /// board sideways, passing the floor, or overlapping a locked cell
    pub fn can_move_by(&self, board: &Board, dx: i32, dy: i32) -> bool {
        let offsets = self.piece_type.shape(self.rotation);
        Self::fits(board, &Self::cells_at(offsets, self.x + dx, self.y + dy))
    }

    /// Shift the piece unconditionally; check `can_move_by` first
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Whether the piece fits in `rotation` at its current position (no kicks)
    pub fn can_rotate_to(&self, board: &Board, rotation: Rotation) -> bool {
        let offsets = self.piece_type.shape(rotation);
        Self::fits(board, &Self::cells_at(offsets, self.x, self.y))
    }

    /// Try to rotate clockwise in place, returns true if successful
    pub fn rotate_clockwise(&mut self, board: &Board) -> bool {
        let new_rotation = self.rotation.cw();
        if self.can_rotate_to(board, new_rotation) {
            self.rotation = new_rotation;
            true
        } else {
            false
        }
    }

    /// Whether any cell sits above the visible grid
    pub fn is_above_grid(&self) -> bool {
        self.cells().iter().any(|&(_, y)| y < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::spawn(PieceType::T, 10);
        assert_eq!((piece.x, piece.y), (4, 0));
        assert_eq!(piece.rotation, Rotation::North);

        let narrow = Piece::spawn(PieceType::T, 7);
        assert_eq!(narrow.x, 2);
    }

    #[test]
    fn test_o_piece_floor_bound() {
        let board = Board::default();
        let piece = Piece::spawn(PieceType::O, 10);
        assert_eq!(piece.cells(), [(4, 0), (5, 0), (4, 1), (5, 1)]);
        assert!(!piece.can_move_by(&board, 0, 19));
        assert!(piece.can_move_by(&board, 0, 18));
    }

    #[test]
    fn test_o_piece_blocked_by_stack() {
        let mut board = Board::default();
        board.lock(&[(5, 19)]);
        let piece = Piece::spawn(PieceType::O, 10);
        assert!(!piece.can_move_by(&board, 0, 18));
        assert!(piece.can_move_by(&board, 0, 17));
    }

    #[test]
    fn test_side_walls() {
        let board = Board::default();
        let mut piece = Piece::spawn(PieceType::I, 10);
        piece.rotate_clockwise(&board);
        // Horizontal I spans x-1..=x+2
        assert!(piece.can_move_by(&board, -3, 0));
        assert!(!piece.can_move_by(&board, -4, 0));
        assert!(piece.can_move_by(&board, 3, 0));
        assert!(!piece.can_move_by(&board, 4, 0));
    }

    #[test]
    fn test_any_out_of_bounds_offset_is_rejected() {
        let board = Board::default();
        for piece_type in PieceType::ALL {
            let piece = Piece::spawn(piece_type, 10);
            for dx in -12..=12 {
                for dy in 0..=24 {
                    let out = piece.cells().iter().any(|&(x, y)| {
                        let (x, y) = (x + dx, y + dy);
                        x < 0 || x >= 10 || y >= 20
                    });
                    if out {
                        assert!(!piece.can_move_by(&board, dx, dy));
                    }
                }
            }
        }
    }

    #[test]
    fn test_above_grid_is_free() {
        let mut board = Board::default();
        // Fill the whole top row; cells above it are still free
        board.lock(&(0..10).map(|x| (x, 0)).collect::<Vec<_>>());
        let mut piece = Piece::spawn(PieceType::I, 10);
        piece.move_by(0, -3);
        // Vertical I now at rows -4..=-1
        assert!(piece.is_above_grid());
        assert!(piece.can_move_by(&board, 0, 0));
        assert!(!piece.can_move_by(&board, 0, 1));
    }

    #[test]
    fn test_rotation_above_grid_is_free() {
        let mut board = Board::default();
        // Top row full apart from the pivot column
        board.lock(&[(0, 0), (1, 0), (2, 0), (3, 0), (5, 0), (6, 0), (7, 0), (8, 0), (9, 0)]);
        let mut piece = Piece::spawn(PieceType::I, 10);
        assert_eq!(piece.cells(), [(4, -1), (4, 0), (4, 1), (4, 2)]);
        assert!(piece.can_move_by(&board, 0, 0));

        // South covers (4, -2..=1): two cells above the grid, none occupied
        assert!(piece.can_rotate_to(&board, Rotation::South));
        // East and West lie along the filled top row
        assert!(!piece.can_rotate_to(&board, Rotation::East));
        assert!(!piece.can_rotate_to(&board, Rotation::West));
        assert!(!piece.rotate_clockwise(&board));
        assert_eq!(piece.rotation, Rotation::North);

        // Two rows higher the horizontal I sits entirely above the grid
        piece.move_by(0, -2);
        assert!(piece.rotate_clockwise(&board));
        assert_eq!(piece.rotation, Rotation::East);
        assert!(piece.cells().iter().all(|&(_, y)| y == -2));
    }

    #[test]
    fn test_move_by_is_unchecked() {
        let mut piece = Piece::spawn(PieceType::T, 10);
        piece.move_by(-20, 40);
        assert_eq!((piece.x, piece.y), (-16, 40));
    }

    #[test]
    fn test_rotate_four_times_returns_to_start() {
        let board = Board::default();
        for piece_type in PieceType::ALL {
            let mut piece = Piece::spawn(piece_type, 10);
            piece.move_by(0, 5);
            let start = piece.clone();
            for _ in 0..4 {
                assert!(piece.rotate_clockwise(&board));
            }
            assert_eq!(piece, start);
        }
    }

    #[test]
    fn test_blocked_rotation_is_noop() {
        let mut board = Board::default();
        let mut piece = Piece::spawn(PieceType::I, 10);
        piece.move_by(0, 10);
        // East rotation would cover (3..=6, 10)
        board.lock(&[(6, 10)]);
        assert!(!piece.can_rotate_to(&board, Rotation::East));

        let before = piece.clone();
        for _ in 0..3 {
            assert!(!piece.rotate_clockwise(&board));
            assert_eq!(piece, before);
        }
    }

    #[test]
    fn test_rotation_against_wall_is_rejected() {
        let board = Board::default();
        let mut piece = Piece::spawn(PieceType::I, 10);
        piece.move_by(-4, 5);
        // Vertical I in column 0; horizontal would need x = -1
        assert_eq!(piece.x, 0);
        assert!(!piece.rotate_clockwise(&board));
        assert_eq!(piece.rotation, Rotation::North);
    }
}
