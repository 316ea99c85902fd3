//! Piece catalog: the seven piece types and their rotation states
//!
//! Offsets are (dx, dy) from the piece's pivot, with dy growing downward
//! to match the board's row order (row 0 is the top).

/// The 7 piece types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

/// Relative cell offsets for a single rotation state
pub type Shape = [(i32, i32); 4];

/// Shape table indexed by `[PieceType as usize][Rotation::index()]`
const SHAPES: [[Shape; 4]; 7] = [
    // I
    [
        [(0, -1), (0, 0), (0, 1), (0, 2)],
        [(-1, 0), (0, 0), (1, 0), (2, 0)],
        [(0, -2), (0, -1), (0, 0), (0, 1)],
        [(-2, 0), (-1, 0), (0, 0), (1, 0)],
    ],
    // J
    [
        [(-1, -1), (0, -1), (0, 0), (0, 1)],
        [(-1, 0), (0, 0), (1, 0), (1, -1)],
        [(0, -1), (0, 0), (0, 1), (1, 1)],
        [(-1, 1), (-1, 0), (0, 0), (1, 0)],
    ],
    // L
    [
        [(-1, 1), (0, 1), (0, 0), (0, -1)],
        [(-1, 0), (0, 0), (1, 0), (1, 1)],
        [(0, -1), (0, 0), (0, 1), (1, -1)],
        [(-1, -1), (-1, 0), (0, 0), (1, 0)],
    ],
    // O hangs below its pivot; all four states are the same square
    [
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
    ],
    // S
    [
        [(-1, 0), (-1, 1), (0, -1), (0, 0)],
        [(-1, -1), (0, -1), (0, 0), (1, 0)],
        [(-1, 0), (-1, 1), (0, -1), (0, 0)],
        [(-1, -1), (0, -1), (0, 0), (1, 0)],
    ],
    // T
    [
        [(-1, 0), (0, 0), (1, 0), (0, -1)],
        [(0, -1), (0, 0), (0, 1), (1, 0)],
        [(-1, 0), (0, 0), (1, 0), (0, 1)],
        [(-1, 0), (0, 0), (0, -1), (0, 1)],
    ],
    // Z
    [
        [(-1, -1), (0, -1), (0, 0), (1, 0)],
        [(-1, 1), (-1, 0), (0, 0), (0, -1)],
        [(-1, -1), (0, -1), (0, 0), (1, 0)],
        [(-1, 1), (-1, 0), (0, 0), (0, -1)],
    ],
];

impl PieceType {
    /// All piece types, in catalog order
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::J,
        PieceType::L,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    /// Get the shape offsets for this piece at a given rotation
    pub fn shape(self, rotation: Rotation) -> Shape {
        SHAPES[self as usize][rotation.index()]
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::I => "I",
            PieceType::J => "J",
            PieceType::L => "L",
            PieceType::O => "O",
            PieceType::S => "S",
            PieceType::T => "T",
            PieceType::Z => "Z",
        }
    }
}

/// Rotation states, cycling clockwise North → East → South → West
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Position of this state in [0, 4)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build a rotation from any index, taken mod 4
    pub fn from_index(index: usize) -> Rotation {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn test_every_shape_has_four_distinct_cells() {
        for piece in PieceType::ALL {
            for rotation in ROTATIONS {
                let cells: HashSet<_> = piece.shape(rotation).into_iter().collect();
                assert_eq!(cells.len(), 4, "{} {:?}", piece.name(), rotation);
            }
        }
    }

    #[test]
    fn test_shapes_are_connected() {
        for piece in PieceType::ALL {
            for rotation in ROTATIONS {
                let shape = piece.shape(rotation);
                for &(x, y) in &shape {
                    let has_neighbour = shape
                        .iter()
                        .any(|&(ox, oy)| (ox - x).abs() + (oy - y).abs() == 1);
                    assert!(has_neighbour, "{} {:?}", piece.name(), rotation);
                }
            }
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let north = PieceType::O.shape(Rotation::North);
        for rotation in ROTATIONS {
            assert_eq!(PieceType::O.shape(rotation), north);
        }
    }

    #[test]
    fn test_i_piece_alternates_vertical_and_horizontal() {
        assert!(PieceType::I.shape(Rotation::North).iter().all(|&(dx, _)| dx == 0));
        assert!(PieceType::I.shape(Rotation::East).iter().all(|&(_, dy)| dy == 0));
    }

    #[test]
    fn test_rotation_cycle() {
        let mut rotation = Rotation::North;
        for expected in [1, 2, 3, 0] {
            rotation = rotation.cw();
            assert_eq!(rotation.index(), expected);
        }
        assert_eq!(Rotation::from_index(6), Rotation::South);
        assert_eq!(Rotation::from_index(4), Rotation::North);
    }
}
