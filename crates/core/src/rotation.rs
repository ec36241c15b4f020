//! Rotation resolver - matrix rotation with a horizontal wall-kick search
//!
//! Rotation is computed on demand for any square shape. When the rotated
//! shape collides in place, the resolver walks the column left and right with
//! steps `+1, -2, +3, -4, ...` (each step applied to the previous candidate, so
//! the tested columns are `c, c+1, c-1, c+2, c-2, ...`). A step is only taken
//! while its magnitude does not exceed the shape width. This is not a standard
//! rotation-system kick table.

use crate::collision::collides;
use crate::pieces::Shape;
use crate::player::{Delta, Player};
use crate::stage::Stage;
use crate::types::Direction;

/// Rotate a shape matrix by 90°
///
/// Clockwise is transpose then mirror each row; counter-clockwise is
/// transpose then reverse the row order.
pub fn rotate(shape: &Shape, direction: Direction) -> Shape {
    let transposed = shape.transposed();
    match direction {
        Direction::Clockwise => transposed.with_rows_mirrored(),
        Direction::CounterClockwise => transposed.with_row_order_reversed(),
    }
}

/// Try to rotate the player, kicking horizontally if needed
///
/// Returns the rotated player at the first free column, or the original player
/// unchanged when no column within the search bound is free.
pub fn attempt_rotate(player: &Player, stage: &Stage, direction: Direction) -> Player {
    let mut candidate = Player {
        shape: rotate(&player.shape, direction),
        ..*player
    };

    let width = candidate.shape.size() as i32;
    let mut step: i32 = 1;
    while collides(&candidate, stage, Delta::NONE) {
        if step.abs() > width {
            return *player;
        }
        candidate.col += step;
        step = -(step + step.signum());
    }

    candidate
}
