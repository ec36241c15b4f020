//! Collision detection
//!
//! [`collides`] is the only place that decides whether a placement is legal.
//! Movement, gravity, hard drop and the rotation resolver all go through it.

use crate::player::{Delta, Player};
use crate::stage::Stage;

/// Would `player` moved by `delta` overlap a wall, the floor, the ceiling or a
/// locked cell?
///
/// Any out-of-range row or column counts as a collision, including rows above
/// the top of the stage. Only locked cells block; active overlay cells are
/// ignored.
pub fn collides(player: &Player, stage: &Stage, delta: Delta) -> bool {
    player.cells().iter().any(|&(col, row, _)| {
        let col = col + delta.col;
        let row = row + delta.row;
        !stage.is_in_bounds(col, row) || stage.is_locked(col, row)
    })
}

/// Largest number of rows `player` can fall without colliding
pub fn drop_distance(player: &Player, stage: &Stage) -> i32 {
    let mut distance = 0;
    while !collides(player, stage, Delta::down(distance + 1)) {
        distance += 1;
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, PieceKind};

    #[test]
    fn test_spawn_on_empty_stage_is_free() {
        let stage = Stage::default();
        for kind in PieceKind::ALL {
            let player = Player::spawn(kind, stage.width());
            assert!(!collides(&player, &stage, Delta::NONE), "{kind:?}");
        }
    }

    #[test]
    fn test_walls_and_floor() {
        let stage = Stage::default();
        let o = Player::spawn(PieceKind::O, 10);

        assert!(!collides(&o, &stage, Delta::new(-4, 0)));
        assert!(collides(&o, &stage, Delta::new(-5, 0)));
        assert!(!collides(&o, &stage, Delta::new(4, 0)));
        assert!(collides(&o, &stage, Delta::new(5, 0)));
        assert!(!collides(&o, &stage, Delta::down(18)));
        assert!(collides(&o, &stage, Delta::down(19)));
    }

    #[test]
    fn test_rows_above_the_top_collide() {
        let stage = Stage::default();
        let o = Player::spawn(PieceKind::O, 10);
        assert!(collides(&o, &stage, Delta::new(0, -1)));
    }

    #[test]
    fn test_only_locked_cells_block() {
        let mut stage = Stage::default();
        let o = Player::spawn(PieceKind::O, 10);

        stage.set(4, 2, Cell::active(1));
        assert!(!collides(&o, &stage, Delta::DOWN));

        stage.set(4, 2, Cell::locked(1));
        assert!(collides(&o, &stage, Delta::DOWN));
    }

    #[test]
    fn test_transparent_cells_never_collide() {
        let stage = Stage::default();
        // The I matrix is 4 wide but only column 1 is occupied.
        let i = Player::spawn(PieceKind::I, 10);
        assert!(!collides(&i, &stage, Delta::new(-4, 0)));
        assert!(collides(&i, &stage, Delta::new(-5, 0)));
    }

    #[test]
    fn test_drop_distance_stops_on_first_obstruction() {
        let mut stage = Stage::default();
        let o = Player::spawn(PieceKind::O, 10);
        assert_eq!(drop_distance(&o, &stage), 18);

        stage.set(5, 10, Cell::locked(2));
        assert_eq!(drop_distance(&o, &stage), 8);
        let landed = o.moved(Delta::down(8));
        assert!(collides(&landed, &stage, Delta::DOWN));
    }
}
