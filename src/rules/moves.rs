//! Pawn move legality. Everything is read off the board through [Board::resolve], a move
//! is legal when some adjacent cell or pawn leads to the target.

use itertools::iproduct;

use crate::board::{Board, Neighbor};
use crate::types::{Direction, MoveKind};
use crate::wire_representation::Position;

use super::violation::RuleViolation;

/// Decide whether a pawn on `from` may go to `target`, and how.
pub(crate) fn classify(
    board: &Board,
    from: Position,
    target: Position,
) -> Result<MoveKind, RuleViolation> {
    if target == from {
        return Err(RuleViolation::R2);
    }

    // a diagonal target can be reached around two different pawns, one route is enough
    let mut refusal = None;
    for dir in Direction::all() {
        let outcome = match board.resolve(from, dir) {
            None => continue,
            Some(Neighbor::Cell(p)) if p == target => Ok(MoveKind::Step),
            Some(Neighbor::Cell(_)) => continue,
            Some(Neighbor::Pawn(_, p)) if p == target => Err(RuleViolation::R6),
            Some(Neighbor::Pawn(_, p)) => match around_pawn(board, p, dir, target) {
                Some(outcome) => outcome,
                None => continue,
            },
        };
        if outcome.is_ok() {
            return outcome;
        }
        if refusal.is_none() {
            refusal = Some(outcome);
        }
    }

    refusal.unwrap_or_else(|| {
        if from.manhattan_distance(&target) == 1 {
            Err(RuleViolation::R3)
        } else {
            Err(RuleViolation::R2)
        }
    })
}

/// The verdict for reaching target past the pawn on `pawn`, approached in direction dir.
/// None when target isn't one of the cells next to that pawn.
fn around_pawn(
    board: &Board,
    pawn: Position,
    dir: Direction,
    target: Position,
) -> Option<Result<MoveKind, RuleViolation>> {
    let straight = board.resolve(pawn, dir);
    match straight {
        Some(Neighbor::Pawn(_, p)) if p == target => return Some(Err(RuleViolation::R8)),
        Some(Neighbor::Cell(p)) if p == target => return Some(Ok(MoveKind::Jump)),
        _ => {}
    }

    Direction::all()
        .into_iter()
        .filter(|side| side.is_perpendicular(&dir))
        .filter_map(|side| board.resolve(pawn, side))
        .find(|n| n.position() == target)
        .map(|n| match n {
            Neighbor::Pawn(..) => Err(RuleViolation::R8),
            // the straight jump is open, so it has to be taken
            Neighbor::Cell(_) if matches!(straight, Some(Neighbor::Cell(_))) => {
                Err(RuleViolation::R7)
            }
            Neighbor::Cell(_) => Ok(MoveKind::SideStep),
        })
}

/// Every target a pawn on `from` can legally move to
pub(crate) fn legal_targets(board: &Board, from: Position) -> Vec<(Position, MoveKind)> {
    iproduct!(-2..=2, -2..=2)
        .filter(|(da, db): &(i32, i32)| da.abs() + db.abs() <= 2)
        .map(|(da, db)| Position::new(from.a + da, from.b + db))
        .filter(|t| !board.grid().off_board(*t))
        .filter_map(|t| classify(board, from, t).ok().map(|kind| (t, kind)))
        .collect()
}
