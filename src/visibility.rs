//! Fog of war.
//!
//! A cell is visible when its Euclidean distance from the player is within the view radius. The
//! comparison is made on squared integer distances, so no floating point rounding is involved.

use std::collections::BTreeSet;

use crate::grid::Position;

/// Smallest view radius the player can pick.
pub const MIN_VIEW_RADIUS: u32 = 1;
/// Largest view radius the player can pick.
pub const MAX_VIEW_RADIUS: u32 = 10;
/// View radius at the start of a game.
pub const INITIAL_VIEW_RADIUS: u32 = 3;

/// Returns whether a single cell can be seen from the player's position.
///
/// With fog disabled every cell is visible.
#[must_use]
pub fn is_visible(cell: Position, player: Position, radius: u32, fog: bool) -> bool {
    if !fog {
        return true;
    }

    let dx = u128::try_from(cell.x.abs_diff(player.x)).unwrap_or(u128::MAX);
    let dy = u128::try_from(cell.y.abs_diff(player.y)).unwrap_or(u128::MAX);
    let reach = u128::from(radius);

    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= reach * reach
}

/// Returns every cell of a `width` by `height` grid that can be seen from the player's position.
///
/// The set is rebuilt from scratch on every call.
#[must_use]
pub fn visible_set(
    player: Position,
    radius: u32,
    fog: bool,
    width: usize,
    height: usize,
) -> BTreeSet<Position> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
        .filter(|cell| is_visible(*cell, player, radius, fog))
        .collect()
}
