//! Game rules: placement, cluster resolution, movement, stealing.
//!
//! Every function here is stateless given its inputs: it validates against
//! the supplied [`Board`](crate::board::Board) and either applies its full
//! mutation or returns a [`RuleError`](crate::core::RuleError) leaving the
//! board untouched. Turn and phase bookkeeping lives in the `session`
//! module.

pub mod cluster;
pub mod movement;
pub mod placement;
pub mod steal;

pub use cluster::{find_cluster, Cluster};
pub use movement::{move_cluster, rotate_cluster, MoveOutcome};
pub use placement::{
    auto_place_neutral, home_half, opponent_half, place_home, place_neutral, MIN_NEUTRAL_SPACING,
};
pub use steal::{steal, steal_targets};
