//! DTOs for memberships_sea adapter.

/// DTO for creating a new membership row.
#[derive(Debug, Clone, Copy)]
pub struct MembershipCreate {
    pub game_id: i64,
    pub player_id: i64,
    /// 1-based position in the game's join order.
    pub join_order: i32,
}

impl MembershipCreate {
    pub fn new(game_id: i64, player_id: i64, join_order: i32) -> Self {
        Self {
            game_id,
            player_id,
            join_order,
        }
    }
}
