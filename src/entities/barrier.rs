use super::{Body, EntityId, IdGen};

pub const BLOCK_HEALTH: u8 = 3;
/// Blocks sit on a 14-unit grid; the sprite fills the whole cell.
pub const BLOCK_HALF: f32 = 7.0;
const BLOCK_STEP: f32 = 14.0;
const CLUSTER_ROWS: u32 = 4;
const CLUSTER_COLS: u32 = 5;
const CLUSTER_COUNT: u32 = 4;

/// One destructible cell of a barrier cluster. Health counts down 3..0;
/// at zero the block is removed for good.
#[derive(Debug, Clone)]
pub struct BarrierBlock {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub health: u8,
}

impl BarrierBlock {
    pub fn new(id: EntityId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            health: BLOCK_HEALTH,
        }
    }

    /// Absorbs one hit. Returns true when the block is spent.
    pub fn hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }
}

impl Body for BarrierBlock {
    fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn half_extents(&self) -> (f32, f32) {
        (BLOCK_HALF, BLOCK_HALF)
    }
}

/// Builds the four barrier clusters: 4x5 blocks each, spread over the middle
/// 80% of the field with the front row at 70% of the field height.
pub fn build_barriers(field_width: f32, field_height: f32, ids: &mut IdGen) -> Vec<BarrierBlock> {
    let barrier_y = field_height * 0.7;
    let cluster_width = CLUSTER_COLS as f32 * BLOCK_STEP;
    let total_space = field_width * 0.8;
    let gap = (total_space - CLUSTER_COUNT as f32 * cluster_width) / (CLUSTER_COUNT - 1) as f32;
    let start_x = field_width * 0.1;

    let mut blocks = Vec::with_capacity((CLUSTER_COUNT * CLUSTER_ROWS * CLUSTER_COLS) as usize);
    for cluster in 0..CLUSTER_COUNT {
        let cluster_x = start_x + cluster as f32 * (cluster_width + gap);
        for row in 0..CLUSTER_ROWS {
            for col in 0..CLUSTER_COLS {
                blocks.push(BarrierBlock::new(
                    ids.next(),
                    cluster_x + col as f32 * BLOCK_STEP,
                    barrier_y + row as f32 * BLOCK_STEP,
                ));
            }
        }
    }
    blocks
}

/// Aliens crushing the front line: once the lowest alien's bottom edge
/// reaches the topmost surviving row, that whole row is destroyed. Returns
/// how many blocks went.
pub fn crush_front_row(blocks: &mut Vec<BarrierBlock>, lowest_alien_bottom: f32) -> usize {
    let Some(top_y) = blocks.iter().map(|b| b.y).reduce(f32::min) else {
        return 0;
    };
    if lowest_alien_bottom < top_y {
        return 0;
    }
    let before = blocks.len();
    blocks.retain(|b| b.y != top_y);
    before - blocks.len()
}
