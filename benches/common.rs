#![allow(dead_code)]

use sparse_ecs::World;

pub const AGENTS_SMALL: usize = 10_000;
pub const AGENTS_MED: usize = 100_000;

#[derive(Clone, Copy, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Default)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Clone, Copy, Default)]
pub struct Wealth {
    pub value: f32,
}

/// xorshift64* step, for cheap deterministic value scrambling.
pub fn scramble(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

/// Every agent gets `Position` and `Wealth`; every fourth also moves.
pub fn populate(world: &mut World, count: usize) {
    let mut seed = 0x9E37_79B9_7F4A_7C15u64;
    for i in 0..count {
        let mut agent = world.entity();
        agent.set(Position { x: i as f32, y: 0.0 });
        agent.set(Wealth { value: (scramble(&mut seed) % 1_000) as f32 });
        if i % 4 == 0 {
            agent.set(Velocity { dx: 1.0, dy: 1.0 });
        }
    }
}
