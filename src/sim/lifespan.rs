//! Lifespan countdown

use super::state::GameState;

/// Tick every lifespan down by `dt`; destroy entities that run out
///
/// Returns how many entities expired.
pub fn run(state: &mut GameState, dt: f32) -> usize {
    let ids = state.store.entities();
    let mut expired = Vec::new();
    for id in ids {
        if let Some(life) = state.store.components.lifespans.get_mut(id) {
            life.remaining -= dt;
            if life.is_expired() {
                expired.push(id);
            }
        }
    }
    for id in &expired {
        state.store.destroy(*id);
    }
    expired.len()
}
