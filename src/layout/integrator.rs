//! Damped explicit integrator.
//!
//! Advances one node by one tick from the scalar magnitude of its net force.
//! The force direction must already be stored on the node. Acceleration is
//! kept as a scalar and only becomes a vector again through `direction` when
//! the velocity is updated.

use crate::graph::Node;

use super::config::LayoutConfig;

/// Advance `node` by one tick:
///
/// 1. `acceleration = force_magnitude / mass`
/// 2. `v[i] = (v[i] + acceleration * direction[i] * tick) * viscous`
/// 3. `v[i] = min(v[i], max_velocity)` (upper bound only)
/// 4. `position[i] += v[i] * tick`
pub fn integrate(node: &mut Node, force_magnitude: f64, config: &LayoutConfig) {
    update_acceleration(node, force_magnitude);
    update_velocity(node, config);
    update_position(node, config);
}

/// Step 1: scalar acceleration from the force magnitude.
pub fn update_acceleration(node: &mut Node, force_magnitude: f64) {
    node.acceleration = force_magnitude / node.mass;
}

/// Steps 2 and 3: damped velocity update and the one-sided clamp.
pub fn update_velocity(node: &mut Node, config: &LayoutConfig) {
    for axis in 0..2 {
        let v = (node.velocity[axis] + node.acceleration * node.direction[axis] * config.tick)
            * config.viscous;
        // negative components are deliberately left uncapped
        node.velocity[axis] = if v > config.max_velocity {
            config.max_velocity
        } else {
            v
        };
    }
}

/// Step 4: move the node along its velocity.
pub fn update_position(node: &mut Node, config: &LayoutConfig) {
    node.x += node.velocity[0] * config.tick;
    node.y += node.velocity[1] * config.tick;
}
