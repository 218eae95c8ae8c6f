//! Atlas Layout - WASM Module
//!
//! A ForceAtlas-style force-directed layout engine. Nodes are pulled together
//! along their edges, pushed apart by degree-weighted repulsion and drawn
//! toward the center of the layout box, and a damped integrator moves them
//! until the total kinetic energy settles below a threshold.
//!
//! # Architecture
//!
//! - `graph`: Node state and the petgraph-backed edge topology
//! - `layout`: Configuration, force model, integrator and simulation loop
//! - `error`: The crate error type
//!
//! The Rust API lives in [`layout::ForceLayout`]. [`AtlasLayoutWasm`] exposes
//! the same operations to JavaScript via wasm-bindgen.

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;

pub use error::{LayoutError, Result};
pub use graph::{Node, NodeId, NodeOptions};
pub use layout::{ForceLayout, LayoutConfig, NodePosition, SimulationState};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JavaScript entry point for the layout engine.
///
/// Wraps a [`ForceLayout`]; every fallible call surfaces the
/// [`LayoutError`] message as a JS exception.
#[wasm_bindgen]
pub struct AtlasLayoutWasm {
    layout: ForceLayout,
}

#[wasm_bindgen]
impl AtlasLayoutWasm {
    /// Create a layout from a plain config object.
    ///
    /// Keys are camelCase (`kG`, `kR`, `ipsW`, `tick`, `olradius`,
    /// `viscous`, `maxVelocity`, `width`, `height`, `linlog`,
    /// `dissuadeHubs`, `seed`). Missing keys use the defaults; `undefined`
    /// or `null` uses the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<AtlasLayoutWasm, JsError> {
        let config: LayoutConfig = if config.is_undefined() || config.is_null() {
            LayoutConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            layout: ForceLayout::new(config)?,
        })
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node near the layout center.
    ///
    /// Returns the assigned node ID.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, neighbors: &[u32]) -> std::result::Result<u32, JsError> {
        Ok(self.layout.add_node(neighbors)?.raw())
    }

    /// Add a node at an explicit position.
    #[wasm_bindgen(js_name = addNodeAt)]
    pub fn add_node_at(
        &mut self,
        x: f64,
        y: f64,
        neighbors: &[u32],
    ) -> std::result::Result<u32, JsError> {
        let id = self.layout.add_node_with(neighbors, NodeOptions::at(x, y))?;
        Ok(id.raw())
    }

    /// Add a jittered node with a custom mass.
    #[wasm_bindgen(js_name = addNodeWithMass)]
    pub fn add_node_with_mass(
        &mut self,
        mass: f64,
        neighbors: &[u32],
    ) -> std::result::Result<u32, JsError> {
        let id = self
            .layout
            .add_node_with(neighbors, NodeOptions::default().with_mass(mass))?;
        Ok(id.raw())
    }

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.layout.node_count() as u32
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Advance one tick. Returns the total kinetic energy after it.
    pub fn step(&mut self) -> std::result::Result<f64, JsError> {
        Ok(self.layout.step()?)
    }

    /// Tick until converged. Throws when `maxTicks` runs out first.
    #[wasm_bindgen(js_name = runUntilConverged)]
    pub fn run_until_converged(
        &mut self,
        max_ticks: Option<u32>,
    ) -> std::result::Result<f64, JsError> {
        Ok(self.layout.run_until_converged(max_ticks)?)
    }

    /// Energy at the end of the last tick.
    pub fn energy(&self) -> f64 {
        self.layout.energy()
    }

    /// Number of ticks run so far.
    #[wasm_bindgen(js_name = tickCount)]
    pub fn tick_count(&self) -> u32 {
        self.layout.tick_count()
    }

    #[wasm_bindgen(js_name = isConverged)]
    pub fn is_converged(&self) -> bool {
        self.layout.is_converged()
    }

    // =========================================================================
    // Layout Snapshot
    // =========================================================================

    /// Current layout as an array of `{ id, x, y }` objects in id order.
    pub fn positions(&self) -> std::result::Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.layout.positions())?)
    }

    /// Current layout as a Float64Array `[x0, y0, x1, y1, ...]` in id order.
    #[wasm_bindgen(js_name = positionsArray)]
    pub fn positions_array(&self) -> Float64Array {
        let positions = interleave(&self.layout.positions());
        Float64Array::from(&positions[..])
    }
}

/// Flatten a snapshot into `[x0, y0, x1, y1, ...]`.
fn interleave(positions: &[NodePosition]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(positions.len() * 2);
    for position in positions {
        flat.push(position.x);
        flat.push(position.y);
    }
    flat
}
