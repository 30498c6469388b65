//! Pruned recombining trinomial lattice.
//!
//! - [`node`]: node records and per-layer arenas
//! - `builder`: forward construction ([`Lattice::build`])
//! - `induction`: valuation ([`backward_induction`])
//!
//! The lattice is built once, valued once, then discarded. Nothing mutates
//! it outside those two passes.
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::{DividendSchedule, Market};
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{PayoffType, VanillaOption};
//! use pricer_pricing::config::PricingConfig;
//! use pricer_pricing::lattice::{backward_induction, Lattice};
//!
//! let today = Date::from_ymd(2024, 1, 1).unwrap();
//! let market = Market::new(100.0, 0.05, 0.2, DividendSchedule::empty(), today).unwrap();
//! let option = VanillaOption::american(110.0, today.add_days(365), PayoffType::Put, today).unwrap();
//! let config = PricingConfig::with_steps(100).unwrap();
//!
//! let mut lattice = Lattice::build(&option, &market, &config).unwrap();
//! let price = backward_induction(&mut lattice, &option, config.exercise_tolerance()).unwrap();
//! assert!(price > 10.0);
//! ```

mod builder;
mod induction;
pub mod node;

pub use induction::backward_induction;
pub use node::{Layer, Node, NodeId, OrderedNodes};

/// A built trinomial lattice.
///
/// Layer `t` holds the states reachable at time `t * dt`; layer 0 is the
/// single root at the valuation date.
#[derive(Clone, Debug)]
pub struct Lattice {
    pub(crate) layers: Vec<Layer>,
    pub(crate) steps: usize,
    pub(crate) dt: f64,
    pub(crate) alpha: f64,
    pub(crate) rate: f64,
}

impl Lattice {
    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time step in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Branch spacing `exp(sigma * sqrt(3 dt))`.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// All layers, root first.
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer `t`, if it exists.
    #[inline]
    pub fn layer(&self, t: usize) -> Option<&Layer> {
        self.layers.get(t)
    }

    /// The valuation-date node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.layers[0].nodes[0]
    }

    /// Trunk node of layer `t`.
    pub fn trunk(&self, t: usize) -> Option<&Node> {
        let layer = self.layers.get(t)?;
        layer.get(layer.trunk)
    }

    /// Node at `id`, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.layers.get(id.layer)?.get(id.index)
    }

    /// Total number of surviving nodes.
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// `(highest, lowest)` underlying level in the final layer.
    pub fn terminal_extremes(&self) -> (f64, f64) {
        self.layers
            .last()
            .map_or((f64::NAN, f64::NAN), Layer::extreme_spots)
    }

    /// Trunk nodes from the root to maturity.
    pub fn trunk_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.layers.iter().filter_map(|layer| layer.get(layer.trunk))
    }
}
