//! Forward construction of the pruned trinomial lattice.
//!
//! Each layer is grown from the previous one in two sweeps starting at the
//! trunk: upward through `top` links, then downward through `bottom` links.
//! For every parent node the builder
//!
//! 1. computes the one-step forward `F = S e^{r dt} - D`,
//! 2. locates the next-layer node whose branch interval brackets `F`,
//! 3. matches the first two moments of the lognormal step to the three
//!    target levels `alpha * s`, `s`, `s / alpha` around that node,
//! 4. materialises the up/down targets if enough mass would reach them,
//! 5. pushes reach probability forward, collapsing negligible nodes to a
//!    pure drift so they stop branching.

use std::time::Instant;

use pricer_core::market_data::Market;
use pricer_core::types::PricingError;
use pricer_models::instruments::VanillaOption;
use tracing::{debug, trace, warn};

use super::node::{Layer, Node};
use super::Lattice;
use crate::config::PricingConfig;

/// Per-step constants shared by every node of a layer.
#[derive(Clone, Copy, Debug)]
struct StepParams {
    alpha: f64,
    growth: f64,
    variance_factor: f64,
    dividend: f64,
    threshold: f64,
}

/// Mutable view over the layer being read and the layer being grown.
struct LayerStep<'a> {
    current: &'a mut Layer,
    next: &'a mut Layer,
    params: StepParams,
}

impl<'a> LayerStep<'a> {
    /// Grows `next` from every node of `current`, trunk first.
    fn run(&mut self) -> Result<(), PricingError> {
        let trunk = self.current.trunk;

        let mut candidate = self.next.trunk;
        let mut cursor = Some(trunk);
        while let Some(i) = cursor {
            candidate = self.setup(i, candidate)?;
            cursor = self.current.nodes[i].top;
        }

        candidate = self.current.nodes[trunk].next_mid.unwrap_or(self.next.trunk);
        cursor = self.current.nodes[trunk].bottom;
        while let Some(i) = cursor {
            candidate = self.setup(i, candidate)?;
            cursor = self.current.nodes[i].bottom;
        }

        self.next.trunk = self.current.nodes[trunk].next_mid.unwrap_or(self.next.trunk);
        Ok(())
    }

    /// Links parent `i` to its mid successor, calibrates its transition
    /// probabilities and pushes its reach probability forward.
    fn setup(&mut self, i: usize, candidate: usize) -> Result<usize, PricingError> {
        let StepParams {
            alpha,
            growth,
            variance_factor,
            dividend,
            threshold,
        } = self.params;

        let spot = self.current.nodes[i].spot;
        let forward = spot * growth - dividend;

        let mid = self.locate(forward, candidate);
        self.current.nodes[i].next_mid = Some(mid);
        self.next.nodes[mid].previous = Some(i);

        // Moment matching around the mid successor
        let variance = spot * spot * variance_factor;
        let m = 1.0 / self.next.nodes[mid].spot;
        let p_down = (m * m * (variance + forward * forward) - 1.0 - (alpha + 1.0) * (m * forward - 1.0))
            / ((1.0 - alpha) * (alpha.powi(-2) - 1.0));
        let p_up = (m * forward - 1.0 - (1.0 / alpha - 1.0) * p_down) / (alpha - 1.0);
        let p_mid = 1.0 - p_up - p_down;

        if !(p_up.is_finite() && p_mid.is_finite() && p_down.is_finite()) {
            return Err(PricingError::NumericalInstability(format!(
                "non-finite transition probabilities at spot {}",
                spot
            )));
        }

        {
            let node = &mut self.current.nodes[i];
            node.p_up = p_up;
            node.p_mid = p_mid;
            node.p_down = p_down;
        }

        let up = self.ensure_top(mid);
        let down = self.ensure_bottom(mid);

        let node = &mut self.current.nodes[i];
        let reach = node.probability;
        if reach * node.p_up.max(node.p_down) < threshold {
            node.p_up = 0.0;
            node.p_mid = 1.0;
            node.p_down = 0.0;
        } else {
            if let Some(u) = up {
                self.next.nodes[u].probability += reach * node.p_up;
            }
            if let Some(d) = down {
                self.next.nodes[d].probability += reach * node.p_down;
            }
        }
        self.next.nodes[mid].probability += reach * node.p_mid;

        Ok(mid)
    }

    /// Walks the next layer from `candidate` until the branch interval of
    /// the reached node brackets `forward`, growing the layer when needed.
    fn locate(&mut self, forward: f64, candidate: usize) -> usize {
        let alpha = self.params.alpha;
        let mut k = candidate;

        while forward > self.next.nodes[k].spot * (1.0 + alpha) / 2.0 {
            if self.next.nodes[k].previous.is_none() {
                break;
            }
            match self.ensure_top(k) {
                Some(up) => k = up,
                None => break,
            }
        }

        while forward <= self.next.nodes[k].spot * (1.0 + 1.0 / alpha) / 2.0 {
            if forward < 0.0 || self.next.nodes[k].previous.is_none() {
                break;
            }
            match self.ensure_bottom(k) {
                Some(down) => k = down,
                None => break,
            }
        }

        k
    }

    /// Existing or newly created upper neighbour of next-layer node `k`.
    ///
    /// A node is created when the mass flowing into it exceeds the pruning
    /// threshold, or when the parent column already has an upper neighbour.
    fn ensure_top(&mut self, k: usize) -> Option<usize> {
        if let Some(up) = self.next.nodes[k].top {
            return Some(up);
        }
        let parent = self.next.nodes[k].previous?;

        let nodes = &self.current.nodes;
        let p = &nodes[parent];
        let mut mass = p.probability * p.p_up;
        if let Some(t) = p.top {
            mass += nodes[t].probability * nodes[t].p_mid;
            if let Some(tt) = nodes[t].top {
                mass += nodes[tt].probability * nodes[tt].p_down;
            }
        }

        if mass > self.params.threshold || p.top.is_some() {
            let mut node = Node::new(self.next.nodes[k].spot * self.params.alpha);
            node.bottom = Some(k);
            let up = self.next.push(node);
            self.next.nodes[k].top = Some(up);
            Some(up)
        } else {
            None
        }
    }

    /// Existing or newly created lower neighbour of next-layer node `k`.
    fn ensure_bottom(&mut self, k: usize) -> Option<usize> {
        if let Some(down) = self.next.nodes[k].bottom {
            return Some(down);
        }
        let parent = self.next.nodes[k].previous?;

        let nodes = &self.current.nodes;
        let p = &nodes[parent];
        let mut mass = p.probability * p.p_down;
        if let Some(b) = p.bottom {
            mass += nodes[b].probability * nodes[b].p_mid;
            if let Some(bb) = nodes[b].bottom {
                mass += nodes[bb].probability * nodes[bb].p_up;
            }
        }

        if mass > self.params.threshold || p.bottom.is_some() {
            let mut node = Node::new(self.next.nodes[k].spot / self.params.alpha);
            node.top = Some(k);
            let down = self.next.push(node);
            self.next.nodes[k].bottom = Some(down);
            Some(down)
        } else {
            None
        }
    }
}

impl Lattice {
    /// Builds the lattice for `option` under `market`.
    ///
    /// Maturity and dividend offsets use the market's day count. Dividends
    /// are looked up relative to the option's valuation date, one
    /// `(t, t + dt]` window per step.
    ///
    /// # Errors
    ///
    /// - `PricingError::Configuration` if `config` is invalid
    /// - `PricingError::Domain` for a non-positive maturity or volatility,
    ///   or if dividends push the trunk to a non-positive level. A zero
    ///   volatility collapses the branch spacing to `alpha == 1`, so no
    ///   lattice exists for it; [`PriceEngine`](crate::engine::PriceEngine)
    ///   prices that case on the deterministic forward path instead.
    /// - `PricingError::NumericalInstability` if calibration breaks down
    pub fn build(
        option: &VanillaOption,
        market: &Market,
        config: &PricingConfig,
    ) -> Result<Self, PricingError> {
        config.validate()?;

        let maturity = option.maturity_with(market.day_count());
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(PricingError::Domain(format!(
                "maturity must be positive, got {} years",
                maturity
            )));
        }
        let sigma = market.volatility();
        if sigma <= 0.0 {
            return Err(PricingError::Domain(format!(
                "lattice requires positive volatility, got {}",
                sigma
            )));
        }

        let started = Instant::now();
        let steps = config.steps();
        let rate = market.rate();
        let dt = maturity / steps as f64;
        let alpha = (sigma * (3.0 * dt).sqrt()).exp();
        let growth = (rate * dt).exp();
        let variance_factor = (2.0 * rate * dt).exp() * ((sigma * sigma * dt).exp() - 1.0);
        let threshold = config.pruning_threshold();
        let tolerance = threshold * steps as f64;

        let mut root = Layer::with_trunk(market.spot());
        root.nodes[0].probability = 1.0;

        let mut lattice = Lattice {
            layers: Vec::with_capacity(steps + 1),
            steps,
            dt,
            alpha,
            rate,
        };
        lattice.layers.push(root);

        for t in 0..steps {
            let dividend = market.total_dividend_from(
                option.valuation_date(),
                t as f64 * dt,
                (t + 1) as f64 * dt,
            );

            let current = lattice
                .layers
                .last_mut()
                .ok_or_else(|| PricingError::NumericalInstability("empty lattice".to_string()))?;

            let trunk_forward = current.nodes[current.trunk].spot * growth - dividend;
            if trunk_forward <= 0.0 {
                return Err(PricingError::Domain(format!(
                    "dividend {} exceeds forward level at step {}",
                    dividend, t
                )));
            }

            let mut next = Layer::with_trunk(trunk_forward);
            LayerStep {
                current,
                next: &mut next,
                params: StepParams {
                    alpha,
                    growth,
                    variance_factor,
                    dividend,
                    threshold,
                },
            }
            .run()?;

            let mass = next.total_probability();
            trace!(step = t + 1, nodes = next.len(), mass, dividend, "lattice layer built");
            if (mass - 1.0).abs() > tolerance {
                warn!(
                    step = t + 1,
                    mass,
                    tolerance,
                    "lattice layer probability drifted from one"
                );
            }

            lattice.layers.push(next);
        }

        debug!(
            steps,
            dt,
            alpha,
            nodes = lattice.node_count(),
            terminal_width = lattice.layers.last().map_or(0, Layer::len),
            elapsed_us = started.elapsed().as_micros() as u64,
            "lattice built"
        );

        Ok(lattice)
    }
}
