//! Lattice nodes and per-layer node arenas.
//!
//! Nodes never own each other. Each time layer stores its nodes in a `Vec`
//! and structural relations are plain indices:
//!
//! - `top` / `bottom`: neighbours in the same layer
//! - `next_mid`: the node in layer `t + 1` this node's mid branch lands on
//! - `previous`: the node in layer `t - 1` whose mid branch last landed here
//!
//! Storage order within a layer is creation order. Walking `top` / `bottom`
//! from the trunk visits the layer by spot.

/// Address of a node inside a [`Lattice`](super::Lattice).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Time layer, 0 at the valuation date.
    pub layer: usize,
    /// Index into the layer's node storage.
    pub index: usize,
}

/// One underlying-price state at one time step.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) spot: f64,
    pub(crate) probability: f64,
    pub(crate) p_up: f64,
    pub(crate) p_mid: f64,
    pub(crate) p_down: f64,
    pub(crate) value: f64,
    pub(crate) early_exercise: Option<bool>,
    pub(crate) top: Option<usize>,
    pub(crate) bottom: Option<usize>,
    pub(crate) next_mid: Option<usize>,
    pub(crate) previous: Option<usize>,
}

impl Node {
    pub(crate) fn new(spot: f64) -> Self {
        Self {
            spot,
            probability: 0.0,
            p_up: 0.0,
            p_mid: 0.0,
            p_down: 0.0,
            value: 0.0,
            early_exercise: None,
            top: None,
            bottom: None,
            next_mid: None,
            previous: None,
        }
    }

    /// Underlying level at this node.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Probability of reaching this node from the root.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// One-step transition probability to `next_mid.top`.
    #[inline]
    pub fn p_up(&self) -> f64 {
        self.p_up
    }

    /// One-step transition probability to `next_mid`.
    #[inline]
    pub fn p_mid(&self) -> f64 {
        self.p_mid
    }

    /// One-step transition probability to `next_mid.bottom`.
    #[inline]
    pub fn p_down(&self) -> f64 {
        self.p_down
    }

    /// Contract value after backward induction.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Early-exercise decision.
    ///
    /// `None` for European contracts, for terminal nodes, and before
    /// backward induction has run.
    #[inline]
    pub fn early_exercise(&self) -> Option<bool> {
        self.early_exercise
    }

    /// Neighbour above, same layer.
    #[inline]
    pub fn top(&self) -> Option<usize> {
        self.top
    }

    /// Neighbour below, same layer.
    #[inline]
    pub fn bottom(&self) -> Option<usize> {
        self.bottom
    }

    /// Mid successor in the next layer.
    #[inline]
    pub fn next_mid(&self) -> Option<usize> {
        self.next_mid
    }

    /// Parent in the previous layer whose mid branch lands here.
    #[inline]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }
}

/// Nodes of a single time layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub(crate) nodes: Vec<Node>,
    pub(crate) trunk: usize,
}

impl Layer {
    /// A layer holding a single trunk node at `spot`.
    pub(crate) fn with_trunk(spot: f64) -> Self {
        Self {
            nodes: vec![Node::new(spot)],
            trunk: 0,
        }
    }

    /// Appends a node and returns its index.
    pub(crate) fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Nodes in storage order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of surviving nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a layer holds at least its trunk.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the trunk (the column grown from the root's mid branch).
    #[inline]
    pub fn trunk(&self) -> usize {
        self.trunk
    }

    /// Node at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Index of the highest node, found by walking `top` from the trunk.
    pub fn highest(&self) -> usize {
        let mut index = self.trunk;
        while let Some(up) = self.nodes[index].top {
            index = up;
        }
        index
    }

    /// Index of the lowest node, found by walking `bottom` from the trunk.
    pub fn lowest(&self) -> usize {
        let mut index = self.trunk;
        while let Some(down) = self.nodes[index].bottom {
            index = down;
        }
        index
    }

    /// Iterates the layer from highest to lowest spot through `bottom` links.
    pub fn iter_ordered(&self) -> OrderedNodes<'_> {
        OrderedNodes {
            nodes: &self.nodes,
            cursor: Some(self.highest()),
        }
    }

    /// Sum of reach probabilities over the layer.
    pub fn total_probability(&self) -> f64 {
        self.nodes.iter().map(|n| n.probability).sum()
    }

    /// `(highest, lowest)` underlying level reached by the layer.
    pub fn extreme_spots(&self) -> (f64, f64) {
        (
            self.nodes[self.highest()].spot,
            self.nodes[self.lowest()].spot,
        )
    }
}

/// Iterator over a layer in decreasing spot order.
#[derive(Debug, Clone)]
pub struct OrderedNodes<'a> {
    nodes: &'a [Node],
    cursor: Option<usize>,
}

impl<'a> Iterator for OrderedNodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.bottom;
        Some(node)
    }
}
