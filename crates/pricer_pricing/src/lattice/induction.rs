//! Backward induction over a built lattice.

use pricer_core::types::PricingError;
use pricer_models::instruments::VanillaOption;
use tracing::debug;

use super::Lattice;

/// Values every node of `lattice` from maturity back to the root and
/// returns the root value.
///
/// Terminal nodes take the intrinsic payoff. Earlier nodes take the
/// discounted expectation over their mid successor and its `top` / `bottom`
/// neighbours. For American contracts the value is floored at intrinsic and
/// the node's exercise flag is set when `intrinsic > 0` and
/// `value - intrinsic <= tolerance`.
///
/// # Errors
///
/// `PricingError::NumericalInstability` if a node has no mid successor or
/// the root value is not finite.
pub fn backward_induction(
    lattice: &mut Lattice,
    option: &VanillaOption,
    tolerance: f64,
) -> Result<f64, PricingError> {
    let discount = (-lattice.rate * lattice.dt).exp();
    let american = option.exercise_style().allows_early_exercise();

    let last = lattice.layers.len() - 1;
    for node in lattice.layers[last].nodes.iter_mut() {
        node.value = option.payoff(node.spot);
        node.early_exercise = None;
    }

    let mut exercised = 0usize;
    for t in (0..last).rev() {
        let (head, tail) = lattice.layers.split_at_mut(t + 1);
        let current = &mut head[t];
        let next = &tail[0];

        for node in current.nodes.iter_mut() {
            let mid = node.next_mid.ok_or_else(|| {
                PricingError::NumericalInstability(format!(
                    "node at layer {} spot {} has no successor",
                    t, node.spot
                ))
            })?;
            let successor = &next.nodes[mid];

            let mut expectation = node.p_mid * successor.value;
            if let Some(up) = successor.top {
                expectation += node.p_up * next.nodes[up].value;
            }
            if let Some(down) = successor.bottom {
                expectation += node.p_down * next.nodes[down].value;
            }
            let continuation = discount * expectation;

            if american {
                let intrinsic = option.payoff(node.spot);
                node.value = continuation.max(intrinsic);
                let exercise = intrinsic > 0.0 && node.value - intrinsic <= tolerance;
                exercised += usize::from(exercise);
                node.early_exercise = Some(exercise);
            } else {
                node.value = continuation;
                node.early_exercise = None;
            }
        }
    }

    let price = lattice.root().value;
    if !price.is_finite() {
        return Err(PricingError::NumericalInstability(format!(
            "lattice produced a non-finite price: {}",
            price
        )));
    }

    debug!(price, american, exercised, "backward induction complete");
    Ok(price)
}
