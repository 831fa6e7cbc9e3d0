use crate::network::{ErrorDelta, ErrorInit};

/// The error of an output node: the loss derivative times the activation derivative.
///
/// The activation derivative is cached so later layers reuse it.
pub fn simple_error_init(ctx: ErrorInit<'_>) -> f32 {
    let ErrorInit {
        targets,
        node,
        i,
        hyperparams,
        loss_prime,
        activation_prime,
        cache,
    } = ctx;

    let slope = activation_prime(node, hyperparams);
    cache.insert(i, node.j, slope);

    loss_prime(targets, node) * slope
}

/// The share of the error of node `at.k` in layer `at.i + 1` that flows back into node `at.j`
/// through their weight.
pub fn simple_error_delta(ctx: ErrorDelta<'_>) -> f32 {
    let ErrorDelta {
        trace,
        next_errors,
        weight,
        at,
        hyperparams,
        activation_prime,
        cache,
        ..
    } = ctx;

    let slope = cache.get_or_insert_with(at.i, at.j, || {
        activation_prime(trace.node(at.i, at.j), hyperparams)
    });

    next_errors[at.k] * weight * slope
}
