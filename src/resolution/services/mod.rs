/// Domain services walking the delegation graph
mod root_resolver;
mod upstream_propagator;

pub use root_resolver::{DelegationPath, RootResolver};
pub use upstream_propagator::{PropagationOutcome, UpstreamPropagator};
