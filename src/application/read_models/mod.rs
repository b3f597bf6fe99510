//! Read models for query-oriented views of resolutions

mod delegation_chain;

pub use delegation_chain::DelegationChainView;
