/// Resolution domain - entities, value objects and delegation graph services
///
/// The domain layer knows nothing about how records are stored; the services
/// reach the delegation graph only through the outbound repository ports.
pub mod domain;
pub mod services;
