/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that calling services
/// use to interact with the application core.
pub mod resolution_lifecycle_port;

pub use resolution_lifecycle_port::ResolutionLifecyclePort;
