/// Ports layer - Interface definitions for hexagonal architecture
///
/// Inbound ports are driven by the outside world (the web handler), outbound
/// ports are the interfaces the application core uses to reach the registry
/// API, the CSV writer, and progress logging.
pub mod inbound;
pub mod outbound;
