/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports only: the application core uses them to reach
/// dependency sources, the console and the output destination.
pub mod outbound;
