//! Base trait for state snapshots.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable snapshots (Clone to derive the next one)
/// - Self-contained (everything a renderer needs)
/// - Comparable (PartialEq so observers can skip unchanged snapshots)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
