use evrental_data::StateData;

/// Storable form of a [`Flow`](crate::Flow): which definition it runs, where it is and what it has collected.
///
/// Restore with [`Flow::restore`](crate::Flow::restore).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSnapshot {
  pub definition: String,
  pub state: String,
  pub data: StateData,
}
