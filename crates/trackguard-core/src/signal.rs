//! The canonical signal state and the lamp head it drives.

/// Three-aspect safety signal. `Red` is the most restrictive aspect and the
/// power-on default; every fail-safe path leads back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalState {
    Red,
    Yellow,
    Green,
}

impl Default for SignalState {
    fn default() -> Self {
        Self::Red
    }
}

/// Physical signal head.
///
/// Implementations set exactly one aspect active and must complete before
/// returning, so a state change and its actuation are never observable apart.
pub trait SignalLamps {
    fn set(&mut self, state: SignalState);
}
