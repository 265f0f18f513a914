/// Error type for LS7366R operations
///
/// The chip's protocol has no in-band error signaling (no parity, no
/// status-in-response), so the transport error is the only failure mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the counter
    Communication(E),
}
