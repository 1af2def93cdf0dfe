//! Proximity reading classification for the operator display.

/// A proximity reading in whole centimeters; `None` is the sentinel for "no
/// valid reading" (sensor fault, or nothing measured yet).
pub type DistanceSample = Option<i32>;

/// Whether a reading counts as an obstacle at the given threshold.
///
/// The sentinel classifies as clear: a dead sensor must not pin the display
/// on a phantom obstacle.
pub fn obstacle_detected(sample: DistanceSample, threshold_cm: i32) -> bool {
    matches!(sample, Some(d) if d < threshold_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_reading_is_an_obstacle() {
        assert!(obstacle_detected(Some(15), 20));
    }

    #[test]
    fn far_reading_is_clear() {
        assert!(!obstacle_detected(Some(25), 20));
        assert!(!obstacle_detected(Some(20), 20));
    }

    #[test]
    fn sentinel_is_clear() {
        assert!(!obstacle_detected(None, 20));
    }
}
