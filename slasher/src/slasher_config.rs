use derivative::Derivative;
use types::phase0::primitives::Epoch;

#[derive(Clone, Copy, Debug, Derivative)]
#[derivative(Default)]
pub struct SlasherConfig {
    // Weak subjectivity period from <https://hackmd.io/@sproul/min-max-slasher>.
    #[derivative(Default(value = "54000"))]
    pub slashing_history_limit: Epoch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_limit_is_weak_subjectivity_period() {
        assert_eq!(SlasherConfig::default().slashing_history_limit, 54000);
    }
}
