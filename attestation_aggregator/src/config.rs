use derivative::Derivative;
use parse_display::{Display, FromStr};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, FromStr)]
#[display(style = "snake_case")]
pub enum AggregationStrategy {
    Naive,
}

#[derive(Clone, Copy, Debug, Derivative)]
#[derivative(Default)]
pub struct AggregatorConfig {
    #[derivative(Default(value = "AggregationStrategy::Naive"))]
    pub strategy: AggregationStrategy,
}
