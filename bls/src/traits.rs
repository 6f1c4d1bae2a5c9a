/// Signatures that can be combined into an aggregate.
///
/// Attestation aggregation only ever needs this operation. It must be total and must not have
/// side effects.
pub trait Signature: Clone {
    fn aggregate_in_place(&mut self, other: &Self);

    #[must_use]
    fn aggregate(mut self, other: &Self) -> Self {
        self.aggregate_in_place(other);
        self
    }
}
