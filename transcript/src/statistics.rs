/// Counters kept by every transcript, reported by the prover once a proof is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistic {
    pub bytes_appended: usize,
    pub challenges_drawn: usize,
}
