use crossbeam_channel::{Receiver, Sender, bounded};
use ff_ext::{FieldSerde, SimdField};

/// Collective operations between the workers sharing one proof.
///
/// Every call is blocking and must be reached by all workers in the same
/// order. Rank 0 is the root: it owns the transcript and sees the results of
/// `gather` and `sum_reduce`.
pub trait Communicator {
    fn world_size(&self) -> usize;

    fn world_rank(&self) -> usize;

    fn is_root(&self) -> bool {
        self.world_rank() == 0
    }

    fn lg_world_size(&self) -> usize {
        self.world_size().trailing_zeros() as usize
    }

    /// Replace `values` on every worker with the root's copy.
    fn broadcast<T: FieldSerde + Clone>(&self, values: &mut Vec<T>);

    /// Rank-ordered concatenation of every worker's `local` at the root,
    /// empty elsewhere.
    fn gather<T: FieldSerde + Clone>(&self, local: &[T]) -> Vec<T>;

    /// Element-wise sum over all workers at the root; other workers get their
    /// own values back.
    fn sum_reduce<F: SimdField>(&self, local: &[F]) -> Vec<F> {
        let all = self.gather(local);
        if !self.is_root() || local.is_empty() {
            return local.to_vec();
        }
        all.chunks_exact(local.len())
            .fold(vec![F::zero(); local.len()], |mut acc, chunk| {
                acc.iter_mut().zip(chunk).for_each(|(a, c)| *a += *c);
                acc
            })
    }
}

/// World of one: every collective is a local copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn world_size(&self) -> usize {
        1
    }

    fn world_rank(&self) -> usize {
        0
    }

    fn broadcast<T: FieldSerde + Clone>(&self, _values: &mut Vec<T>) {}

    fn gather<T: FieldSerde + Clone>(&self, local: &[T]) -> Vec<T> {
        local.to_vec()
    }
}

/// One endpoint of an in-process world whose workers run on separate threads.
///
/// The root holds one channel pair per worker; workers only talk to the root.
/// A worker that drops out makes its peers panic on the next exchange.
#[derive(Debug)]
pub struct ThreadCommunicator {
    rank: usize,
    world_size: usize,
    senders: Vec<Sender<Vec<u8>>>,
    receivers: Vec<Receiver<Vec<u8>>>,
}

impl ThreadCommunicator {
    /// Endpoints for ranks `0..world_size`, in rank order.
    pub fn new_world(world_size: usize) -> Vec<Self> {
        assert!(world_size > 0, "world must have at least one worker");
        let mut root = ThreadCommunicator {
            rank: 0,
            world_size,
            senders: Vec::with_capacity(world_size - 1),
            receivers: Vec::with_capacity(world_size - 1),
        };
        let mut workers = Vec::with_capacity(world_size - 1);
        for rank in 1..world_size {
            let (up_tx, up_rx) = bounded(1);
            let (down_tx, down_rx) = bounded(1);
            root.senders.push(down_tx);
            root.receivers.push(up_rx);
            workers.push(ThreadCommunicator {
                rank,
                world_size,
                senders: vec![up_tx],
                receivers: vec![down_rx],
            });
        }
        std::iter::once(root).chain(workers).collect()
    }
}

fn encode<T: FieldSerde>(values: &[T]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(values.len() * T::SIZE_BYTES);
    values.iter().for_each(|v| v.write_bytes(&mut buf));
    buf
}

/// Peers are trusted to send canonical encodings.
fn decode<T: FieldSerde>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(T::SIZE_BYTES)
        .map(|chunk| T::read_bytes(chunk).expect("peer sent a non-canonical element"))
        .collect()
}

impl Communicator for ThreadCommunicator {
    fn world_size(&self) -> usize {
        self.world_size
    }

    fn world_rank(&self) -> usize {
        self.rank
    }

    fn broadcast<T: FieldSerde + Clone>(&self, values: &mut Vec<T>) {
        if self.is_root() {
            let bytes = encode(values);
            for sender in &self.senders {
                sender.send(bytes.clone()).expect("worker left the world");
            }
        } else {
            let bytes = self.receivers[0].recv().expect("root left the world");
            *values = decode(&bytes);
        }
    }

    fn gather<T: FieldSerde + Clone>(&self, local: &[T]) -> Vec<T> {
        if self.is_root() {
            let mut all = encode(local);
            for receiver in &self.receivers {
                all.extend(receiver.recv().expect("worker left the world"));
            }
            decode(&all)
        } else {
            self.senders[0]
                .send(encode(local))
                .expect("root left the world");
            vec![]
        }
    }
}
