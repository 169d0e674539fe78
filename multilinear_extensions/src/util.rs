/// Decompose an integer into a binary vector in little endian.
pub fn bit_decompose(input: u64, num_var: usize) -> Vec<bool> {
    (0..num_var).map(|i| (input >> i) & 1 == 1).collect()
}
