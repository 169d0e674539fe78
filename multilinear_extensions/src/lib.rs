pub mod eq;
pub mod mle;
pub mod util;

pub use eq::{
    PARALLEL_THRESHOLD, build_eq_x_r_vec, eq, eq_eval, eq_eval_at_index, eq_evals_at,
    eq_evals_at_with_buf, eq3_eval,
};
pub use mle::{evaluate_mle, fix_low_variable_in_place, fix_variables_in_place};
