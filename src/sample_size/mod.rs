//----------------------------------------
// sample_size mod
//----------------------------------------
pub mod compute_ss;
pub mod compute_ss_range;
pub mod types;
