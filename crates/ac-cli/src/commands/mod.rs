pub mod config_ops;
pub mod lookup_ops;
pub mod simulate_ops;
