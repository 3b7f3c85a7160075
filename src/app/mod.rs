pub mod checkout;

pub use checkout::{run_checkout, OrderScript};
