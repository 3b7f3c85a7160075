// Domain layer: catalog/cart/transaction models and the ports to the POS backend.

pub mod model;
pub mod ports;
