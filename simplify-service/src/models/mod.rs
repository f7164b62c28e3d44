pub mod simplify;

pub use simplify::{SimplifyRequest, SimplifyResponse};
