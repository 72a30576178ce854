pub mod cors;
pub mod panic;

pub use cors::cors_middleware;
pub use panic::panic_response;
