pub mod check;
pub mod server;
