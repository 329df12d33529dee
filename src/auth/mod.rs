pub mod middleware;
pub mod token;
