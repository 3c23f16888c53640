pub mod apis;
pub mod configs;
pub mod cores;
pub mod middleware;
pub mod utils;

#[cfg(test)]
mod test;
