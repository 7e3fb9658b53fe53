pub mod core;
pub mod main;
pub mod run;
pub mod worker;

#[cfg(test)]
mod tests;
