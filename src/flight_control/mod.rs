pub mod common;
pub mod motion;
pub mod nearby;
pub mod plane;
mod supervisor;
#[cfg(test)]
mod tests;

pub use supervisor::Supervisor;
