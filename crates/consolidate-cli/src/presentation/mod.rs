pub mod progress;
pub mod views;

pub use progress::TransferProgress;
