// ABOUTME: Command implementations for the backup CLI
// ABOUTME: Exports the export and tables commands

pub mod export;
pub mod tables;

pub use export::export;
pub use tables::tables;
