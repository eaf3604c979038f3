pub mod cli;
pub mod terminal;
pub mod wizard;
