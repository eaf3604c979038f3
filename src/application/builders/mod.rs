pub mod session_builder;
