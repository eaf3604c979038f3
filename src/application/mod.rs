pub mod builders;
pub mod selector;
pub mod services;
