pub mod pricing;
pub mod scanner;
pub mod types;
