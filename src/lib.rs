// Dashboard core - reduction pipeline, engine services and adapters
pub mod application;
pub mod domain;
pub mod infrastructure;
