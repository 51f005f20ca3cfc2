pub mod dependencies;
pub mod domain;
pub mod error;
pub mod layout;
pub mod protocol;
