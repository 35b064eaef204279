pub mod encoding;
pub mod error;
pub mod layout;
pub mod model;
pub mod rules;
pub mod scorer;
pub mod text;
pub mod traversal;
