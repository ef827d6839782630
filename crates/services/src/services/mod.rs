pub mod auth;
pub mod importer;
pub mod intake;
pub mod sections;
