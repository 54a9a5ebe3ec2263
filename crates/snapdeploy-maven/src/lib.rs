//! Maven deploy plumbing: generated `settings.xml`, the classifier table
//! that maps extracted jars to `deploy:deploy-file` arguments, and the
//! deploy command itself.

pub mod classifier;
pub mod deploy;
pub mod repository;
pub mod settings;
