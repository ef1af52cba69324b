//! StudyLoop: upload a PDF, take a short fill-in-the-blank quiz on it,
//! and get back a revision list of the questions you missed.

pub mod config;
pub mod extract;
pub mod quiz;
pub mod server;
pub mod session;
pub mod templates;
