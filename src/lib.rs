pub mod credential;
pub mod domain;
pub mod engine;
pub mod export;
pub mod finding;
pub mod io;
pub mod password;
pub mod report;

pub mod prelude {
    pub use crate::credential::{CredentialRecord, Login, PasswordCheck};
    pub use crate::finding::Finding;
}
