mod admin;
mod forge;
mod init;
mod initdb;

pub use admin::{cmd_admin, resolve_credentials};
pub use forge::cmd_forge;
pub use init::cmd_init;
pub use initdb::cmd_initdb;
