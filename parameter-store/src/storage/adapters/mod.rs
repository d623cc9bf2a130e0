pub mod local_store;
pub mod ssm_store;

pub use local_store::LocalStore;
pub use ssm_store::SsmStore;
