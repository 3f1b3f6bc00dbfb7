//! Account administration: user listing and role management.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{AccountFilter, RoleChange, UserAccount};
pub use repository::AccountDirectory;
pub use router::{account_router, AccountView};
pub use service::{AccountError, AccountService};
