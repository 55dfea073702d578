pub mod bulk_action;
pub mod list_accounts;
pub mod login;
pub mod logout;
pub mod register;
