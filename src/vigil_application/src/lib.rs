pub mod use_cases;

pub use use_cases::{
    bulk_action::{BulkActionError, BulkActionUseCase},
    list_accounts::ListAccountsUseCase,
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    register::{RegisterError, RegisterUseCase},
};
