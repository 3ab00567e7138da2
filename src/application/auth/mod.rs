//! Authentication use cases
//!
//! Account and session workflows on top of [`AuthService`](crate::domain::auth::AuthService).

mod delete_current_user;
mod get_current_user;
mod login_user;
mod logout_all_devices;
mod logout_user;
mod register_user;
mod update_current_user;

pub use delete_current_user::DeleteCurrentUserUseCase;
pub use get_current_user::{CurrentUser, GetCurrentUserUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_all_devices::{LogoutAllDevicesResponse, LogoutAllDevicesUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use update_current_user::{UpdateCurrentUserCommand, UpdateCurrentUserUseCase};
