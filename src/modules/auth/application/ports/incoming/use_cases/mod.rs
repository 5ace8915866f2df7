mod login_admin;

pub use login_admin::{
    LoginAdminError, LoginAdminUseCase, LoginCredentials, LoginCredentialsError, LoginOutcome,
};
