use crate::account::{service::LoginError, AccountService};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Form};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, error, info};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginForm {
    username: String,
    #[schema(value_type = String, format = Password)]
    password: SecretString,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 200, description = "Login successful"),
        (status = 401, description = "Unknown username or wrong password"),
        (status = 500, description = "Credential store unavailable"),
    ),
    tag= "accounts"
)]
// axum handler for login
pub async fn login(
    service: Extension<AccountService>,
    payload: Option<Form<LoginForm>>,
) -> impl IntoResponse {
    let form: LoginForm = match payload {
        Some(Form(payload)) => payload,
        None => return (StatusCode::UNAUTHORIZED, unauthorized_body()),
    };

    // SecretString redacts the password field here
    debug!("login request: {:?}", form);

    match service.login(&form.username, &form.password).await {
        Ok(auth) => {
            info!(username = %auth.username, "login successful");

            (StatusCode::OK, "Login successful".to_string())
        }
        Err(e) => login_error_response(&e),
    }
}

// One body for every credential failure. Unknown username, wrong password,
// and a missing or empty field must be indistinguishable in the response.
fn unauthorized_body() -> String {
    "Invalid username or password".to_string()
}

pub(crate) fn login_error_response(err: &LoginError) -> (StatusCode, String) {
    match err {
        LoginError::InvalidCredentials => (StatusCode::UNAUTHORIZED, unauthorized_body()),
        LoginError::Verification(e) | LoginError::StorageUnavailable(e) => {
            error!("Error logging in: {:?}", e);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}
