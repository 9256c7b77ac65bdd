use crate::account::{service::RegisterError, AccountService};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Form};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, error, info};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct AccountForm {
    username: String,
    #[schema(value_type = String, format = Password)]
    password: SecretString,
}

#[utoipa::path(
    post,
    path= "/createaccount",
    request_body(content = AccountForm, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 201, description = "Account created"),
        (status = 400, description = "Missing or empty username or password"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Credential store unavailable"),
    ),
    tag= "accounts"
)]
// axum handler for account creation
pub async fn create_account(
    service: Extension<AccountService>,
    payload: Option<Form<AccountForm>>,
) -> impl IntoResponse {
    let form: AccountForm = match payload {
        Some(Form(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()),
    };

    // SecretString redacts the password field here
    debug!("create account request: {:?}", form);

    match service.register(&form.username, &form.password).await {
        Ok(account) => {
            info!(username = %account.username, "account created");

            (StatusCode::CREATED, "Account created".to_string())
        }
        Err(e) => register_error_response(&e),
    }
}

pub(crate) fn register_error_response(err: &RegisterError) -> (StatusCode, String) {
    match err {
        RegisterError::Validation => (
            StatusCode::BAD_REQUEST,
            "Username and password are required".to_string(),
        ),
        RegisterError::DuplicateUsername => {
            error!("Username already exists");

            (StatusCode::CONFLICT, "Username already exists".to_string())
        }
        RegisterError::Hashing(e) | RegisterError::StorageUnavailable(e) => {
            error!("Error creating account: {:?}", e);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}
