use super::app_error::AppError;

pub(super) fn map_database_error(
    code: Option<&str>,
    constraint: Option<&str>,
    message: &str,
) -> Option<AppError> {
    match code {
        Some("23505") => Some(unique_violation(constraint)),
        Some("23502") => Some(AppError::validation_error(
            required_field_message_from_db(message)
                .unwrap_or_else(|| "required field is missing".to_string()),
        )),
        Some("23503") => Some(AppError::BadRequest(
            "referenced resource does not exist".to_string(),
        )),
        Some("23514") => Some(check_violation(constraint)),
        Some("22P02") => Some(AppError::validation_error("invalid input format")),
        Some("08001") | Some("08006") => Some(AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: "Unable to connect to database. Please try again later.".to_string(),
        }),
        Some("53300") => Some(AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: "Service temporarily unavailable. Please try again later.".to_string(),
        }),
        Some("55P03") => Some(AppError::Conflict(
            "Resource is currently locked. Please try again.".to_string(),
        )),
        _ => None,
    }
}

/// Unique violations on user-supplied columns are reported against the request
/// field; the rest stay generic conflicts.
pub(super) fn unique_violation(constraint: Option<&str>) -> AppError {
    match constraint {
        Some("accounts_email_key") => {
            AppError::field_error("email", "unique", "Email already exists")
        }
        Some("accounts_storename_key") => {
            AppError::field_error("storename", "unique", "Store name is already taken")
        }
        Some("accounts_google_id_key") => {
            AppError::Conflict("google account is already linked".to_string())
        }
        Some("accounts_facebook_id_key") => {
            AppError::Conflict("facebook account is already linked".to_string())
        }
        Some("sessions_pkey") => AppError::Conflict("session already exists".to_string()),
        _ => AppError::Conflict("resource already exists".to_string()),
    }
}

pub(super) fn check_violation(constraint: Option<&str>) -> AppError {
    match constraint {
        Some("accounts_auth_method_check") => AppError::validation_error(
            "account requires a password or a linked social login",
        ),
        _ => AppError::validation_error("request violates validation rules"),
    }
}

pub(super) fn required_field_message_from_db(message: &str) -> Option<String> {
    let marker = "column \"";
    let start = message.find(marker)?;
    let rest = &message[start + marker.len()..];
    let end = rest.find('"')?;
    let field = &rest[..end];
    Some(format!("{field} is required"))
}
