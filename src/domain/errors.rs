use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Account has no authentication method")]
    MissingAuthMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_auth_method_displays() {
        assert_eq!(
            DomainError::MissingAuthMethod.to_string(),
            "Account has no authentication method"
        );
    }

    #[test]
    fn error_source_is_none() {
        use std::error::Error;
        assert!(DomainError::MissingAuthMethod.source().is_none());
    }
}
