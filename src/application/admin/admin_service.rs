use crate::application::checkout::ServiceDependencies;
use crate::config::AdminConfig;
use crate::domain::{Borrower, LogEntry};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::errors::{AdminApplicationError, Result};

/// JWT claims carried by an admin ID token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Exchange admin email/password for a signed ID token
///
/// Email comparison ignores case and surrounding whitespace; the password
/// must match exactly. Login is refused unless both a password and a signing
/// secret are configured.
pub fn login(config: &AdminConfig, email: &str, password: &str, now: DateTime<Utc>) -> Result<String> {
    let (Some(expected_password), Some(secret)) =
        (config.password.as_deref(), config.jwt_secret.as_deref())
    else {
        tracing::warn!("Admin login attempted but ADMIN_PASSWORD or JWT_SECRET is not configured");
        return Err(AdminApplicationError::InvalidCredentials);
    };

    let email_matches = email.trim().eq_ignore_ascii_case(config.email.trim());
    if !email_matches || password != expected_password {
        tracing::info!("Admin login rejected");
        return Err(AdminApplicationError::InvalidCredentials);
    }

    let expires_at = Duration::try_hours(config.jwt_expiration_hours)
        .filter(|lifetime| *lifetime > Duration::zero())
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(AdminApplicationError::InvalidExpiry(config.jwt_expiration_hours))?;

    let claims = AdminClaims {
        sub: config.email.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AdminApplicationError::TokenIssueError)
}

/// Validate an ID token and return its claims
pub fn verify_token(config: &AdminConfig, token: &str) -> Result<AdminClaims> {
    let Some(secret) = config.jwt_secret.as_deref() else {
        return Err(AdminApplicationError::InvalidToken(None));
    };

    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AdminApplicationError::InvalidToken(Some(e)))?;

    if data.claims.sub != config.email {
        return Err(AdminApplicationError::InvalidToken(None));
    }

    Ok(data.claims)
}

/// Full activity log with identity fields, newest first
pub async fn list_logs(deps: &ServiceDependencies) -> Result<Vec<LogEntry>> {
    deps.activity_log
        .list()
        .await
        .map_err(AdminApplicationError::ActivityLogError)
}

/// Everyone who appears in the log, once per student ID
///
/// Ordered by most recent activity; the most recent name and phone win.
pub async fn list_users(deps: &ServiceDependencies) -> Result<Vec<Borrower>> {
    let logs = list_logs(deps).await?;
    Ok(borrowers_from(&logs))
}

/// Pure function: distinct borrowers from a newest-first log
pub fn borrowers_from(logs: &[LogEntry]) -> Vec<Borrower> {
    let mut seen = HashSet::new();

    logs.iter()
        .filter_map(|entry| {
            let student_id = entry.student_id.as_ref()?;
            seen.insert(student_id.clone()).then(|| Borrower {
                full_name: entry.full_name.clone(),
                student_id: student_id.clone(),
                phone: entry.phone.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, EquipmentKey, LogEntryId, StudentId};

    fn config() -> AdminConfig {
        AdminConfig {
            email: "admin@lab.local".to_string(),
            password: Some("hunter2".to_string()),
            jwt_secret: Some("test-secret".to_string()),
            jwt_expiration_hours: 1,
        }
    }

    fn entry(name: &str, student_id: Option<&str>, phone: &str) -> LogEntry {
        LogEntry {
            id: LogEntryId::new(),
            key: EquipmentKey::new("jetson-orin"),
            equipment_name: "Jetson Orin".to_string(),
            full_name: name.to_string(),
            student_id: student_id.map(StudentId::new),
            phone: phone.to_string(),
            action: Action::Borrow,
            timestamp: "2024-05-01T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_login_and_verify() {
        let token = login(&config(), " Admin@Lab.local ", "hunter2", Utc::now()).unwrap();
        let claims = verify_token(&config(), &token).unwrap();
        assert_eq!(claims.sub, "admin@lab.local");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_login_wrong_password() {
        let result = login(&config(), "admin@lab.local", "hunter3", Utc::now());
        assert!(matches!(result, Err(AdminApplicationError::InvalidCredentials)));
    }

    #[test]
    fn test_login_disabled_without_password() {
        let mut config = config();
        config.password = None;
        let result = login(&config, "admin@lab.local", "", Utc::now());
        assert!(matches!(result, Err(AdminApplicationError::InvalidCredentials)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issued = Utc::now() - Duration::hours(3);
        let token = login(&config(), "admin@lab.local", "hunter2", issued).unwrap();
        assert!(matches!(
            verify_token(&config(), &token),
            Err(AdminApplicationError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = login(&config(), "admin@lab.local", "hunter2", Utc::now()).unwrap();
        let mut other = config();
        other.jwt_secret = Some("another-secret".to_string());
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn test_no_login_or_verification_without_secret() {
        let mut unsigned = config();
        unsigned.jwt_secret = None;

        let result = login(&unsigned, "admin@lab.local", "hunter2", Utc::now());
        assert!(matches!(result, Err(AdminApplicationError::InvalidCredentials)));

        let token = login(&config(), "admin@lab.local", "hunter2", Utc::now()).unwrap();
        assert!(matches!(
            verify_token(&unsigned, &token),
            Err(AdminApplicationError::InvalidToken(None))
        ));
    }

    #[test]
    fn test_unusable_expiry_does_not_issue_token() {
        for hours in [0, -1, i64::MAX, 9_999_999_999_999] {
            let mut config = config();
            config.jwt_expiration_hours = hours;
            let result = login(&config, "admin@lab.local", "hunter2", Utc::now());
            assert!(matches!(result, Err(AdminApplicationError::InvalidExpiry(h)) if h == hours));
        }
    }

    #[test]
    fn test_borrowers_are_distinct_and_most_recent_wins() {
        let logs = vec![
            entry("Sara A.", Some("123"), "0912-new"),
            entry("Ali", Some("456"), "0935"),
            entry("Sara", Some("123"), "0912-old"),
            entry("Anonymous", None, ""),
        ];

        let users = borrowers_from(&logs);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].student_id, StudentId::new("123"));
        assert_eq!(users[0].full_name, "Sara A.");
        assert_eq!(users[0].phone, "0912-new");
        assert_eq!(users[1].student_id, StudentId::new("456"));
    }
}
