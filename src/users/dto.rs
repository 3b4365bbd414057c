use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::repo::User;
use super::services::UserPatch;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate_name(name: &str) -> Result<(), String> {
    let len = name.chars().count();
    if !(2..=100).contains(&len) {
        return Err("name must be between 2 and 100 characters".into());
    }
    Ok(())
}

/// Restricted create shape: clients cannot set `id` or timestamps.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        if !is_valid_email(&self.email) {
            return Err("email must be a valid address".into());
        }
        Ok(())
    }
}

/// Restricted update shape. A missing field means "leave unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err("email must be a valid address".into());
            }
        }
        Ok(())
    }

    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            name: self.name,
            email: self.email,
        }
    }
}

/// List query parameters. Raw strings so that non-numeric values fall back
/// to the defaults silently instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), 1)
    }

    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), 10)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    match raw.and_then(|v| v.parse::<i64>().ok()) {
        Some(v) if v >= 1 => v,
        _ => default,
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct UserListData {
    pub users: Vec<User>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_valid_input() {
        let req = CreateUserRequest {
            name: "Ann".into(),
            email: "ann@x.com".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_rejects_short_and_long_names() {
        let short = CreateUserRequest {
            name: "A".into(),
            email: "a@x.com".into(),
        };
        assert!(short.validate().is_err());

        let long = CreateUserRequest {
            name: "x".repeat(101),
            email: "a@x.com".into(),
        };
        assert!(long.validate().is_err());

        let max = CreateUserRequest {
            name: "x".repeat(100),
            email: "a@x.com".into(),
        };
        assert!(max.validate().is_ok());
    }

    #[test]
    fn create_rejects_bad_email() {
        for email in ["", "nope", "a@b", "a b@c.com", "@x.com"] {
            let req = CreateUserRequest {
                name: "Ann".into(),
                email: email.into(),
            };
            assert!(req.validate().is_err(), "accepted {email:?}");
        }
    }

    #[test]
    fn update_allows_omitted_fields() {
        let req = UpdateUserRequest::default();
        assert!(req.validate().is_ok());
        let patch = req.into_patch();
        assert!(patch.name.is_none());
        assert!(patch.email.is_none());
    }

    #[test]
    fn update_validates_present_fields() {
        let req = UpdateUserRequest {
            name: Some("A".into()),
            email: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateUserRequest {
            name: None,
            email: Some("not-an-email".into()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn list_query_defaults_and_fallbacks() {
        let q = ListQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);

        let q = ListQuery {
            page: Some("abc".into()),
            limit: Some("0".into()),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);

        let q = ListQuery {
            page: Some("3".into()),
            limit: Some("25".into()),
        };
        assert_eq!(q.page(), 3);
        assert_eq!(q.limit(), 25);
    }
}
