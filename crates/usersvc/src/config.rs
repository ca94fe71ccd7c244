use std::env;

use usersvc_core::user::EmailMatch;

/// Table used when `TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "TableDDB";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the users table (default: "TableDDB")
    pub table_name: String,
    /// AWS region for the DynamoDB client (default: "us-east-1")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_region: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB (default: none)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_endpoint_url: Option<String>,
    /// How emails are compared when used as keys (default: exact)
    pub email_match: EmailMatch,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Users table name (default: "TableDDB")
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `EMAIL_CASE_INSENSITIVE` - `true` or `1` to match emails case-insensitively
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("TABLE_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            email_match: parse_email_match(env::var("EMAIL_CASE_INSENSITIVE").ok().as_deref()),
        }
    }
}

fn parse_email_match(value: Option<&str>) -> EmailMatch {
    match value.map(str::trim) {
        Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => EmailMatch::CaseInsensitive,
        _ => EmailMatch::Exact,
    }
}
