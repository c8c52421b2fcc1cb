//! Redis Connection Management
//!
//! Utilities for creating Redis clients and connections from credentials.

use std::time::Duration;

use redis::aio::MultiplexedConnection;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::domain::models::credentials::RedisCredentials;
use crate::shared::errors::MessagingError;

/// Translate credentials into redis connection parameters
#[must_use]
pub fn connection_info(credentials: &RedisCredentials) -> ConnectionInfo {
    let host = credentials.host().to_string();
    let port = credentials.port();

    let addr = if credentials.ssl() {
        ConnectionAddr::TcpTls {
            host,
            port,
            insecure: false,
            tls_params: None,
        }
    } else {
        ConnectionAddr::Tcp(host, port)
    };

    ConnectionInfo {
        addr,
        redis: RedisConnectionInfo {
            username: credentials.user().map(str::to_string),
            password: credentials.password().map(str::to_string),
            ..RedisConnectionInfo::default()
        },
    }
}

/// Create a client and a verified multiplexed connection
///
/// # Errors
///
/// Returns `MessagingError::CouldNotConnect` if the server cannot be reached
/// or rejects the credentials within `timeout`.
pub async fn create_client(
    credentials: &RedisCredentials,
    timeout: Duration,
) -> Result<(redis::Client, MultiplexedConnection), MessagingError> {
    let client = redis::Client::open(connection_info(credentials))
        .map_err(|e| MessagingError::CouldNotConnect(format!("{credentials}: {e}")))?;

    let mut connection = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
        .await
        .map_err(|_| {
            MessagingError::CouldNotConnect(format!("{credentials}: timed out after {timeout:?}"))
        })?
        .map_err(|e| MessagingError::CouldNotConnect(format!("{credentials}: {e}")))?;
    connection.set_response_timeout(timeout);

    Ok((client, connection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_connection_info() {
        let info = connection_info(&RedisCredentials::new("cache", 6380).with_password("pw"));

        assert!(matches!(info.addr, ConnectionAddr::Tcp(ref host, 6380) if host == "cache"));
        assert_eq!(info.redis.password.as_deref(), Some("pw"));
        assert_eq!(info.redis.username, None);
        assert_eq!(info.redis.db, 0);
    }

    #[test]
    fn test_tls_connection_info_with_acl_user() {
        let creds = RedisCredentials::new("cache", 6380)
            .with_user("app")
            .with_password("pw")
            .with_ssl(true);
        let info = connection_info(&creds);

        assert!(matches!(info.addr, ConnectionAddr::TcpTls { ref host, port: 6380, insecure: false, .. } if host == "cache"));
        assert_eq!(info.redis.username.as_deref(), Some("app"));
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_could_not_connect() {
        // Port 1 on localhost is reserved and refuses connections
        let creds = RedisCredentials::new("127.0.0.1", 1).with_password("top-secret");

        let result = create_client(&creds, Duration::from_millis(500)).await;

        match result {
            Err(MessagingError::CouldNotConnect(message)) => {
                assert!(message.contains("127.0.0.1"));
                assert!(!message.contains("top-secret"));
            }
            Err(other) => panic!("expected CouldNotConnect, got {other:?}"),
            Ok(_) => panic!("expected connection to port 1 to fail"),
        }
    }
}
