use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::Duration;
use log::debug;
use salesmap_engine::db_types::Roles;
use smp_common::Secret;

use crate::{auth::TokenIssuer, config::AuthConfig, middleware::JwtMiddlewareFactory};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("test-only-signing-secret-925842e11914fdd0c9a2ab8a".to_string()) }
}

pub fn issue_token(roles: Roles) -> String {
    let issuer = TokenIssuer::new(&get_auth_config());
    issuer.issue_token("test-user", roles, Some(Duration::days(1))).expect("Failed to sign token")
}

pub async fn get_request(
    auth_header: &str,
    path: &str,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let mut req = TestRequest::get().uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {auth_header}")));
    }
    let req = req.to_request();
    let app = App::new().wrap(JwtMiddlewareFactory::new(get_auth_config())).configure(configure);

    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::try_call_service(&service, req).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}
