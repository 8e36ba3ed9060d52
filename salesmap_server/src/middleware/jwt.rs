//! Access token middleware for the sales map server.
//!
//! Validates the `Authorization: Bearer <jwt>` header on every request passing through it and
//! stores the decoded [`JwtClaims`] in the request extensions, where the ACL middleware and the
//! [`JwtClaims`] extractor pick them up. Requests without a valid token are rejected with 401
//! before any handler logic runs.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::{debug, trace};

use crate::{
    auth::{decode_claims, JwtClaims},
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

pub struct JwtMiddlewareFactory {
    auth: AuthConfig,
}

impl JwtMiddlewareFactory {
    pub fn new(auth: AuthConfig) -> Self {
        JwtMiddlewareFactory { auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = JwtMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtMiddlewareService { auth: self.auth.clone(), service: Rc::new(service) })
    }
}

pub struct JwtMiddlewareService<S> {
    auth: AuthConfig,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let auth = self.auth.clone();
        Box::pin(async move {
            trace!("🔐️ Checking access token for request");
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    debug!("🔐️ No bearer token found in request");
                    Error::from(ServerError::AuthenticationError(AuthError::MissingToken))
                })?;
            let claims = decode_claims(token, &auth).map_err(|e| {
                debug!("🔐️ Access token did not validate. {e}");
                Error::from(ServerError::AuthenticationError(e))
            })?;
            trace!("🔐️ Access token validated for {}", claims.sub);
            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}
