//! Content-Security-Policy middleware for the map page.
//!
//! The map page loads raster tiles from a third-party tile server and bootstraps Leaflet from an
//! inline script, so its response needs extra CSP sources. This middleware patches the response
//! header on the way out: an existing policy (set by a reverse proxy, for instance) is parsed,
//! the map sources are merged in, and the header is re-rendered. When no policy is present, one
//! is created from just the additions.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, CONTENT_SECURITY_POLICY},
    Error,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::{trace, warn};

use crate::csp::{map_page_additions, merge_csp, parse_csp, render_csp, CspPolicy};

pub struct CspMiddlewareFactory {
    additions: CspPolicy,
}

impl CspMiddlewareFactory {
    pub fn new(tile_domain: &str) -> Self {
        CspMiddlewareFactory { additions: map_page_additions(tile_domain) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CspMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = CspMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CspMiddlewareService { additions: self.additions.clone(), service: Rc::new(service) })
    }
}

pub struct CspMiddlewareService<S> {
    additions: CspPolicy,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for CspMiddlewareService<S>
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
        let additions = self.additions.clone();
        Box::pin(async move {
            let mut res = service.call(req).await?;
            let existing = res
                .headers()
                .get(CONTENT_SECURITY_POLICY)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
                .unwrap_or_default();
            let mut policy = parse_csp(&existing);
            merge_csp(&mut policy, &additions);
            let rendered = render_csp(&policy);
            match HeaderValue::from_str(&rendered) {
                Ok(value) => {
                    trace!("🗺️ Setting Content-Security-Policy header to: {rendered}");
                    res.headers_mut().insert(CONTENT_SECURITY_POLICY, value);
                },
                Err(e) => {
                    warn!("🗺️ Could not render the merged Content-Security-Policy header. {e}");
                },
            }
            Ok(res)
        })
    }
}
