mod acl;
mod csp;
mod hmac;
mod jwt;

pub use acl::AclMiddlewareFactory;
pub use csp::CspMiddlewareFactory;
pub use hmac::HmacMiddlewareFactory;
pub use jwt::JwtMiddlewareFactory;
