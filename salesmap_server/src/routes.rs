//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database operations, etc.) should be expressed as futures or asynchronous functions. Async handlers get executed
//! concurrently by worker threads and thus don't block execution.
use actix_web::{
    dev::HttpServiceFactory,
    get,
    guard,
    http::header::ContentType,
    web,
    HttpResponse,
    Responder,
};
use log::*;
use salesmap_engine::{db_types::Role, traits::MapQuery, MapApi};

use crate::{
    auth::JwtClaims,
    errors::ServerError,
    middleware::{AclMiddlewareFactory, CspMiddlewareFactory},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal requires [$($roles:expr),*]) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
                impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name)
                        .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires [$($roles:expr),*])  => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds)++ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Map data  ----------------------------------------------------
route!(map_data => Get "/events/{event}/sales-map/data" impl MapQuery where requires [Role::ViewOrders]);
/// Route handler for the map data endpoint
///
/// Returns every resolved location for the event's paid orders, as
/// `{"locations": [{"lat": .., "lon": .., "tooltip": "Order: <code>"}, ..]}`. Orders whose
/// invoice address has not (or could not) be geocoded are absent from the list. Requires the
/// `view_orders` role.
pub async fn map_data<A: MapQuery>(
    claims: JwtClaims,
    path: web::Path<String>,
    api: web::Data<MapApi<A>>,
) -> Result<HttpResponse, ServerError> {
    let event = path.into_inner();
    debug!("🗺️ GET sales map data for event '{event}' by {}", claims.sub);
    let data = api.locations_for_event(&event).await?;
    trace!("🗺️ Returning {} locations for event '{event}'", data.locations.len());
    Ok(HttpResponse::Ok().json(data))
}

//----------------------------------------------   Map page  ----------------------------------------------------
const MAP_PAGE_TEMPLATE: &str = include_str!("../templates/map_page.html");

/// The map page resource.
///
/// Registered by hand rather than through `route!` because it carries two middlewares: the usual
/// role check, plus the CSP patcher that lets the page load map tiles from the configured tile
/// server.
pub fn map_page_resource(tile_domain: &str) -> impl HttpServiceFactory {
    web::resource("/events/{event}/sales-map")
        .name("map_page")
        .guard(guard::Get())
        .to(map_page)
        .wrap(CspMiddlewareFactory::new(tile_domain))
        .wrap(AclMiddlewareFactory::new(&[Role::ViewOrders]))
}

/// Route handler for the map page
///
/// Renders the static HTML shell; everything order-specific happens client side, where the
/// embedded script calls the map data endpoint.
pub async fn map_page(path: web::Path<String>) -> Result<HttpResponse, ServerError> {
    let event = path.into_inner();
    debug!("🗺️ GET sales map page for event '{event}'");
    let data_url = format!("/api/events/{event}/sales-map/data");
    let body = MAP_PAGE_TEMPLATE.replace("{data_url}", &data_url);
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(body))
}
