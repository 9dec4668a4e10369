//! # Radixmux
//!
//! Radixmux is a lightweight high performance HTTP request router for hyper.
//!
//! This router supports variables in the routing pattern and matches against the request method. Routes can be added and removed at runtime, while the router is serving requests.
//!
//! The router is optimized for high performance and a small memory footprint. It scales well even with very long paths and a large number of routes. A compressing dynamic trie (radix tree) structure is used for efficient matching, one per request method, each behind its own reader-writer lock.
//!
//! ## Features
//!
//! **Only explicit matches:** With other routers, a requested URL path could match multiple patterns. Therefore they have some awkward pattern priority rules, like *longest match* or *first registered, first matched*. By design of this router, a request can only match exactly one or no route. As a result, there are also no unintended matches.
//!
//! **Path auto-correction:** Besides detecting the missing or additional trailing slash at no extra cost, the router can also remove superfluous path elements (like `../` or `//`) and redirect the client to the corrected URL.
//!
//! **Parameters in your routing pattern:** Stop parsing the requested URL path, just give the path segment a name and the router delivers the dynamic value to you. Because of the design of the router, path parameters are very cheap.
//!
//! **Runtime registration:** Handlers can be registered and removed through a shared reference. Registration is all-or-nothing: a rejected pattern leaves the routing table untouched.
//!
//! Of course you can also set **custom [`not_found`](crate::Router::not_found) and [`method_not_allowed`](crate::Router::method_not_allowed) handlers**, a [**panic handler**](crate::Router::panic_handler), and [**automatically respond to OPTIONS requests**](crate::Router::global_options).
//!
//! ## Usage
//!
//! Here is a simple example:
//!
//! ```rust,no_run
//! use radixmux::{Router, Params};
//! use hyper::{Request, Response, Body, Error};
//!
//! async fn index(_: Request<Body>) -> Result<Response<Body>, Error> {
//!     Ok(Response::new("Hello, World!".into()))
//! }
//!
//! async fn hello(req: Request<Body>) -> Result<Response<Body>, Error> {
//!     let params = req.extensions().get::<Params>().unwrap();
//!     Ok(Response::new(format!("Hello, {}", params.get("user").unwrap()).into()))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::default();
//!     router.get("/", index)?;
//!     router.get("/hello/:user", hello)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ### Named parameters
//!
//! As you can see, `:user` is a *named parameter*. The values are accessible via `req.extensions().get::<Params>()`.
//!
//! Named parameters only match a single, non-empty path segment:
//!
//! ```ignore
//! Pattern: /user/:user
//!
//!  /user/gordon              match
//!  /user/you                 match
//!  /user/gordon/profile      no match
//!  /user/                    no match
//! ```
//!
//! **Note:** Since this router has only explicit matches, you can not register static routes and parameters for the same path segment. For example you can not register the patterns `/user/new` and `/user/:user` for the same request method at the same time. The routing of different request methods is independent from each other.
//!
//! ### Catch-All parameters
//!
//! The second type are *catch-all* parameters and have the form `*name`. Like the name suggests, they match everything, including the leading `/`. Therefore they must always be at the **end** of the pattern:
//!
//! ```ignore
//! Pattern: /src/*filepath
//!
//!  /src/                     match: filepath="/"
//!  /src/somefile.rs          match: filepath="/somefile.rs"
//!  /src/subdir/somefile.rs   match: filepath="/subdir/somefile.rs"
//! ```
//!
//! ## Adding and removing routes at runtime
//!
//! Registration takes `&self`, so a router shared behind an `Arc` can change while it serves:
//!
//! ```rust
//! use radixmux::Router;
//! use hyper::{Body, Method, Request, Response};
//! use std::sync::Arc;
//!
//! let router = Arc::new(Router::default());
//! let _service = router.service();
//!
//! router.get("/feature", |_: Request<Body>| async {
//!     Ok::<_, hyper::Error>(Response::new(Body::from("on")))
//! }).unwrap();
//! assert!(router.lookup(&Method::GET, "/feature", false).is_ok());
//!
//! router.remove(Method::GET, "/feature").unwrap();
//! assert!(router.lookup(&Method::GET, "/feature", false).is_err());
//! ```
//!
//! ## Automatic OPTIONS responses and CORS
//!
//! One might wish to modify automatic responses to OPTIONS requests, e.g. to support [CORS preflight requests](https://developer.mozilla.org/en-US/docs/Glossary/preflight_request) or to set other headers. This can be achieved using the [`Router::global_options`](crate::Router::global_options) handler:
//!
//! ```rust
//! use radixmux::Router;
//! use hyper::{Request, Response, Body, Error};
//!
//! async fn global_options(_: Request<Body>) -> Result<Response<Body>, Error> {
//!     Ok(Response::builder()
//!         .header("Access-Control-Allow-Methods", "Allow")
//!         .header("Access-Control-Allow-Origin", "*")
//!         .body(Body::empty())
//!         .unwrap())
//! }
//!
//! let router = Router::default().global_options(global_options);
//! ```
//!
//! ### Multi-domain / Sub-domains
//!
//! Does your server serve multiple domains / hosts? You want to use sub-domains? Define a router per host!
//!
//! ```rust,no_run
//! use radixmux::Router;
//! use hyper::service::{make_service_fn, service_fn};
//! use hyper::{Body, Request, Response, Server, StatusCode};
//! use std::collections::HashMap;
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! pub struct HostSwitch(HashMap<String, Router>);
//!
//! impl HostSwitch {
//!     async fn serve(&self, req: Request<Body>) -> hyper::Result<Response<Body>> {
//!         let forbidden = Response::builder()
//!             .status(StatusCode::FORBIDDEN)
//!             .body(Body::empty())
//!             .unwrap();
//!         let host = req.headers().get("host").and_then(|host| host.to_str().ok());
//!         match host.and_then(|host| self.0.get(host)) {
//!             Some(router) => router.serve(req).await,
//!             None => Ok(forbidden),
//!         }
//!     }
//! }
//!
//! async fn hello(_: Request<Body>) -> hyper::Result<Response<Body>> {
//!     Ok(Response::new(Body::default()))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::default();
//!     router.get("/", hello).unwrap();
//!
//!     let mut host_switch = HostSwitch(HashMap::new());
//!     host_switch.0.insert("example.com:12345".into(), router);
//!
//!     let host_switch = Arc::new(host_switch);
//!
//!     let make_svc = make_service_fn(move |_| {
//!         let host_switch = host_switch.clone();
//!         async move {
//!             Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
//!                 let host_switch = host_switch.clone();
//!                 async move { host_switch.serve(req).await }
//!             }))
//!         }
//!     });
//!
//!     let server = Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(make_svc)
//!         .await;
//! }
//! ```
//!
//! ### Not Found Handler
//!
//! You can use another handler, to handle requests which could not be matched by this router by using the [`Router::not_found`](crate::Router::not_found) handler.
//!
//! ```rust
//! use radixmux::Router;
//! use hyper::{Request, Response, Body};
//!
//! let router = Router::default().not_found(|_: Request<Body>| async {
//!     Ok::<_, hyper::Error>(Response::builder()
//!         .status(404)
//!         .body(Body::from("nothing here"))
//!         .unwrap())
//! });
//! ```
//!
//! ## Configuration
//!
//! The redirect and automatic reply switches can be loaded from TOML, see [`Config`](crate::Config).

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod params;
pub mod path;
pub mod tree;

#[doc(hidden)]
pub mod router;

#[doc(inline)]
pub use router::{Handler, PanicHandler, Router};

#[doc(inline)]
pub use config::{Config, ConfigError};

#[doc(inline)]
pub use error::{Error, InsertError};

#[doc(inline)]
pub use params::{Param, Params};

#[doc(inline)]
pub use tree::{Match, Tree, Tsr};

// test the code examples in README.md
#[cfg(doctest)]
mod test_readme {
    macro_rules! doc_comment {
        ($x:expr) => {
            #[doc = $x]
            extern "C" {}
        };
    }

    doc_comment!(include_str!("../README.md"));
}
