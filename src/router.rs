//! [`Router`](crate::Router) is a lightweight high performance HTTP request router.
//!
//! This router supports variables in the routing pattern and matches against
//! the request method. Routes can be registered and removed while the router
//! is serving: every method owns its own tree behind its own reader-writer
//! lock, so mutating one method never blocks lookups for another.
//!
//! The `Router` can be used as a router for a hyper server:
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
//!     router.get("/", index)?.get("/hello/:user", hello)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//!```
//!
//! The registered path, against which the router matches incoming requests, can
//! contain two types of parameters:
//! ```ignore
//!  Syntax    Type
//!  :name     named parameter
//!  *name     catch-all parameter
//! ```
//!
//! Named parameters are dynamic path segments. They match anything until the
//! next '/' or the path end, but never an empty segment:
//! ```ignore
//!  Path: /blog/:category/:post
//!
//!  Requests:
//!   /blog/rust/request-routers            match: category="rust", post="request-routers"
//!   /blog/rust/request-routers/           no match, but the router would redirect
//!   /blog/rust/                           no match
//!   /blog/rust/request-routers/comments   no match
//! ```
//!
//! Catch-all parameters match anything until the path end, including the
//! directory index (the '/' before the catch-all). Since they match anything
//! until the end, catch-all parameters must always be the final path element.
//! ```ignore
//!  Path: /files/*filepath
//!
//!  Requests:
//!   /files/                             match: filepath="/"
//!   /files/LICENSE                      match: filepath="/LICENSE"
//!   /files/templates/article.html       match: filepath="/templates/article.html"
//!   /files                              no match, but the router would redirect
//! ```
//!
//! The values of parameters are stored in [`Params`](crate::Params), which
//! is inserted into the request extensions before the handler is called.
use crate::config::Config;
use crate::error::Error;
use crate::params::Params;
use crate::path::clean;
use crate::tree::{Match, Tree, Tsr};

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::{self, CatchUnwind};
use futures_util::{ready, FutureExt};
use hyper::service::Service;
use hyper::{header, Body, Method, Request, Response, StatusCode};
use tracing::{debug, error, trace};

type BoxFuture = Pin<Box<dyn Future<Output = hyper::Result<Response<Body>>> + Send + Sync>>;

/// The methods the router keeps a tree for, in the order they are reported
/// in `Allow` headers.
fn supported_methods() -> [Method; 9] {
    [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::CONNECT,
        Method::OPTIONS,
        Method::TRACE,
    ]
}

/// Router dispatches requests to different handlers via configurable routes.
pub struct Router {
    trees: HashMap<Method, Tree<Arc<dyn Handler>>>,
    config: Config,
    global_options: Option<Arc<dyn Handler>>,
    not_found: Option<Arc<dyn Handler>>,
    method_not_allowed: Option<Arc<dyn Handler>>,
    panic_handler: Option<Arc<dyn PanicHandler>>,
}

impl Router {
    /// Creates a router with the given dispatch options.
    pub fn with_config(config: Config) -> Self {
        Router {
            trees: supported_methods()
                .iter()
                .map(|method| (method.clone(), Tree::new()))
                .collect(),
            config,
            global_options: None,
            not_found: None,
            method_not_allowed: None,
            panic_handler: None,
        }
    }

    /// Insert a handler into the router for a specific path at the specified method.
    /// ```rust
    /// use radixmux::Router;
    /// use hyper::{Response, Body, Method, Request};
    ///
    /// let router = Router::default();
    /// router.handle(Method::GET, "/teapot", |_: Request<Body>| async {
    ///     Ok::<_, hyper::Error>(Response::new(Body::from("I am a teapot!")))
    /// }).unwrap();
    /// ```
    pub fn handle(
        &self,
        method: Method,
        path: &str,
        handler: impl Handler + 'static,
    ) -> Result<&Self, Error> {
        let tree = self
            .trees
            .get(&method)
            .ok_or_else(|| Error::UnsupportedMethod(method.clone()))?;

        match tree.add(path, Arc::new(handler)) {
            Ok(()) => {
                debug!(%method, path, "registered route");
                Ok(self)
            }
            Err(err) => {
                debug!(%method, path, error = %err, "rejected route");
                Err(err.into())
            }
        }
    }

    /// Removes the handler registered for the exact pattern `path`.
    ///
    /// Wildcards are matched literally: a route registered as `/user/:id` is
    /// removed with `/user/:id`, not with a concrete path such as `/user/42`.
    /// ```rust
    /// use radixmux::Router;
    /// use hyper::{Response, Body, Method, Request};
    ///
    /// let router = Router::default();
    /// router.get("/user/:id", |_: Request<Body>| async {
    ///     Ok::<_, hyper::Error>(Response::new(Body::empty()))
    /// }).unwrap();
    ///
    /// assert!(router.remove(Method::GET, "/user/42").is_err());
    /// assert!(router.remove(Method::GET, "/user/:id").is_ok());
    /// assert!(router.lookup(&Method::GET, "/user/42", false).is_err());
    /// ```
    pub fn remove(&self, method: Method, path: &str) -> Result<(), Error> {
        let tree = self
            .trees
            .get(&method)
            .ok_or_else(|| Error::UnsupportedMethod(method.clone()))?;

        match tree.remove(path) {
            Some(_) => {
                debug!(%method, path, "removed route");
                Ok(())
            }
            None => Err(Error::NotRegistered {
                method,
                path: path.into(),
            }),
        }
    }

    /// Lookup allows the manual lookup of handler for a specific method and path.
    /// If the handler is not found, it returns a `Err(Tsr)` indicating whether a redirection
    /// should be performed to the same path with or without a trailing slash. The
    /// recommendation is only computed if `tsr` is set.
    /// ```rust
    /// use radixmux::Router;
    /// use hyper::{Response, Body, Method, Request};
    ///
    /// let router = Router::default();
    /// router.get("/home", |_: Request<Body>| async {
    ///     Ok::<_, hyper::Error>(Response::new(Body::from("Welcome!")))
    /// }).unwrap();
    ///
    /// let res = router.lookup(&Method::GET, "/home", false).unwrap();
    /// assert!(res.params.is_empty());
    /// ```
    pub fn lookup(
        &self,
        method: &Method,
        path: impl AsRef<str>,
        tsr: bool,
    ) -> Result<Match<Arc<dyn Handler>>, Tsr> {
        self.trees
            .get(method)
            .map_or(Err(Tsr::No), |tree| tree.get(path.as_ref(), tsr))
    }

    /// Register a handler for `GET` requests
    pub fn get(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::GET, path, handler)
    }

    /// Register a handler for `HEAD` requests
    pub fn head(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::HEAD, path, handler)
    }

    /// Register a handler for `OPTIONS` requests
    pub fn options(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::OPTIONS, path, handler)
    }

    /// Register a handler for `POST` requests
    pub fn post(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::POST, path, handler)
    }

    /// Register a handler for `PUT` requests
    pub fn put(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::PUT, path, handler)
    }

    /// Register a handler for `PATCH` requests
    pub fn patch(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::PATCH, path, handler)
    }

    /// Register a handler for `DELETE` requests
    pub fn delete(&self, path: &str, handler: impl Handler + 'static) -> Result<&Self, Error> {
        self.handle(Method::DELETE, path, handler)
    }

    /// Enables automatic redirection if the current route can't be matched but a
    /// handler for the path with (without) the trailing slash exists.
    /// For example if `/foo/` is requested but a route only exists for `/foo`, the
    /// client is redirected to `/foo` with HTTP status code 301 for `GET` requests
    /// and 307 for all other request methods.
    pub fn redirect_trailing_slash(mut self, enabled: bool) -> Self {
        self.config.redirect_trailing_slash = enabled;
        self
    }

    /// If enabled, the router tries to fix the current request path, if no
    /// handle is registered for it.
    /// Superfluous path elements like `../` or `//` are removed and the cleaned
    /// path is looked up again. If a handle can be found for it, the router
    /// makes a redirection to the corrected path with status code 301 for `GET`
    /// requests and 307 for all other request methods.
    /// For example `/..//foo` could be redirected to `/foo`.
    /// `redirect_trailing_slash` is independent of this option.
    pub fn redirect_fixed_path(mut self, enabled: bool) -> Self {
        self.config.redirect_fixed_path = enabled;
        self
    }

    /// If enabled, the router checks if another method is allowed for the
    /// current route, if the current request can not be routed.
    /// If this is the case, the request is answered with `MethodNotAllowed`
    /// and HTTP status code 405.
    /// If no other Method is allowed, the request is delegated to the `NotFound`
    /// handler.
    pub fn handle_method_not_allowed(mut self, enabled: bool) -> Self {
        self.config.handle_method_not_allowed = enabled;
        self
    }

    /// If enabled, the router automatically replies to `OPTIONS` requests.
    /// Custom `OPTIONS` handlers take priority over automatic replies.
    pub fn handle_options(mut self, enabled: bool) -> Self {
        self.config.handle_options = enabled;
        self
    }

    /// An optional handler that is called on automatic `OPTIONS` requests.
    /// The handler is only called if `handle_options` is true and no `OPTIONS`
    /// handler for the specific path was set.
    pub fn global_options(mut self, handler: impl Handler + 'static) -> Self {
        self.global_options = Some(Arc::new(handler));
        self
    }

    /// Configurable handler which is called when no matching route is
    /// found.
    pub fn not_found(mut self, handler: impl Handler + 'static) -> Self {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// A configurable handler which is called when a request
    /// cannot be routed and `handle_method_not_allowed` is true.
    pub fn method_not_allowed(mut self, handler: impl Handler + 'static) -> Self {
        self.method_not_allowed = Some(Arc::new(handler));
        self
    }

    /// A handler that turns a panic raised by a route handler into a
    /// response. Without one, panics are not caught.
    /// ```rust
    /// use radixmux::Router;
    /// use hyper::{Body, Response, StatusCode};
    /// use std::any::Any;
    ///
    /// let router = Router::default().panic_handler(|_: Box<dyn Any + Send>| {
    ///     let mut res = Response::new(Body::from("something went wrong"));
    ///     *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    ///     res
    /// });
    /// ```
    pub fn panic_handler(mut self, handler: impl PanicHandler + 'static) -> Self {
        self.panic_handler = Some(Arc::new(handler));
        self
    }

    /// Returns the dispatch options in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a list of the allowed methods for a specific path
    /// ```rust
    /// use radixmux::Router;
    /// use hyper::{Response, Body, Method, Request};
    ///
    /// let router = Router::default();
    /// router
    ///     .get("/home", |_: Request<Body>| async {
    ///         Ok::<_, hyper::Error>(Response::new(Body::from("Welcome!")))
    ///     })
    ///     .unwrap()
    ///     .post("/home", |_: Request<Body>| async {
    ///         Ok::<_, hyper::Error>(Response::new(Body::from("Welcome!")))
    ///     })
    ///     .unwrap();
    ///
    /// let allowed = router.allowed("/home");
    /// assert_eq!(allowed, ["GET", "POST", "OPTIONS"]);
    /// ```
    pub fn allowed(&self, path: &str) -> Vec<&'static str> {
        let mut allowed = supported_methods()
            .iter()
            .filter(|method| **method != Method::OPTIONS)
            .filter(|method| {
                self.trees.get(*method).map_or(false, |tree| match path {
                    "*" => !tree.is_empty(),
                    _ => tree.get(path, false).is_ok(),
                })
            })
            .filter_map(method_name)
            .collect::<Vec<_>>();

        if !allowed.is_empty() {
            allowed.push("OPTIONS")
        }

        allowed
    }
}

/// `Method::as_str` borrows from the method; the supported ones are all
/// standard, so their names are static.
fn method_name(method: &Method) -> Option<&'static str> {
    match *method {
        Method::GET => Some("GET"),
        Method::HEAD => Some("HEAD"),
        Method::POST => Some("POST"),
        Method::PUT => Some("PUT"),
        Method::PATCH => Some("PATCH"),
        Method::DELETE => Some("DELETE"),
        Method::CONNECT => Some("CONNECT"),
        Method::OPTIONS => Some("OPTIONS"),
        Method::TRACE => Some("TRACE"),
        _ => None,
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routed = supported_methods()
            .iter()
            .filter(|method| self.trees.get(*method).map_or(false, |tree| !tree.is_empty()))
            .filter_map(method_name)
            .collect::<Vec<_>>();

        f.debug_struct("Router")
            .field("config", &self.config)
            .field("methods", &routed)
            .field("global_options", &self.global_options.is_some())
            .field("not_found", &self.not_found.is_some())
            .field("method_not_allowed", &self.method_not_allowed.is_some())
            .field("panic_handler", &self.panic_handler.is_some())
            .finish()
    }
}

/// The default router configuration
impl Default for Router {
    fn default() -> Self {
        Router::with_config(Config::default())
    }
}

/// Represents a HTTP handler function.
/// This trait is implemented for asynchronous functions that take a `Request` and return a
/// `Result<Response<Body>, hyper::Error>`
/// ```rust
/// # use radixmux::Handler;
/// # use hyper::{Request, Response, Body};
/// async fn hello(_: Request<Body>) -> Result<Response<Body>, hyper::Error> {
///     Ok(Response::new(Body::empty()))
/// }
///
/// let handler: Box<dyn Handler> = Box::new(hello);
/// ```
pub trait Handler: Send + Sync {
    fn handle(&self, req: Request<Body>) -> BoxFuture;
}

impl<F, R> Handler for F
where
    F: Fn(Request<Body>) -> R + Send + Sync,
    R: Future<Output = Result<Response<Body>, hyper::Error>> + Send + Sync + 'static,
{
    fn handle(&self, req: Request<Body>) -> BoxFuture {
        Box::pin(self(req))
    }
}

/// Turns the payload of a panic raised by a handler into a response.
pub trait PanicHandler: Send + Sync {
    fn handle(&self, panic: Box<dyn Any + Send>) -> Response<Body>;
}

impl<F> PanicHandler for F
where
    F: Fn(Box<dyn Any + Send>) -> Response<Body> + Send + Sync,
{
    fn handle(&self, panic: Box<dyn Any + Send>) -> Response<Body> {
        self(panic)
    }
}

#[doc(hidden)]
pub struct MakeRouterService(RouterService);

impl<T> Service<T> for MakeRouterService {
    type Response = RouterService;
    type Error = hyper::Error;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        let service = self.0.clone();
        future::ok(service)
    }
}

#[doc(hidden)]
#[derive(Clone)]
pub struct RouterService(Arc<Router>);

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = hyper::Error;
    type Future = ResponseFut;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        self.0.serve(req)
    }
}

impl Router {
    /// Converts the `Router` into a `Service` which you can serve directly with `Hyper`.
    /// If you have an existing `Service` that you want to incorporate a `Router` into, see
    /// [`Router::serve`](crate::Router::serve).
    /// ```rust,no_run
    /// # use radixmux::Router;
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// // Our router...
    /// let router = Router::default();
    ///
    /// // Convert it into a service...
    /// let service = router.into_service();
    ///
    /// // Serve with hyper
    /// hyper::Server::bind(&([127, 0, 0, 1], 3030).into())
    ///     .serve(service)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_service(self) -> MakeRouterService {
        Arc::new(self).service()
    }

    /// Creates a `Service` from a shared `Router`. Routes registered or removed
    /// through the `Arc` afterwards are visible to the running service.
    /// ```rust,no_run
    /// # use radixmux::Router;
    /// # use hyper::{Body, Request, Response};
    /// # use std::sync::Arc;
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let router = Arc::new(Router::default());
    /// let server = hyper::Server::bind(&([127, 0, 0, 1], 3030).into())
    ///     .serve(router.service());
    ///
    /// router.get("/late", |_: Request<Body>| async {
    ///     Ok::<_, hyper::Error>(Response::new(Body::from("registered while serving")))
    /// })?;
    ///
    /// server.await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn service(self: &Arc<Self>) -> MakeRouterService {
        MakeRouterService(RouterService(Arc::clone(self)))
    }

    /// An asynchronous function from a `Request` to a `Response`. You will generally not need to use
    /// this function directly, and instead use
    /// [`Router::into_service`](crate::Router::into_service). However, it may be useful when
    /// incorporating the router into a larger service.
    /// ```rust,no_run
    /// # use radixmux::Router;
    /// # use hyper::service::{make_service_fn, service_fn};
    /// # use hyper::{Request, Body, Server};
    /// # use std::convert::Infallible;
    /// # use std::sync::Arc;
    ///
    /// # async fn run() {
    /// let router = Arc::new(Router::default());
    ///
    /// let make_svc = make_service_fn(move |_| {
    ///     let router = router.clone();
    ///     async move {
    ///         Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
    ///             let router = router.clone();
    ///             async move { router.serve(req).await }
    ///         }))
    ///     }
    /// });
    ///
    /// let server = Server::bind(&([127, 0, 0, 1], 3000).into())
    ///     .serve(make_svc)
    ///     .await;
    /// # }
    /// ```
    pub fn serve(&self, mut req: Request<Body>) -> ResponseFut {
        let tree = self.trees.get(req.method());
        let path = req.uri().path().to_owned();

        if let Some(tree) = tree {
            match tree.get(&path, self.config.redirect_trailing_slash) {
                Ok(lookup) => {
                    req.extensions_mut().insert::<Params>(lookup.params);
                    return self.call(lookup.value.as_ref(), req);
                }
                Err(tsr) => {
                    if req.method() != Method::CONNECT && path != "/" {
                        let code = match *req.method() {
                            // Moved Permanently, request with GET method
                            Method::GET => StatusCode::MOVED_PERMANENTLY,
                            // Temporary Redirect, request with same method
                            _ => StatusCode::TEMPORARY_REDIRECT,
                        };

                        if self.config.redirect_trailing_slash {
                            if let Some(fixed) = fix_trailing_slash(&path, tsr) {
                                trace!(from = %path, to = %fixed, "trailing slash redirect");
                                return ResponseFutKind::Redirect(with_query(fixed, &req), code)
                                    .into();
                            }
                        }

                        if self.config.redirect_fixed_path {
                            if let Some(fixed) = self.fixed_path(tree, &path) {
                                trace!(from = %path, to = %fixed, "fixed path redirect");
                                return ResponseFutKind::Redirect(with_query(fixed, &req), code)
                                    .into();
                            }
                        }
                    }
                }
            }
        }

        if req.method() == Method::OPTIONS && self.config.handle_options {
            let allow = self.allowed(&path);

            if !allow.is_empty() {
                return match self.global_options {
                    Some(ref handler) => self.call(handler.as_ref(), req),
                    None => ResponseFutKind::Options(allow.join(", ")).into(),
                };
            }
        } else if self.config.handle_method_not_allowed {
            let allow = self.allowed(&path);

            if !allow.is_empty() {
                trace!(method = %req.method(), %path, "method not allowed");
                return match self.method_not_allowed {
                    Some(ref handler) => self.call(handler.as_ref(), req),
                    None => ResponseFutKind::MethodNotAllowed(allow.join(", ")).into(),
                };
            }
        }

        trace!(method = %req.method(), %path, "no route found");
        match self.not_found {
            Some(ref handler) => self.call(handler.as_ref(), req),
            None => ResponseFutKind::NotFound.into(),
        }
    }

    /// Returns the cleaned form of `path` if it resolves, or if a slash fix of
    /// it does and trailing slash redirects are enabled.
    fn fixed_path(&self, tree: &Tree<Arc<dyn Handler>>, path: &str) -> Option<String> {
        let cleaned = clean(path);
        if cleaned == path {
            return None;
        }

        match tree.get(&cleaned, self.config.redirect_trailing_slash) {
            Ok(_) => Some(cleaned.into_owned()),
            Err(tsr) if self.config.redirect_trailing_slash => fix_trailing_slash(&cleaned, tsr),
            Err(_) => None,
        }
    }

    /// Calls `handler`, catching panics if a panic handler is set.
    fn call(&self, handler: &dyn Handler, req: Request<Body>) -> ResponseFut {
        let panic_handler = match self.panic_handler {
            Some(ref panic_handler) => Arc::clone(panic_handler),
            None => return ResponseFutKind::Boxed(handler.handle(req)).into(),
        };

        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(req))) {
            Ok(fut) => {
                ResponseFutKind::Guarded(AssertUnwindSafe(fut).catch_unwind(), panic_handler)
                    .into()
            }
            Err(panic) => {
                error!("handler panicked");
                ResponseFutKind::Ready(Some(panic_handler.handle(panic))).into()
            }
        }
    }
}

fn fix_trailing_slash(path: &str, tsr: Tsr) -> Option<String> {
    match tsr {
        Tsr::No => None,
        Tsr::AddSlash => Some([path, "/"].join("")),
        Tsr::RemoveSlash => path.strip_suffix('/').map(str::to_owned),
    }
}

fn with_query(mut path: String, req: &Request<Body>) -> String {
    if let Some(query) = req.uri().query() {
        path.push('?');
        path.push_str(query);
    }
    path
}

pub struct ResponseFut {
    kind: ResponseFutKind,
}

impl From<ResponseFutKind> for ResponseFut {
    fn from(kind: ResponseFutKind) -> Self {
        Self { kind }
    }
}

enum ResponseFutKind {
    Boxed(BoxFuture),
    Guarded(CatchUnwind<AssertUnwindSafe<BoxFuture>>, Arc<dyn PanicHandler>),
    Ready(Option<Response<Body>>),
    Redirect(String, StatusCode),
    MethodNotAllowed(String),
    Options(String),
    NotFound,
}

impl Future for ResponseFut {
    type Output = hyper::Result<Response<Body>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let ready = match self.kind {
            ResponseFutKind::Boxed(ref mut fut) => ready!(fut.as_mut().poll(cx)),
            ResponseFutKind::Guarded(ref mut fut, ref panic_handler) => {
                match ready!(fut.poll_unpin(cx)) {
                    Ok(res) => res,
                    Err(panic) => {
                        error!("handler panicked");
                        Ok(panic_handler.handle(panic))
                    }
                }
            }
            ResponseFutKind::Ready(ref mut res) => Ok(res.take().unwrap_or_default()),
            ResponseFutKind::Redirect(ref path, code) => Ok(Response::builder()
                .header(header::LOCATION, path.as_str())
                .status(code)
                .body(Body::empty())
                .unwrap()),
            ResponseFutKind::NotFound => Ok(Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::empty())
                .unwrap()),
            ResponseFutKind::Options(ref allowed) => Ok(Response::builder()
                .header(header::ALLOW, allowed)
                .body(Body::empty())
                .unwrap()),
            ResponseFutKind::MethodNotAllowed(ref allowed) => Ok(Response::builder()
                .header(header::ALLOW, allowed)
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .body(Body::empty())
                .unwrap()),
        };

        Poll::Ready(ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_methods_have_names() {
        for method in supported_methods().iter() {
            assert_eq!(method_name(method), Some(method.as_str()));
        }
        assert_eq!(method_name(&Method::from_bytes(b"PURGE").unwrap()), None);
    }

    #[test]
    fn test_debug_lists_routed_methods() {
        let router = Router::default();
        router
            .post("/submit", |_: Request<Body>| async {
                Ok::<_, hyper::Error>(Response::new(Body::empty()))
            })
            .unwrap();

        let debug = format!("{:?}", router);
        assert!(debug.starts_with("Router {"));
        assert!(debug.contains(r#"methods: ["POST"]"#));
    }
}
