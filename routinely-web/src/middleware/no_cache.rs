/// Cache-disabling middleware
///
/// Every response the server produces reflects mutable per-user state, so
/// every response carries headers telling browsers and proxies not to cache
/// it.
///
/// # Headers Applied
///
/// - `Cache-Control: no-cache, no-store, must-revalidate`
/// - `Expires: 0`
/// - `Pragma: no-cache`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use routinely_web::middleware::no_cache::NoCacheLayer;
///
/// let app: Router = Router::new().layer(NoCacheLayer::new());
/// ```

use axum::{extract::Request, response::Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Cache-disabling middleware layer
#[derive(Clone, Default)]
pub struct NoCacheLayer;

impl NoCacheLayer {
    /// Creates a new cache-disabling layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for NoCacheLayer {
    type Service = NoCacheMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        NoCacheMiddleware { inner }
    }
}

/// Cache-disabling middleware service
#[derive(Clone)]
pub struct NoCacheMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for NoCacheMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;

            let headers = response.headers_mut();
            headers.insert(
                "Cache-Control",
                "no-cache, no-store, must-revalidate".parse().unwrap(),
            );
            headers.insert("Expires", "0".parse().unwrap());
            headers.insert("Pragma", "no-cache".parse().unwrap());

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::get, Router};
    use tower::Service as _;

    #[tokio::test]
    async fn test_no_cache_headers_applied() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(NoCacheLayer::new());

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get("Cache-Control").unwrap(),
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(headers.get("Expires").unwrap(), "0");
        assert_eq!(headers.get("Pragma").unwrap(), "no-cache");
    }
}
