//! Response security headers.
//!
//! # Responsibilities
//! - Apply the fixed security header set to every response
//! - Strip headers that disclose the implementation technology
//!
//! # Design Decisions
//! - Static header values, no per-request branching
//! - Applied as the outermost security layer so rejections and errors
//!   from inner stages still carry the full set

use std::task::{Context, Poll};

use axum::http::{header, HeaderValue, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

static NO_SNIFF: HeaderValue = HeaderValue::from_static("nosniff");
static DENY_FRAMES: HeaderValue = HeaderValue::from_static("DENY");
static NO_REFERRER: HeaderValue = HeaderValue::from_static("no-referrer");
static CSP: HeaderValue = HeaderValue::from_static(
    "default-src 'self'; \
     script-src 'self'; \
     style-src 'self'; \
     img-src 'self' data:; \
     font-src 'self' data:; \
     object-src 'none'; \
     frame-ancestors 'none'; \
     form-action 'self'; \
     base-uri 'self'",
);

/// Layer applying the fixed security header set.
#[derive(Clone, Copy, Default)]
pub struct HeaderHardenerLayer;

impl<S> Layer<S> for HeaderHardenerLayer {
    type Service = HeaderHardener<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HeaderHardener { inner }
    }
}

/// Service wrapper that mutates response headers; never fails on its own.
#[derive(Clone)]
pub struct HeaderHardener<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HeaderHardener<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;
            let headers = response.headers_mut();

            headers.remove(header::SERVER);
            headers.remove("x-powered-by");

            headers.insert(header::X_CONTENT_TYPE_OPTIONS, NO_SNIFF.clone());
            headers.insert(header::X_FRAME_OPTIONS, DENY_FRAMES.clone());
            headers.insert(header::REFERRER_POLICY, NO_REFERRER.clone());
            headers.insert(header::CONTENT_SECURITY_POLICY, CSP.clone());

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn run_hardened(response: Response<Body>) -> Response<Body> {
        let inner = service_fn(move |_request: Request<Body>| {
            let response = clone_parts(&response);
            async move { Ok::<_, Infallible>(response) }
        });
        HeaderHardenerLayer
            .layer(inner)
            .oneshot(Request::new(Body::empty()))
            .await
            .expect("service is infallible")
    }

    fn clone_parts(response: &Response<Body>) -> Response<Body> {
        let mut out = Response::builder()
            .status(response.status())
            .body(Body::empty())
            .expect("static response");
        out.headers_mut().extend(
            response
                .headers()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        out
    }

    #[tokio::test]
    async fn full_set_is_applied() {
        let response = run_hardened(Response::new(Body::empty())).await;
        let headers = response.headers();

        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS), Some(&NO_SNIFF));
        assert_eq!(headers.get(header::X_FRAME_OPTIONS), Some(&DENY_FRAMES));
        assert_eq!(headers.get(header::REFERRER_POLICY), Some(&NO_REFERRER));
        let csp = headers
            .get(header::CONTENT_SECURITY_POLICY)
            .and_then(|v| v.to_str().ok())
            .expect("CSP present");
        assert!(csp.contains("default-src 'self'"));
        assert!(csp.contains("object-src 'none'"));
        assert!(csp.contains("form-action 'self'"));
    }

    #[tokio::test]
    async fn technology_disclosure_is_stripped() {
        let mut disclosing = Response::new(Body::empty());
        disclosing
            .headers_mut()
            .insert(header::SERVER, HeaderValue::from_static("hyper"));
        disclosing
            .headers_mut()
            .insert("x-powered-by", HeaderValue::from_static("Express"));

        let response = run_hardened(disclosing).await;
        assert!(response.headers().get(header::SERVER).is_none());
        assert!(response.headers().get("x-powered-by").is_none());
    }

    #[tokio::test]
    async fn applies_on_error_statuses_too() {
        let mut error = Response::new(Body::empty());
        *error.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;

        let response = run_hardened(error).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::X_FRAME_OPTIONS).is_some());
    }
}
