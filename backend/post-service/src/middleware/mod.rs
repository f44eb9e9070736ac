/// HTTP middleware utilities for post-service
///
/// Provides JWT authentication and simple request timing. The
/// implementations are intentionally lightweight wrappers; handlers pick
/// up the authenticated user through the `UserId` extractor.
use crate::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use auth_core::jwt;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;
use uuid::Uuid;

// =====================================================================
// JWT Authentication
// =====================================================================

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Actix middleware that validates a Bearer token using shared JWT helpers.
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // Failures go through AppError so 401s share the JSON error
            // shape of every other response.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    AppError::Unauthorized("missing Authorization header".to_string())
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                AppError::Unauthorized("Authorization scheme must be Bearer".to_string())
            })?;

            let claims = jwt::validate_token(token)
                .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?;

            let user_id = Uuid::parse_str(&claims.claims.sub)
                .map_err(|_| AppError::Unauthorized("invalid user id in token".to_string()))?;

            req.extensions_mut().insert(UserId(user_id));

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("no authenticated user".to_string()).into()),
        )
    }
}

// =====================================================================
// Request timing
// =====================================================================

pub struct RequestTimingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestTimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTimingMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimingMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTimingMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTimingMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let path = req.path().to_string();
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed().as_millis();
            tracing::debug!(%method, %path, %elapsed, "request completed");
            res
        })
    }
}
