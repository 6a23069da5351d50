//! Authentication middleware
//!
//! Builds the [`AuthContext`] of each request from its bearer token, runs
//! [`authorize`] and stores the context in the request extensions.

use crate::auth::{AuthContext, RouteClass, authorize};
use crate::server::middleware::helpers::{classify_route, extract_bearer_token};
use crate::server::state::AppState;
use crate::utils::error::ServiceError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return self.forward(req);
        };

        // Classify on the requoted path the router matches, not the raw URI
        let route = classify_route(req.match_info().as_str(), &state.config.server().base_path);
        let enforce = route != RouteClass::Public && state.policy.jwt_enabled;

        let context = match extract_bearer_token(req.headers()) {
            Some(token) => match state.jwt.verify_token(token) {
                Ok(claims) => Some(AuthContext::from(claims)),
                Err(e) if enforce => return reject(req, e),
                Err(_) => None,
            },
            None => None,
        };

        if let Err(e) = authorize(context.as_ref(), route, &state.policy) {
            debug!("Rejected {} {}: {}", req.method(), req.path(), e);
            return reject(req, e);
        }

        if let Some(context) = context {
            req.extensions_mut().insert(context);
        }
        self.forward(req)
    }
}

impl<S, B> AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    fn forward(
        &self,
        req: ServiceRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ServiceResponse<EitherBody<B>>, actix_web::Error>>>>
    {
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

/// Answer with the error body instead of calling the wrapped service
fn reject<B: 'static>(
    req: ServiceRequest,
    err: ServiceError,
) -> Pin<Box<dyn Future<Output = Result<ServiceResponse<EitherBody<B>>, actix_web::Error>>>> {
    let response = req.error_response(err).map_into_right_body();
    Box::pin(async move { Ok(response) })
}

/// The authenticated caller of a request, if any
pub fn get_auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

/// The authenticated caller, or `Unauthorized`
pub fn require_auth_context(req: &HttpRequest) -> Result<AuthContext, ServiceError> {
    get_auth_context(req).ok_or_else(|| ServiceError::unauthorized("Authentication required"))
}
