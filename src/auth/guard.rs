use crate::auth::token::TokenCodec;
use crate::types::{ActiveUser, AppError};
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Authentication modes a route can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Always passes; the route is open.
    None,
    /// Requires a valid bearer token.
    Bearer,
}

/// Ordered set of auth modes accepted by a route or route group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAuthSpec {
    modes: Vec<AuthType>,
}

impl RouteAuthSpec {
    pub fn new(modes: Vec<AuthType>) -> Self {
        Self { modes }
    }

    pub fn none() -> Self {
        Self::new(vec![AuthType::None])
    }

    pub fn bearer() -> Self {
        Self::new(vec![AuthType::Bearer])
    }

    pub fn modes(&self) -> &[AuthType] {
        &self.modes
    }
}

impl Default for RouteAuthSpec {
    /// Unannotated routes require a bearer token (secure by default).
    fn default() -> Self {
        Self::bearer()
    }
}

/// Declarative auth metadata, populated while the router is being built and
/// read-only at request time.
///
/// Route-level entries are keyed by method and exact path; group-level entries
/// by path prefix. Resolution gives route entries precedence over group
/// entries, mirroring method-overrides-class semantics.
#[derive(Debug, Default)]
pub struct RouteAuthRegistry {
    routes: HashMap<(Method, String), RouteAuthSpec>,
    groups: Vec<(String, RouteAuthSpec)>,
}

impl RouteAuthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotates a single route.
    pub fn route(mut self, method: Method, path: &str, spec: RouteAuthSpec) -> Self {
        self.routes.insert((method, path.to_string()), spec);
        self
    }

    /// Annotates every route under a path prefix.
    pub fn group(mut self, prefix: &str, spec: RouteAuthSpec) -> Self {
        self.groups.push((prefix.trim_end_matches('/').to_string(), spec));
        self
    }

    /// Resolves the effective spec for a request target.
    pub fn resolve(&self, method: &Method, path: &str) -> RouteAuthSpec {
        if let Some(spec) = self.routes.get(&(method.clone(), path.to_string())) {
            return spec.clone();
        }

        // Longest matching prefix wins between overlapping groups.
        self.groups
            .iter()
            .filter(|(prefix, _)| {
                path == prefix || path.starts_with(&format!("{}/", prefix))
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, spec)| spec.clone())
            .unwrap_or_default()
    }
}

/// Outcome of a single guard evaluation.
///
/// Guards report structured verdicts instead of raising errors for control
/// flow: `Deny` is a definitive authentication failure that stops the
/// dispatch loop, `Skip` is a non-fatal failure that lets remaining modes run.
#[derive(Debug)]
pub enum GuardVerdict {
    Admit,
    Deny(AppError),
    Skip(AppError),
}

/// A unit of authentication logic that admits or rejects a request.
#[async_trait]
pub trait Guard: Send + Sync {
    async fn check(&self, req: &mut Request) -> GuardVerdict;
}

/// Guard for open routes.
pub struct NoneGuard;

#[async_trait]
impl Guard for NoneGuard {
    async fn check(&self, _req: &mut Request) -> GuardVerdict {
        GuardVerdict::Admit
    }
}

/// Verifies `Authorization: Bearer <token>` and attaches the decoded
/// principal to the request.
pub struct BearerGuard {
    codec: Arc<TokenCodec>,
}

impl BearerGuard {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

#[async_trait]
impl Guard for BearerGuard {
    async fn check(&self, req: &mut Request) -> GuardVerdict {
        let Some(value) = req.headers().get(header::AUTHORIZATION) else {
            return GuardVerdict::Deny(AppError::Auth(
                "Authorization header not found. Please include an Authorization header with a Bearer token".to_string(),
            ));
        };
        let Ok(value) = value.to_str() else {
            return GuardVerdict::Deny(AppError::Auth(
                "Malformed authorization header".to_string(),
            ));
        };
        let Some(token) = value.strip_prefix("Bearer ") else {
            return GuardVerdict::Deny(AppError::Auth(
                "Invalid authorization type. Expected Bearer token".to_string(),
            ));
        };

        match self.codec.verify(token) {
            Ok(claims) => {
                req.extensions_mut().insert(ActiveUser::from(claims));
                GuardVerdict::Admit
            }
            Err(err @ AppError::Auth(_)) => GuardVerdict::Deny(err),
            Err(err) => GuardVerdict::Skip(err),
        }
    }
}

/// Registry of guard strategies keyed by auth mode, built once at startup.
pub struct GuardSet {
    guards: HashMap<AuthType, Arc<dyn Guard>>,
}

impl GuardSet {
    /// Builds the standard guard table: `None` and `Bearer`.
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        let mut guards: HashMap<AuthType, Arc<dyn Guard>> = HashMap::new();
        guards.insert(AuthType::None, Arc::new(NoneGuard));
        guards.insert(AuthType::Bearer, Arc::new(BearerGuard::new(codec)));
        Self { guards }
    }

    /// Registers or replaces the strategy for a mode.
    pub fn register(&mut self, mode: AuthType, guard: Arc<dyn Guard>) {
        self.guards.insert(mode, guard);
    }

    fn get(&self, mode: AuthType) -> Option<&Arc<dyn Guard>> {
        self.guards.get(&mode)
    }
}

/// Shared state for the dispatcher middleware; read-only after startup.
#[derive(Clone)]
pub struct AuthState {
    pub registry: Arc<RouteAuthRegistry>,
    pub guards: Arc<GuardSet>,
}

/// Auth dispatcher middleware.
///
/// Resolves the route's auth spec and runs the matching guards in declared
/// order. The first `Admit` forwards the request to the handler; a `Deny`
/// rejects it immediately; a `Skip` is logged and the next mode gets a
/// chance. Exhausting all modes rejects with a generic unauthorized error.
pub async fn authenticate(State(auth): State<AuthState>, mut req: Request, next: Next) -> Response {
    let spec = auth.registry.resolve(req.method(), req.uri().path());
    tracing::debug!(method = %req.method(), path = req.uri().path(), ?spec, "dispatching auth");

    for mode in spec.modes() {
        let Some(guard) = auth.guards.get(*mode) else {
            tracing::error!(?mode, "no guard registered for auth mode");
            continue;
        };

        match guard.check(&mut req).await {
            GuardVerdict::Admit => return next.run(req).await,
            GuardVerdict::Deny(err) => {
                tracing::debug!(?mode, error = %err, "guard rejected request");
                return err.into_response();
            }
            GuardVerdict::Skip(err) => {
                tracing::error!(?mode, error = %err, "guard failed, trying next mode");
            }
        }
    }

    AppError::Auth("Please login to access this page".to_string()).into_response()
}
