//! Optional Prometheus request metrics.
//!
//! [`MetricsLayer`] lets `create_server` wrap the app unconditionally while
//! the Prometheus middleware itself stays optional.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use prometheus::Registry;
use std::sync::Arc;

/// Build the `/metrics` middleware on a dedicated registry.
///
/// # Errors
///
/// Returns an error message when actix-web-prom cannot register its
/// collectors.
pub(crate) fn build_prometheus() -> Result<PrometheusMetrics, String> {
    PrometheusMetricsBuilder::new("daily_diet")
        .registry(Registry::new())
        .endpoint("/metrics")
        .build()
        .map_err(|err| err.to_string())
}

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    On(Arc<PrometheusMetrics>),
    Off,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Off, |metrics| Self::On(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::On(metrics) => {
                let pending = Compat::new(PrometheusMetrics::clone(metrics)).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::Off => {
                let passthrough =
                    service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}
