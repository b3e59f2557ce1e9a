use std::net::IpAddr;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use metrics::counter;
use ogw_messages::GatewayError;
use ogw_resolver::batch::try_dispatch_batch;
use ogw_resolver::reader::RecordReader;
use ogw_resolver::single::resolve;
use serde_derive::Serialize;
use tracing::error;
use tracing::info;
use warp::http::StatusCode;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

use crate::config::Config;
use crate::envelope;

#[derive(Serialize)]
struct DataBody {
    data: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Runs the gateway server until the process is terminated.
pub(crate) async fn serve(
    config: &Config,
    reader: Arc<dyn RecordReader>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::new(
        config
            .gateway
            .host
            .parse::<IpAddr>()
            .context("parsing listen host")?,
        config.gateway.port,
    );
    info!("Gateway listening. addr: {}", addr);
    warp::serve(routes(reader)).run(addr).await;
    Ok(())
}

/// `POST /` and `POST /gateway` resolve envelopes; `GET /readiness` reports
/// process health. Everything else gets warp's 404/405 rejections.
fn routes(
    reader: Arc<dyn RecordReader>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let readiness = warp::get()
        .and(warp::path!("readiness"))
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let gateway = warp::post()
        .and(warp::path::end().or(warp::path!("gateway")).unify())
        .and(warp::body::bytes())
        .then(move |body: Bytes| {
            let reader = reader.clone();
            async move { handle_request(reader, body).await }
        });

    readiness.or(gateway)
}

async fn handle_request(
    reader: Arc<dyn RecordReader>,
    body: Bytes,
) -> warp::reply::WithStatus<warp::reply::Json> {
    counter!("ogw_requests_received_total").increment(1);

    match process(reader.as_ref(), &body).await {
        Ok(encoded) => {
            counter!("ogw_requests_resolved_total").increment(1);
            let body = DataBody {
                data: format!("0x{}", hex::encode(encoded)),
            };
            warp::reply::with_status(warp::reply::json(&body), StatusCode::OK)
        },
        Err(err) => {
            counter!("ogw_request_errors_total").increment(1);
            let (status, message) = if err.is_client_error() {
                (StatusCode::BAD_REQUEST, err.to_string())
            } else {
                error!("Request failed. err: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            };
            warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        },
    }
}

/// Full request pipeline: envelope extraction, batch probe, single-request
/// fallback.
async fn process(
    reader: &dyn RecordReader,
    body: &[u8],
) -> Result<Vec<u8>, GatewayError> {
    let body = String::from_utf8_lossy(body);
    let payload = envelope::extract_payload(&body).ok_or(GatewayError::MissingPayload)?;
    let payload = hex::decode(payload.trim_start_matches("0x"))
        .map_err(|err| GatewayError::Decode(format!("payload is not valid hex: {err}")))?;

    if let Some(aggregate) = try_dispatch_batch(reader, &payload).await {
        return Ok(aggregate);
    }

    resolve(reader, &payload).await
}
