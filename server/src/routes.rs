use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, reply::Reply};

use sesmail::confirm::Confirmer;
use sesmail::sns::Verifier;
use sesmail::storage::ObjectStore;
use sesmail::Adapter;

use super::controllers;
use super::error;

/// Every route, with rejections turned into JSON replies
pub fn router<V, S, C>(
    adapter: Arc<Adapter<V, S, C>>,
) -> impl Filter<Extract = (impl Reply, ), Error = Infallible> + Clone
where
    V: Verifier + 'static,
    S: ObjectStore + 'static,
    C: Confirmer + 'static,
{
    index().or(envelope(adapter)).recover(error::handle_rejection)
}

pub fn index() -> impl Filter<Extract = (&'static str, ), Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).map(|| "Welcome to sesmail!")
}

/// Handles notifications POSTed by SNS.
///
/// SNS sends JSON as text/plain, so the body is taken as raw bytes
/// regardless of content type.
pub fn envelope<V, S, C>(
    adapter: Arc<Adapter<V, S, C>>,
) -> impl Filter<Extract = (impl Reply, ), Error = Rejection> + Clone
where
    V: Verifier + 'static,
    S: ObjectStore + 'static,
    C: Confirmer + 'static,
{
    let route = adapter.config().route.clone();
    let limit = adapter.config().max_envelope_size;

    warp::path(route)
         .and(warp::path::end())
         .and(warp::post())
         .and(warp::body::content_length_limit(limit))
         .and(warp::body::bytes())
         .and(warp::any().map(move || adapter.clone()))
         .and_then(controllers::envelope)
}
