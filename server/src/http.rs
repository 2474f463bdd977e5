use std::sync::Arc;

use sesmail::confirm::Confirmer;
use sesmail::sns::Verifier;
use sesmail::storage::ObjectStore;
use sesmail::Adapter;

use super::routes;

pub async fn run<V, S, C>(adapter: Arc<Adapter<V, S, C>>, port: u16)
where
    V: Verifier + 'static,
    S: ObjectStore + 'static,
    C: Confirmer + 'static,
{
    log::info!(
        "Starting HTTP server at 0.0.0.0:{}, envelopes on /{}",
        port,
        adapter.config().route
    );

    warp::serve(routes::router(adapter))
        .run(([0, 0, 0, 0], port))
        .await;
}
