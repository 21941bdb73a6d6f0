use std::sync::Arc;
use warp::Filter;

use crate::coordinator::SessionCoordinator;

pub mod config;
pub mod coordinator;
pub mod websocket;

pub fn create_routes(
    coordinator: Arc<SessionCoordinator>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let coordinator_filter = warp::any().map({
        let coordinator = coordinator.clone();
        move || coordinator.clone()
    });

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(coordinator_filter)
        .map(|ws: warp::ws::Ws, coordinator| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, coordinator))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // The original served its front-end from any origin.
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    websocket.or(health).with(cors).with(warp::log("fictionary"))
}
