// Real HTTP server for websocket tests

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use backend::middleware::RequestTrace;
use backend::routes;
use backend::state::AppState;
use backend_test_support::websocket_client::{BoxError, WebSocketClient};

pub struct TestServer {
    pub state: AppState,
    pub addr: SocketAddr,
    handle: ServerHandle,
    join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn ws_url(&self, game_id: i64) -> String {
        format!("ws://{}/api/ws/games/{game_id}", self.addr)
    }

    pub async fn connect(&self, game_id: i64) -> Result<WebSocketClient, BoxError> {
        WebSocketClient::connect_retry(&self.ws_url(game_id), Duration::from_secs(1)).await
    }

    /// Connect, say hello and join; returns the client and its seat.
    pub async fn seat(&self, game_id: i64) -> Result<(WebSocketClient, u64), BoxError> {
        let mut client = self.connect(game_id).await?;
        client.hello().await?;
        let seat = client.join().await?;
        Ok((client, seat))
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
        let _ = self.join.await;
    }
}

/// Bind to an ephemeral port and serve the production routes in the background.
pub async fn start_test_server(state: AppState) -> Result<TestServer, BoxError> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer {
        state,
        addr,
        handle,
        join,
    })
}

/// Poll until the hub holds `expected` rooms.
pub async fn wait_for_rooms(state: &AppState, expected: usize) -> Result<(), BoxError> {
    let start = tokio::time::Instant::now();
    loop {
        let rooms = state.hub().room_count();
        if rooms == expected {
            return Ok(());
        }
        if start.elapsed() >= Duration::from_secs(2) {
            return Err(format!("timeout waiting for {expected} rooms (got {rooms})").into());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
