//! Websocket client speaking the game protocol, for integration tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect, retrying until the server accepts or `timeout` elapses.
    pub async fn connect_retry(url: &str, timeout: Duration) -> Result<Self, BoxError> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) if start.elapsed() >= timeout => return Err(Box::new(err)),
                Err(_) => tokio::time::sleep(Duration::from_millis(5)).await,
            }
        }
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), BoxError> {
        self.stream
            .send(Message::Text(value.to_string().into()))
            .await?;
        Ok(())
    }

    /// Next JSON text frame; `None` once the server closes.
    pub async fn recv_json(&mut self) -> Result<Option<Value>, BoxError> {
        loop {
            let next = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .map_err(|_| "timeout waiting for message")?;
            match next {
                None | Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(Message::Text(text))) => return Ok(Some(serde_json::from_str(&text)?)),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(Box::new(err)),
            }
        }
    }

    /// Skip messages until one of type `ty` arrives.
    pub async fn recv_type(&mut self, ty: &str) -> Result<Value, BoxError> {
        loop {
            match self.recv_json().await? {
                Some(msg) if msg["type"] == ty => return Ok(msg),
                Some(_) => continue,
                None => return Err(format!("connection closed before '{ty}'").into()),
            }
        }
    }

    pub async fn hello(&mut self) -> Result<Value, BoxError> {
        self.send_json(&json!({"type": "hello", "protocol": 1})).await?;
        self.recv_type("hello_ack").await
    }

    /// Send `join` and return the seat.
    pub async fn join(&mut self) -> Result<u64, BoxError> {
        self.send_json(&json!({"type": "join"})).await?;
        let joined = self.recv_type("joined").await?;
        joined["seat"]
            .as_u64()
            .ok_or_else(|| "joined without seat".into())
    }

    pub async fn pick(&mut self, card_id: u64, choice: Option<Value>) -> Result<(), BoxError> {
        let mut msg = json!({"type": "pick", "card_id": card_id});
        if let Some(choice) = choice {
            msg["choice"] = choice;
        }
        self.send_json(&msg).await
    }

    pub async fn resolve_choice(&mut self, card_id: u64, choice: Value) -> Result<(), BoxError> {
        self.send_json(&json!({"type": "resolve_choice", "card_id": card_id, "choice": choice}))
            .await
    }

    pub async fn close(&mut self) -> Result<(), BoxError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
