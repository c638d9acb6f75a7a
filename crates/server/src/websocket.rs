use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use vohala_database::events::client::{EventV1, WebSocketError};
use vohala_database::events::server::ClientMessage;
use vohala_database::{Database, User};

use crate::publish::{Publisher, Tx};

/// Accept realtime connections until the listener dies.
pub async fn launch(listener: TcpListener, db: Database, publisher: Arc<Publisher>) {
    info!(
        "Listening for realtime connections on {:?}.",
        listener.local_addr()
    );

    while let Ok((stream, addr)) = listener.accept().await {
        let db = db.clone();
        let publisher = Arc::clone(&publisher);
        tokio::spawn(async move {
            info!("User connected from {addr:?}.");
            client(db, publisher, stream, addr).await;
            info!("User disconnected from {addr:?}.");
        });
    }
}

/// Drive a single connection from accept to teardown.
async fn client(db: Database, publisher: Arc<Publisher>, stream: TcpStream, addr: SocketAddr) {
    let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
        return;
    };
    let (mut write, mut read) = ws.split();

    // All outbound frames funnel through this channel; the writer task is the
    // only place the sink is touched, which keeps per-connection ordering.
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if write.send(frame).await.is_err() {
                break;
            }
        }
    });

    let connection_id = publisher.register_connection(tx.clone());
    let idle = Duration::from_secs(vohala_config::config().websocket.idle_timeout_secs);

    // Connections start anonymous and stay that way until a valid
    // Authenticate message arrives.
    let mut user: Option<User> = None;

    loop {
        let frame = match timeout(idle, read.next()).await {
            Ok(Some(Ok(frame))) => frame,
            // Idle timeout, transport error or stream end.
            _ => break,
        };

        let text = match frame {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };

        let payload = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(payload) => payload,
            Err(error) => {
                send(
                    &tx,
                    &EventV1::Error(WebSocketError::MalformedData {
                        msg: error.to_string(),
                    }),
                );
                continue;
            }
        };

        match payload {
            ClientMessage::Authenticate { token } => {
                if user.is_some() {
                    send(&tx, &EventV1::Error(WebSocketError::AlreadyAuthenticated));
                    continue;
                }

                match db.fetch_user_by_token(&token).await {
                    Ok(found) => {
                        info!("Connection from {addr:?} identified as @{}.", found.username);
                        send(&tx, &EventV1::Authenticated);

                        // Claim the presence slot before anything is pushed;
                        // a previous connection for this user is simply
                        // overwritten.
                        publisher.presence().set_online(found.id, tx.clone());
                        if let Err(error) = db.set_online_status(found.id, true).await {
                            warn!("Failed to persist online status: {error:?}");
                        }
                        publisher.broadcast(&EventV1::UserStatus {
                            user_id: found.id,
                            online: true,
                        });

                        user = Some(found);
                    }
                    Err(_) => send(&tx, &EventV1::Error(WebSocketError::InvalidSession)),
                }
            }
            ClientMessage::Ping { data } => send(&tx, &EventV1::Pong { data }),
            payload => {
                // Anything else requires an identified connection.
                let Some(current) = user.as_ref() else {
                    continue;
                };

                match payload {
                    ClientMessage::BeginTyping { recipient } => {
                        publisher.send_to_user(
                            recipient,
                            &EventV1::StartTyping {
                                user_id: current.id,
                            },
                        );
                    }
                    ClientMessage::EndTyping { recipient } => {
                        publisher.send_to_user(
                            recipient,
                            &EventV1::StopTyping {
                                user_id: current.id,
                            },
                        );
                    }
                    ClientMessage::MessageRead { sender } => {
                        publisher.send_to_user(
                            sender,
                            &EventV1::MessagesRead {
                                read_by: current.id,
                            },
                        );
                    }
                    ClientMessage::SendMessage { recipient, message } => {
                        publisher.send_to_user(recipient, &EventV1::Message(message));
                    }
                    // Room membership is implicit in direct conversations;
                    // accepted for client compatibility.
                    ClientMessage::JoinRoom { .. } | ClientMessage::LeaveRoom { .. } => {}
                    ClientMessage::Authenticate { .. } | ClientMessage::Ping { .. } => {}
                }
            }
        }
    }

    publisher.unregister_connection(connection_id);

    if let Some(user) = user {
        // Only go offline if the registry still points at this connection;
        // a newer connection for the same user owns the slot otherwise.
        let removed = publisher
            .presence()
            .set_offline_if(user.id, |handle| handle.same_channel(&tx));

        if removed {
            if let Err(error) = db.set_online_status(user.id, false).await {
                warn!("Failed to persist offline status: {error:?}");
            }
            publisher.broadcast(&EventV1::UserStatus {
                user_id: user.id,
                online: false,
            });
        }
    }
}

fn send(tx: &Tx, event: &EventV1) {
    if let Ok(text) = serde_json::to_string(event) {
        tx.send(WsMessage::Text(text)).ok();
    }
}
