use crate::api::RequestContext;
use crate::common::error::ServiceResult;
use crate::models::live::MatchFrame;
use crate::usecases::scoring::{self, Subscription};
use axum::extract::Path;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::{debug, error};
use uuid::Uuid;

/// Streams a match to a viewer: one snapshot frame up front, then every
/// committed revision in order until the match ends or the viewer leaves.
pub async fn watch(
    ctx: RequestContext,
    Path(match_id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> ServiceResult<Response> {
    let subscription = scoring::subscribe(&ctx, match_id).await?;
    debug!(match_id = %match_id, "Viewer subscribed");
    Ok(ws.on_upgrade(move |socket| stream_frames(socket, subscription)))
}

async fn stream_frames(mut socket: WebSocket, subscription: Subscription) {
    if send_frame(&mut socket, &subscription.snapshot).await.is_err() {
        return;
    }

    let mut updates = subscription.updates;
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(frame) = update else { break };
                if send_frame(&mut socket, &frame).await.is_err() {
                    break;
                }
            }
            inbound = socket.recv() => {
                // Viewers only listen; inbound traffic is ignored
                // apart from the socket going away.
                match inbound {
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

async fn send_frame(socket: &mut WebSocket, frame: &MatchFrame) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(frame) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Failed to encode match frame: {e}");
            return Err(axum::Error::new(e));
        }
    };
    socket.send(Message::Text(payload.into())).await
}
