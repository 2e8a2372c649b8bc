use futures_util::StreamExt;
use qraso_types::ScanPayload;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;

/// Interpret one scanner frame.
///
/// A frame holding a JSON object is a decode response produced upstream,
/// anything else is the raw text of the code.
pub fn parse_frame(text: &str) -> Option<ScanPayload> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) if value.is_object() => Some(ScanPayload::Decoded(value)),
        _ => Some(ScanPayload::Text(text.to_string())),
    }
}

/// Connect to a scanner feed and hand every detection to `on_payload`.
///
/// Returns once connected; frames are read on a spawned task that ends with the stream.
pub async fn start_ws_listener<F>(url: &str, mut on_payload: F) -> anyhow::Result<JoinHandle<()>>
where
    F: FnMut(ScanPayload) + Send + 'static,
{
    let (ws_stream, _) = connect_async(url).await?;
    let (_, mut read) = ws_stream.split();

    let handle = tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(msg) if msg.is_text() => {
                    if let Ok(text) = msg.to_text()
                        && let Some(payload) = parse_frame(text)
                    {
                        on_payload(payload);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Scanner feed error: {e}");
                    break;
                }
            }
        }
        tracing::info!("Scanner feed closed");
    });

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::SinkExt;
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    use super::*;

    #[test]
    fn plain_text_is_scan_text() {
        assert_eq!(
            parse_frame(" http://example.com\n"),
            Some(ScanPayload::Text("http://example.com".to_string()))
        );
        // JSON that isn't an object is still just text
        assert_eq!(
            parse_frame("42"),
            Some(ScanPayload::Text("42".to_string()))
        );
        assert_eq!(parse_frame("   "), None);
    }

    #[test]
    fn json_object_is_a_decode_response() {
        assert_eq!(
            parse_frame(r#"{"original_url":"http://a.example","label":"안전"}"#),
            Some(ScanPayload::Decoded(
                json!({"original_url": "http://a.example", "label": "안전"})
            ))
        );
    }

    #[tokio::test]
    async fn listener_forwards_text_frames() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::text("http://one.example")).await.unwrap();
            ws.send(Message::binary(vec![1, 2, 3])).await.unwrap();
            ws.send(Message::text(r#"{"original_url":"http://two.example"}"#))
                .await
                .unwrap();
            ws.close(None).await.unwrap();
        });

        let (tx, rx) = std::sync::mpsc::channel();
        let handle = start_ws_listener(&format!("ws://{addr}"), move |payload| {
            let _ = tx.send(payload);
        })
        .await
        .unwrap();

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();

        let received: Vec<ScanPayload> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0], ScanPayload::Text("http://one.example".to_string()));
        assert!(matches!(received[1], ScanPayload::Decoded(_)));
    }
}
