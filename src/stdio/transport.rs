use std::io;

use serde_json::Value;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::{debug, info};

use crate::mcp::rpc::json_rpc_error;
use crate::mcp::server::handle_json_rpc_value;
use crate::AppState;

/// Serves until `reader` reaches end of input and every in-flight message is answered.
///
/// Each message runs on its own task; responses are written whole, one per line,
/// in completion order.
pub async fn serve<R, W>(state: AppState, mut reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
    let mut tx = Some(tx);
    let mut line = Vec::new();

    loop {
        tokio::select! {
            // read_until keeps partial bytes in `line` if another branch wins
            read = reader.read_until(b'\n', &mut line), if tx.is_some() => {
                let read = read?;
                if let Some(sender) = &tx {
                    dispatch_line(&state, sender, &line);
                }
                line.clear();
                if read == 0 {
                    debug!("stdin closed, draining in-flight messages");
                    tx = None;
                }
            }
            Some(response) = rx.recv() => write_message(&mut writer, &response).await?,
            else => break,
        }
    }

    info!("stdio transport finished");
    Ok(())
}

/// Invalid UTF-8 and invalid JSON both get a parse error; neither ends the session.
fn dispatch_line(state: &AppState, sender: &mpsc::UnboundedSender<Value>, line: &[u8]) {
    let line = line.trim_ascii();
    if line.is_empty() {
        return;
    }

    let payload: Value = match serde_json::from_slice(line) {
        Ok(value) => value,
        Err(_) => {
            let _ = sender.send(json_rpc_error(None, -32700, "Parse error"));
            return;
        }
    };

    let state = state.clone();
    let sender = sender.clone();
    tokio::spawn(async move {
        if let Some(response) = handle_json_rpc_value(&state, payload).await {
            let _ = sender.send(response);
        }
    });
}

async fn write_message<W>(writer: &mut W, message: &Value) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await
}
