use earthcall::{AutomationError, Result, SessionManager, SessionStore};
use serde_json::json;
use tracing::info;

pub fn status(store: &SessionStore) -> Result<()> {
    match store.load() {
        Ok(Some(record)) => {
            let payload = json!({
                "session_id": record.session_id,
                "live": record.live,
                "alive": record.is_alive(),
                "pid": record.pid,
                "debug_port": record.debug_port,
                "ws_endpoint": record.ws_endpoint,
                "headless": record.headless,
                "created_at": record.created_at,
                "last_activity": record.last_activity,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Ok(None) => {
            println!("No session recorded; run open-url to create one");
        }
        Err(AutomationError::StoreCorrupt(msg)) => {
            println!("Session record unreadable ({msg}); run `session clear`");
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

pub fn clear(store: &SessionStore) -> Result<()> {
    let had_record = !matches!(store.load(), Ok(None));
    store.clear()?;
    if had_record {
        info!(target = "ec.session", "session record removed");
        println!("Removed session record");
    } else {
        println!("No session record to remove");
    }
    Ok(())
}

/// Explicit teardown: `release(keep_alive = false)` on the live session.
///
/// Must never launch a browser just to stop one, so this only attaches to
/// an existing session.
pub async fn stop(manager: &SessionManager) -> Result<()> {
    match manager.try_attach().await? {
        Some(session) => {
            manager.release(session, false).await?;
            println!("Stopped session browser and removed record");
        }
        None => {
            // try_attach already swept any stale or corrupt record
            println!("No live session to stop");
        }
    }
    Ok(())
}
