//! Live channel supervisor.
//!
//! Opens one duplex streaming connection per bot terminal session and
//! dispatches its events to a [`ChannelObserver`]. Each session runs on its
//! own task:
//!
//! 1. **Open**: build the URL from the bot ID and current credential, connect
//! 2. **Dispatch**: parse inbound text frames as JSON and hand them over
//! 3. **Relay**: forward outbound terminal commands from the handle
//! 4. **Terminate**: report the closure exactly once
//!
//! The supervisor never reconnects. Callers decide whether and when to open
//! a new session after `on_close`. It also does not prevent duplicate
//! sessions for the same bot; avoiding those is the caller's job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use super::credential::CredentialStore;
use crate::domain::{BotId, ChannelEvent, CloseInfo, TerminalCommand};
use crate::error::{ChannelError, ConfigError, Error, Result};
use crate::port::{ChannelConnector, ChannelObserver, ChannelTransport, InboundFrame};

/// Close code reported when the remote's close frame carried no status.
pub const CLOSE_NO_STATUS: u16 = 1005;

const CHANNEL_PATH: [&str; 4] = ["api", "v1", "ws", "bot"];

#[derive(Debug)]
enum Command {
    Send(String),
    Close,
}

/// Opens and supervises channel sessions.
#[derive(Clone)]
pub struct ChannelSupervisor {
    ws_url: Url,
    store: CredentialStore,
    connector: Arc<dyn ChannelConnector>,
}

impl ChannelSupervisor {
    #[must_use]
    pub fn new(ws_url: Url, store: CredentialStore, connector: Arc<dyn ChannelConnector>) -> Self {
        Self {
            ws_url,
            store,
            connector,
        }
    }

    /// `<ws_url>/api/v1/ws/bot/{bot_id}/{token}`.
    ///
    /// Streaming connections cannot carry header credentials, so the token
    /// travels as the last path segment. An absent credential leaves that
    /// segment empty and the remote rejects the connection.
    pub fn channel_url(&self, bot_id: &BotId) -> Result<Url> {
        let token = self.store.get();
        let token = token.as_ref().map_or("", |t| t.as_str());

        let mut url = self.ws_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::Config(ConfigError::InvalidValue {
                    field: "ws_url",
                    reason: format!("{} cannot be a base URL", self.ws_url),
                })
            })?
            .pop_if_empty()
            .extend(CHANNEL_PATH)
            .push(bot_id.as_str())
            .push(token);
        Ok(url)
    }

    /// Open a session for `bot_id` and start dispatching to `observer`.
    ///
    /// Precondition: at most one session per (bot, purpose) should be open
    /// from a given caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established. No
    /// observer callback fires in that case.
    pub async fn open<O>(&self, bot_id: BotId, observer: O) -> Result<ChannelHandle>
    where
        O: ChannelObserver,
    {
        let url = self.channel_url(&bot_id)?;
        debug!(bot_id = %bot_id, "Opening channel");
        let transport = self.connector.connect(&url).await?;
        info!(bot_id = %bot_id, "Channel open");

        let open = Arc::new(AtomicBool::new(true));
        let (commands, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_session(
            bot_id.clone(),
            transport,
            Box::new(observer),
            command_rx,
            Arc::clone(&open),
        ));

        Ok(ChannelHandle {
            bot_id,
            commands,
            open,
            task: Some(task),
        })
    }

    /// Open a session whose events arrive on a channel receiver.
    pub async fn open_stream(
        &self,
        bot_id: BotId,
    ) -> Result<(ChannelHandle, mpsc::UnboundedReceiver<ChannelEvent>)> {
        let (sink, events) = ChannelEventSink::new();
        let handle = self.open(bot_id, sink).await?;
        Ok((handle, events))
    }
}

impl std::fmt::Debug for ChannelSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSupervisor")
            .field("ws_url", &self.ws_url.as_str())
            .finish_non_exhaustive()
    }
}

async fn run_session(
    bot_id: BotId,
    mut transport: Box<dyn ChannelTransport>,
    mut observer: Box<dyn ChannelObserver>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    open: Arc<AtomicBool>,
) {
    let close = loop {
        tokio::select! {
            frame = transport.next_frame() => match frame {
                Some(Ok(InboundFrame::Text(text))) => {
                    // No lock is held here: callbacks may use the handle.
                    if !open.load(Ordering::Acquire) {
                        continue;
                    }
                    match serde_json::from_str::<Value>(&text) {
                        Ok(message) => observer.on_message(message),
                        Err(e) => {
                            warn!(bot_id = %bot_id, error = %e, bytes = text.len(), "Failed to parse frame");
                            observer.on_error(ChannelError::MalformedFrame {
                                bytes: text.len(),
                                reason: e.to_string(),
                            });
                        }
                    }
                }
                Some(Ok(InboundFrame::Close(info))) => {
                    break info.unwrap_or_else(|| CloseInfo::new(CLOSE_NO_STATUS, ""));
                }
                Some(Err(e)) => {
                    warn!(bot_id = %bot_id, error = %e, "Channel transport error");
                    deliver_error(&open, observer.as_mut(), ChannelError::Transport(e.to_string()));
                    break CloseInfo::abnormal(e.to_string());
                }
                None => break CloseInfo::abnormal(""),
            },
            command = commands.recv() => match command {
                Some(Command::Send(text)) => {
                    if let Err(e) = transport.send_text(text).await {
                        warn!(bot_id = %bot_id, error = %e, "Failed to send frame");
                        deliver_error(&open, observer.as_mut(), ChannelError::Transport(e.to_string()));
                    }
                }
                // A dropped handle closes the session like an explicit close.
                Some(Command::Close) | None => {
                    if let Err(e) = transport.close().await {
                        debug!(bot_id = %bot_id, error = %e, "Close handshake failed");
                    }
                    break CloseInfo::client();
                }
            },
        }
    };

    open.store(false, Ordering::Release);
    let dropped = discard_pending(&mut commands);
    if dropped > 0 {
        debug!(bot_id = %bot_id, dropped, "Discarding unsent frames");
    }
    info!(bot_id = %bot_id, code = close.code, reason = %close.reason, "Channel closed");
    observer.on_close(close);
}

fn deliver_error(open: &AtomicBool, observer: &mut dyn ChannelObserver, error: ChannelError) {
    if open.load(Ordering::Acquire) {
        observer.on_error(error);
    }
}

/// Stop accepting commands and count the frames that never went out.
fn discard_pending(commands: &mut mpsc::UnboundedReceiver<Command>) -> usize {
    commands.close();
    let mut dropped = 0;
    while let Ok(command) = commands.try_recv() {
        if matches!(command, Command::Send(_)) {
            dropped += 1;
        }
    }
    dropped
}

/// Handle to an open channel session.
///
/// Dropping the handle closes the session.
#[derive(Debug)]
pub struct ChannelHandle {
    bot_id: BotId,
    commands: mpsc::UnboundedSender<Command>,
    open: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    #[must_use]
    pub fn bot_id(&self) -> &BotId {
        &self.bot_id
    }

    /// Whether the session still accepts outbound frames.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire) && !self.commands.is_closed()
    }

    /// Relay a terminal command. Fire-and-forget: responses arrive as
    /// pushed frames.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotOpen`] when the session has closed.
    pub fn send(&self, command: &TerminalCommand) -> Result<()> {
        self.send_json(&command.to_channel_frame())
    }

    /// Send an arbitrary JSON frame.
    pub fn send_json(&self, frame: &Value) -> Result<()> {
        if !self.is_open() {
            return Err(self.not_open());
        }
        let text = serde_json::to_string(frame)?;
        self.commands
            .send(Command::Send(text))
            .map_err(|_| self.not_open())
    }

    /// Close the session and wait for it to terminate.
    ///
    /// Once this returns no further message or error callback fires;
    /// `on_close` has fired exactly once (now, or earlier if the remote
    /// closed first).
    pub async fn close(mut self) -> Result<()> {
        self.open.store(false, Ordering::Release);
        // The task may already be gone after a remote close.
        let _ = self.commands.send(Command::Close);
        self.join().await
    }

    /// Wait for the session to end without closing it.
    pub async fn closed(mut self) -> Result<()> {
        self.join().await
    }

    async fn join(&mut self) -> Result<()> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| Error::Connection(format!("channel task failed: {e}"))),
            None => Ok(()),
        }
    }

    fn not_open(&self) -> Error {
        Error::Channel(ChannelError::NotOpen {
            bot_id: self.bot_id.to_string(),
        })
    }
}

/// Observer that forwards every event into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    events: mpsc::UnboundedSender<ChannelEvent>,
}

impl ChannelEventSink {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChannelEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { events }, rx)
    }

    fn forward(&self, event: ChannelEvent) {
        // Receiver gone means nobody is listening anymore.
        let _ = self.events.send(event);
    }
}

impl ChannelObserver for ChannelEventSink {
    fn on_message(&mut self, message: Value) {
        self.forward(ChannelEvent::Message(message));
    }

    fn on_error(&mut self, error: ChannelError) {
        self.forward(ChannelEvent::Error(error));
    }

    fn on_close(&mut self, info: CloseInfo) {
        self.forward(ChannelEvent::Closed(info));
    }
}

/// Observer assembled from three closures.
pub struct CallbackObserver<M, E, C> {
    on_message: M,
    on_error: E,
    on_close: C,
}

impl<M, E, C> CallbackObserver<M, E, C>
where
    M: FnMut(Value) + Send + 'static,
    E: FnMut(ChannelError) + Send + 'static,
    C: FnMut(CloseInfo) + Send + 'static,
{
    pub fn new(on_message: M, on_error: E, on_close: C) -> Self {
        Self {
            on_message,
            on_error,
            on_close,
        }
    }
}

impl<M, E, C> ChannelObserver for CallbackObserver<M, E, C>
where
    M: FnMut(Value) + Send + 'static,
    E: FnMut(ChannelError) + Send + 'static,
    C: FnMut(CloseInfo) + Send + 'static,
{
    fn on_message(&mut self, message: Value) {
        (self.on_message)(message);
    }

    fn on_error(&mut self, error: ChannelError) {
        (self.on_error)(error);
    }

    fn on_close(&mut self, info: CloseInfo) {
        (self.on_close)(info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;
    use crate::testkit::observer::RecordingObserver;
    use crate::testkit::storage::MemoryCredentialStorage;
    use crate::testkit::transport::{ScriptedConnector, ScriptedTransport};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::watch;

    fn supervisor(token: Option<&str>, connector: ScriptedConnector) -> ChannelSupervisor {
        let storage = match token {
            Some(token) => MemoryCredentialStorage::with_token(token),
            None => MemoryCredentialStorage::new(),
        };
        let store = CredentialStore::load(storage).unwrap();
        ChannelSupervisor::new(
            Url::parse("ws://localhost:8000").unwrap(),
            store,
            Arc::new(connector),
        )
    }

    #[test]
    fn url_embeds_bot_and_token() {
        let supervisor = supervisor(Some("tok"), ScriptedConnector::default());
        let url = supervisor.channel_url(&BotId::new("bot1")).unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/api/v1/ws/bot/bot1/tok");
    }

    #[test]
    fn url_reads_credential_at_open_time() {
        let supervisor = supervisor(None, ScriptedConnector::default());
        let url = supervisor.channel_url(&BotId::new("bot1")).unwrap();
        assert_eq!(url.path(), "/api/v1/ws/bot/bot1/");

        supervisor.store.set(Credential::new("fresh"));
        let url = supervisor.channel_url(&BotId::new("bot1")).unwrap();
        assert_eq!(url.path(), "/api/v1/ws/bot/bot1/fresh");
    }

    #[tokio::test]
    async fn messages_are_delivered_in_order() {
        let transport = ScriptedTransport::new()
            .with_text(r#"{"type":"bot_connection","bot_id":"bot1"}"#)
            .with_text(r#"{"type":"bot_update","data":{"open_trades":0}}"#)
            .with_close(1000, "done");
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let observer = RecordingObserver::new();
        let log = observer.log();

        let handle = supervisor.open(BotId::new("bot1"), observer).await.unwrap();
        handle.closed().await.unwrap();

        let log = log.lock();
        assert_eq!(log.messages.len(), 2);
        assert_eq!(log.messages[0]["type"], "bot_connection");
        assert_eq!(log.messages[1]["type"], "bot_update");
        assert_eq!(log.closes, vec![CloseInfo::new(1000, "done")]);
    }

    #[tokio::test]
    async fn malformed_frame_reports_error_and_keeps_session_open() {
        let transport = ScriptedTransport::new()
            .with_text("not json")
            .with_text(r#"{"type":"logs_update"}"#)
            .hold_open();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let (handle, mut events) = supervisor.open_stream(BotId::new("bot1")).await.unwrap();

        assert!(matches!(
            events.recv().await,
            Some(ChannelEvent::Error(ChannelError::MalformedFrame { bytes: 8, .. }))
        ));
        assert!(matches!(events.recv().await, Some(ChannelEvent::Message(_))));
        assert!(handle.is_open());

        handle.close().await.unwrap();
        assert!(matches!(
            events.recv().await,
            Some(ChannelEvent::Closed(info)) if info == CloseInfo::client()
        ));
        assert!(events.recv().await.is_none());
    }

    #[tokio::test]
    async fn malformed_frame_alone_never_closes() {
        let transport = ScriptedTransport::new().with_text("{broken").hold_open();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let observer = RecordingObserver::new();
        let log = observer.log();

        let handle = supervisor.open(BotId::new("bot1"), observer).await.unwrap();
        log.wait_for_errors(1).await;

        assert!(log.lock().closes.is_empty());
        handle.close().await.unwrap();
        assert_eq!(log.lock().closes.len(), 1);
    }

    #[tokio::test]
    async fn remote_close_fires_once_without_prior_error() {
        let transport = ScriptedTransport::new().with_close(4001, "token rejected");
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let observer = RecordingObserver::new();
        let log = observer.log();

        let handle = supervisor.open(BotId::new("bot1"), observer).await.unwrap();
        handle.closed().await.unwrap();

        let log = log.lock();
        assert!(log.errors.is_empty());
        assert_eq!(log.closes, vec![CloseInfo::new(4001, "token rejected")]);
    }

    #[tokio::test]
    async fn close_frame_without_payload_reports_no_status() {
        let transport = ScriptedTransport::new().with_bare_close();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let (handle, mut events) = supervisor.open_stream(BotId::new("bot1")).await.unwrap();
        handle.closed().await.unwrap();

        assert!(matches!(
            events.recv().await,
            Some(ChannelEvent::Closed(info)) if info.code == CLOSE_NO_STATUS
        ));
    }

    #[tokio::test]
    async fn stream_end_is_abnormal_close() {
        let transport = ScriptedTransport::new();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let (handle, mut events) = supervisor.open_stream(BotId::new("bot1")).await.unwrap();
        handle.closed().await.unwrap();

        assert!(matches!(
            events.recv().await,
            Some(ChannelEvent::Closed(info)) if info.code == crate::domain::CLOSE_ABNORMAL
        ));
    }

    #[tokio::test]
    async fn transport_error_reports_error_then_close() {
        let transport = ScriptedTransport::new().with_error("connection reset");
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let observer = RecordingObserver::new();
        let log = observer.log();

        let handle = supervisor.open(BotId::new("bot1"), observer).await.unwrap();
        handle.closed().await.unwrap();

        let log = log.lock();
        assert_eq!(log.errors.len(), 1);
        assert_eq!(log.closes.len(), 1);
        assert_eq!(log.closes[0].code, crate::domain::CLOSE_ABNORMAL);
        assert!(log.closes[0].reason.contains("connection reset"));
    }

    #[tokio::test]
    async fn no_messages_after_close_returns() {
        let transport = ScriptedTransport::new()
            .with_text(r#"{"n":1}"#)
            .with_text(r#"{"n":2}"#)
            .with_text(r#"{"n":3}"#)
            .with_text(r#"{"n":4}"#)
            .hold_open();
        let sent = transport.sent_handle();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let observer = RecordingObserver::new();
        let log = observer.log();

        let handle = supervisor.open(BotId::new("bot1"), observer).await.unwrap();
        log.wait_for_messages(1).await;
        handle.close().await.unwrap();
        let delivered = log.lock().messages.len();
        assert!((1..=4).contains(&delivered));

        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(log.lock().messages.len(), delivered);
        assert_eq!(log.lock().messages[0]["n"], 1);
        assert_eq!(log.lock().closes, vec![CloseInfo::client()]);
        assert!(sent.lock().closed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn message_callback_can_reply_through_the_handle() {
        let (release, held) = watch::channel(false);
        let transport = ScriptedTransport::new()
            .with_text(r#"{"type":"bot_update"}"#)
            .hold_open()
            .held_until(held);
        let sent = transport.sent_handle();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let slot: Arc<Mutex<Option<ChannelHandle>>> = Arc::default();
        let replies = Arc::clone(&slot);

        let handle = supervisor
            .open(
                BotId::new("bot1"),
                CallbackObserver::new(
                    move |_| {
                        if let Some(handle) = replies.lock().as_ref() {
                            assert!(handle.is_open());
                            handle.send(&TerminalCommand::new("ack")).unwrap();
                        }
                    },
                    |_| {},
                    |_| {},
                ),
            )
            .await
            .unwrap();
        *slot.lock() = Some(handle);
        release.send(true).unwrap();

        let relayed = async {
            while sent.lock().frames.is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), relayed)
            .await
            .expect("reply from on_message never reached the transport");

        let handle = slot.lock().take().unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle.close())
            .await
            .expect("close stalled")
            .unwrap();

        let frame: Value = serde_json::from_str(&sent.lock().frames[0]).unwrap();
        assert_eq!(frame["command"], "ack");
    }

    #[test]
    fn unsent_frames_are_counted_when_the_session_ends() {
        let (commands, mut rx) = mpsc::unbounded_channel();
        commands.send(Command::Send("a".into())).unwrap();
        commands.send(Command::Send("b".into())).unwrap();
        commands.send(Command::Close).unwrap();

        assert_eq!(discard_pending(&mut rx), 2);
        assert!(commands.is_closed());
        assert!(commands.send(Command::Send("c".into())).is_err());
    }

    #[tokio::test]
    async fn send_relays_terminal_command() {
        let transport = ScriptedTransport::new().hold_open();
        let sent = transport.sent_handle();
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let (handle, _events) = supervisor.open_stream(BotId::new("bot1")).await.unwrap();

        handle
            .send(&TerminalCommand::new("forcesell").with_args(["all"]))
            .unwrap();
        handle.close().await.unwrap();

        let sent = sent.lock();
        assert_eq!(sent.frames.len(), 1);
        let frame: Value = serde_json::from_str(&sent.frames[0]).unwrap();
        assert_eq!(
            frame,
            json!({"type": "terminal_command", "command": "forcesell", "args": ["all"]})
        );
    }

    #[tokio::test]
    async fn send_after_remote_close_is_an_error() {
        let transport = ScriptedTransport::new().with_close(1000, "bye");
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let (handle, mut events) = supervisor.open_stream(BotId::new("bot1")).await.unwrap();

        assert!(matches!(events.recv().await, Some(ChannelEvent::Closed(_))));
        // Give the task a moment to drop its receiver.
        tokio::task::yield_now().await;

        let err = handle.send(&TerminalCommand::new("status")).unwrap_err();
        assert!(matches!(
            err,
            Error::Channel(ChannelError::NotOpen { ref bot_id }) if bot_id == "bot1"
        ));
    }

    #[tokio::test]
    async fn connect_failure_fires_no_callbacks() {
        let supervisor = supervisor(Some("tok"), ScriptedConnector::refusing());
        let observer = RecordingObserver::new();
        let log = observer.log();

        let result = supervisor.open(BotId::new("bot1"), observer).await;

        assert!(result.is_err());
        let log = log.lock();
        assert!(log.messages.is_empty() && log.errors.is_empty() && log.closes.is_empty());
    }

    #[tokio::test]
    async fn connector_receives_channel_url() {
        let connector = ScriptedConnector::with(ScriptedTransport::new());
        let urls = connector.urls();
        let supervisor = supervisor(Some("tok"), connector);

        let handle = supervisor.open(BotId::new("bot1"), RecordingObserver::new()).await.unwrap();
        handle.closed().await.unwrap();

        assert_eq!(
            urls.lock().as_slice(),
            ["ws://localhost:8000/api/v1/ws/bot/bot1/tok".to_string()]
        );
    }

    #[tokio::test]
    async fn callback_observer_invokes_closures() {
        let transport = ScriptedTransport::new()
            .with_text(r#"{"ok":true}"#)
            .with_text("oops")
            .with_close(1000, "");
        let supervisor = supervisor(Some("tok"), ScriptedConnector::with(transport));
        let counts = Arc::new(Mutex::new((0, 0, 0)));
        let (m, e, c) = (counts.clone(), counts.clone(), counts.clone());

        let handle = supervisor
            .open(
                BotId::new("bot1"),
                CallbackObserver::new(
                    move |_| m.lock().0 += 1,
                    move |_| e.lock().1 += 1,
                    move |_| c.lock().2 += 1,
                ),
            )
            .await
            .unwrap();
        handle.closed().await.unwrap();

        assert_eq!(*counts.lock(), (1, 1, 1));
    }
}
