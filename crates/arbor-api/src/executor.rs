use std::sync::mpsc;
use std::thread;

use crate::client::ApiClient;
use crate::model::TreeRoot;

/// Command sent from the UI thread to the executor thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    FetchTree {
        tree_name: String,
    },
    CreateNode {
        tree_name: String,
        parent_id: i64,
        name: String,
    },
    RenameNode {
        tree_name: String,
        node_id: i64,
        new_name: String,
    },
    DeleteNode {
        tree_name: String,
        node_id: i64,
    },
}

/// Result received from the executor thread. Failures carry the
/// user-facing detail; the three categories stay distinct so the UI
/// can show distinct banners.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    TreeFetched(TreeRoot),
    FetchFailed(String),
    NodeSaved,
    SaveFailed(String),
    NodeDeleted,
    DeleteFailed(String),
}

/// Sender/Receiver pair for communicating with the executor.
pub struct ApiExecutor {
    sender: mpsc::Sender<ApiCommand>,
    receiver: mpsc::Receiver<ApiEvent>,
}

impl ApiExecutor {
    /// Spawn the background executor thread with a tokio runtime.
    /// Commands are processed one at a time in arrival order; nothing
    /// is deduplicated or cancelled, so the last response wins.
    pub fn spawn(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ApiEvent>();

        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime");

            rt.block_on(async move {
                let client = ApiClient::new(base_url);
                while let Ok(cmd) = cmd_rx.recv() {
                    let event = execute(&client, cmd).await;
                    if event_tx.send(event).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            });
        });

        Self {
            sender: cmd_tx,
            receiver: event_rx,
        }
    }

    /// Build an executor with no backing thread, handing back the raw
    /// channel ends. Lets tests observe commands and inject events.
    pub fn detached() -> (Self, mpsc::Receiver<ApiCommand>, mpsc::Sender<ApiEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ApiEvent>();
        (
            Self {
                sender: cmd_tx,
                receiver: event_rx,
            },
            cmd_rx,
            event_tx,
        )
    }

    /// Send a command (non-blocking).
    pub fn send(&self, cmd: ApiCommand) -> Result<(), mpsc::SendError<ApiCommand>> {
        self.sender.send(cmd)
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Run one command against the API, mapping the outcome to its event.
async fn execute(client: &ApiClient, cmd: ApiCommand) -> ApiEvent {
    match cmd {
        ApiCommand::FetchTree { tree_name } => match client.get_tree(&tree_name).await {
            Ok(root) => ApiEvent::TreeFetched(root),
            Err(e) => ApiEvent::FetchFailed(e.message),
        },
        ApiCommand::CreateNode {
            tree_name,
            parent_id,
            name,
        } => match client.create_node(&tree_name, parent_id, &name).await {
            Ok(()) => ApiEvent::NodeSaved,
            Err(e) => ApiEvent::SaveFailed(e.message),
        },
        ApiCommand::RenameNode {
            tree_name,
            node_id,
            new_name,
        } => match client.rename_node(&tree_name, node_id, &new_name).await {
            Ok(()) => ApiEvent::NodeSaved,
            Err(e) => ApiEvent::SaveFailed(e.message),
        },
        ApiCommand::DeleteNode { tree_name, node_id } => {
            match client.delete_node(&tree_name, node_id).await {
                Ok(()) => ApiEvent::NodeDeleted,
                Err(e) => ApiEvent::DeleteFailed(e.message),
            }
        }
    }
}
