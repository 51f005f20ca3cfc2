//! Bootstrap worker: owns the store, the orchestrator, and the HTTP client
//! on a tokio runtime, publishing state snapshots to the UI thread.

use bootstrap::Orchestrator;
use client::ApiClient;
use crossbeam_channel::Sender;
use store::{CommandSink, Store, StoreState};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What the UI renders from: the store state plus the orchestrator's local
/// error flag.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub state: StoreState,
    pub error_loading: bool,
}

/// Run the bootstrap sequence to completion, publishing a snapshot after
/// every state change. `notify` wakes the UI thread.
pub fn run(
    client: ApiClient,
    initial: StoreState,
    snapshot_tx: Sender<ViewSnapshot>,
    notify: impl Fn() + Send + 'static,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let final_snapshot = runtime.block_on(bootstrap_loop(client, initial, |snapshot| {
        if snapshot_tx.send(snapshot).is_err() {
            warn!("ui snapshot channel closed");
        }
        notify();
    }));

    info!(
        hydrated = final_snapshot.state.app_lifecycle == Some(shared::domain::AppLifecycle::Hydrated),
        error_loading = final_snapshot.error_loading,
        "bootstrap finished"
    );
    Ok(())
}

/// Core loop: reconcile to a fixpoint, publish, then wait for the next
/// completed fetch. Ends once no fetches are in flight and the state has
/// settled, which covers the hydrated, fetch-error, and hydration-error
/// terminals alike.
pub async fn bootstrap_loop(
    client: ApiClient,
    initial: StoreState,
    mut on_snapshot: impl FnMut(ViewSnapshot),
) -> ViewSnapshot {
    let mut store = Store::new(initial);
    let mut orchestrator = Orchestrator::new();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let mut in_flight: usize = 0;

    loop {
        // Reconcile until a pass leaves the state untouched; each dispatched
        // fetch runs concurrently and reports back as an action.
        loop {
            let snapshot = store.state.clone();
            orchestrator.reconcile(&snapshot, &mut store);
            for fetch in store.drain_fetches() {
                debug!(?fetch, "starting resource fetch");
                let client = client.clone();
                let action_tx = action_tx.clone();
                in_flight += 1;
                tokio::spawn(async move {
                    let _ = action_tx.send(client.execute(fetch).await);
                });
            }
            if store.state == snapshot {
                break;
            }
        }

        on_snapshot(ViewSnapshot {
            state: store.state.clone(),
            error_loading: orchestrator.error_loading(),
        });

        if in_flight == 0 {
            return ViewSnapshot {
                state: store.state,
                error_loading: orchestrator.error_loading(),
            };
        }

        match action_rx.recv().await {
            Some(action) => {
                in_flight -= 1;
                if let Err(err) = store.dispatch(action) {
                    warn!(%err, "fetch result rejected by store");
                }
            }
            None => {
                return ViewSnapshot {
                    state: store.state,
                    error_loading: orchestrator.error_loading(),
                };
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
