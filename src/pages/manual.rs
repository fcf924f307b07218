use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::Mutex;

use super::{toggle_label, NO_STATE};
use crate::notifier::Notifier;
use crate::poller::Poller;
use crate::{Client, Result};

/// Outputs wired on the device.
pub const OUTPUTS: [u8; 2] = [1, 2];

pub const STATE_PERIOD: Duration = Duration::from_secs(1);

/// Time the device needs before a read reflects a write.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct OutputView {
    /// State as displayed; `None` after a failed read.
    pub state: Option<bool>,
    /// Last state the device confirmed. A failed read leaves it alone, so a
    /// toggle after a transient failure still flips the real state.
    pub last_known: Option<bool>,
    pub state_label: &'static str,
    pub button_label: &'static str,
    pub busy: bool,
    pub message: Notifier,
}

impl Default for OutputView {
    fn default() -> Self {
        OutputView {
            state: None,
            last_known: None,
            state_label: NO_STATE,
            button_label: NO_STATE,
            busy: false,
            message: Notifier::default(),
        }
    }
}

impl OutputView {
    pub fn render_state(&mut self, state: Option<bool>) {
        self.state = state;
        match state {
            Some(state) => {
                self.last_known = Some(state);
                self.state_label = if state { "Active" } else { "Inactive" };
                self.button_label = toggle_label(state);
            }
            None => {
                self.state_label = NO_STATE;
                self.button_label = NO_STATE;
                self.message.error("Échec de l'actualisation de l'état.");
            }
        }
    }
}

/// One output: its state, the toggle button and its message line.
pub struct OutputPanel {
    output: u8,
    client: Client,
    view: Arc<Mutex<OutputView>>,
    poller: Poller,
}

impl OutputPanel {
    pub async fn open(client: Client, output: u8) -> Self {
        let mut panel = OutputPanel {
            output,
            client,
            view: Arc::new(Mutex::new(OutputView::default())),
            poller: Poller::new(format!("output-{}", output)),
        };
        let _ = panel.refresh().await;
        panel.start_polling();
        panel
    }

    pub fn output(&self) -> u8 {
        self.output
    }

    pub async fn refresh(&self) -> Result<bool> {
        refresh_state(&self.client, self.output, &self.view).await
    }

    /// Flips the output. Polling pauses for the whole round trip so that a
    /// stale read cannot overwrite the result of the write.
    pub async fn toggle(&mut self) -> Result<bool> {
        let wanted = {
            let mut view = self.view.lock().await;
            view.busy = true;
            !view.last_known.unwrap_or(false)
        };
        self.poller.stop();

        let result = match self.client.set_output_state(self.output, wanted).await {
            Ok(echoed) => {
                self.view.lock().await.last_known = Some(echoed);
                tokio::time::sleep(SETTLE_DELAY).await;
                let state = self.refresh().await;
                self.view.lock().await.message.success(format!(
                    "État de la sortie {} mis à jour avec succès !",
                    self.output
                ));
                state
            }
            Err(e) => {
                self.view
                    .lock()
                    .await
                    .message
                    .error(format!("Échec de la mise à jour de la sortie {}.", self.output));
                Err(e)
            }
        };

        self.view.lock().await.busy = false;
        self.start_polling();
        result
    }

    pub async fn snapshot(&self) -> OutputView {
        self.view.lock().await.clone()
    }

    /// Shared view, for a renderer running beside the panel. It sees `busy`
    /// while a toggle is in flight.
    pub fn view_handle(&self) -> Arc<Mutex<OutputView>> {
        self.view.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn close(&mut self) {
        self.poller.stop();
    }

    fn start_polling(&mut self) {
        let client = self.client.clone();
        let view = self.view.clone();
        let output = self.output;
        self.poller.start(STATE_PERIOD, move || {
            let client = client.clone();
            let view = view.clone();
            async move {
                let _ = refresh_state(&client, output, &view).await;
            }
        });
    }
}

async fn refresh_state(client: &Client, output: u8, view: &Mutex<OutputView>) -> Result<bool> {
    let state = client.output_state(output).await;
    if let Err(e) = &state {
        warn!("could not read output {}: {}", output, e);
    }
    view.lock()
        .await
        .render_state(state.as_ref().ok().copied());
    state
}

/// Every output of the device, each polled on its own.
pub struct ManualPage {
    panels: BTreeMap<u8, OutputPanel>,
}

impl ManualPage {
    pub async fn open(client: Client) -> Self {
        Self::open_outputs(client, &OUTPUTS).await
    }

    pub async fn open_outputs(client: Client, outputs: &[u8]) -> Self {
        let mut panels = BTreeMap::new();
        for &output in outputs {
            panels.insert(output, OutputPanel::open(client.clone(), output).await);
        }
        ManualPage { panels }
    }

    pub fn panel(&mut self, output: u8) -> Option<&mut OutputPanel> {
        self.panels.get_mut(&output)
    }

    pub fn panels(&self) -> impl Iterator<Item = &OutputPanel> {
        self.panels.values()
    }

    pub fn close(&mut self) {
        for panel in self.panels.values_mut() {
            panel.close();
        }
    }
}
