use log::warn;

use super::{capitalize, toggle_label, NO_STATE};
use crate::notifier::Notifier;
use crate::{CalendarConfigs, Client, Result, ScheduleEntry};

pub const EMPTY_TEXT: &str = "Aucune configuration de calendrier n'est active pour le moment.";
pub const FAILED_TEXT: &str = "Échec du chargement des configurations.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCard {
    pub title: String,
    pub lines: Vec<String>,
}

/// The configured tasks of every output, as the listing shows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Failed,
    Empty,
    Outputs(Vec<OutputCard>),
}

impl Listing {
    /// Drops unset slots. When at least one task is configured every output
    /// gets a card, possibly with no lines; otherwise the listing is empty.
    pub fn from_configs(configs: &CalendarConfigs) -> Self {
        let cards: Vec<OutputCard> = configs
            .iter()
            .map(|(output, tasks)| OutputCard {
                title: capitalize(output),
                lines: tasks
                    .iter()
                    .filter(|(_, entry)| entry.is_configured())
                    .map(|(task, entry)| {
                        format!(
                            "{}: Allumage à {}, Extinction à {}",
                            capitalize(task),
                            entry.on.hhmm(),
                            entry.off.hhmm()
                        )
                    })
                    .collect(),
            })
            .collect();

        if cards.iter().all(|card| card.lines.is_empty()) {
            Listing::Empty
        } else {
            Listing::Outputs(cards)
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Listing::Failed => Some(FAILED_TEXT),
            Listing::Empty => Some(EMPTY_TEXT),
            Listing::Outputs(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    pub selected_output: u8,
    pub save_checked: bool,
    pub save_label: &'static str,
    pub listing: Listing,
    pub calendar_message: Notifier,
    pub save_message: Notifier,
}

impl CalendarView {
    fn new(output: u8) -> Self {
        CalendarView {
            selected_output: output,
            save_checked: false,
            save_label: NO_STATE,
            listing: Listing::Empty,
            calendar_message: Notifier::default(),
            save_message: Notifier::default(),
        }
    }

    fn render_save(&mut self, save: Option<bool>) {
        self.save_checked = save.unwrap_or(false);
        self.save_label = save.map_or(NO_STATE, toggle_label);
    }
}

/// Scheduled tasks and the per-output save flag. Nothing here is polled;
/// every read follows a user action.
pub struct CalendarPage {
    client: Client,
    view: CalendarView,
}

impl CalendarPage {
    pub async fn open(client: Client, output: u8) -> Self {
        let mut page = CalendarPage {
            client,
            view: CalendarView::new(output),
        };
        let _ = page.refresh_save_state().await;
        let _ = page.load_configs().await;
        page
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub async fn select_output(&mut self, output: u8) -> Result<bool> {
        self.view.selected_output = output;
        self.refresh_save_state().await
    }

    pub async fn refresh_save_state(&mut self) -> Result<bool> {
        let output = self.view.selected_output;
        let save = self.client.save_state(output).await;
        if let Err(e) = &save {
            warn!("could not read save-state of output {}: {}", output, e);
        }
        self.view.render_save(save.as_ref().ok().copied());
        save
    }

    pub async fn load_configs(&mut self) -> Result<()> {
        match self.client.calendar_configs().await {
            Ok(configs) => {
                self.view.listing = Listing::from_configs(&configs);
                Ok(())
            }
            Err(e) => {
                warn!("could not read calendar configs: {}", e);
                self.view.listing = Listing::Failed;
                Err(e)
            }
        }
    }

    /// Reloads the listing on request.
    pub async fn refresh_configs(&mut self) -> Result<()> {
        let result = self.load_configs().await;
        self.view
            .calendar_message
            .success("Configurations actualisées.");
        result
    }

    /// Sends one task of the selected output. Times are checked before
    /// anything goes out.
    pub async fn submit_task(&mut self, task: u8, on: &str, off: &str) -> Result<()> {
        let entry = match ScheduleEntry::from_inputs(on, off) {
            Ok(entry) => entry,
            Err(e) => {
                self.view
                    .calendar_message
                    .error("Données de temps invalides.");
                return Err(e.into());
            }
        };

        let sent = self
            .client
            .send_calendar_task(self.view.selected_output, task, &entry)
            .await;

        match sent {
            Ok(_) => {
                self.view
                    .calendar_message
                    .success("Réglage de la tâche envoyé avec succès !");
                let _ = self.load_configs().await;
                Ok(())
            }
            Err(e) => {
                self.view
                    .calendar_message
                    .error("Échec de l'envoi du réglage de la tâche.");
                Err(e)
            }
        }
    }

    pub async fn submit_save(&mut self, save: bool) -> Result<bool> {
        let sent = self
            .client
            .set_save_state(self.view.selected_output, save)
            .await;

        match sent {
            Ok(echoed) => {
                self.view.render_save(Some(echoed));
                self.view
                    .save_message
                    .success("État de sauvegarde mis à jour avec succès !");
                Ok(echoed)
            }
            Err(e) => {
                self.view
                    .save_message
                    .error("Échec de la mise à jour de l'état de sauvegarde.");
                Err(e)
            }
        }
    }
}
