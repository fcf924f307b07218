use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::Mutex;

use super::{two_digits, NO_VALUE};
use crate::poller::Poller;
use crate::{CalendarDate, Client, ClockTime, Result};

pub const CLOCK_PERIOD: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Connected,
    Disconnected,
    Unavailable,
}

impl NetworkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NetworkStatus::Connected => "Connecté",
            NetworkStatus::Disconnected => "Déconnecté",
            NetworkStatus::Unavailable => "Indisponible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub network: NetworkStatus,
}

impl Default for HomeView {
    fn default() -> Self {
        HomeView {
            hour: NO_VALUE.to_owned(),
            minute: NO_VALUE.to_owned(),
            second: NO_VALUE.to_owned(),
            year: NO_VALUE.to_owned(),
            month: NO_VALUE.to_owned(),
            day: NO_VALUE.to_owned(),
            network: NetworkStatus::Unavailable,
        }
    }
}

impl HomeView {
    pub fn render_time(&mut self, time: Option<ClockTime>) {
        match time {
            Some(time) => {
                self.hour = two_digits(time.hour);
                self.minute = two_digits(time.minute);
                self.second = two_digits(time.second);
            }
            None => {
                self.hour = NO_VALUE.to_owned();
                self.minute = NO_VALUE.to_owned();
                self.second = NO_VALUE.to_owned();
            }
        }
    }

    pub fn render_date(&mut self, date: Option<CalendarDate>) {
        match date {
            Some(date) => {
                self.year = date.year.to_string();
                self.month = two_digits(date.month);
                self.day = two_digits(date.day);
            }
            None => {
                self.year = NO_VALUE.to_owned();
                self.month = NO_VALUE.to_owned();
                self.day = NO_VALUE.to_owned();
            }
        }
    }

    pub fn render_network(&mut self, connected: Option<bool>) {
        self.network = match connected {
            Some(true) => NetworkStatus::Connected,
            Some(false) => NetworkStatus::Disconnected,
            None => NetworkStatus::Unavailable,
        };
    }
}

/// Clock, date and network status of the device.
pub struct HomePage {
    client: Client,
    view: Arc<Mutex<HomeView>>,
    clock: Poller,
}

impl HomePage {
    /// Renders date, network status and time, then keeps the time fresh.
    pub async fn open(client: Client) -> Self {
        let mut page = HomePage {
            client,
            view: Arc::new(Mutex::new(HomeView::default())),
            clock: Poller::new("clock"),
        };
        page.refresh_date_and_status().await;
        page.schedule_clock().await;
        page
    }

    pub async fn refresh_date_and_status(&self) {
        let date = self.client.date().await;
        let connected = self.client.wifi_status().await;

        let mut view = self.view.lock().await;
        view.render_date(date.ok());
        view.render_network(connected.ok());
    }

    pub async fn refresh_time(&self) -> Result<ClockTime> {
        refresh_time(&self.client, &self.view).await
    }

    /// Reads the time now, then every [`CLOCK_PERIOD`].
    pub async fn schedule_clock(&mut self) {
        let _ = self.refresh_time().await;

        let client = self.client.clone();
        let view = self.view.clone();
        self.clock.start(CLOCK_PERIOD, move || {
            let client = client.clone();
            let view = view.clone();
            async move {
                let _ = refresh_time(&client, &view).await;
            }
        });
    }

    pub async fn snapshot(&self) -> HomeView {
        self.view.lock().await.clone()
    }

    pub fn close(&mut self) {
        self.clock.stop();
    }
}

async fn refresh_time(client: &Client, view: &Mutex<HomeView>) -> Result<ClockTime> {
    let time = client.time().await;
    if let Err(e) = &time {
        warn!("could not read device time: {}", e);
    }
    view.lock().await.render_time(time.as_ref().ok().copied());
    time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_padded_values() {
        let mut view = HomeView::default();
        view.render_time(Some(ClockTime::new(9, 5, 0).unwrap()));
        view.render_date(Some(CalendarDate {
            year: 2024,
            month: 3,
            day: 14,
        }));
        view.render_network(Some(true));
        assert_eq!(
            (view.hour.as_str(), view.minute.as_str(), view.second.as_str()),
            ("09", "05", "00")
        );
        assert_eq!(
            (view.year.as_str(), view.month.as_str(), view.day.as_str()),
            ("2024", "03", "14")
        );
        assert_eq!(view.network.label(), "Connecté");
    }

    #[test]
    fn failure_replaces_previous_values() {
        let mut view = HomeView::default();
        view.render_time(Some(ClockTime::new(12, 30, 45).unwrap()));
        view.render_time(None);
        assert_eq!(view.hour, "--");
        assert_eq!(view.minute, "--");
        assert_eq!(view.second, "--");

        view.render_network(Some(false));
        assert_eq!(view.network.label(), "Déconnecté");
        view.render_network(None);
        assert_eq!(view.network.label(), "Indisponible");
    }
}
