use crate::notifier::Notifier;
use crate::{Client, ClockTime, Invalid, Result, WifiCredentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Wifi,
    Time,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsView {
    /// Form currently open; none on load.
    pub open: Option<Section>,
    pub wifi_message: Notifier,
    pub time_message: Notifier,
}

/// Write-only device settings: Wi-Fi credentials and the clock.
pub struct SettingsPage {
    client: Client,
    view: SettingsView,
}

impl SettingsPage {
    pub fn open(client: Client) -> Self {
        SettingsPage {
            client,
            view: SettingsView::default(),
        }
    }

    pub fn view(&self) -> &SettingsView {
        &self.view
    }

    /// Opens one form and closes the other, hiding stale messages.
    pub fn show(&mut self, section: Section) {
        self.view.wifi_message.clear();
        self.view.time_message.clear();
        self.view.open = Some(section);
    }

    pub async fn submit_wifi(&mut self, ssid: &str, password: &str) -> Result<()> {
        let credentials = match WifiCredentials::new(ssid, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.view.wifi_message.error(match e {
                    Invalid::PasswordTooShort => {
                        "Le mot de passe doit avoir au moins 8 caractères."
                    }
                    _ => "La configuration est vide !",
                });
                return Err(e.into());
            }
        };

        let sent = self.client.set_wifi(&credentials).await;

        match sent {
            Ok(_) => {
                self.view
                    .wifi_message
                    .success("Configuration Wi-Fi mise à jour avec succès !");
                Ok(())
            }
            Err(e) => {
                self.view
                    .wifi_message
                    .error("Échec de l'envoi de la configuration Wi-Fi.");
                Err(e)
            }
        }
    }

    pub async fn submit_time(&mut self, input: &str) -> Result<()> {
        let time = match ClockTime::parse_hhmm(input) {
            Ok(time) => time,
            Err(e) => {
                self.view.time_message.error("Données de temps invalides.");
                return Err(e.into());
            }
        };

        let sent = self.client.set_time(time).await;

        match sent {
            Ok(_) => {
                self.view.time_message.success("Heure réglée avec succès !");
                Ok(())
            }
            Err(e) => {
                self.view
                    .time_message
                    .error("Échec de l'envoi de la configuration de l'heure.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn switching_sections_hides_messages() {
        let mut page = SettingsPage::open(Client::new("http://127.0.0.1:9").unwrap());
        page.show(Section::Wifi);
        page.view.wifi_message.error("old");
        page.show(Section::Time);
        assert_eq!(page.view().open, Some(Section::Time));
        assert!(page.view().wifi_message.current().is_none());
    }
}
