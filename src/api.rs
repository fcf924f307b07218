use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::commands;
use crate::error::{Error, Result};
use crate::model::{
    CalendarConfigs, CalendarDate, ClockTime, OutputState, SaveState, ScheduleEntry,
    WifiCredentials, WifiStatus,
};
use crate::Client;

impl Client {
    pub async fn time(&self) -> Result<ClockTime> {
        self.read(commands::GET_TIME).await
    }

    pub async fn date(&self) -> Result<CalendarDate> {
        self.read(commands::GET_DATE).await
    }

    pub async fn wifi_status(&self) -> Result<bool> {
        let status: WifiStatus = self.read(commands::GET_WIFI_STATUS).await?;
        Ok(status.is_connected)
    }

    pub async fn output_state(&self, output: u8) -> Result<bool> {
        let state: OutputState = self.read(&commands::output_state(output)).await?;
        Ok(state.state)
    }

    /// Returns the state the device reports back after the write.
    pub async fn set_output_state(&self, output: u8, state: bool) -> Result<bool> {
        let path = commands::set_output_state(output);
        let resp = self.request(&path, Some(json!({ "state": state }))).await?;
        let echoed: OutputState = data(&path, resp)?;
        info!("output {} set to {}", output, echoed.state);
        Ok(echoed.state)
    }

    pub async fn save_state(&self, output: u8) -> Result<bool> {
        let save: SaveState = self.read(&commands::save_state(output)).await?;
        Ok(save.save)
    }

    pub async fn set_save_state(&self, output: u8, save: bool) -> Result<bool> {
        let path = commands::set_save_state(output);
        let resp = self.request(&path, Some(json!({ "save": save }))).await?;
        let echoed: SaveState = data(&path, resp)?;
        info!("output {} save-state set to {}", output, echoed.save);
        Ok(echoed.save)
    }

    pub async fn calendar_configs(&self) -> Result<CalendarConfigs> {
        self.read(commands::GET_CALENDAR_CONFIGS).await
    }

    pub async fn send_calendar_task(
        &self,
        output: u8,
        task: u8,
        entry: &ScheduleEntry,
    ) -> Result<Value> {
        entry.validate()?;
        let resp = self
            .write(&commands::calendar_task(output, task), entry)
            .await?;
        info!(
            "output {} task {} set to {}-{}",
            output,
            task,
            entry.on.hhmm(),
            entry.off.hhmm()
        );
        Ok(resp)
    }

    pub async fn set_wifi(&self, credentials: &WifiCredentials) -> Result<Value> {
        let resp = self.write(commands::SET_WIFI, credentials).await?;
        info!("wifi credentials sent for {:?}", credentials.ssid());
        Ok(resp)
    }

    pub async fn set_time(&self, time: ClockTime) -> Result<Value> {
        time.validate()?;
        let resp = self.write(commands::SET_TIME, &time).await?;
        info!("device time set to {}", time);
        Ok(resp)
    }

    async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.request(path, None).await?;
        data(path, resp)
    }

    async fn write<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<Value> {
        let body = serde_json::to_value(body).map_err(|e| Error::malformed(path, e))?;
        self.request(path, Some(body)).await
    }
}

/// Pulls the typed `data` member out of a response envelope. A 2xx answer
/// missing the expected keys is treated the same as a failed request.
fn data<T: DeserializeOwned>(path: &str, mut resp: Value) -> Result<T> {
    let data = match resp.get_mut("data") {
        Some(data) => data.take(),
        None => {
            warn!("{}: response has no data: {}", path, resp);
            return Err(Error::malformed(path, "missing data"));
        }
    };
    serde_json::from_value(data).map_err(|e| {
        warn!("{}: unexpected data: {}", path, e);
        Error::malformed(path, e)
    })
}
