//! Paths served by the device controller.
//!
//! Output and task ids are fixed by the firmware; callers pass them in.

pub const GET_TIME: &str = "/getTime";
pub const GET_DATE: &str = "/getDate";
pub const GET_WIFI_STATUS: &str = "/getWifiStatus";
pub const GET_CALENDAR_CONFIGS: &str = "/getCalendarConfigs";
pub const SET_WIFI: &str = "/setInfos-wifi";
pub const SET_TIME: &str = "/setTime";

pub fn output_state(output: u8) -> String {
    format!("/sortie-{}/getState", output)
}

pub fn set_output_state(output: u8) -> String {
    format!("/sortie-{}/setState", output)
}

pub fn save_state(output: u8) -> String {
    format!("/getSaveState/sortie-{}", output)
}

pub fn set_save_state(output: u8) -> String {
    format!("/save/sortie-{}", output)
}

pub fn calendar_task(output: u8, task: u8) -> String {
    format!("/sortie-{}/tache-{}", output, task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_embed_ids() {
        assert_eq!(output_state(2), "/sortie-2/getState");
        assert_eq!(set_output_state(1), "/sortie-1/setState");
        assert_eq!(save_state(1), "/getSaveState/sortie-1");
        assert_eq!(set_save_state(2), "/save/sortie-2");
        assert_eq!(calendar_task(2, 3), "/sortie-2/tache-3");
    }
}
