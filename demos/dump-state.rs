use std::fs;
use std::io::Write;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use serde_json::json;

use espctl::pages::manual::OUTPUTS;

fn now() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("it's not the past")
        .as_millis()
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let unix_millis = now();
    let writer = fs::File::create(format!("state.{unix_millis}.jsonl.zstd"))?;
    let mut writer = zstd::Encoder::new(writer, 9)?;
    let client = espctl::Client::from_env()?;
    loop {
        let mut outputs = serde_json::Map::new();
        for n in OUTPUTS {
            // a failed read is recorded as null
            let state = client.output_state(n).await.ok();
            outputs.insert(n.to_string(), json!(state));
        }
        let record = json!({
            "time": client.time().await.ok(),
            "outputs": outputs,
        });
        writer.write_all(format!("{} ", now()).as_bytes())?;
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}
