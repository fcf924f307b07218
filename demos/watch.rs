use std::time::Duration;

use anyhow::Result;
use espctl::pages::home::HomePage;
use espctl::pages::manual::ManualPage;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let client = espctl::Client::from_env()?;
    let home = HomePage::open(client.clone()).await;
    let manual = ManualPage::open(client).await;

    loop {
        let clock = home.snapshot().await;
        let mut line = format!(
            "{}-{}-{} {}:{}:{} wifi={}",
            clock.year,
            clock.month,
            clock.day,
            clock.hour,
            clock.minute,
            clock.second,
            clock.network.label()
        );
        for panel in manual.panels() {
            let view = panel.snapshot().await;
            line.push_str(&format!(" sortie{}={}", panel.output(), view.state_label));
        }
        println!("{}", line);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
