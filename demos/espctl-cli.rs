use anyhow::{anyhow, bail, Context, Result};
use espctl::notifier::Notifier;
use espctl::pages::calendar::{CalendarPage, Listing};
use espctl::pages::home::HomePage;
use espctl::pages::manual::ManualPage;
use espctl::pages::settings::{Section, SettingsPage};

const HELP: &str = "\
time | date | wifi
state N | toggle N
save N on|off | calendar
task N T HH:MM HH:MM
set-wifi SSID PASSWORD | set-time HH:MM";

fn print_message(notifier: &Notifier) {
    if let Some(feedback) = notifier.current() {
        println!("[{:?}] {}", feedback.tone, feedback.text);
    }
}

fn number(arg: Option<&&str>) -> Result<u8> {
    let arg = arg.ok_or_else(|| anyhow!("missing number\n{}", HELP))?;
    arg.parse().with_context(|| format!("not a number: {:?}", arg))
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let client = espctl::Client::from_env()?;
    println!("Talking to {}", client.base_url());

    let mut home = HomePage::open(client.clone()).await;
    let mut manual = ManualPage::open(client.clone()).await;
    let mut calendar = CalendarPage::open(client.clone(), espctl::pages::manual::OUTPUTS[0]).await;
    let mut settings = SettingsPage::open(client);

    let mut rl = rustyline::Editor::<()>::new()?;
    loop {
        let command = rl.readline(">> ")?;
        if command.is_empty() {
            break;
        };
        rl.add_history_entry(command.as_str());
        let parts = command.split_whitespace().collect::<Vec<_>>();
        match parts.as_slice() {
            ["time"] => {
                let _ = home.refresh_time().await;
                let view = home.snapshot().await;
                println!("{}:{}:{}", view.hour, view.minute, view.second);
            }
            ["date"] => {
                home.refresh_date_and_status().await;
                let view = home.snapshot().await;
                println!("{}-{}-{}", view.year, view.month, view.day);
            }
            ["wifi"] => {
                home.refresh_date_and_status().await;
                println!("{}", home.snapshot().await.network.label());
            }
            ["state", n] | ["toggle", n] => {
                let n = number(Some(n))?;
                let panel = match manual.panel(n) {
                    Some(panel) => panel,
                    None => {
                        println!("no output {}", n);
                        continue;
                    }
                };
                if parts[0] == "toggle" {
                    let _ = panel.toggle().await;
                }
                let view = panel.snapshot().await;
                println!("sortie {}: {} [{}]", n, view.state_label, view.button_label);
                print_message(&view.message);
            }
            ["save", n, choice] => {
                let save = match *choice {
                    "on" => true,
                    "off" => false,
                    _ => bail!("save takes on or off"),
                };
                let _ = calendar.select_output(number(Some(n))?).await;
                let _ = calendar.submit_save(save).await;
                println!("save: [{}]", calendar.view().save_label);
                print_message(&calendar.view().save_message);
            }
            ["calendar"] => {
                let _ = calendar.refresh_configs().await;
                match &calendar.view().listing {
                    Listing::Outputs(cards) => {
                        for card in cards {
                            println!("{}", card.title);
                            for line in &card.lines {
                                println!("  {}", line);
                            }
                        }
                    }
                    other => println!("{}", other.placeholder().unwrap_or_default()),
                }
            }
            ["task", n, t, on, off] => {
                let _ = calendar.select_output(number(Some(n))?).await;
                let _ = calendar.submit_task(number(Some(t))?, on, off).await;
                print_message(&calendar.view().calendar_message);
            }
            ["set-wifi", ssid, password] => {
                settings.show(Section::Wifi);
                let _ = settings.submit_wifi(ssid, password).await;
                print_message(&settings.view().wifi_message);
            }
            ["set-time", input] => {
                settings.show(Section::Time);
                let _ = settings.submit_time(input).await;
                print_message(&settings.view().time_message);
            }
            _ => println!("{}", HELP),
        }
    }

    home.close();
    manual.close();

    Ok(())
}
