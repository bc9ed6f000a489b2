use crate::core::widget::FeedWidget;
use crate::core::{Display, FeedSource, RequestCategory};
use crate::utils::error::{PollerError, Result};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "Commands: start | stop | cats | meats | status | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Select(RequestCategory),
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = PollerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        match input.as_str() {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => other
                .parse::<RequestCategory>()
                .map(Command::Select)
                .map_err(|_| PollerError::UnknownCommandError {
                    input: s.trim().to_string(),
                }),
        }
    }
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub async fn execute<S, D>(widget: &mut FeedWidget<S, D>, command: Command) -> Flow
where
    S: FeedSource + 'static,
    D: Display + 'static,
{
    match command {
        Command::Start => {
            tracing::info!("▶️ Start polling {}", widget.category());
            widget.start().await;
        }
        Command::Stop => {
            if widget.stop().await.is_none() {
                println!("Not polling");
            }
        }
        Command::Select(category) => {
            widget.select_category(category).await;
        }
        Command::Status => match widget.polling_category() {
            Some(category) if widget.is_polling() => {
                println!("Selected: {}, polling: {}", widget.category(), category)
            }
            _ => println!("Selected: {}, not polling", widget.category()),
        },
        Command::Help => println!("{}", HELP),
        Command::Quit => return Flow::Exit,
    }
    Flow::Continue
}

/// 讀取一行一個指令直到 quit 或輸入結束，離開前停止輪詢
pub async fn run_console<R, S, D>(widget: &mut FeedWidget<S, D>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: FeedSource + 'static,
    D: Display + 'static,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("{}", e);
                println!("{}", e.user_friendly_message());
                println!("{}", HELP);
                continue;
            }
        };

        if execute(widget, command).await == Flow::Exit {
            break;
        }
    }

    widget.stop().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::page::PageDisplay;
    use crate::core::poller::tests::MockSource;
    use crate::core::PollingStatus;
    use std::time::Duration;

    #[test]
    fn test_parse_commands() {
        assert_eq!("start".parse::<Command>().unwrap(), Command::Start);
        assert_eq!(" STOP ".parse::<Command>().unwrap(), Command::Stop);
        assert_eq!(
            "meats".parse::<Command>().unwrap(),
            Command::Select(RequestCategory::Meats)
        );
        assert_eq!(
            "cats".parse::<Command>().unwrap(),
            Command::Select(RequestCategory::Cats)
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(PollerError::UnknownCommandError { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_console_script_drives_widget() {
        let mut widget = FeedWidget::new(MockSource::new(), PageDisplay::new(), Duration::from_secs(5));
        let script = tokio_test::io::Builder::new()
            .read(b"meats\n")
            .read(b"bogus\n")
            .read(b"start\n")
            .build();

        run_console(&mut widget, tokio::io::BufReader::new(script))
            .await
            .unwrap();

        let page = widget.display().snapshot();
        assert!(page.text_visible);
        assert_eq!(page.status, PollingStatus::Stopped);
        assert!(!widget.is_polling());
        assert_eq!(widget.category(), RequestCategory::Meats);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_reading() {
        let mut widget = FeedWidget::new(MockSource::new(), PageDisplay::new(), Duration::from_secs(5));
        let script: &[u8] = b"quit\nmeats\n";

        run_console(&mut widget, script).await.unwrap();

        assert_eq!(widget.category(), RequestCategory::Cats);
        assert_eq!(widget.display().snapshot().status, PollingStatus::Idle);
    }
}
