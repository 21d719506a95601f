use anyhow::{bail, Context, Result};
use feedbrowser::app::{ApplyOutcome, BrowserStatus, FileBrowser, RowClick, ViewerIntent};
use feedbrowser::config::BrowserConfig;
use feedbrowser::core::formats::ViewerKind;
use feedbrowser::core::navigator::Anchor;
use feedbrowser::system::{FsListingSource, ListingWorker};
use feedbrowser::utils::display::pad_to_width;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const NAME_COLUMN_WIDTH: usize = 40;

const USAGE: &str = "usage: feedbrowser <root-dir> <plugin-name> <instance-id>";

const HELP: &str = "\
commands:
  ls               현재 목록 다시 표시
  crumb <index>    브레드크럼 이동 (0부터)
  root             앵커 루트로 이동
  open <row>       행 클릭 (폴더 이동 / 파일 선택)
  view image|alt   선택 파일을 뷰어로 열기
  close            미리보기 닫기
  help             도움말
  quit             종료";

/// 사용자 입력 명령
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Crumb(usize),
    Root,
    Open(usize),
    View(ViewerKind),
    Close,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let Some(words) = shlex::split(line) else {
        return Err("따옴표가 닫히지 않았습니다".to_string());
    };
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        ["ls"] => Command::List,
        ["crumb", index] => Command::Crumb(parse_index(index)?),
        ["root"] => Command::Root,
        ["open", row] => Command::Open(parse_index(row)?),
        ["view", "image"] => Command::View(ViewerKind::Image),
        ["view", "alt"] => Command::View(ViewerKind::Alternate),
        ["close"] => Command::Close,
        ["help" | "?"] => Command::Help,
        ["quit" | "q" | "exit"] => Command::Quit,
        _ => return Err(format!("알 수 없는 명령: {}", line.trim())),
    };
    Ok(Some(command))
}

fn parse_index(value: &str) -> std::result::Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("숫자가 아닙니다: {}", value))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<(String, Anchor)> {
    let [root, plugin_name, id] = args else {
        bail!(USAGE);
    };
    let id: u64 = id
        .parse()
        .with_context(|| format!("invalid instance id: {}", id))?;
    Ok((root.trim_end_matches('/').to_string(), Anchor::new(plugin_name.clone(), id)))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (root, anchor) = parse_args(&args)?;
    let config = BrowserConfig::load().context("failed to load config")?;

    let mut browser = FileBrowser::with_formats(anchor.clone(), config.file_formats());
    let mut worker = ListingWorker::new(Arc::new(FsListingSource::new()));

    worker.request(browser.navigate(format!("{}/{}", root, anchor)).path);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => handle_command(&mut browser, &mut worker, command),
                    Ok(None) => {}
                    Err(message) => println!("{}", message),
                }
            }
            Some(loaded) = worker.recv() => {
                if browser.apply_listing(loaded) != ApplyOutcome::Stale {
                    render(&browser);
                }
            }
        }
    }

    Ok(())
}

/// 명령 실행
fn handle_command(browser: &mut FileBrowser, worker: &mut ListingWorker, command: Command) {
    match command {
        Command::List => render(browser),
        Command::Crumb(index) => match browser.click_breadcrumb(index) {
            Some(request) => worker.request(request.path),
            None => println!("현재 위치입니다"),
        },
        Command::Root => match browser.navigate_root() {
            Some(request) => worker.request(request.path),
            None => println!("아직 목록이 없습니다"),
        },
        Command::Open(row) => match browser.click_row(row) {
            Ok(RowClick::Navigate(request)) => worker.request(request.path),
            Ok(RowClick::Selected(_)) => render_selection(browser),
            Err(err) => println!("{}", err),
        },
        Command::View(viewer) => match browser.open_viewer(viewer) {
            Ok(ViewerIntent::OpenImageViewer(file)) => {
                println!("-> image viewer: {}", file.fname);
            }
            Ok(ViewerIntent::OpenAlternateViewer { file, mode }) => {
                println!("-> alternate viewer ({}): {}", mode, file.fname);
            }
            Err(err) => println!("{}", err),
        },
        Command::Close => browser.dismiss_selection(),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

/// 브레드크럼 + 파일 테이블 출력
fn render(browser: &FileBrowser) {
    let crumbs: Vec<String> = browser
        .breadcrumbs()
        .iter()
        .map(|crumb| {
            if crumb.is_terminal {
                format!("[{}]", crumb.label)
            } else {
                format!("{}:{}", crumb.index, crumb.label)
            }
        })
        .collect();

    println!();
    println!("{} / {}", browser.anchor(), crumbs.join(" / "));
    println!("{}", browser.item_count_label());

    for (row, item) in browser.rows().iter().enumerate() {
        println!(
            "{:>4}  {} {}  {}",
            row,
            item.icon.glyph(),
            pad_to_width(&item.name, NAME_COLUMN_WIDTH),
            item.size.as_deref().unwrap_or("-")
        );
    }

    if let BrowserStatus::Failed { path, message } = browser.status() {
        println!("! {}: {}", path, message);
    }
    render_selection(browser);
}

/// 선택 파일과 사용 가능한 뷰어 출력
fn render_selection(browser: &FileBrowser) {
    let (Some(file), Some(affordances)) = (browser.selected_file(), browser.viewer_affordances())
    else {
        return;
    };

    println!("selected: {} ({} bytes)", file.fname, file.fsize);
    match affordances.message() {
        Some(message) => println!("  {}", message),
        None => {
            for viewer in affordances.viewers() {
                let hint = match viewer {
                    ViewerKind::Image => "view image",
                    ViewerKind::Alternate => "view alt",
                };
                println!("  {} ({})", viewer, hint);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("ls"), Ok(Some(Command::List)));
        assert_eq!(parse_command("  crumb 2 "), Ok(Some(Command::Crumb(2))));
        assert_eq!(parse_command("open 0"), Ok(Some(Command::Open(0))));
        assert_eq!(
            parse_command("view alt"),
            Ok(Some(Command::View(ViewerKind::Alternate)))
        );
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("open x").is_err());
        assert!(parse_command("crumb").is_err());
        assert!(parse_command("view 'image").is_err());
        assert!(parse_command("rm -rf").is_err());
    }

    #[test]
    fn test_parse_args() {
        let args: Vec<String> = ["/data/feed_1/", "pl-dircopy", "7"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (root, anchor) = parse_args(&args).unwrap();
        assert_eq!(root, "/data/feed_1");
        assert_eq!(anchor.to_string(), "pl-dircopy_7");

        assert!(parse_args(&args[..2]).is_err());
        let bad_id: Vec<String> = ["/data", "pl-dircopy", "seven"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(parse_args(&bad_id).is_err());
    }
}
