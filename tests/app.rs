mod common;

use common::{many_repos, repos_payload, MemorySource, StallingSource};
use gitrank_viewer::app::{dispatch, run, run_once, Command, Screen};
use gitrank_viewer::document::Document;
use gitrank_viewer::i18n::Lang;
use gitrank_viewer::models::Category;
use gitrank_viewer::render::render_document;
use gitrank_viewer::source::{DataSource, UPDATE_TIME_PATH};
use gitrank_viewer::view_model::{fetch_outcome, StalePolicy};
use gitrank_viewer::{LeaderboardViewModel, ViewerConfig};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct RecordingScreen {
    frames: Vec<Document>,
    notices: Vec<String>,
}

impl Screen for RecordingScreen {
    fn draw(&mut self, doc: &Document) {
        self.frames.push(doc.clone());
    }

    fn notice(&mut self, text: &str) {
        self.notices.push(text.to_string());
    }
}

fn viewer(category: Category) -> LeaderboardViewModel {
    LeaderboardViewModel::new(ViewerConfig {
        lang: Lang::En,
        items_per_page: 10,
        category,
        stale_policy: StalePolicy::LatestWins,
    })
    .unwrap()
}

#[test]
fn test_command_parsing() {
    assert_eq!("n".parse::<Command>().unwrap(), Command::Next);
    assert_eq!("prev".parse::<Command>().unwrap(), Command::Prev);
    assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    assert_eq!("help".parse::<Command>().unwrap(), Command::Help);
    assert_eq!("reload".parse::<Command>().unwrap(), Command::Reload);
    assert_eq!("size 50".parse::<Command>().unwrap(), Command::PageSize(50));
    assert_eq!("lang zh".parse::<Command>().unwrap(), Command::Lang(Lang::Zh));
    assert_eq!(
        "cat monthly_trending".parse::<Command>().unwrap(),
        Command::Category(Category::MonthlyTrending)
    );
    assert_eq!("5".parse::<Command>().unwrap(), Command::Category(Category::TopUsersList));

    assert!("size lots".parse::<Command>().is_err());
    assert!("lang fr".parse::<Command>().is_err());
    assert!("9".parse::<Command>().is_err());
    assert!("dance".parse::<Command>().is_err());
}

#[tokio::test]
async fn test_dispatch() {
    let source = MemorySource::new().with("data/top_repos_list.json", many_repos(30));
    let mut vm = viewer(Category::TopReposList);
    let ticket = vm.reload();
    let outcome = fetch_outcome(&source, ticket).await;
    vm.apply_load(ticket, outcome);

    assert!(dispatch(&mut vm, Command::Next).unwrap().is_none());
    assert_eq!(vm.pagination().current_page(), 2);
    assert!(dispatch(&mut vm, Command::Prev).unwrap().is_none());
    assert_eq!(vm.pagination().current_page(), 1);
    assert!(dispatch(&mut vm, Command::PageSize(0)).is_err());
    assert!(dispatch(&mut vm, Command::Lang(Lang::En)).unwrap().is_none());

    let ticket = dispatch(&mut vm, Command::Category(Category::WeeklyTrending))
        .unwrap()
        .expect("category switch loads");
    assert_eq!(ticket.category, Category::WeeklyTrending);
    assert_eq!(ticket.seq, vm.current_seq());
}

#[tokio::test]
async fn test_run_once() {
    let source = MemorySource::new().with("data/top_repos_list.json", repos_payload());
    let mut screen = RecordingScreen::default();

    let vm = run_once(viewer(Category::TopReposList), &source, &mut screen).await;

    assert_eq!(vm.dataset().len(), 2);
    assert_eq!(screen.frames.len(), 1);
    assert_eq!(screen.frames[0].list.items().len(), 2);
}

#[tokio::test]
async fn test_run_until_input_ends() {
    let source: Arc<dyn DataSource> =
        Arc::new(MemorySource::new().with("data/top_repos_list.json", repos_payload()));
    let mut screen = RecordingScreen::default();

    let vm = run(viewer(Category::TopReposList), source, &b""[..], &mut screen)
        .await
        .unwrap();

    assert_eq!(vm.dataset().len(), 2);
    let last = screen.frames.last().unwrap();
    assert_eq!(last.list.items().len(), 2);
}

#[tokio::test]
async fn test_run_draws_list_while_update_time_stalls() {
    let source: Arc<dyn DataSource> = Arc::new(StallingSource::new(
        MemorySource::new().with("data/top_repos_list.json", repos_payload()),
        UPDATE_TIME_PATH,
    ));
    let mut screen = RecordingScreen::default();

    // The loop keeps waiting on the stalled read, so it is cut off here.
    let finished = tokio::time::timeout(
        Duration::from_millis(500),
        run(viewer(Category::TopReposList), source, &b""[..], &mut screen),
    )
    .await;
    assert!(finished.is_err());

    let last = screen.frames.last().unwrap();
    assert_eq!(last.list.items().len(), 2);
    assert_eq!(last.user_count, "GitHub Registered Users: 42");
    assert_eq!(last.update_time, "Last updated: Loading data...");
}

#[tokio::test]
async fn test_run_applies_latest_request() {
    let source: Arc<dyn DataSource> = Arc::new(
        MemorySource::new()
            .with("data/top_repos_list.json", repos_payload())
            .with("data/top_users_list.json", r#"{"top_users": [{"login": "u", "url": "x"}]}"#),
    );
    let mut screen = RecordingScreen::default();
    let input = "bogus\nhelp\ncat top_users_list\nlang zh\n";

    let vm = run(viewer(Category::TopReposList), source, input.as_bytes(), &mut screen)
        .await
        .unwrap();

    assert_eq!(vm.lang(), Lang::Zh);
    assert_eq!(vm.category(), Category::TopUsersList);
    assert_eq!(vm.dataset().len(), 1);
    assert_eq!(screen.notices.len(), 2);
    assert!(screen.notices[0].starts_with("Configuration error: Unknown command"));
    assert!(screen.notices[1].starts_with("Commands:"));
}

#[tokio::test]
async fn test_render_document_text() {
    colored::control::set_override(false);
    let source = MemorySource::new()
        .with("data/daily_trending.json", many_repos(12))
        .with("data/update_time.txt", "2025-04-01");
    let mut screen = RecordingScreen::default();
    let vm = run_once(viewer(Category::DailyTrending), &source, &mut screen).await;

    let text = render_document(vm.document());
    assert!(text.starts_with("GitHub Legend Leaderboard\n"));
    assert!(text.contains("[1] 🔥Daily Trending"));
    assert!(text.contains("Last updated: 2025-04-01"));
    assert!(text.contains("   1. repo-1  https://github.com/o/repo-1"));
    assert!(text.contains("🌟Stars: 99,999   : "));
    assert!(text.contains("< Previous   Page 1 / 2   Next >"));
    assert!(text.contains("Data Source: GitHub API | Project Source"));
    assert!(text.contains("Last data fetch time: 2025-04-01"));
}

#[tokio::test]
async fn test_render_user_lines() {
    colored::control::set_override(false);
    let source = MemorySource::new().with(
        "data/top_users_list.json",
        r#"{"top_users": [{"login": "a", "name": "Ada", "url": "ua", "followersCount": 1500}]}"#,
    );
    let mut screen = RecordingScreen::default();
    let vm = run_once(viewer(Category::TopUsersList), &source, &mut screen).await;

    let text = render_document(vm.document());
    assert!(text.contains("   1. a (Ada)  ua\n      Followers: 1,500\n"));
    assert!(text.ends_with("Last data fetch time: N/A (Failed to fetch update time)\n"));
}
