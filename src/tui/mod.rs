mod input;
mod layout;
mod prompt;
mod results;
mod session;
pub mod state;
mod theme;
pub mod viewport;

use crate::config::Config;
use crate::package_manager::{
    Aggregator, AurClient, Installer, PackageManager, PacmanSearch, Query, ResultSet,
};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use prompt::PromptAction;
use ratatui::Frame;
use session::{InstallConsole, TerminalSession};
use state::{App, Screen, StatusKind};
use viewport::{Transition, Viewport};

type Searcher = Aggregator<PacmanSearch, AurClient>;

pub async fn run(config: Config) -> Result<()> {
    let cap = config.result_cap();
    let pm = PackageManager::detect(&config);
    let aggregator = Aggregator::new(
        PacmanSearch::new(pm.native(), cap),
        AurClient::new(config.registry_url.as_str(), config.request_timeout(), cap)?,
        config.source_order,
        cap,
    );
    let installer = Installer::new(pm);

    // 终端初始化
    let mut session = TerminalSession::enter()?;
    let mut app = App::new();

    let outcome = event_loop(&mut session, &mut app, &aggregator, &installer, &config).await;

    // 恢复终端（出错时也要恢复）
    let restored = session.leave();
    outcome.and(restored)
}

async fn event_loop(
    session: &mut TerminalSession,
    app: &mut App,
    aggregator: &Searcher,
    installer: &Installer,
    config: &Config,
) -> Result<()> {
    // 主循环：无后台任务，阻塞等待下一个事件
    while !app.should_quit {
        session.draw(|f| ui(f, app))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(_, height) => {
                if let Screen::Browse(viewport) = &mut app.screen {
                    viewport.set_page_size(layout::list_page_size(height));
                }
                continue;
            }
            _ => continue,
        };

        if is_ctrl_c(&key) {
            app.should_quit = true;
            continue;
        }

        if matches!(app.screen, Screen::Prompt) {
            match prompt::handle_prompt_key(key, app) {
                PromptAction::None => {}
                PromptAction::Quit => app.should_quit = true,
                PromptAction::Search(query) => {
                    let results = search(session, app, aggregator, &query).await?;
                    let page_size = layout::list_page_size(session.height()?);
                    show_results(app, results, &query, page_size, config.wrap_navigation);
                }
            }
            continue;
        }

        let Screen::Browse(viewport) = &mut app.screen else {
            continue;
        };
        let Some(action) = results::action_for(key) else {
            continue;
        };

        match viewport.handle(action) {
            Transition::Stay => {}
            Transition::Leave => app.back_to_prompt(),
            Transition::Install(result) => {
                app.back_to_prompt();
                let outcome = {
                    let mut console = InstallConsole::new(session, config.pause_after_install);
                    installer.install(&result, &mut console)
                };
                // install 内部已尝试恢复；失败时这里再试一次并上报
                session.resume()?;
                app.record_install(&outcome);
            }
        }
    }
    Ok(())
}

/// 先绘制等待界面，再同步完成两路搜索
async fn search(
    session: &mut TerminalSession,
    app: &mut App,
    aggregator: &Searcher,
    query: &Query,
) -> Result<ResultSet> {
    app.status = None;
    app.searching = Some(query.to_string());
    session.draw(|f| ui(f, app))?;
    let results = aggregator.aggregate(query).await;
    app.searching = None;
    Ok(results)
}

/// 结果为空时留在输入框并提示，否则进入浏览
fn show_results(app: &mut App, results: ResultSet, query: &Query, page_size: usize, wrap: bool) {
    let viewport = Viewport::open(results, page_size, wrap);
    if viewport.is_empty() {
        app.set_status(
            StatusKind::Info,
            format!("No results found for '{}'.", query),
        );
    } else {
        app.screen = Screen::Browse(viewport);
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn ui(f: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Prompt => prompt::render_prompt(f, app),
        Screen::Browse(viewport) => results::render_results(f, viewport),
    }
}
