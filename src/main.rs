use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use lessonview::app::{App, Focus};
use lessonview::config::Config;
use lessonview::event::{AppEvent, EventHandler};
use lessonview::ui::components::code_area::CodeAreaWidget;
use lessonview::ui::components::console_pane::ConsolePaneWidget;
use lessonview::ui::components::doc_pane::DocPaneWidget;
use lessonview::ui::components::editor_area::EditorAreaWidget;
use lessonview::ui::components::info_banner::InfoBannerWidget;
use lessonview::ui::components::pager_bar::PagerBar;
use lessonview::ui::layout::{LessonLayout, pack_hint_lines};
use lessonview::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "lessonview", version, about = "Terminal lesson viewer")]
struct Cli {
    #[arg(short, long, help = "Chapter id to open")]
    chapter: Option<String>,

    #[arg(short, long, help = "Section id within the chapter")]
    section: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory with toc.json and <chapter>.toml lesson files")]
    lessons_dir: Option<PathBuf>,

    #[arg(long, help = "Start with the editor panel turned off")]
    no_editor: bool,

    #[arg(long, help = "Start with the console panel turned off")]
    no_console: bool,

    #[arg(long, help = "Print the resulting view as JSON instead of opening the UI")]
    dump: bool,

    #[arg(short, long, help = "Write debug logs (to stderr with --dump, otherwise to the cache dir)")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.dump)?;

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("using default config: {e:#}");
        Config::default()
    });
    if let Some(dir) = cli.lessons_dir {
        config.lessons_dir = Some(dir.to_string_lossy().to_string());
    }
    if cli.no_editor {
        config.show_editor = false;
    }
    if cli.no_console {
        config.show_console = false;
    }
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }
    config.validate();

    let theme = Theme::load(&config.theme).unwrap_or_default();
    let mut app = App::new(config, theme)?;
    app.start(cli.chapter.as_deref(), cli.section.as_deref())?;

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&app.controller.snapshot())?);
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(verbose: bool, dump: bool) -> Result<()> {
    if dump {
        env_logger::Builder::from_default_env()
            .filter_level(if verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            })
            .init();
        return Ok(());
    }
    if !verbose {
        return Ok(());
    }

    // The terminal belongs to the UI, so logs go to a file.
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lessonview");
    fs::create_dir_all(&dir)?;
    let path = dir.join("lessonview.log");
    let file = File::create(&path).with_context(|| format!("failed to open {}", path.display()))?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) if app.focus == Focus::Editor => {
                for ch in text.chars() {
                    match ch {
                        '\n' => app.editor.newline(),
                        '\r' => {}
                        _ => app.editor.insert(ch),
                    }
                }
            }
            AppEvent::Paste(_) | AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.focus {
        Focus::Document => handle_document_key(app, key),
        Focus::Editor => handle_editor_key(app, key),
    }
}

fn handle_document_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => app.next(),
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => app.prev(),
        KeyCode::Home | KeyCode::Char('g') => app.overview(),
        KeyCode::Char(ch @ ('e' | 'c')) => app.toggle_setting(ch),
        KeyCode::Tab => app.focus_editor(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_doc(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_doc(-1),
        KeyCode::PageDown => app.scroll_doc(10),
        KeyCode::PageUp => app.scroll_doc(-10),
        _ => {}
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Esc => app.focus = Focus::Document,
        KeyCode::Enter => app.editor.newline(),
        KeyCode::Backspace => app.editor.backspace(),
        KeyCode::Char(ch) => app.editor.insert(ch),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    let layout = LessonLayout::new(area, app.panel_flags());
    let surface = app.controller.surface();
    let pager = app.controller.pager();
    let pager = pager.borrow();
    let toc = app.controller.toc();

    frame.render_widget(InfoBannerWidget::new(&surface.info, &app.theme), layout.banner);
    frame.render_widget(PagerBar::new(&pager, toc, &app.theme), layout.top_pager);

    let doc = DocPaneWidget::new(&surface.doc, app.controller.setting(), &app.theme)
        .scroll(app.doc_scroll);
    frame.render_widget(doc, layout.doc);

    if let Some(code_rect) = layout.code {
        frame.render_widget(CodeAreaWidget::new(&surface.code_area, &app.theme), code_rect);
    }
    if let Some(editor_rect) = layout.editor {
        let editor = EditorAreaWidget::new(&app.editor, app.focus == Focus::Editor, &app.theme);
        frame.render_widget(editor, editor_rect);
    }
    if let Some(console_rect) = layout.console {
        let console = app.controller.console();
        let console = console.borrow();
        frame.render_widget(ConsolePaneWidget::new(console.lines(), &app.theme), console_rect);
    }

    frame.render_widget(PagerBar::new(&pager, toc, &app.theme), layout.bottom_pager);

    let footer = match app.status {
        Some(ref message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors.error()),
        )),
        None => {
            let hints = match app.focus {
                Focus::Document => vec![
                    "[←/→] Page",
                    "[g] Overview",
                    "[e] Editor",
                    "[c] Console",
                    "[Tab] Edit",
                    "[q] Quit",
                ],
                Focus::Editor => vec!["[Tab/Esc] Back to document"],
            };
            let packed = pack_hint_lines(&hints, layout.footer.width as usize);
            Line::from(Span::styled(
                packed.into_iter().next().unwrap_or_default(),
                Style::default().fg(colors.dim()),
            ))
        }
    };
    frame.render_widget(Paragraph::new(footer), layout.footer);
}
