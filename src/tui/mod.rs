pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use app::{InputMode, Screen, SubmissionJob};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::JoinHandle;

/// A spawned submission and the session it belongs to
type PendingSubmit = (u64, JoinHandle<bool>);

pub async fn run_tui(mut app: App, client: Option<reqwest::Client>) -> anyhow::Result<()> {
    // Buffer log output while TUI is active to prevent it corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    // Submissions are never cancelled; a restart leaves the old one running
    let mut pending: Vec<PendingSubmit> = Vec::new();

    let mut result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
        }

        reap_finished(&mut app, &mut pending).await;

        // Spawn submission once per finished run
        if app.needs_submit {
            app.needs_submit = false;
            match (client.clone(), app.submission_job()) {
                (Some(client), Some(job)) => {
                    let session = job.session;
                    pending.push((session, tokio::spawn(submit(client, job))));
                }
                _ => {
                    tracing::debug!("Submission requested without client or job");
                    app.set_submission_result(app.session, false);
                }
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Let in-flight submissions finish before handing the terminal back
    if !pending.is_empty() {
        app.show_flash("Enviando reporte antes de salir...".to_string());
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            if result.is_ok() {
                result = Err(e.into());
            }
        }
        wait_for_pending(&mut app, pending).await;
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

async fn submit(client: reqwest::Client, job: SubmissionJob) -> bool {
    crate::submit::submit_report(
        &client,
        &job.submission,
        &job.respondent,
        &job.result,
        job.completed_at,
    )
    .await
}

async fn apply_outcome(app: &mut App, session: u64, handle: JoinHandle<bool>) {
    match handle.await {
        Ok(sent) => app.set_submission_result(session, sent),
        Err(e) => {
            tracing::warn!("Submission task failed: {}", e);
            app.set_submission_result(session, false);
        }
    }
}

/// Apply the results of submissions that have completed, keep the rest.
async fn reap_finished(app: &mut App, pending: &mut Vec<PendingSubmit>) {
    let (done, running): (Vec<_>, Vec<_>) = pending
        .drain(..)
        .partition(|(_, handle)| handle.is_finished());
    *pending = running;
    for (session, handle) in done {
        apply_outcome(app, session, handle).await;
    }
}

/// Wait for every outstanding submission to run to completion.
async fn wait_for_pending(app: &mut App, pending: Vec<PendingSubmit>) {
    for (session, handle) in pending {
        apply_outcome(app, session, handle).await;
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Help {
        // Any key exits help
        app.dismiss_help();
        return;
    }

    match app.screen {
        Screen::Intro => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.start(),
            KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        },
        Screen::Respondent => match key.code {
            KeyCode::Enter => app.confirm_respondent(),
            KeyCode::Esc => app.back_to_intro(),
            KeyCode::Tab | KeyCode::Down => app.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.form.previous_field(),
            KeyCode::Backspace => app.form.pop_char(),
            // Every printable character is text here, 'q' included
            KeyCode::Char(c) => app.form.push_char(c),
            _ => {}
        },
        Screen::Questionnaire => match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                app.set_answer(c as u8 - b'0');
            }
            KeyCode::Char('0') => app.set_answer(10),
            KeyCode::Right | KeyCode::Char('l') => app.increase_answer(),
            KeyCode::Left | KeyCode::Char('h') => app.decrease_answer(),
            KeyCode::Enter | KeyCode::Down => app.confirm_answer(),
            KeyCode::Backspace | KeyCode::Up | KeyCode::Esc => app.previous_question(),
            KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },
        Screen::Results => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
            KeyCode::Char('o') => {
                if let Err(e) = app.open_training() {
                    app.show_flash(format!("No se pudo abrir el navegador: {}", e));
                } else {
                    app.show_flash("Abriendo programas de formación".to_string());
                }
            }
            KeyCode::Char('s') => match app.save_report() {
                Ok(path) => app.show_flash(format!("Informe guardado en {}", path.display())),
                Err(e) => {
                    tracing::warn!("Failed to save report: {:#}", e);
                    app.show_flash(format!("No se pudo guardar el informe: {}", e));
                }
            },
            KeyCode::Char('r') => app.restart(),
            KeyCode::Char('?') => app.show_help(),
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use crate::scoring::AssessmentConfig;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(
            AssessmentConfig::default(),
            Settings::default(),
            ThemeColors::dark(),
            false,
        )
    }

    #[test]
    fn test_q_types_into_form() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Respondent);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.values[0], "q");
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = app();
        app.screen = Screen::Respondent;
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_digit_keys_set_answer() {
        let mut app = app();
        app.screen = Screen::Questionnaire;
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.current_answer(), Some(7));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.current_answer(), Some(10));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_question, 1);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        app.screen = Screen::Results;
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_restart_from_results() {
        let mut app = app();
        app.screen = Screen::Results;
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.screen, Screen::Intro);
        assert_eq!(app.session, 1);
    }

    fn slow_submission(done: Arc<AtomicBool>) -> JoinHandle<bool> {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            done.store(true, Ordering::SeqCst);
            true
        })
    }

    #[tokio::test]
    async fn test_restart_keeps_stale_submission_running() {
        let mut app = app();
        let done = Arc::new(AtomicBool::new(false));
        let mut pending = vec![(app.session, slow_submission(done.clone()))];

        app.restart();
        reap_finished(&mut app, &mut pending).await;
        assert_eq!(pending.len(), 1);

        while !pending[0].1.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        reap_finished(&mut app, &mut pending).await;

        assert!(pending.is_empty());
        assert!(done.load(Ordering::SeqCst));
        // Result belongs to the previous session and is discarded
        assert_eq!(app.submission, app::SubmissionStatus::Disabled);
    }

    #[tokio::test]
    async fn test_quit_waits_for_submission() {
        let mut app = app();
        app.screen = Screen::Results;
        app.submission = app::SubmissionStatus::Pending;
        let done = Arc::new(AtomicBool::new(false));
        let pending = vec![(app.session, slow_submission(done.clone()))];

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
        wait_for_pending(&mut app, pending).await;

        assert!(done.load(Ordering::SeqCst));
        assert_eq!(app.submission, app::SubmissionStatus::Sent);
    }
}
