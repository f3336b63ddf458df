use crate::config::{Settings, SubmissionConfig};
use crate::respondent::{validate_respondent, FieldError, RespondentField, RespondentInfo};
use crate::scoring::{AssessmentConfig, TestResult, MAX_ANSWER, MIN_ANSWER};
use crate::tui::theme::ThemeColors;
use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;
use std::time::Instant;

/// Value preselected when a question is first adjusted with the arrow keys
const STARTING_ANSWER: u8 = 5;

/// Screens of the assessment, visited in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Respondent,
    Questionnaire,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// No endpoint configured or `--no-submit`
    Disabled,
    Pending,
    Sent,
    Failed,
}

/// What the Results screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Scored(TestResult),
    /// Scoring refused the answers; the message is shown instead of a result
    Failed(String),
}

/// Everything the background submission task needs, detached from `App`
#[derive(Debug, Clone)]
pub struct SubmissionJob {
    pub session: u64,
    pub submission: SubmissionConfig,
    pub respondent: RespondentInfo,
    pub result: TestResult,
    pub completed_at: DateTime<Utc>,
}

/// Text inputs of the respondent form, in `RespondentField::ALL` order
#[derive(Debug, Clone, Default)]
pub struct RespondentForm {
    pub values: [String; 6],
    pub focused: usize,
    pub errors: Vec<FieldError>,
}

impl RespondentForm {
    pub fn focused_field(&self) -> RespondentField {
        RespondentField::ALL[self.focused]
    }

    pub fn value(&self, field: RespondentField) -> &str {
        &self.values[Self::index_of(field)]
    }

    pub fn error_for(&self, field: RespondentField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.values.len();
    }

    pub fn previous_field(&mut self) {
        self.focused = if self.focused == 0 {
            self.values.len() - 1
        } else {
            self.focused - 1
        };
    }

    /// Type into the focused field. Editing a field clears its error.
    pub fn push_char(&mut self, c: char) {
        let field = self.focused_field();
        self.values[self.focused].push(c);
        self.errors.retain(|e| e.field != field);
    }

    pub fn pop_char(&mut self) {
        let field = self.focused_field();
        self.values[self.focused].pop();
        self.errors.retain(|e| e.field != field);
    }

    pub fn to_info(&self) -> RespondentInfo {
        let phone = self.value(RespondentField::Phone);
        RespondentInfo {
            name: self.value(RespondentField::Name).to_string(),
            company: self.value(RespondentField::Company).to_string(),
            role: self.value(RespondentField::Role).to_string(),
            country: self.value(RespondentField::Country).to_string(),
            email: self.value(RespondentField::Email).to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        }
    }

    fn index_of(field: RespondentField) -> usize {
        RespondentField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0)
    }
}

pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub assessment: AssessmentConfig,
    pub settings: Settings,
    pub theme: ThemeColors,
    pub form: RespondentForm,
    pub respondent: Option<RespondentInfo>,
    pub answers: Vec<Option<u8>>,
    pub current_question: usize,
    pub outcome: Option<Outcome>,
    pub completed_at: Option<DateTime<Local>>,
    pub submit_enabled: bool,
    pub submission: SubmissionStatus,
    pub needs_submit: bool,
    /// Bumped on restart so a late submission result can't leak into a new run
    pub session: u64,
    pub results_scroll: u16,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub spinner_frame: usize,
}

impl App {
    pub fn new(
        assessment: AssessmentConfig,
        settings: Settings,
        theme: ThemeColors,
        submit_enabled: bool,
    ) -> Self {
        let answers = vec![None; assessment.question_count()];
        Self {
            screen: Screen::Intro,
            input_mode: InputMode::Normal,
            assessment,
            settings,
            theme,
            form: RespondentForm::default(),
            respondent: None,
            answers,
            current_question: 0,
            outcome: None,
            completed_at: None,
            submit_enabled,
            submission: SubmissionStatus::Disabled,
            needs_submit: false,
            session: 0,
            results_scroll: 0,
            flash_message: None,
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Intro -> Respondent
    pub fn start(&mut self) {
        if self.screen == Screen::Intro {
            self.screen = Screen::Respondent;
        }
    }

    /// Respondent -> Intro, keeping what was typed
    pub fn back_to_intro(&mut self) {
        if self.screen == Screen::Respondent {
            self.screen = Screen::Intro;
        }
    }

    /// Validate the form; on success store the normalized respondent and move
    /// on to the questionnaire, otherwise focus the first invalid field.
    pub fn confirm_respondent(&mut self) {
        let info = self.form.to_info();
        match validate_respondent(&info) {
            Ok(()) => {
                self.form.errors.clear();
                self.respondent = Some(info.normalized());
                self.current_question = 0;
                self.screen = Screen::Questionnaire;
            }
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.form.focused = RespondentForm::index_of(first.field);
                }
                self.show_flash(format!("Revisa el formulario ({} errores)", errors.len()));
                self.form.errors = errors;
            }
        }
    }

    pub fn current_answer(&self) -> Option<u8> {
        self.answers.get(self.current_question).copied().flatten()
    }

    pub fn set_answer(&mut self, value: u8) {
        if let Some(slot) = self.answers.get_mut(self.current_question) {
            *slot = Some(value.clamp(MIN_ANSWER, MAX_ANSWER));
        }
    }

    pub fn increase_answer(&mut self) {
        let next = match self.current_answer() {
            Some(v) => (v + 1).min(MAX_ANSWER),
            None => STARTING_ANSWER,
        };
        self.set_answer(next);
    }

    pub fn decrease_answer(&mut self) {
        let next = match self.current_answer() {
            Some(v) => v.saturating_sub(1).max(MIN_ANSWER),
            None => STARTING_ANSWER,
        };
        self.set_answer(next);
    }

    /// Accept the current answer and advance; the last question finishes the run.
    pub fn confirm_answer(&mut self) {
        if self.current_answer().is_none() {
            self.show_flash("Elige un valor del 1 al 10".to_string());
            return;
        }
        if self.current_question + 1 >= self.answers.len() {
            self.finish();
        } else {
            self.current_question += 1;
        }
    }

    /// Go back one question, or to the form from the first one
    pub fn previous_question(&mut self) {
        if self.current_question == 0 {
            self.screen = Screen::Respondent;
        } else {
            self.current_question -= 1;
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Score the collected answers and show the results.
    ///
    /// A scoring failure is logged and shown as a terminal error state.
    pub fn finish(&mut self) {
        let answers: Option<Vec<u8>> = self.answers.iter().copied().collect();
        let outcome = match answers {
            Some(answers) => match crate::scoring::score(&answers, &self.assessment) {
                Ok(result) => Outcome::Scored(result),
                Err(e) => {
                    tracing::error!("Scoring failed: {}", e);
                    Outcome::Failed(e.to_string())
                }
            },
            None => {
                tracing::error!(
                    "Scoring requested with {} of {} answers",
                    self.answered_count(),
                    self.answers.len()
                );
                Outcome::Failed("Faltan respuestas".to_string())
            }
        };

        let scored = matches!(outcome, Outcome::Scored(_));
        self.outcome = Some(outcome);
        self.completed_at = Some(Local::now());
        self.results_scroll = 0;
        self.screen = Screen::Results;

        if scored && self.submit_enabled && self.settings.submission.is_some() {
            self.submission = SubmissionStatus::Pending;
            self.needs_submit = true;
        } else {
            self.submission = SubmissionStatus::Disabled;
        }
    }

    pub fn result(&self) -> Option<&TestResult> {
        match &self.outcome {
            Some(Outcome::Scored(result)) => Some(result),
            _ => None,
        }
    }

    /// Snapshot for the background submission task
    pub fn submission_job(&self) -> Option<SubmissionJob> {
        Some(SubmissionJob {
            session: self.session,
            submission: self.settings.submission.clone()?,
            respondent: self.respondent.clone()?,
            result: self.result()?.clone(),
            completed_at: self.completed_at?.with_timezone(&Utc),
        })
    }

    /// Record the submission outcome for `session`; stale sessions are ignored.
    pub fn set_submission_result(&mut self, session: u64, sent: bool) {
        if session != self.session {
            tracing::debug!("Ignoring submission result from session {}", session);
            return;
        }
        if sent {
            self.submission = SubmissionStatus::Sent;
            self.show_flash("Informe enviado".to_string());
        } else {
            self.submission = SubmissionStatus::Failed;
            self.show_flash("Error al enviar el informe; tus resultados siguen disponibles".to_string());
        }
    }

    /// Plain-text report for the finished run
    pub fn report_text(&self) -> Option<String> {
        let respondent = self.respondent.as_ref()?;
        let result = self.result()?;
        let completed_at = self.completed_at?;
        Some(crate::report::generate_report_text(
            respondent,
            result,
            &self.settings.contact,
            completed_at.naive_local(),
        ))
    }

    /// Save the report under the reports directory and return its path
    pub fn save_report(&self) -> anyhow::Result<PathBuf> {
        let text = self
            .report_text()
            .ok_or_else(|| anyhow::anyhow!("No hay resultado para guardar"))?;
        let completed_at = self.completed_at.unwrap_or_else(Local::now);
        let path = crate::report::get_reports_dir()?
            .join(crate::report::report_file_name(completed_at.naive_local()));
        crate::report::save_report(&path, &text)?;
        Ok(path)
    }

    /// Open the training programs page in the browser
    pub fn open_training(&self) -> anyhow::Result<()> {
        crate::browser::open_url(&self.settings.contact.training_programs_url)
    }

    /// Discard answers, respondent and result and return to the intro.
    pub fn restart(&mut self) {
        self.session = self.session.wrapping_add(1);
        self.screen = Screen::Intro;
        self.input_mode = InputMode::Normal;
        self.form = RespondentForm::default();
        self.respondent = None;
        self.answers = vec![None; self.assessment.question_count()];
        self.current_question = 0;
        self.outcome = None;
        self.completed_at = None;
        self.submission = SubmissionStatus::Disabled;
        self.needs_submit = false;
        self.results_scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        let max = self
            .result()
            .map(|r| r.recommendations.len().saturating_sub(1) as u16)
            .unwrap_or(0);
        self.results_scroll = (self.results_scroll + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Advance the spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}
